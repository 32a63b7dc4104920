//! `/subscriptions` endpoints.
use std::sync::Arc;

use log::debug;
use reqwest::Method;

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{JsonMap, UpgradeRequest};

#[derive(Debug, Clone)]
pub struct Subscriptions {
    http: Arc<HttpClient>,
}

impl Subscriptions {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// GET /subscriptions/current - The caller's current subscription.
    pub async fn get(&self) -> Result<JsonMap, ClientError> {
        debug!("subscriptions.get");
        self.http
            .execute(Method::GET, "/subscriptions/current", &[], None, None)
            .await?
            .into_data()
    }

    /// POST /subscriptions/upgrade - Move to another tier.
    pub async fn upgrade(&self, tier: &str) -> Result<JsonMap, ClientError> {
        debug!("subscriptions.upgrade tier={}", tier);
        let body = serde_json::to_value(UpgradeRequest {
            tier: tier.to_string(),
        })?;
        self.http
            .execute(Method::POST, "/subscriptions/upgrade", &[], Some(&body), None)
            .await?
            .into_data()
    }

    /// POST /subscriptions/cancel
    pub async fn cancel(&self) -> Result<(), ClientError> {
        debug!("subscriptions.cancel");
        self.http
            .execute(Method::POST, "/subscriptions/cancel", &[], None, None)
            .await?;
        Ok(())
    }
}
