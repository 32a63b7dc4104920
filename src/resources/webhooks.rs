//! `/webhooks` endpoints.
use std::sync::Arc;

use log::debug;
use reqwest::Method;

use super::path_with;
use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{CreateWebhookRequest, JsonMap};

#[derive(Debug, Clone)]
pub struct Webhooks {
    http: Arc<HttpClient>,
}

impl Webhooks {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// GET /webhooks
    pub async fn list(&self) -> Result<Vec<JsonMap>, ClientError> {
        debug!("webhooks.list");
        self.http
            .execute(Method::GET, "/webhooks", &[], None, None)
            .await?
            .into_data()
    }

    /// POST /webhooks - Register an endpoint for the given events.
    pub async fn create(&self, request: &CreateWebhookRequest) -> Result<JsonMap, ClientError> {
        // The secret stays out of the log line.
        debug!(
            "webhooks.create url={} events={:?} has_secret={}",
            request.url,
            request.events,
            request.secret.is_some()
        );
        let body = serde_json::to_value(request)?;
        self.http
            .execute(Method::POST, "/webhooks", &[], Some(&body), None)
            .await?
            .into_data()
    }

    /// DELETE /webhooks/{webhook_id}
    pub async fn delete(&self, webhook_id: &str) -> Result<(), ClientError> {
        debug!("webhooks.delete webhook_id={}", webhook_id);
        self.http
            .execute(Method::DELETE, &path_with("/webhooks", webhook_id), &[], None, None)
            .await?;
        Ok(())
    }
}
