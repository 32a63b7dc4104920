//! `/apikeys` endpoints.
use std::sync::Arc;

use log::debug;
use reqwest::Method;

use super::path_with;
use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{CreateApiKeyRequest, JsonMap};

#[derive(Debug, Clone)]
pub struct ApiKeys {
    http: Arc<HttpClient>,
}

impl ApiKeys {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// GET /apikeys
    pub async fn list(&self) -> Result<Vec<JsonMap>, ClientError> {
        debug!("api_keys.list");
        self.http
            .execute(Method::GET, "/apikeys", &[], None, None)
            .await?
            .into_data()
    }

    /// POST /apikeys - Create a key. The secret is only returned here.
    pub async fn create(&self, request: &CreateApiKeyRequest) -> Result<JsonMap, ClientError> {
        debug!(
            "api_keys.create name={} scopes={:?} expires_at={:?}",
            request.name, request.scopes, request.expires_at
        );
        let body = serde_json::to_value(request)?;
        self.http
            .execute(Method::POST, "/apikeys", &[], Some(&body), None)
            .await?
            .into_data()
    }

    /// DELETE /apikeys/{key_id}
    pub async fn revoke(&self, key_id: &str) -> Result<(), ClientError> {
        debug!("api_keys.revoke key_id={}", key_id);
        self.http
            .execute(Method::DELETE, &path_with("/apikeys", key_id), &[], None, None)
            .await?;
        Ok(())
    }
}
