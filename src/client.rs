//! High-level client: the primary entry point for SDK users.
//!
//! Owns the configuration and a single [`HttpClient`], and exposes one
//! handle per resource group.
use std::sync::Arc;

use log::debug;

use crate::config::SdkConfig;
use crate::crypto;
use crate::errors::{codes, ClientError};
use crate::http::HttpClient;
use crate::resources::{Analytics, ApiKeys, Generation, Posts, Subscriptions, Webhooks};

/// The AI Auto News API client.
///
/// Cheap to clone; clones share the connection pool. Safe to use from many
/// tasks at once.
#[derive(Debug, Clone)]
pub struct AiAutoNewsClient {
    http: Arc<HttpClient>,
    pub posts: Posts,
    pub generate: Generation,
    pub analytics: Analytics,
    pub subscriptions: Subscriptions,
    pub api_keys: ApiKeys,
    pub webhooks: Webhooks,
}

impl AiAutoNewsClient {
    /// Create a client from an [`SdkConfig`] or a raw API key.
    ///
    /// ```rust,no_run
    /// use std::time::Duration;
    /// use ai_auto_news::{AiAutoNewsClient, SdkConfig};
    ///
    /// # fn main() -> Result<(), ai_auto_news::ClientError> {
    /// let simple = AiAutoNewsClient::new("sk-live-...")?;
    /// let tuned = AiAutoNewsClient::new(
    ///     SdkConfig::new("sk-live-...")
    ///         .with_timeout(Duration::from_secs(10))
    ///         .with_retries(5),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: impl Into<SdkConfig>) -> Result<Self, ClientError> {
        let config = config.into();
        if config.api_key.trim().is_empty() {
            return Err(ClientError::with_code(
                "API key must not be empty",
                codes::INVALID_CONFIG,
            ));
        }
        debug!(
            "client.new base_url={} version={} retries={} timeout_ms={}",
            config.base_url,
            config.version,
            config.retries,
            config.timeout.as_millis()
        );
        let http = Arc::new(HttpClient::new(config)?);
        Ok(Self {
            posts: Posts::new(http.clone()),
            generate: Generation::new(http.clone()),
            analytics: Analytics::new(http.clone()),
            subscriptions: Subscriptions::new(http.clone()),
            api_keys: ApiKeys::new(http.clone()),
            webhooks: Webhooks::new(http.clone()),
            http,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        self.http.config()
    }

    /// The underlying executor, for endpoints without a typed wrapper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Check a webhook delivery against its shared secret.
    ///
    /// See [`crypto::verify_webhook_signature`].
    pub fn verify_webhook_signature(
        payload: impl AsRef<[u8]>,
        signature: &str,
        secret: &str,
    ) -> bool {
        crypto::verify_webhook_signature(payload, signature, secret)
    }
}

/// Create a client with default settings for `api_key`.
pub fn create_client(api_key: impl Into<String>) -> Result<AiAutoNewsClient, ClientError> {
    AiAutoNewsClient::new(SdkConfig::new(api_key))
}
