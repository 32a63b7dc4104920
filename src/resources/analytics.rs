//! `/analytics` endpoints.
use std::sync::Arc;

use log::debug;
use reqwest::Method;

use crate::errors::ClientError;
use crate::http::{HttpClient, Query};
use crate::models::{is_blank, JsonMap, UsageParams};

#[derive(Debug, Clone)]
pub struct Analytics {
    http: Arc<HttpClient>,
}

impl Analytics {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// GET /analytics/usage - Usage statistics, optionally windowed.
    pub async fn usage(&self, params: &UsageParams) -> Result<JsonMap, ClientError> {
        debug!(
            "analytics.usage start={:?} end={:?} metric={:?}",
            params.start, params.end, params.metric
        );
        let query: Query = [
            ("start", &params.start),
            ("end", &params.end),
            ("metric", &params.metric),
        ]
        .into_iter()
        .filter(|(_, value)| !is_blank(value))
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect();
        self.http
            .execute(Method::GET, "/analytics/usage", &query, None, None)
            .await?
            .into_data()
    }

    /// GET /analytics/metrics - Performance metrics.
    pub async fn metrics(&self) -> Result<JsonMap, ClientError> {
        debug!("analytics.metrics");
        self.http
            .execute(Method::GET, "/analytics/metrics", &[], None, None)
            .await?
            .into_data()
    }
}
