//! `/generate` endpoints.
use std::sync::Arc;

use log::debug;
use reqwest::Method;

use super::path_with;
use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{GenerateRequest, JsonMap, Post};

#[derive(Debug, Clone)]
pub struct Generation {
    http: Arc<HttpClient>,
}

impl Generation {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// POST /generate - Generate a post from a topic.
    pub async fn create(&self, request: &GenerateRequest) -> Result<Post, ClientError> {
        debug!(
            "generate.create topic={} type={} urgency={:?}",
            request.topic,
            request.content_type.as_str(),
            request.urgency.map(|u| u.as_str())
        );
        let body = serde_json::to_value(request)?;
        self.http
            .execute(Method::POST, "/generate", &[], Some(&body), None)
            .await?
            .into_data()
    }

    /// GET /generate/{job_id} - Status of a generation job.
    pub async fn status(&self, job_id: &str) -> Result<JsonMap, ClientError> {
        debug!("generate.status job_id={}", job_id);
        self.http
            .execute(Method::GET, &path_with("/generate", job_id), &[], None, None)
            .await?
            .into_data()
    }
}
