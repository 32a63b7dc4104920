//! Request executor for the AI Auto News API.
//!
//! Builds URLs, layers headers, runs one HTTP round trip per attempt and
//! applies the retry policy:
//!
//! - transport failures and 5xx responses are retried with exponential
//!   backoff (`backoff_base * 2^attempt`) until the attempt budget runs out,
//!   then surface as a `request_failed` error wrapping the last failure;
//! - 4xx responses and undecodable success bodies end the loop at once and
//!   surface with their own code and message.
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::config::SdkConfig;
use crate::envelope::{decode_failure, decode_success, ApiResponse};
use crate::errors::{codes, ClientError};

/// Query pairs for a request. Values are URL-encoded when the URL is built.
pub type Query = Vec<(&'static str, String)>;

/// Shared HTTP executor. One instance (and one connection pool) per client.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: SdkConfig,
    headers: HeaderMap,
}

impl HttpClient {
    /// Create an executor for the given configuration.
    ///
    /// Fails if the base URL does not parse or a configured header is not
    /// valid HTTP.
    pub fn new(config: SdkConfig) -> Result<Self, ClientError> {
        Url::parse(&config.api_root())?;
        let headers = default_headers(&config)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ClientError::with_code(
                    format!("Failed to build HTTP client: {e}"),
                    codes::INVALID_CONFIG,
                )
            })?;
        Ok(Self {
            client,
            config,
            headers,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Full URL for `path` with `query` appended.
    pub fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}{}", self.config.api_root(), path))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Merge per-call headers over the client's headers. Per-call wins.
    pub fn merge_headers(&self, extra: Option<&HeaderMap>) -> HeaderMap {
        let mut merged = self.headers.clone();
        if let Some(extra) = extra {
            for (name, value) in extra {
                merged.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    /// Execute a request with retries and decode the response envelope.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.build_url(path, query)?;
        let headers = self.merge_headers(headers);
        let attempts = self.config.retries.max(1);
        debug!(
            "http.execute method={} path={} query_len={} has_body={} attempts={}",
            method,
            path,
            query.len(),
            body.is_some(),
            attempts
        );

        let mut last_error = None;
        for attempt in 0..attempts {
            match self
                .send_once(method.clone(), url.clone(), headers.clone(), body)
                .await
            {
                Ok(response) => {
                    debug!(
                        "http.execute ok method={} path={} attempt={} request_id={:?}",
                        method,
                        path,
                        attempt + 1,
                        response.request_id()
                    );
                    return Ok(response);
                }
                Err(err) if !err.is_retryable() => {
                    debug!(
                        "http.execute non_retryable method={} path={} attempt={} class={} status={:?} code={}",
                        method,
                        path,
                        attempt + 1,
                        err.class(),
                        err.status,
                        err.code
                    );
                    return Err(err);
                }
                Err(err) => {
                    debug!(
                        "http.execute retryable method={} path={} attempt={} class={} status={:?} error={}",
                        method,
                        path,
                        attempt + 1,
                        err.class(),
                        err.status,
                        err
                    );
                    last_error = Some(err);
                }
            }

            if attempt + 1 < attempts {
                let delay = self.config.backoff_for(attempt);
                debug!(
                    "http.execute backoff method={} path={} delay_ms={}",
                    method,
                    path,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }

        let last_error = last_error
            .unwrap_or_else(|| ClientError::with_code("No attempt was made", codes::REQUEST_FAILED));
        warn!(
            "http.execute exhausted method={} path={} attempts={} last_error={}",
            method, path, attempts, last_error
        );
        Err(
            ClientError::with_code(last_error.to_string(), codes::REQUEST_FAILED)
                .details(Some(last_error.to_json())),
        )
    }

    /// One HTTP round trip, decoded.
    async fn send_once(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let bytes = response.bytes().await?;
        debug!(
            "http.send_once status={} body_len={}",
            status,
            bytes.len()
        );

        if status.as_u16() >= 400 {
            return Err(decode_failure(status, &bytes));
        }
        decode_success(&response_headers, &bytes)
    }
}

/// Built-in headers, then the configured session headers on top.
fn default_headers(config: &SdkConfig) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    let mut auth = header_value(&format!("Bearer {}", config.api_key))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(&config.user_agent)?);

    for (name, value) in &config.default_headers {
        let name = HeaderName::try_from(name.as_str()).map_err(|e| {
            ClientError::with_code(format!("Invalid header name {name:?}: {e}"), codes::INVALID_HEADER)
        })?;
        headers.insert(name, header_value(value)?);
    }
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|e| {
        ClientError::with_code(format!("Invalid header value: {e}"), codes::INVALID_HEADER)
    })
}
