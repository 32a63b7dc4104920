//! Error types for the AI Auto News SDK.
//!
//! Every failure surfaces as a single [`ClientError`]. Callers branch on
//! [`ClientError::code`]; the well-known values live in [`codes`].
use serde_json::{json, Value};
use thiserror::Error;

/// Well-known values for [`ClientError::code`].
///
/// Server-supplied codes (e.g. `not_found`) are passed through unchanged, so
/// this list is not exhaustive. `CLIENT_ERROR` and `SERVER_ERROR` are failure
/// classes reported by [`ClientError::class`], not values of `code`.
pub mod codes {
    /// Default code when nothing more specific is known.
    pub const ERROR: &str = "error";
    /// Connection failure or timeout. Retryable.
    pub const TRANSPORT_ERROR: &str = "transport_error";
    /// Class of HTTP 4xx failures. Never retried.
    pub const CLIENT_ERROR: &str = "client_error";
    /// Class of HTTP 5xx failures. Retryable.
    pub const SERVER_ERROR: &str = "server_error";
    /// Generic failure, and the terminal code once retries are exhausted.
    pub const REQUEST_FAILED: &str = "request_failed";
    /// Response body could not be decoded into the expected shape.
    pub const PARSE_ERROR: &str = "parse_error";
    /// The request URL could not be built from the configuration.
    pub const INVALID_URL: &str = "invalid_url";
    /// A header name or value is not valid HTTP.
    pub const INVALID_HEADER: &str = "invalid_header";
    /// The client configuration was rejected at construction.
    pub const INVALID_CONFIG: &str = "invalid_config";
}

/// The error type returned by every fallible SDK operation.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} ({code})")]
pub struct ClientError {
    pub message: String,
    pub code: String,
    pub details: Option<Value>,
    /// HTTP status of the response that produced this error, if any.
    pub status: Option<u16>,
}

impl ClientError {
    /// Create an error with the default `"error"` code.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_code(message, codes::ERROR)
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: None,
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::with_code(message, codes::TRANSPORT_ERROR)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::with_code(message, codes::PARSE_ERROR)
    }

    pub fn details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the error came from an HTTP 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status, Some(400..=499))
    }

    /// Returns true if this error suggests retrying with backoff.
    ///
    /// Transport failures and 5xx responses are retryable. Client errors,
    /// parse errors and configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            Some(status) => status >= 500,
            None => self.code == codes::TRANSPORT_ERROR,
        }
    }

    /// Failure class: `client_error` and `server_error` for HTTP responses,
    /// `transport_error` and `parse_error` for those codes, `request_failed`
    /// for anything else.
    pub fn class(&self) -> &'static str {
        match self.status {
            Some(400..=499) => codes::CLIENT_ERROR,
            Some(500..) => codes::SERVER_ERROR,
            Some(_) => codes::REQUEST_FAILED,
            None if self.code == codes::TRANSPORT_ERROR => codes::TRANSPORT_ERROR,
            None if self.code == codes::PARSE_ERROR => codes::PARSE_ERROR,
            None => codes::REQUEST_FAILED,
        }
    }

    /// JSON form of this error, used as `details` of the terminal
    /// `request_failed` error after retries are exhausted.
    pub fn to_json(&self) -> Value {
        json!({
            "message": self.message,
            "code": self.code,
            "class": self.class(),
            "details": self.details,
            "status": self.status,
        })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let mut error = ClientError::transport(err.to_string());
        if err.is_timeout() {
            error.details = Some(json!({ "timeout": true }));
        }
        error
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::parse(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::with_code(format!("URL parse error: {err}"), codes::INVALID_URL)
    }
}
