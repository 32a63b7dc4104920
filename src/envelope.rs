//! Response envelope decoding.
//!
//! Turns a raw status/headers/body triple into either an [`ApiResponse`] or
//! a [`ClientError`]. Kept free of I/O so it can be tested directly.
use std::any::type_name;

use log::debug;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{codes, ClientError};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Server-reported quota. Surfaced to the caller, never enforced locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub remaining: u64,
    pub reset: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub request_id: String,
    pub rate_limit: RateLimit,
}

/// The `error` object of a failed response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Normalized result of one successful API call.
///
/// The executor only hands out envelopes built by [`ApiResponse::ok`], so
/// `success` is true and `error` is absent; failures surface as
/// [`ClientError`] instead. `error` mirrors the wire shape for callers that
/// deserialize raw envelopes themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<ApiErrorBody>,
    pub metadata: Option<ResponseMetadata>,
}

impl ApiResponse {
    pub fn ok(data: Value, metadata: ResponseMetadata) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.request_id.as_str())
    }

    pub fn rate_limit(&self) -> Option<&RateLimit> {
        self.metadata.as_ref().map(|m| &m.rate_limit)
    }

    /// Decode the payload into `T`.
    ///
    /// A missing payload decodes as JSON `null`. Shape mismatches become a
    /// `parse_error` naming the target type.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        let target_type = type_name::<T>();
        let data = self.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| {
            debug!(
                "envelope.into_data decode_failed target_type={} error={}",
                target_type, e
            );
            ClientError::parse(format!("Failed to decode response data: {e}"))
                .details(Some(json!({ "type": target_type })))
        })
    }
}

/// Parse a body as JSON, treating an empty body as an empty object.
fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Read request id and rate-limit headers, defaulting anything missing or
/// malformed.
pub fn parse_metadata(headers: &HeaderMap) -> ResponseMetadata {
    ResponseMetadata {
        request_id: header_str(headers, REQUEST_ID_HEADER)
            .unwrap_or_default()
            .to_string(),
        rate_limit: RateLimit {
            remaining: header_str(headers, RATE_LIMIT_REMAINING_HEADER)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            reset: header_str(headers, RATE_LIMIT_RESET_HEADER)
                .unwrap_or_default()
                .to_string(),
        },
    }
}

/// Build the error for a response whose status is 400 or above.
///
/// Fields missing from the body's `error` object fall back to the reason
/// phrase and `request_failed`. A body that is not JSON is treated as empty.
pub fn decode_failure(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed = parse_body(body).unwrap_or(Value::Null);
    let error = parsed.get("error");
    let field = |name: &str| error.and_then(|e| e.get(name));

    let message = field("message")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });
    let code = field("code")
        .and_then(Value::as_str)
        .unwrap_or(codes::REQUEST_FAILED);
    let details = field("details").filter(|d| !d.is_null()).cloned();

    ClientError::with_code(message, code)
        .details(details)
        .status(status.as_u16())
}

/// Build the envelope for a response with a success status.
///
/// The payload is the body's `data` member when present, otherwise the
/// whole body.
pub fn decode_success(headers: &HeaderMap, body: &[u8]) -> Result<ApiResponse, ClientError> {
    let mut parsed = parse_body(body).map_err(|e| {
        ClientError::parse(format!("Failed to parse response body: {e}")).details(Some(json!({
            "body": String::from_utf8_lossy(&body[..body.len().min(500)]),
        })))
    })?;
    let data = match parsed.as_object_mut().and_then(|obj| obj.remove("data")) {
        Some(data) => data,
        None => parsed,
    };
    Ok(ApiResponse::ok(data, parse_metadata(headers)))
}
