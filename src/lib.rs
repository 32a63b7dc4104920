//! AI Auto News SDK for Rust.
//!
//! A typed async client for the AI Auto News API: posts, AI content
//! generation, analytics, subscriptions, API keys and webhooks.
//!
//! # What This SDK Provides
//!
//! - High-level client with one handle per resource group: [`AiAutoNewsClient`]
//! - A request executor with bearer auth, retries and exponential backoff:
//!   [`http::HttpClient`]
//! - Normalized responses with request id and rate-limit metadata:
//!   [`ApiResponse`]
//! - Webhook signature verification: [`verify_webhook_signature`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ai_auto_news::{AiAutoNewsClient, ListPostsParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_auto_news::ClientError> {
//!     let client = AiAutoNewsClient::new("sk-live-...")?;
//!
//!     let posts = client
//!         .posts
//!         .list(&ListPostsParams::default().category("tech"))
//!         .await?;
//!     for post in posts {
//!         println!("{}: {}", post.slug, post.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Common Tasks
//!
//! ## Generate Content
//!
//! ```rust,no_run
//! use ai_auto_news::{AiAutoNewsClient, ContentType, GenerateRequest, Urgency};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_auto_news::ClientError> {
//!     let client = AiAutoNewsClient::new("sk-live-...")?;
//!     let post = client
//!         .generate
//!         .create(
//!             &GenerateRequest::new("Quantum networking")
//!                 .content_type(ContentType::News)
//!                 .urgency(Urgency::High),
//!         )
//!         .await?;
//!     println!("generated {}", post.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Verify a Webhook
//!
//! ```rust
//! use ai_auto_news::{sign_webhook_payload, AiAutoNewsClient};
//!
//! let body = r#"{"event":"post.published","id":"p1"}"#;
//! let signature = sign_webhook_payload(body, "whsec");
//! assert!(AiAutoNewsClient::verify_webhook_signature(body, &signature, "whsec"));
//! assert!(!AiAutoNewsClient::verify_webhook_signature(body, &signature, "other"));
//! ```
//!
//! # Retries
//!
//! Each request is attempted up to [`SdkConfig::retries`] times. Connection
//! failures, timeouts and 5xx responses are retried after
//! `backoff_base * 2^attempt` (1s, 2s, 4s, ... by default). A 4xx response
//! ends the request immediately with the server's error.
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/) facade
//! for every request attempt and resource call. Configure any compatible logger in
//! your binary, then set `RUST_LOG=debug` to inspect request flow. API keys and
//! webhook secrets are never logged.
//!
//! # Errors
//!
//! All fallible operations return [`ClientError`]. Branch on its `code`:
//!
//! - Server-supplied codes such as `not_found` for 4xx responses
//! - `request_failed` once retries are exhausted; `details` holds the last failure
//! - `parse_error` when a response does not have the expected shape
//! - `invalid_url`, `invalid_header`, `invalid_config` for construction problems
pub mod client;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod errors;
pub mod http;
pub mod models;
pub mod resources;

// Re-export primary types for convenience.
pub use client::{create_client, AiAutoNewsClient};
pub use config::SdkConfig;
pub use crypto::{sign_webhook_payload, verify_webhook_signature};
pub use envelope::{ApiErrorBody, ApiResponse, RateLimit, ResponseMetadata};
pub use errors::{codes, ClientError};
pub use models::*;
