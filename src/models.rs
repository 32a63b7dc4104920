//! Data models for AI Auto News API types.
//!
//! Response records use serde derive with explicit fields, so a payload
//! missing a required field fails to decode instead of producing a partial
//! record. Request bodies skip unset optional fields entirely; for the
//! generate, API key and webhook bodies an empty string, empty list or zero
//! length also counts as unset.
use serde::{Deserialize, Serialize};

/// An opaque JSON object, returned by endpoints without a fixed schema.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().unwrap_or_default().is_empty()
}

fn is_zero_or_none(value: &Option<u32>) -> bool {
    matches!(value, None | Some(0))
}

fn is_empty_or_none(value: &Option<Vec<String>>) -> bool {
    value.as_deref().unwrap_or_default().is_empty()
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of content to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Blog,
    News,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::News => "news",
        }
    }
}

/// How urgently generated content should be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Breaking,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Breaking => "breaking",
        }
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// A blog post or news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub slug: String,
    pub published: bool,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonMap>,
}

/// Body for creating or updating a post. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonMap>,
}

/// Query for `GET /posts`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPostsParams {
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub published: Option<bool>,
}

impl Default for ListPostsParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            category: None,
            published: None,
        }
    }
}

impl ListPostsParams {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }
}

/// Query for `GET /search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub limit: u32,
    pub category: Option<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: 20,
            category: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Body for `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(rename = "targetLength", skip_serializing_if = "is_zero_or_none")]
    pub target_length: Option<u32>,
    #[serde(skip_serializing_if = "is_blank")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub audience: Option<String>,
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content_type: ContentType::default(),
            urgency: None,
            target_length: None,
            tone: None,
            audience: None,
        }
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn target_length(mut self, target_length: u32) -> Self {
        self.target_length = Some(target_length);
        self
    }

    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Query for `GET /analytics/usage`. All fields optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub metric: Option<String>,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeRequest {
    pub tier: String,
}

// ---------------------------------------------------------------------------
// API keys
// ---------------------------------------------------------------------------

/// Body for `POST /apikeys`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "is_empty_or_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(rename = "expiresAt", skip_serializing_if = "is_blank")]
    pub expires_at: Option<String>,
}

impl CreateApiKeyRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scopes: None,
            expires_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

/// Body for `POST /webhooks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateWebhookRequest {
    pub url: String,
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub secret: Option<String>,
}

impl CreateWebhookRequest {
    pub fn new(url: impl Into<String>, events: Vec<String>) -> Self {
        Self {
            url: url.into(),
            events,
            secret: None,
        }
    }
}
