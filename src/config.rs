//! Client configuration for the AI Auto News API.
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.ai-auto-news.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_VERSION: &str = "v1";
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);
pub const DEFAULT_USER_AGENT: &str = concat!("ai-auto-news-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every request a client makes.
///
/// Build one with [`SdkConfig::new`] and the `with_*` setters, or pass a raw
/// API key to [`AiAutoNewsClient::new`](crate::AiAutoNewsClient::new) to get
/// the defaults.
#[derive(Clone)]
pub struct SdkConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Total attempts per request, including the first. Always at least 1.
    pub retries: u32,
    /// API version path segment, e.g. `v1` in `/api/v1/posts`.
    pub version: String,
    /// Delay before the second attempt; doubles for every later attempt.
    pub backoff_base: Duration,
    pub user_agent: String,
    /// Headers sent with every request. Applied over the built-in headers
    /// and under per-call headers.
    pub default_headers: Vec<(String, String)>,
}

impl SdkConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            version: DEFAULT_VERSION.into(),
            backoff_base: DEFAULT_BACKOFF_BASE,
            user_agent: DEFAULT_USER_AGENT.into(),
            default_headers: Vec::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the attempt budget. Values below 1 are raised to 1.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries.max(1);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Base URL with any trailing slash removed.
    pub(crate) fn api_root(&self) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            self.version
        )
    }

    /// Backoff before attempt `attempt + 1`, where `attempt` is 0-based.
    pub(crate) fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

// The API key is a credential; keep it out of debug output and logs.
impl std::fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("version", &self.version)
            .field("backoff_base", &self.backoff_base)
            .field("user_agent", &self.user_agent)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

impl From<&str> for SdkConfig {
    fn from(api_key: &str) -> Self {
        Self::new(api_key)
    }
}

impl From<String> for SdkConfig {
    fn from(api_key: String) -> Self {
        Self::new(api_key)
    }
}
