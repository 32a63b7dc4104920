//! Typed wrappers for each group of REST endpoints.
//!
//! Every resource holds a shared handle to the client's [`HttpClient`] and
//! maps its methods 1:1 onto a verb and path. Errors from the executor are
//! returned unchanged.
//!
//! [`HttpClient`]: crate::http::HttpClient
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub mod analytics;
pub mod api_keys;
pub mod generation;
pub mod posts;
pub mod subscriptions;
pub mod webhooks;

pub use analytics::Analytics;
pub use api_keys::ApiKeys;
pub use generation::Generation;
pub use posts::Posts;
pub use subscriptions::Subscriptions;
pub use webhooks::Webhooks;

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `{prefix}/{segment}` with the caller-supplied segment percent-encoded.
pub(crate) fn path_with(prefix: &str, segment: &str) -> String {
    format!("{}/{}", prefix, utf8_percent_encode(segment, PATH_SEGMENT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_pass_through() {
        assert_eq!(path_with("/posts", "p1"), "/posts/p1");
        assert_eq!(path_with("/posts", "my-first_post.v2"), "/posts/my-first_post.v2");
    }

    #[test]
    fn separators_are_encoded() {
        assert_eq!(path_with("/posts", "a/b"), "/posts/a%2Fb");
        assert_eq!(path_with("/apikeys", "k 1?x"), "/apikeys/k%201%3Fx");
    }
}
