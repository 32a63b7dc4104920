/// Request executor tests against an in-process mock HTTP server.
///
/// Cover the retry policy, backoff timing, error classification, header
/// layering and envelope metadata.
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ai_auto_news::{codes, AiAutoNewsClient, SdkConfig};

const BACKOFF: Duration = Duration::from_millis(40);

fn client_for(base_url: &str, retries: u32) -> AiAutoNewsClient {
    AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(base_url)
            .with_retries(retries)
            .with_backoff_base(BACKOFF),
    )
    .unwrap()
}

#[tokio::test]
async fn test_retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts/p1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "p1", "title": "T"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 3);
    let started = Instant::now();
    let resp = client
        .http()
        .execute(Method::GET, "/posts/p1", &[], None, None)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(resp.success);
    assert_eq!(resp.data.as_ref().unwrap()["id"], "p1");
    // Two sleeps: 1 and 2 backoff units.
    assert!(elapsed >= BACKOFF * 3, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_exhausted_retries_make_exactly_n_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": {"code": "internal", "message": "db down"}})),
        )
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 4);
    let started = Instant::now();
    let err = client.analytics.metrics().await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err.code, codes::REQUEST_FAILED);
    assert_eq!(err.message, "db down (internal)");
    let details = err.details.unwrap();
    assert_eq!(details["code"], "internal");
    assert_eq!(details["class"], codes::SERVER_ERROR);
    assert_eq!(details["status"], 500);
    // Sleeps of 1, 2 and 4 units.
    assert!(elapsed >= BACKOFF * 7, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": {"code": "not_found", "message": "missing"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retries(5)
            .with_backoff_base(Duration::from_secs(5)),
    )
    .unwrap();
    let started = Instant::now();
    let err = client.posts.get("nope").await.unwrap_err();

    assert_eq!(err.code, "not_found");
    assert_eq!(err.message, "missing");
    assert_eq!(err.status, Some(404));
    assert!(err.is_client_error());
    assert_eq!(err.class(), codes::CLIENT_ERROR);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_client_error_without_body_uses_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/webhooks/wh_1"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 3);
    let err = client.webhooks.delete("wh_1").await.unwrap_err();

    assert_eq!(err.code, codes::REQUEST_FAILED);
    assert_eq!(err.message, "Forbidden");
    assert_eq!(err.status, Some(403));
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/subscriptions/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 3);
    let err = client.subscriptions.get().await.unwrap_err();
    assert_eq!(err.code, codes::PARSE_ERROR);
}

#[tokio::test]
async fn test_unexpected_shape_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/posts/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "p1", "title": "T"}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 1);
    let err = client.posts.get("p1").await.unwrap_err();
    assert_eq!(err.code, codes::PARSE_ERROR);
}

#[tokio::test]
async fn test_connection_failures_are_retried() {
    // Grab a free port, then close it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"), 3);
    let started = Instant::now();
    let err = client.generate.status("job-1").await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err.code, codes::REQUEST_FAILED);
    let details = err.details.unwrap();
    assert_eq!(details["code"], codes::TRANSPORT_ERROR);
    assert_eq!(details["class"], codes::TRANSPORT_ERROR);
    assert!(elapsed >= BACKOFF * 3, "elapsed {elapsed:?}");
}

/// Refused connections fail instantly, so elapsed time is the sum of the
/// sleeps: 1 + 2 + 4 units for four attempts.
#[tokio::test]
async fn test_backoff_schedule_doubles_from_one_unit() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let unit = Duration::from_millis(100);
    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(format!("http://{addr}"))
            .with_retries(4)
            .with_backoff_base(unit),
    )
    .unwrap();
    let started = Instant::now();
    let err = client.analytics.metrics().await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err.code, codes::REQUEST_FAILED);
    assert!(elapsed >= unit * 7, "elapsed {elapsed:?}");
    // A schedule starting at 2 units would take 14.
    assert!(elapsed < unit * 11, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_server_error_backoff_is_one_then_two_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let unit = Duration::from_millis(200);
    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retries(3)
            .with_backoff_base(unit),
    )
    .unwrap();
    let started = Instant::now();
    client.analytics.metrics().await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(elapsed >= unit * 3, "elapsed {elapsed:?}");
    assert!(elapsed < unit * 5, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_timeouts_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/apikeys"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retries(2)
            .with_timeout(Duration::from_millis(200))
            .with_backoff_base(BACKOFF),
    )
    .unwrap();
    let err = client.api_keys.list().await.unwrap_err();

    assert_eq!(err.code, codes::REQUEST_FAILED);
    assert_eq!(err.details.unwrap()["code"], codes::TRANSPORT_ERROR);
}

#[tokio::test]
async fn test_single_attempt_budget_does_not_sleep() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retries(1)
            .with_backoff_base(Duration::from_secs(5)),
    )
    .unwrap();
    let started = Instant::now();
    let err = client.webhooks.list().await.unwrap_err();

    assert_eq!(err.code, codes::REQUEST_FAILED);
    assert_eq!(err.details.unwrap()["status"], 502);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 1);
    client.analytics.metrics().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let user_agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("ai-auto-news-sdk-rust/"), "{user_agent}");
}

#[tokio::test]
async fn test_per_call_headers_win_over_session_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .and(header("x-tenant", "globex"))
        .and(header("x-trace", "t-1"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_header("X-Tenant", "acme"),
    )
    .unwrap();
    let mut extra = HeaderMap::new();
    extra.insert("x-tenant", HeaderValue::from_static("globex"));
    extra.insert("x-trace", HeaderValue::from_static("t-1"));

    client
        .http()
        .execute(Method::GET, "/analytics/metrics", &[], None, Some(&extra))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_envelope_metadata_from_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req-42")
                .insert_header("x-ratelimit-remaining", "99")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({"data": {"latency_ms": 12}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 1);
    let resp = client
        .http()
        .execute(Method::GET, "/analytics/metrics", &[], None, None)
        .await
        .unwrap();

    assert!(resp.error.is_none());
    assert_eq!(resp.request_id(), Some("req-42"));
    let rate_limit = resp.rate_limit().unwrap();
    assert_eq!(rate_limit.remaining, 99);
    assert_eq!(rate_limit.reset, "1700000000");
    assert_eq!(resp.data, Some(json!({"latency_ms": 12})));
}

#[tokio::test]
async fn test_missing_metadata_headers_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-remaining", "unlimited")
                .set_body_json(json!({"uptime": 1})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 1);
    let resp = client
        .http()
        .execute(Method::GET, "/analytics/metrics", &[], None, None)
        .await
        .unwrap();

    assert_eq!(resp.request_id(), Some(""));
    assert_eq!(resp.rate_limit().unwrap().remaining, 0);
    assert_eq!(resp.rate_limit().unwrap().reset, "");
    // No `data` member: the whole body is the payload.
    assert_eq!(resp.data, Some(json!({"uptime": 1})));
}

#[tokio::test]
async fn test_custom_version_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/analytics/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiAutoNewsClient::new(
        SdkConfig::new("sk-test")
            .with_base_url(format!("{}/", server.uri()))
            .with_version("v2"),
    )
    .unwrap();
    client.analytics.metrics().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analytics/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(8)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 1);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.analytics.metrics().await }));
    }
    for handle in handles {
        let metrics = handle.await.unwrap().unwrap();
        assert_eq!(metrics["ok"], true);
    }
}
