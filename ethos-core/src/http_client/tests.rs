use super::*;
use crate::config::{EthosConfig, EthosConfigOptions};
use crate::error::{Error, ErrorKind, NetworkError};
use crate::retry_strategy::{RetryConfig, RetryStrategy};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, max_retries: u32) -> HttpClient {
    let config = EthosConfig::new(
        EthosConfigOptions::new()
            .base_url(base_url)
            .client_name("test-client")
            .rate_limit(Duration::ZERO)
            .timeout(Duration::from_secs(5))
            .max_retries(max_retries),
    );
    HttpClient::new(config)
        .unwrap()
        .with_retry_strategy(RetryStrategy::new(
            RetryConfig::new(max_retries).with_base_delay(Duration::from_millis(10)),
        ))
}

#[tokio::test]
async fn test_http_client_creation() {
    let client = HttpClient::new(EthosConfig::default());
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_invalid_client_name_is_rejected() {
    let config = EthosConfig::new(EthosConfigOptions::new().client_name("bad\r\nname"));
    assert!(HttpClient::new(config).is_err());
}

#[tokio::test]
async fn test_fetch_sends_default_headers() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/1"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(header(CLIENT_HEADER, "test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let value = client.fetch("/profiles/1", None).await.unwrap();
    assert_eq!(value, json!({"id": 1}));
}

#[tokio::test]
async fn test_fetch_skips_null_query_params() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reviews"))
        .and(query_param("limit", "10"))
        .and(query_param("archived", "false"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let query = QueryParams::new()
        .with("limit", 10)
        .with("offset", None::<u64>)
        .with("archived", false);
    let value = client.fetch("/reviews", Some(&query)).await.unwrap();
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/scores/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 1500})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api/v2/", mock_server.uri()), 3);
    let value = client.fetch("scores/7", None).await.unwrap();
    assert_eq!(value["score"], 1500);
}

#[tokio::test]
async fn test_invalid_base_url_fails_before_any_attempt() {
    let client = test_client("not a url", 3);
    let err = client.fetch("/profiles", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(
        err,
        Error::Network(ref inner) if matches!(**inner, NetworkError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn test_no_content_yields_empty_object() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/markets/3/refresh"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let value = client.submit("/markets/3/refresh", None, None).await.unwrap();
    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn test_submit_sends_json_body() {
    let mock_server = MockServer::start().await;
    let body = json!({"limit": 50, "offset": 0, "authorProfileIds": [12]});
    Mock::given(method("POST"))
        .and(path("/vouches"))
        .and(body_json(body.clone()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"values": [], "total": 0})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let value = client.submit("/vouches", Some(&body), None).await.unwrap();
    assert_eq!(value["total"], 0);
}

#[tokio::test]
async fn test_fetch_as_deserializes() {
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Score {
        score: i64,
        profile_id: u64,
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/score"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"score": 1320, "profileId": 9})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let score: Score = client.fetch_as("/score", None).await.unwrap();
    assert_eq!(score.score, 1320);
    assert_eq!(score.profile_id, 9);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "missing"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let err = client.fetch("/profiles/404", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.response_body(), Some(&json!({"message": "missing"})));
}

#[tokio::test]
async fn test_rate_limited_carries_retry_after() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let err = client.fetch("/activities", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn test_unauthorized_and_forbidden_map_to_authentication() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);

    let err = client.fetch("/private", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status_code(), Some(401));

    let err = client.fetch("/forbidden", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.response_body(), Some(&json!("nope")));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reviews"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid orderBy"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let err = client.fetch("/reviews", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.details().unwrap().message, "invalid orderBy");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_exhausts_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let err = client.fetch("/markets", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.details().unwrap().message, "boom");
}

#[tokio::test]
async fn test_server_error_then_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets/1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/markets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 3);
    let value = client.fetch("/markets/1", None).await.unwrap();
    assert_eq!(value["id"], 1);
}

#[tokio::test]
async fn test_malformed_success_body_is_retried_as_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 2);
    let err = client.fetch("/profiles/1", None).await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = EthosConfig::new(
        EthosConfigOptions::new()
            .base_url(mock_server.uri())
            .rate_limit(Duration::ZERO)
            .timeout(Duration::from_millis(50))
            .max_retries(2),
    );
    let client = HttpClient::new(config).unwrap().with_retry_strategy(RetryStrategy::new(
        RetryConfig::new(2).with_base_delay(Duration::from_millis(10)),
    ));

    let err = client.fetch("/slow", None).await.unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let client = test_client("http://127.0.0.1:1", 2);
    let err = client.fetch("/profiles", None).await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_zero_retries_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), 0);
    let err = client.fetch("/profiles", None).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_rate_limiter_spaces_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = EthosConfig::new(
        EthosConfigOptions::new()
            .base_url(mock_server.uri())
            .rate_limit(Duration::from_millis(100))
            .max_retries(2),
    );
    let client = HttpClient::new(config).unwrap().with_retry_strategy(RetryStrategy::new(
        RetryConfig::new(2).with_base_delay(Duration::ZERO),
    ));

    let start = std::time::Instant::now();
    let err = client.fetch("/flaky", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.details().unwrap().message, "HTTP 502");
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_backoff_doubles_between_attempts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reviews"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = EthosConfig::new(
        EthosConfigOptions::new()
            .base_url(mock_server.uri())
            .rate_limit(Duration::ZERO)
            .max_retries(3),
    );
    let client = HttpClient::new(config).unwrap().with_retry_strategy(RetryStrategy::new(
        RetryConfig::new(3).with_base_delay(Duration::from_millis(50)),
    ));

    // 50ms after the first attempt, 100ms after the second.
    let start = std::time::Instant::now();
    let err = client.fetch("/reviews", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(start.elapsed() >= Duration::from_millis(150));
}
