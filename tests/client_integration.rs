//! End-to-end behaviour of the client facade against a mock API.

mod common;

use common::{fast_client, mock_client};
use ethos_rust::prelude::*;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_profile_lookup_sends_client_header() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/userkey/x.com%2Fuser%2Fvitalik"))
        .and(header("X-Ethos-Client", "integration-tests"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "score": 2100,
            "userkeys": ["x.com/user/vitalik"],
            "stats": {"vouch": {"received": {"count": 12, "amountWeiTotal": 0}}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ethos = fast_client(&server.uri());
    let profile = ethos.profiles().get_by_twitter("@vitalik").await?;

    assert_eq!(profile.twitter_handle(), Some("vitalik"));
    assert_eq!(profile.score_level(), ScoreLevel::Exemplary);
    assert_eq!(profile.vouches_received_count(), 12);
    Ok(())
}

#[tokio::test]
async fn test_base_path_prefix_is_kept() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/score/profile/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"profileId": 3, "value": 900})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ethos = fast_client(&format!("{}/api/v2/", server.uri()));
    let score = ethos.scores().get_by_profile(3).await?;
    assert_eq!(score.level(), ScoreLevel::Questionable);
    Ok(())
}

#[tokio::test]
async fn test_vouch_between_uses_body_pagination() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vouches"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "authorProfileIds": [10],
            "subjectProfileIds": [20],
            "limit": 1,
            "offset": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{
                "id": 5,
                "authorProfileId": 10,
                "subjectProfileId": 20,
                "balance": "250000000000000000"
            }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ethos = fast_client(&server.uri());
    let vouch = ethos
        .vouches()
        .between(10, 20)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no vouch from 10 to 20"))?;
    assert!(vouch.is_active());
    assert!((vouch.amount_eth()? - 0.25).abs() < 1e-12);
    Ok(())
}

#[tokio::test]
async fn test_server_errors_are_retried_until_success() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/markets/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/markets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let ethos = fast_client(&server.uri());
    let market = ethos.markets().get(1).await?;
    assert_eq!(market.sentiment(), Sentiment::Neutral);
    Ok(())
}

#[tokio::test]
async fn test_exhausted_retries_surface_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reviews/1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let err = fast_client(&server.uri()).reviews().get(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("database unavailable"));
    assert_eq!(err.response_body().unwrap()["message"], "database unavailable");
}

#[tokio::test]
async fn test_rate_limit_response_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(&server.uri()).profiles().get(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_unknown_record_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/activities/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = fast_client(&server.uri()).activities().get(404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_clones_share_rate_limiter() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/recent"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let ethos = mock_client(&server.uri(), Duration::from_millis(100), 1);
    let clone = ethos.clone();

    let started = Instant::now();
    let (a, b, c) = tokio::join!(
        ethos.profiles().recent(None),
        clone.profiles().recent(None),
        ethos.profiles().recent(None),
    );
    a?;
    b?;
    c?;

    assert!(started.elapsed() >= Duration::from_millis(200));
    Ok(())
}

#[tokio::test]
async fn test_generic_http_access_through_facade() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ethos = fast_client(&server.uri());
    let body = ethos.http().fetch("/health", None).await?;
    assert_eq!(body, json!({}));
    Ok(())
}
