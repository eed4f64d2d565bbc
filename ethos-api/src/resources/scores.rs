//! Credibility scores.

use super::{fetch_record, segment};
use ethos_core::Result;
use ethos_core::http_client::HttpClient;
use ethos_core::types::Score;
use std::sync::Arc;

const PATH: &str = "/score";

/// Scores API.
#[derive(Debug, Clone)]
pub struct Scores {
    http: Arc<HttpClient>,
}

impl Scores {
    /// Wraps a shared transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Score of an Ethereum address.
    ///
    /// The address is percent-encoded into a single path segment.
    pub async fn get(&self, address: &str) -> Result<Score> {
        let path = format!("{PATH}/{}", segment(address));
        fetch_record(&self.http, &path, Score::from_value).await
    }

    /// Score of a profile.
    pub async fn get_by_profile(&self, profile_id: u64) -> Result<Score> {
        let path = format!("{PATH}/profile/{profile_id}");
        fetch_record(&self.http, &path, Score::from_value).await
    }

    /// Score of an address with its per-signal breakdown. The address is
    /// percent-encoded as in [`Scores::get`].
    pub async fn breakdown(&self, address: &str) -> Result<Score> {
        let path = format!("{PATH}/{}/breakdown", segment(address));
        fetch_record(&self.http, &path, Score::from_value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::http_for;
    use ethos_core::ErrorKind;
    use ethos_core::types::ScoreLevel;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_by_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/score/0xabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "profileId": 5, "address": "0xabc", "value": 1650
            })))
            .expect(1)
            .mount(&server)
            .await;

        let score = Scores::new(http_for(&server.uri())).get("0xabc").await.unwrap();
        assert_eq!(score.profile_id, 5);
        assert!(score.is_trusted());
        assert_eq!(score.level(), ScoreLevel::Reputable);
    }

    #[tokio::test]
    async fn test_address_stays_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/score/0xabc%2Fbreakdown"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"profileId": 9})))
            .expect(1)
            .mount(&server)
            .await;

        let score = Scores::new(http_for(&server.uri()))
            .get("0xabc/breakdown")
            .await
            .unwrap();
        assert_eq!(score.profile_id, 9);
    }

    #[tokio::test]
    async fn test_breakdown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/score/0xabc/breakdown"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "profileId": 5,
                "value": 700,
                "breakdown": {"reviews": 100, "vouches": 400, "attestations": 0, "activity": 150, "history": 50}
            })))
            .mount(&server)
            .await;

        let score = Scores::new(http_for(&server.uri()))
            .breakdown("0xabc")
            .await
            .unwrap();
        assert!(score.is_untrusted());
        assert!((score.breakdown.vouches - 400.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_get_by_profile_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/score/profile/5"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = Scores::new(http_for(&server.uri()))
            .get_by_profile(5)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.status_code(), Some(401));
    }
}
