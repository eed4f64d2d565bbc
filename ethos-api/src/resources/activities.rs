//! On-chain activity feed.

use super::fetch_record;
use ethos_core::Result;
use ethos_core::http_client::{HttpClient, QueryParams};
use ethos_core::pagination::{DEFAULT_PAGE_SIZE, collect_all, paginate_query};
use ethos_core::types::{Activity, ActivityType};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

const PATH: &str = "/activities";

/// Number of activities returned by [`Activities::recent`] when none is given.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Filters of [`Activities::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityListParams {
    /// Only activities performed by this profile.
    pub author_profile_id: Option<u64>,
    /// Only activities targeting this profile.
    pub subject_profile_id: Option<u64>,
    /// Only activities of this raw type, e.g. `vouch`.
    pub activity_type: Option<String>,
    /// Page size; defaults to 100.
    pub limit: Option<u32>,
}

impl ActivityListParams {
    /// Empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activities performed by `profile_id`.
    pub fn author(mut self, profile_id: u64) -> Self {
        self.author_profile_id = Some(profile_id);
        self
    }

    /// Activities targeting `profile_id`.
    pub fn subject(mut self, profile_id: u64) -> Self {
        self.subject_profile_id = Some(profile_id);
        self
    }

    /// Filter on a known activity type.
    pub fn kind(self, kind: ActivityType) -> Self {
        self.activity_type(kind.as_str())
    }

    /// Filter on a raw activity type.
    pub fn activity_type(mut self, activity_type: impl Into<String>) -> Self {
        self.activity_type = Some(activity_type.into());
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("authorProfileId", self.author_profile_id)
            .with("subjectProfileId", self.subject_profile_id)
            .with("type", self.activity_type.clone())
    }
}

/// Activities API.
#[derive(Debug, Clone)]
pub struct Activities {
    http: Arc<HttpClient>,
}

impl Activities {
    /// Wraps a shared transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Activity by id.
    pub async fn get(&self, activity_id: u64) -> Result<Activity> {
        let path = format!("{PATH}/{activity_id}");
        fetch_record(&self.http, &path, Activity::from_value).await
    }

    /// Lazily pages through the activities matching `params`.
    pub fn list(&self, params: ActivityListParams) -> BoxStream<'static, Result<Activity>> {
        paginate_query(
            Arc::clone(&self.http),
            PATH,
            params.to_query(),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            Activity::from_value,
        )
    }

    /// Every activity matching `params`.
    pub async fn list_all(&self, params: ActivityListParams) -> Result<Vec<Activity>> {
        collect_all(self.list(params)).await
    }

    /// Activities a profile performed or was targeted by, newest first.
    ///
    /// Both listings are drained, merged and de-duplicated by id. Activities
    /// without a creation time sort last.
    pub async fn for_profile(&self, profile_id: u64) -> Result<Vec<Activity>> {
        let as_author = self.list_all(ActivityListParams::new().author(profile_id)).await?;
        let as_subject = self.list_all(ActivityListParams::new().subject(profile_id)).await?;

        let mut seen = HashSet::new();
        let mut combined: Vec<Activity> = as_author
            .into_iter()
            .chain(as_subject)
            .filter(|activity| seen.insert(activity.id))
            .collect();
        combined.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(profile_id, count = combined.len(), "Merged profile activities");
        Ok(combined)
    }

    /// Vouch activities, lazily paged.
    pub fn vouches(&self, limit: Option<u32>) -> BoxStream<'static, Result<Activity>> {
        let params = ActivityListParams::new()
            .kind(ActivityType::Vouch)
            .limit(limit.unwrap_or(DEFAULT_PAGE_SIZE));
        self.list(params)
    }

    /// Review activities, lazily paged.
    pub fn reviews(&self, limit: Option<u32>) -> BoxStream<'static, Result<Activity>> {
        let params = ActivityListParams::new()
            .kind(ActivityType::Review)
            .limit(limit.unwrap_or(DEFAULT_PAGE_SIZE));
        self.list(params)
    }

    /// The first `limit` activities of the feed, fetched as one page.
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<Activity>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).max(1);
        self.list(ActivityListParams::new().limit(limit))
            .take(limit as usize)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::http_for;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn activity(id: u64, created_at: Option<&str>) -> Value {
        let mut record = json!({"id": id, "type": "vouch", "authorProfileId": 1});
        if let Some(ts) = created_at {
            record["createdAt"] = json!(ts);
        }
        record
    }

    #[tokio::test]
    async fn test_for_profile_merges_and_sorts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("authorProfileId", "1"))
            .and(query_param_is_missing("subjectProfileId"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                activity(1, Some("2024-01-01T00:00:00Z")),
                activity(2, None),
                activity(3, Some("2024-03-01T00:00:00Z")),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("subjectProfileId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"values": [
                activity(3, Some("2024-03-01T00:00:00Z")),
                activity(4, Some("2024-02-01T00:00:00Z")),
            ]})))
            .expect(1)
            .mount(&server)
            .await;

        let merged = Activities::new(http_for(&server.uri()))
            .for_profile(1)
            .await
            .unwrap();
        let ids: Vec<u64> = merged.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[tokio::test]
    async fn test_vouches_filter_by_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("type", "vouch"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([activity(7, None)])))
            .expect(1)
            .mount(&server)
            .await;

        let vouches: Vec<Activity> = Activities::new(http_for(&server.uri()))
            .vouches(None)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(vouches.len(), 1);
        assert!(vouches[0].is_vouch());
    }

    #[tokio::test]
    async fn test_reviews_filter_by_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("type", "review"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let reviews: Vec<Activity> = Activities::new(http_for(&server.uri()))
            .reviews(Some(5))
            .try_collect()
            .await
            .unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_recent_fetches_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("limit", "2"))
            .and(query_param("offset", "0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([activity(1, None), activity(2, None)])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("offset", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([activity(3, None)])))
            .expect(0)
            .mount(&server)
            .await;

        let recent = Activities::new(http_for(&server.uri()))
            .recent(Some(2))
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
    }

    #[tokio::test]
    async fn test_get_activity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12, "type": "review", "txHash": "0xfeed"
            })))
            .mount(&server)
            .await;

        let a = Activities::new(http_for(&server.uri())).get(12).await.unwrap();
        assert!(a.is_review());
        assert_eq!(a.explorer_url().as_deref(), Some("https://basescan.org/tx/0xfeed"));
    }
}
