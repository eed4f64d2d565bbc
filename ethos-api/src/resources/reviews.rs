//! Reviews between profiles.

use super::fetch_record;
use ethos_core::Result;
use ethos_core::http_client::{HttpClient, QueryParams};
use ethos_core::pagination::{DEFAULT_PAGE_SIZE, collect_all, paginate_query};
use ethos_core::types::{Review, ReviewScore};
use futures::stream::BoxStream;
use std::sync::Arc;

const PATH: &str = "/reviews";

/// Filters of [`Reviews::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewListParams {
    /// Only reviews written by this profile.
    pub author_profile_id: Option<u64>,
    /// Only reviews about this profile.
    pub subject_profile_id: Option<u64>,
    /// Only reviews with this sentiment.
    pub score: Option<ReviewScore>,
    /// Only archived (or live) reviews.
    pub archived: Option<bool>,
    /// Page size; defaults to 100.
    pub limit: Option<u32>,
}

impl ReviewListParams {
    /// Empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews written by `profile_id`.
    pub fn author(mut self, profile_id: u64) -> Self {
        self.author_profile_id = Some(profile_id);
        self
    }

    /// Reviews about `profile_id`.
    pub fn subject(mut self, profile_id: u64) -> Self {
        self.subject_profile_id = Some(profile_id);
        self
    }

    /// Filter on sentiment.
    pub fn score(mut self, score: ReviewScore) -> Self {
        self.score = Some(score);
        self
    }

    /// Filter on the archived flag.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_query(self) -> QueryParams {
        QueryParams::new()
            .with("authorProfileId", self.author_profile_id)
            .with("subjectProfileId", self.subject_profile_id)
            .with("score", self.score.map(ReviewScore::as_str))
            .with("archived", self.archived)
    }
}

/// Reviews API.
#[derive(Debug, Clone)]
pub struct Reviews {
    http: Arc<HttpClient>,
}

impl Reviews {
    /// Wraps a shared transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Review by id.
    pub async fn get(&self, review_id: u64) -> Result<Review> {
        fetch_record(&self.http, &format!("{PATH}/{review_id}"), Review::from_value).await
    }

    /// Lazily pages through the reviews matching `params`.
    pub fn list(&self, params: ReviewListParams) -> BoxStream<'static, Result<Review>> {
        paginate_query(
            Arc::clone(&self.http),
            PATH,
            params.to_query(),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            Review::from_value,
        )
    }

    /// Every review matching `params`.
    pub async fn list_all(&self, params: ReviewListParams) -> Result<Vec<Review>> {
        collect_all(self.list(params)).await
    }

    /// Reviews received by a profile.
    pub async fn for_profile(&self, profile_id: u64) -> Result<Vec<Review>> {
        self.list_all(ReviewListParams::new().subject(profile_id)).await
    }

    /// Reviews written by a profile.
    pub async fn by_profile(&self, profile_id: u64) -> Result<Vec<Review>> {
        self.list_all(ReviewListParams::new().author(profile_id)).await
    }

    /// Positive reviews received by a profile.
    pub async fn positive_for(&self, profile_id: u64) -> Result<Vec<Review>> {
        let params = ReviewListParams::new()
            .subject(profile_id)
            .score(ReviewScore::Positive);
        self.list_all(params).await
    }

    /// Negative reviews received by a profile.
    pub async fn negative_for(&self, profile_id: u64) -> Result<Vec<Review>> {
        let params = ReviewListParams::new()
            .subject(profile_id)
            .score(ReviewScore::Negative);
        self.list_all(params).await
    }
}
