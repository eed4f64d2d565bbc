//! Vouches between profiles.
//!
//! The vouch listing is a POST endpoint: filters, `limit` and `offset` travel
//! in the JSON body and pages come back as `{ "values": [...], "total": n }`.

use super::fetch_record;
use ethos_core::Result;
use ethos_core::http_client::HttpClient;
use ethos_core::pagination::{DEFAULT_PAGE_SIZE, collect_all, paginate_body};
use ethos_core::types::Vouch;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use serde_json::{Map, Value, json};
use std::sync::Arc;

const PATH: &str = "/vouches";

/// Filters of [`Vouches::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VouchListParams {
    /// Only vouches given by this profile.
    pub author_profile_id: Option<u64>,
    /// Only vouches received by this profile.
    pub subject_profile_id: Option<u64>,
    /// Only staked (or unstaked) vouches.
    pub staked: Option<bool>,
    /// Only archived (or live) vouches.
    pub archived: Option<bool>,
    /// Page size; defaults to 100.
    pub limit: Option<u32>,
}

impl VouchListParams {
    /// Empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vouches given by `profile_id`.
    pub fn author(mut self, profile_id: u64) -> Self {
        self.author_profile_id = Some(profile_id);
        self
    }

    /// Vouches received by `profile_id`.
    pub fn subject(mut self, profile_id: u64) -> Self {
        self.subject_profile_id = Some(profile_id);
        self
    }

    /// Filter on the staked flag.
    pub fn staked(mut self, staked: bool) -> Self {
        self.staked = Some(staked);
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

    /// Request body filters. Profile ids are sent as one-element lists.
    fn to_body(self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(id) = self.author_profile_id {
            body.insert("authorProfileIds".to_string(), json!([id]));
        }
        if let Some(id) = self.subject_profile_id {
            body.insert("subjectProfileIds".to_string(), json!([id]));
        }
        if let Some(staked) = self.staked {
            body.insert("staked".to_string(), Value::Bool(staked));
        }
        if let Some(archived) = self.archived {
            body.insert("archived".to_string(), Value::Bool(archived));
        }
        body
    }
}

/// Vouches API.
#[derive(Debug, Clone)]
pub struct Vouches {
    http: Arc<HttpClient>,
}

impl Vouches {
    /// Wraps a shared transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Vouch by id.
    pub async fn get(&self, vouch_id: u64) -> Result<Vouch> {
        fetch_record(&self.http, &format!("{PATH}/{vouch_id}"), Vouch::from_value).await
    }

    /// Lazily pages through the vouches matching `params`.
    pub fn list(&self, params: VouchListParams) -> BoxStream<'static, Result<Vouch>> {
        paginate_body(
            Arc::clone(&self.http),
            PATH,
            params.to_body(),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            Vouch::from_value,
        )
    }

    /// Every vouch matching `params`.
    pub async fn list_all(&self, params: VouchListParams) -> Result<Vec<Vouch>> {
        collect_all(self.list(params)).await
    }

    /// Vouches received by a profile.
    pub async fn for_profile(&self, profile_id: u64) -> Result<Vec<Vouch>> {
        self.list_all(VouchListParams::new().subject(profile_id)).await
    }

    /// Vouches given by a profile.
    pub async fn by_profile(&self, profile_id: u64) -> Result<Vec<Vouch>> {
        self.list_all(VouchListParams::new().author(profile_id)).await
    }

    /// The vouch from `author_id` to `subject_id`, if any.
    pub async fn between(&self, author_id: u64, subject_id: u64) -> Result<Option<Vouch>> {
        let params = VouchListParams::new()
            .author(author_id)
            .subject(subject_id)
            .limit(1);
        self.list(params).try_next().await
    }
}
