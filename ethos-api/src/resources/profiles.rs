//! Profile lookups, search and listing.

use super::{fetch_record, parse_page, segment};
use ethos_core::Result;
use ethos_core::http_client::{HttpClient, QueryParams};
use ethos_core::pagination::{DEFAULT_PAGE_SIZE, collect_all, paginate_query};
use ethos_core::types::Profile;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::debug;

const PATH: &str = "/profiles";

/// Page size of `search` and `recent` when none is given.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Filters of [`Profiles::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileListParams {
    /// Sort key understood by the API, e.g. `score`.
    pub order_by: Option<String>,
    /// Page size; defaults to 100.
    pub limit: Option<u32>,
}

impl ProfileListParams {
    /// Empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort the listing by `key`.
    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Parameters of [`Profiles::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSearchParams {
    /// Free-text query matched against names and usernames.
    pub query: String,
    /// Maximum number of results; defaults to 20.
    pub limit: Option<u32>,
    /// Number of results to skip; defaults to 0.
    pub offset: Option<u64>,
}

impl ProfileSearchParams {
    /// Search for `query` with default paging.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            offset: None,
        }
    }

    /// Set the maximum number of results.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of results to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl From<&str> for ProfileSearchParams {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

/// Profiles API.
///
/// # Example
///
/// ```no_run
/// # use ethos_api::Ethos;
/// # async fn example() -> ethos_core::Result<()> {
/// let ethos = Ethos::default_client()?;
/// let profile = ethos.profiles().get_by_twitter("@vitalikbuterin").await?;
/// println!("{:?} scores {}", profile.username, profile.score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Profiles {
    http: Arc<HttpClient>,
}

impl Profiles {
    /// Wraps a shared transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Profile by id.
    pub async fn get(&self, profile_id: u64) -> Result<Profile> {
        fetch_record(&self.http, &format!("{PATH}/{profile_id}"), Profile::from_value).await
    }

    /// Profile owning an Ethereum address.
    pub async fn get_by_address(&self, address: &str) -> Result<Profile> {
        let path = format!("{PATH}/address/{}", segment(address));
        fetch_record(&self.http, &path, Profile::from_value).await
    }

    /// Profile linked to a Twitter / X handle. A leading `@` is ignored.
    pub async fn get_by_twitter(&self, handle: &str) -> Result<Profile> {
        let handle = handle.strip_prefix('@').unwrap_or(handle);
        self.get_by_userkey(&format!("x.com/user/{handle}")).await
    }

    /// Profile linked to a userkey such as `address:0x..` or `x.com/user/..`.
    pub async fn get_by_userkey(&self, userkey: &str) -> Result<Profile> {
        let path = format!("{PATH}/userkey/{}", segment(userkey));
        fetch_record(&self.http, &path, Profile::from_value).await
    }

    /// Single page of profiles matching a free-text query.
    pub async fn search(&self, params: impl Into<ProfileSearchParams>) -> Result<Vec<Profile>> {
        let params = params.into();
        let query = QueryParams::new()
            .with("query", params.query)
            .with("limit", params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
            .with("offset", params.offset.unwrap_or(0));

        let page = self.http.fetch(&format!("{PATH}/search"), Some(&query)).await?;
        let profiles = parse_page(page, Profile::from_value)?;
        debug!(count = profiles.len(), "Profile search completed");
        Ok(profiles)
    }

    /// Lazily pages through every profile.
    pub fn list(&self, params: ProfileListParams) -> BoxStream<'static, Result<Profile>> {
        let query = QueryParams::new().with("orderBy", params.order_by);
        paginate_query(
            Arc::clone(&self.http),
            PATH,
            query,
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            Profile::from_value,
        )
    }

    /// Every profile, collected. Use with care on large listings.
    pub async fn list_all(&self, params: ProfileListParams) -> Result<Vec<Profile>> {
        collect_all(self.list(params)).await
    }

    /// Most recently created profiles.
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<Profile>> {
        let query = QueryParams::new().with("limit", limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
        let page = self.http.fetch(&format!("{PATH}/recent"), Some(&query)).await?;
        parse_page(page, Profile::from_value)
    }
}
