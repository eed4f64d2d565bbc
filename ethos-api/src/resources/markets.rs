//! Reputation markets.
//!
//! Rankings (`top_by_volume`, `most_trusted`, `most_distrusted`) are computed
//! client-side over the full listing, so they cost one request per page of
//! markets.

use super::fetch_record;
use ethos_core::Result;
use ethos_core::http_client::{HttpClient, QueryParams};
use ethos_core::pagination::{DEFAULT_PAGE_SIZE, collect_all, paginate_query};
use ethos_core::types::Market;
use futures::stream::BoxStream;
use std::cmp::Ordering;
use std::sync::Arc;

const PATH: &str = "/markets";

/// Number of markets returned by the rankings when none is given.
pub const DEFAULT_RANKING_LIMIT: usize = 20;

/// Filters of [`Markets::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketListParams {
    /// Only open (or closed) markets.
    pub is_active: Option<bool>,
    /// Page size; defaults to 100.
    pub limit: Option<u32>,
}

impl MarketListParams {
    /// Empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the active flag.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Markets API.
#[derive(Debug, Clone)]
pub struct Markets {
    http: Arc<HttpClient>,
}

impl Markets {
    /// Wraps a shared transport.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Market by id.
    pub async fn get(&self, market_id: u64) -> Result<Market> {
        fetch_record(&self.http, &format!("{PATH}/{market_id}"), Market::from_value).await
    }

    /// Market about a profile.
    pub async fn get_by_profile(&self, profile_id: u64) -> Result<Market> {
        let path = format!("{PATH}/profile/{profile_id}");
        fetch_record(&self.http, &path, Market::from_value).await
    }

    /// Lazily pages through the markets matching `params`.
    pub fn list(&self, params: MarketListParams) -> BoxStream<'static, Result<Market>> {
        paginate_query(
            Arc::clone(&self.http),
            PATH,
            QueryParams::new().with("isActive", params.is_active),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            Market::from_value,
        )
    }

    /// Every market matching `params`.
    pub async fn list_all(&self, params: MarketListParams) -> Result<Vec<Market>> {
        collect_all(self.list(params)).await
    }

    /// Markets with the highest traded volume.
    pub async fn top_by_volume(&self, limit: Option<usize>) -> Result<Vec<Market>> {
        self.ranked(limit, |a, b| b.total_volume.total_cmp(&a.total_volume))
            .await
    }

    /// Markets with the highest trust price.
    pub async fn most_trusted(&self, limit: Option<usize>) -> Result<Vec<Market>> {
        self.ranked(limit, |a, b| b.trust_price.total_cmp(&a.trust_price))
            .await
    }

    /// Markets with the highest distrust price.
    pub async fn most_distrusted(&self, limit: Option<usize>) -> Result<Vec<Market>> {
        self.ranked(limit, |a, b| b.distrust_price.total_cmp(&a.distrust_price))
            .await
    }

    async fn ranked<F>(&self, limit: Option<usize>, order: F) -> Result<Vec<Market>>
    where
        F: FnMut(&Market, &Market) -> Ordering,
    {
        let mut markets = self.list_all(MarketListParams::default()).await?;
        markets.sort_by(order);
        markets.truncate(limit.unwrap_or(DEFAULT_RANKING_LIMIT));
        Ok(markets)
    }
}
