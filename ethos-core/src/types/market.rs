//! Reputation markets: trust / distrust prediction markets on a profile.

use crate::error::Result;
use crate::parser_utils::{option_datetime, parse_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Price both sides start at.
pub const DEFAULT_PRICE: f64 = 0.5;
/// Price above which one side dominates the market.
pub const SENTIMENT_THRESHOLD: f64 = 0.6;
/// Lower bound of the trust price band regarded as volatile.
pub const VOLATILE_LOW: f64 = 0.4;

/// Overall direction of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Trust price above 0.6.
    Bullish,
    /// Distrust price above 0.6.
    Bearish,
    /// Neither side above 0.6.
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        })
    }
}

/// Nested `user` object of a market record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<i64>,
}

/// Wire shape of a market.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketRecord {
    id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<MarketUser>,
    #[serde(default)]
    trust_votes: Option<u64>,
    #[serde(default)]
    distrust_votes: Option<u64>,
    #[serde(default)]
    trust_price: Option<f64>,
    #[serde(default)]
    distrust_price: Option<f64>,
    #[serde(default)]
    total_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    liquidity_parameter: Option<f64>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// A reputation market.
///
/// The owning profile comes from the top-level `profileId`, then from
/// `user.profileId`, then falls back to the market id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MarketRecord", into = "MarketRecord")]
pub struct Market {
    /// Market identifier.
    pub id: u64,
    /// Profile the market is about.
    pub profile_id: u64,
    /// Username of that profile.
    pub username: Option<String>,
    /// Score of that profile.
    pub user_score: Option<i64>,
    /// Trust votes cast.
    pub trust_votes: u64,
    /// Distrust votes cast.
    pub distrust_votes: u64,
    /// Price of a trust vote, between 0 and 1.
    pub trust_price: f64,
    /// Price of a distrust vote, between 0 and 1.
    pub distrust_price: f64,
    /// Traded volume.
    pub total_volume: f64,
    /// LMSR liquidity parameter.
    pub liquidity_parameter: Option<f64>,
    /// Whether trading is open.
    pub is_active: bool,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MarketRecord> for Market {
    fn from(record: MarketRecord) -> Self {
        let user = record.user.unwrap_or_default();
        Self {
            id: record.id,
            profile_id: record.profile_id.or(user.profile_id).unwrap_or(record.id),
            username: user.username,
            user_score: user.score,
            trust_votes: record.trust_votes.unwrap_or(0),
            distrust_votes: record.distrust_votes.unwrap_or(0),
            trust_price: record.trust_price.unwrap_or(DEFAULT_PRICE),
            distrust_price: record.distrust_price.unwrap_or(DEFAULT_PRICE),
            total_volume: record.total_volume.unwrap_or(0.0),
            liquidity_parameter: record.liquidity_parameter,
            is_active: record.is_active.unwrap_or(true),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<Market> for MarketRecord {
    fn from(market: Market) -> Self {
        let user = market.username.map(|username| MarketUser {
            profile_id: Some(market.profile_id),
            username: Some(username),
            score: market.user_score,
        });
        Self {
            id: market.id,
            profile_id: Some(market.profile_id),
            user,
            trust_votes: Some(market.trust_votes),
            distrust_votes: Some(market.distrust_votes),
            trust_price: Some(market.trust_price),
            distrust_price: Some(market.distrust_price),
            total_volume: Some(market.total_volume),
            liquidity_parameter: market.liquidity_parameter,
            is_active: Some(market.is_active),
            created_at: market.created_at,
            updated_at: market.updated_at,
        }
    }
}

impl Market {
    /// Builds a market from a raw API record.
    ///
    /// ```rust
    /// use ethos_core::types::{Market, Sentiment};
    ///
    /// let market = Market::from_value(serde_json::json!({
    ///     "id": 3,
    ///     "user": {"profileId": 77, "username": "bob"},
    ///     "trustPrice": 0.72,
    ///     "distrustPrice": 0.28,
    /// }))
    /// .unwrap();
    /// assert_eq!(market.profile_id, 77);
    /// assert_eq!(market.sentiment(), Sentiment::Bullish);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        parse_record(value, "Market")
    }

    /// Trust price as a percentage.
    pub fn trust_percentage(&self) -> f64 {
        self.trust_price * 100.0
    }

    /// Distrust price as a percentage.
    pub fn distrust_percentage(&self) -> f64 {
        self.distrust_price * 100.0
    }

    /// Direction of the market from its prices.
    pub fn sentiment(&self) -> Sentiment {
        if self.trust_price > SENTIMENT_THRESHOLD {
            Sentiment::Bullish
        } else if self.distrust_price > SENTIMENT_THRESHOLD {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    /// Trust price within `[0.4, 0.6]`.
    pub fn is_volatile(&self) -> bool {
        (VOLATILE_LOW..=SENTIMENT_THRESHOLD).contains(&self.trust_price)
    }
}
