//! Profiles.

use super::score::ScoreLevel;
use crate::error::Result;
use crate::parser_utils::{null_as_default, option_datetime, parse_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Userkey prefixes that carry a Twitter / X handle.
const TWITTER_USERKEY_PREFIXES: [&str; 2] = ["x.com/user/", "twitter.com/user/"];

/// Review counters of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewCounts {
    /// Positive reviews.
    pub positive: u64,
    /// Neutral reviews.
    pub neutral: u64,
    /// Negative reviews.
    pub negative: u64,
}

/// Reviews section of [`ProfileStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewStats {
    /// Reviews received.
    pub received: ReviewCounts,
}

/// Vouch counters in one direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VouchCounts {
    /// Number of vouches.
    pub count: u64,
    /// Summed stake, in wei.
    pub amount_wei_total: f64,
}

/// Vouches section of [`ProfileStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VouchStats {
    /// Vouches given.
    pub given: VouchCounts,
    /// Vouches received.
    pub received: VouchCounts,
}

/// Activity counters of a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileStats {
    /// Review counters.
    pub review: ReviewStats,
    /// Vouch counters.
    pub vouch: VouchStats,
}

/// Web links of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileLinks {
    /// Public profile page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Score breakdown page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<String>,
}

/// An Ethos profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Record identifier.
    pub id: u64,
    /// Profile identifier, when distinct from `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<u64>,
    /// Primary Ethereum address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Free-form bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Credibility score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i64,
    /// Account status.
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
    /// Linked identities (`address:0x..`, `x.com/user/..`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub userkeys: Vec<String>,
    /// Experience points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub xp_total: i64,
    /// Consecutive days with XP.
    #[serde(default, deserialize_with = "null_as_default")]
    pub xp_streak_days: i64,
    /// Whether XP was removed for abuse.
    #[serde(default, deserialize_with = "null_as_default")]
    pub xp_removed_due_to_abuse: bool,
    /// Influence factor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub influence_factor: f64,
    /// Influence factor percentile.
    #[serde(default, deserialize_with = "null_as_default")]
    pub influence_factor_percentile: f64,
    /// Web links.
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: ProfileLinks,
    /// Review and vouch counters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: ProfileStats,
    /// Creation time.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    "ACTIVE".to_string()
}

fn status_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

impl Profile {
    /// Builds a profile from a raw API record.
    ///
    /// ```rust
    /// use ethos_core::types::{Profile, ScoreLevel};
    ///
    /// let profile = Profile::from_value(serde_json::json!({
    ///     "id": 1,
    ///     "score": 1420,
    ///     "userkeys": ["address:0xabc", "x.com/user/vitalik"],
    /// }))
    /// .unwrap();
    /// assert_eq!(profile.twitter_handle(), Some("vitalik"));
    /// assert_eq!(profile.score_level(), ScoreLevel::Neutral);
    /// assert_eq!(profile.status, "ACTIVE");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        parse_record(value, "Profile")
    }

    /// Twitter / X handle from the first matching userkey.
    pub fn twitter_handle(&self) -> Option<&str> {
        self.userkeys.iter().find_map(|key| {
            TWITTER_USERKEY_PREFIXES
                .iter()
                .find_map(|prefix| key.strip_prefix(prefix))
        })
    }

    /// Primary Ethereum address.
    pub fn ethereum_address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Alias for `score`.
    pub fn credibility_score(&self) -> i64 {
        self.score
    }

    /// Credibility band of the score.
    pub fn score_level(&self) -> ScoreLevel {
        ScoreLevel::from_score(self.score)
    }

    /// Number of vouches received.
    pub fn vouches_received_count(&self) -> u64 {
        self.stats.vouch.received.count
    }

    /// Number of vouches given.
    pub fn vouches_given_count(&self) -> u64 {
        self.stats.vouch.given.count
    }

    /// Positive reviews received.
    pub fn reviews_positive(&self) -> u64 {
        self.stats.review.received.positive
    }

    /// Negative reviews received.
    pub fn reviews_negative(&self) -> u64 {
        self.stats.review.received.negative
    }
}
