//! Credibility scores.

use crate::error::Result;
use crate::parser_utils::{null_as_default, option_datetime, parse_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lower bound of the `questionable` band.
pub const QUESTIONABLE_THRESHOLD: i64 = 800;
/// Lower bound of the `neutral` band.
pub const NEUTRAL_THRESHOLD: i64 = 1200;
/// Lower bound of the `reputable` band.
pub const REPUTABLE_THRESHOLD: i64 = 1600;
/// Lower bound of the `exemplary` band.
pub const EXEMPLARY_THRESHOLD: i64 = 2000;

/// Credibility band of a score.
///
/// | Score       | Level        |
/// |-------------|--------------|
/// | below 800   | Untrusted    |
/// | 800..1200   | Questionable |
/// | 1200..1600  | Neutral      |
/// | 1600..2000  | Reputable    |
/// | 2000 and up | Exemplary    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    /// Below 800.
    Untrusted,
    /// 800 to 1199.
    Questionable,
    /// 1200 to 1599.
    Neutral,
    /// 1600 to 1999.
    Reputable,
    /// 2000 and above.
    Exemplary,
}

impl ScoreLevel {
    /// Band containing `score`.
    ///
    /// ```rust
    /// use ethos_core::types::ScoreLevel;
    ///
    /// assert_eq!(ScoreLevel::from_score(799), ScoreLevel::Untrusted);
    /// assert_eq!(ScoreLevel::from_score(1600), ScoreLevel::Reputable);
    /// ```
    pub fn from_score(score: i64) -> Self {
        if score < QUESTIONABLE_THRESHOLD {
            ScoreLevel::Untrusted
        } else if score < NEUTRAL_THRESHOLD {
            ScoreLevel::Questionable
        } else if score < REPUTABLE_THRESHOLD {
            ScoreLevel::Neutral
        } else if score < EXEMPLARY_THRESHOLD {
            ScoreLevel::Reputable
        } else {
            ScoreLevel::Exemplary
        }
    }

    /// Lowercase name, as used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLevel::Untrusted => "untrusted",
            ScoreLevel::Questionable => "questionable",
            ScoreLevel::Neutral => "neutral",
            ScoreLevel::Reputable => "reputable",
            ScoreLevel::Exemplary => "exemplary",
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contribution of each signal to a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    /// Reviews received.
    #[serde(deserialize_with = "null_as_default")]
    pub reviews: f64,
    /// Vouches received.
    #[serde(deserialize_with = "null_as_default")]
    pub vouches: f64,
    /// Attestations.
    #[serde(deserialize_with = "null_as_default")]
    pub attestations: f64,
    /// On-chain activity.
    #[serde(deserialize_with = "null_as_default")]
    pub activity: f64,
    /// Account history.
    #[serde(deserialize_with = "null_as_default")]
    pub history: f64,
}

/// Credibility score of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Profile the score belongs to.
    pub profile_id: u64,
    /// Address the score was looked up by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Score value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: i64,
    /// Per-signal contributions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub breakdown: ScoreBreakdown,
    /// Percentile among all profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    /// Last recomputation.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Score {
    /// Builds a score from a raw API record.
    pub fn from_value(value: Value) -> Result<Self> {
        parse_record(value, "Score")
    }

    /// Credibility band of the score.
    pub fn level(&self) -> ScoreLevel {
        ScoreLevel::from_score(self.value)
    }

    /// `true` from the reputable band upwards.
    pub fn is_trusted(&self) -> bool {
        self.value >= REPUTABLE_THRESHOLD
    }

    /// `true` in the untrusted band.
    pub fn is_untrusted(&self) -> bool {
        self.value < QUESTIONABLE_THRESHOLD
    }
}
