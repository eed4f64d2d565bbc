//! Reviews left by one profile about another.

use crate::error::Result;
use crate::parser_utils::{null_as_default, option_datetime, parse_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Sentiment of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewScore {
    /// Positive review.
    Positive,
    /// Neutral review.
    Neutral,
    /// Negative review.
    Negative,
}

impl ReviewScore {
    /// Wire name, used as the `score` filter.
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewScore::Positive => "positive",
            ReviewScore::Neutral => "neutral",
            ReviewScore::Negative => "negative",
        }
    }
}

impl fmt::Display for ReviewScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review identifier.
    pub id: u64,
    /// Reviewer.
    pub author_profile_id: u64,
    /// Reviewed profile.
    pub subject_profile_id: u64,
    /// Sentiment.
    pub score: ReviewScore,
    /// Review text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the review was withdrawn.
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
    /// Creation time.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Builds a review from a raw API record.
    pub fn from_value(value: Value) -> Result<Self> {
        parse_record(value, "Review")
    }

    /// `true` for a positive review.
    pub fn is_positive(&self) -> bool {
        self.score == ReviewScore::Positive
    }

    /// `true` for a negative review.
    pub fn is_negative(&self) -> bool {
        self.score == ReviewScore::Negative
    }

    /// `true` for a neutral review.
    pub fn is_neutral(&self) -> bool {
        self.score == ReviewScore::Neutral
    }

    /// Alias for `author_profile_id`.
    pub fn reviewer_id(&self) -> u64 {
        self.author_profile_id
    }

    /// Alias for `subject_profile_id`.
    pub fn target_id(&self) -> u64 {
        self.subject_profile_id
    }

    /// Alias for `subject_profile_id`.
    pub fn target_profile_id(&self) -> u64 {
        self.subject_profile_id
    }
}
