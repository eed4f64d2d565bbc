//! On-chain activities.

use crate::error::Result;
use crate::parser_utils::{null_as_default, option_datetime, parse_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Block explorer used for transaction links.
pub const EXPLORER_TX_URL: &str = "https://basescan.org/tx/";

/// Known activity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    /// A vouch was created.
    Vouch,
    /// A vouch was withdrawn.
    Unvouch,
    /// A review was left.
    Review,
    /// An attestation was made.
    Attestation,
    /// An invitation was accepted.
    InviteAccepted,
    /// A profile was created.
    ProfileCreated,
    /// A score changed.
    ScoreUpdated,
}

impl ActivityType {
    /// Wire name, used as the `type` filter.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Vouch => "vouch",
            ActivityType::Unvouch => "unvouch",
            ActivityType::Review => "review",
            ActivityType::Attestation => "attestation",
            ActivityType::InviteAccepted => "invite_accepted",
            ActivityType::ProfileCreated => "profile_created",
            ActivityType::ScoreUpdated => "score_updated",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "vouch" => ActivityType::Vouch,
            "unvouch" => ActivityType::Unvouch,
            "review" => ActivityType::Review,
            "attestation" => ActivityType::Attestation,
            "invite_accepted" => ActivityType::InviteAccepted,
            "profile_created" => ActivityType::ProfileCreated,
            "score_updated" => ActivityType::ScoreUpdated,
            _ => return Err(()),
        })
    }
}

/// An activity record.
///
/// `activity_type` is kept as the raw string so unknown types survive a
/// round trip; [`Activity::kind`] maps it to [`ActivityType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity identifier.
    pub id: u64,
    /// Raw activity type.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub activity_type: String,
    /// Acting profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_profile_id: Option<u64>,
    /// Target profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_profile_id: Option<u64>,
    /// Transaction hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Block number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Type-specific payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    /// Creation time.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Builds an activity from a raw API record.
    pub fn from_value(value: Value) -> Result<Self> {
        parse_record(value, "Activity")
    }

    /// Known type of the activity, if any.
    pub fn kind(&self) -> Option<ActivityType> {
        self.activity_type.parse().ok()
    }

    /// `true` for a vouch activity.
    pub fn is_vouch(&self) -> bool {
        self.kind() == Some(ActivityType::Vouch)
    }

    /// `true` for a review activity.
    pub fn is_review(&self) -> bool {
        self.kind() == Some(ActivityType::Review)
    }

    /// Alias for `author_profile_id`.
    pub fn actor_id(&self) -> Option<u64> {
        self.author_profile_id
    }

    /// Alias for `subject_profile_id`.
    pub fn target_profile_id(&self) -> Option<u64> {
        self.subject_profile_id
    }

    /// Block explorer link for the transaction.
    ///
    /// ```rust
    /// use ethos_core::types::Activity;
    ///
    /// let activity = Activity::from_value(serde_json::json!({
    ///     "id": 1, "type": "vouch", "txHash": "0xabc"
    /// }))
    /// .unwrap();
    /// assert_eq!(activity.explorer_url().as_deref(), Some("https://basescan.org/tx/0xabc"));
    /// ```
    pub fn explorer_url(&self) -> Option<String> {
        self.tx_hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .map(|hash| format!("{EXPLORER_TX_URL}{hash}"))
    }
}
