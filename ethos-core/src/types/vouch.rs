//! Vouches: ETH staked by one profile on another's reputation.

use crate::error::{Error, ParseError, Result};
use crate::parser_utils::{null_as_default, option_datetime, parse_record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// Wei per ether.
pub const WEI_PER_ETH: f64 = 1e18;

/// A vouch relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vouch {
    /// Vouch identifier.
    pub id: u64,
    /// Profile that staked.
    pub author_profile_id: u64,
    /// Profile vouched for.
    pub subject_profile_id: u64,
    /// Whether the stake is still in place.
    #[serde(default = "staked_default", deserialize_with = "staked_or_default")]
    pub staked: bool,
    /// Whether the vouch was withdrawn.
    #[serde(default, deserialize_with = "null_as_default")]
    pub archived: bool,
    /// Whether the vouch was marked unhealthy.
    #[serde(default, deserialize_with = "null_as_default")]
    pub unhealthy: bool,
    /// Staked amount in wei, as a decimal string.
    #[serde(default = "balance_default", deserialize_with = "wei_string")]
    pub balance: String,
    /// Opaque activity checkpoints.
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_checkpoints: Map<String, Value>,
    /// Creation time.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update.
    #[serde(default, with = "option_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn staked_default() -> bool {
    true
}

fn balance_default() -> String {
    "0".to_string()
}

fn staked_or_default<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

// Balances are wei strings, but integer JSON numbers are accepted too.
fn wei_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(balance_default()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected a wei amount, got {other}"
        ))),
    }
}

impl Vouch {
    /// Builds a vouch from a raw API record.
    pub fn from_value(value: Value) -> Result<Self> {
        parse_record(value, "Vouch")
    }

    /// Staked amount in wei.
    ///
    /// ```rust
    /// use ethos_core::types::Vouch;
    ///
    /// let vouch = Vouch::from_value(serde_json::json!({
    ///     "id": 1,
    ///     "authorProfileId": 2,
    ///     "subjectProfileId": 3,
    ///     "balance": "1500000000000000000",
    /// }))
    /// .unwrap();
    /// assert_eq!(vouch.amount_wei().unwrap(), 1_500_000_000_000_000_000);
    /// assert!((vouch.amount_eth().unwrap() - 1.5).abs() < f64::EPSILON);
    /// ```
    pub fn amount_wei(&self) -> Result<u128> {
        self.balance.trim().parse::<u128>().map_err(|e| {
            Error::from(ParseError::invalid_value(
                "balance",
                format!("{:?} is not a wei amount: {e}", self.balance),
            ))
        })
    }

    /// Staked amount in ether. Precision is limited to `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn amount_eth(&self) -> Result<f64> {
        Ok(self.amount_wei()? as f64 / WEI_PER_ETH)
    }

    /// Staked and not archived.
    pub fn is_active(&self) -> bool {
        self.staked && !self.archived
    }

    /// Alias for `author_profile_id`.
    pub fn voucher_id(&self) -> u64 {
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
