//! Record types returned by the Ethos API.
//!
//! Every record deserializes from the camelCase JSON the API returns and
//! serializes back to the same shape. Fields the API may omit or send as
//! `null` fall back to documented defaults, so parsing only fails when a
//! required identifier is missing or a value has the wrong type.
//!
//! Each record has a `from_value` constructor that reports failures as
//! [`crate::error::ParseError`] naming the record.

pub mod activity;
pub mod market;
pub mod profile;
pub mod review;
pub mod score;
pub mod vouch;

pub use activity::{Activity, ActivityType};
pub use market::{Market, Sentiment};
pub use profile::{
    Profile, ProfileLinks, ProfileStats, ReviewCounts, ReviewStats, VouchCounts, VouchStats,
};
pub use review::{Review, ReviewScore};
pub use score::{Score, ScoreBreakdown, ScoreLevel};
pub use vouch::Vouch;
