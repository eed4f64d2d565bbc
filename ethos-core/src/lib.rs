//! Ethos Core Library
//!
//! Core building blocks of the Rust client for the Ethos reputation network
//! API: configuration, the HTTP transport, the error taxonomy, pagination
//! and the record types returned by the API.
//!
//! # Features
//!
//! - **Rate limiting**: a minimum interval between requests, retries included
//! - **Retries**: exponential backoff for transport failures and 5xx responses
//! - **Pagination**: lazy streams over offset-based listings, GET or POST
//! - **Error Handling**: one [`Error`] enum built with `thiserror`
//!
//! # Example
//!
//! ```rust,no_run
//! use ethos_core::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let http = HttpClient::new(EthosConfig::default())?;
//! let record = http.fetch("/profiles/1", None).await?;
//! let profile = Profile::from_value(record)?;
//! println!("{} has score {}", profile.id, profile.score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// =============================================================================
// Global Clippy Lint Suppressions
// =============================================================================
// - module_name_repetitions: ProfileStats in profile, HttpClient in http_client
// - missing_errors_doc: every transport call returns the same Error taxonomy
// - must_use_candidate: accessors and derived values
// - doc_markdown: wire names (camelCase, JSON) in docs
// - cast_precision_loss: wei amounts and counters reported as f64
// - return_self_not_must_use: builder setters
// - unreadable_literal: wei amounts in tests and docs
// =============================================================================
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]

// Re-exports of external dependencies
pub use serde;
pub use serde_json;

pub mod config;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod pagination;
pub mod parser_utils;
pub mod rate_limiter;
pub mod retry_strategy;
pub mod types;

pub use config::{EthosConfig, EthosConfigOptions};
pub use error::{
    ApiErrorDetails, ContextExt, Error, ErrorKind, NetworkError, ParseError, Result,
};
pub use http_client::{HttpClient, QueryParams};
pub use pagination::{DEFAULT_PAGE_SIZE, collect_all, extract_items, paginate_body, paginate_query};
pub use types::{
    Activity, ActivityType, Market, Profile, Review, ReviewScore, Score, ScoreBreakdown,
    ScoreLevel, Sentiment, Vouch,
};

/// Prelude module for convenient imports
///
/// ```rust
/// use ethos_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{EthosConfig, EthosConfigOptions};
    pub use crate::error::{ContextExt, Error, ErrorKind, Result};
    pub use crate::http_client::{HttpClient, QueryParams};
    pub use crate::logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
    pub use crate::pagination::{DEFAULT_PAGE_SIZE, collect_all};
    pub use crate::rate_limiter::RateLimiter;
    pub use crate::retry_strategy::{RetryConfig, RetryStrategy};
    pub use crate::types::{
        Activity, ActivityType, Market, Profile, ProfileStats, Review, ReviewScore, Score,
        ScoreBreakdown, ScoreLevel, Sentiment, Vouch,
    };
}
