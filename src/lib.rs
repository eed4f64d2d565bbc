//! # Ethos Rust
//!
//! Rust client for the Ethos reputation network API.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest
//! - **Rate limiting**: Minimum spacing between requests, retries included
//! - **Retries**: Exponential backoff on network failures and server errors
//! - **Pagination**: Lazy streams over every listing endpoint
//! - **Typed records**: Profiles, vouches, reviews, markets, activities and scores
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ethos_rust::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     init_logging(&LogConfig::development());
//!
//!     let ethos = Ethos::default_client()?;
//!     let profile = ethos.profiles().get_by_twitter("vitalikbuterin").await?;
//!     println!("score {} ({})", profile.score, profile.score_level());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export core types and the client
pub use ethos_api::{self, Ethos};
pub use ethos_core::{
    self,
    error::{Error, ErrorKind, Result},
    types::*,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use ethos_api::{
        ActivityListParams, Ethos, MarketListParams, ProfileListParams, ProfileSearchParams,
        ReviewListParams, VouchListParams,
    };
    pub use ethos_core::prelude::*;
}
