//! HTTP transport for the Ethos API.
//!
//! Every resource call goes through [`HttpClient`], which provides:
//! - URL building against the configured base URL with `null`-skipping query parameters
//! - Default headers (`Accept`, `Content-Type`, `X-Ethos-Client`)
//! - Minimum-interval rate limiting before every attempt, retries included
//! - A bounded retry loop with exponential backoff (1s, 2s, 4s, ...)
//! - A per-attempt deadline, treated as a retryable transport failure
//! - Classification of non-success responses into the error taxonomy
//!
//! # Example
//!
//! ```rust,no_run
//! use ethos_core::config::EthosConfig;
//! use ethos_core::http_client::{HttpClient, QueryParams};
//!
//! # async fn example() -> ethos_core::Result<()> {
//! let client = HttpClient::new(EthosConfig::default())?;
//!
//! let profile = client.fetch("/profiles/1", None).await?;
//! let page = client
//!     .fetch("/reviews", Some(&QueryParams::new().with("limit", 10)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod headers;
mod params;
mod request;
mod response;
mod retry;

#[cfg(test)]
mod tests;

pub use builder::HttpClient;
pub use headers::CLIENT_HEADER;
pub use params::QueryParams;
