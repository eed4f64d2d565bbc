//! Client configuration.
//!
//! [`EthosConfig`] is an immutable value built once from
//! [`EthosConfigOptions`]: every field left unset takes its documented
//! default. No validation is performed beyond type conversion; unusual values
//! (a zero timeout, zero retries) surface as transport failures at call time.
//!
//! ```rust
//! use ethos_core::config::{EthosConfig, EthosConfigOptions, DEFAULT_BASE_URL};
//! use std::time::Duration;
//!
//! let config = EthosConfig::new(
//!     EthosConfigOptions::new()
//!         .client_name("my-dapp")
//!         .rate_limit(Duration::from_millis(250)),
//! );
//! assert_eq!(config.base_url(), DEFAULT_BASE_URL);
//! assert_eq!(config.client_name(), "my-dapp");
//! assert_eq!(config.max_retries(), 3);
//! ```

use crate::error::{Error, Result};
use std::time::Duration;

/// Canonical v2 endpoint of the Ethos API.
pub const DEFAULT_BASE_URL: &str = "https://api.ethos.network/api/v2";
/// Client identifier sent in the `X-Ethos-Client` header.
pub const DEFAULT_CLIENT_NAME: &str = "ethos-rust-sdk";
/// Per-attempt request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
/// Minimum interval between the starts of two consecutive requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(500);
/// Number of attempts made for one call.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "ETHOS_API_BASE_URL";
/// Environment variable overriding the client name.
pub const ENV_CLIENT_NAME: &str = "ETHOS_CLIENT_NAME";
/// Environment variable overriding the timeout, in milliseconds.
pub const ENV_TIMEOUT: &str = "ETHOS_TIMEOUT";
/// Environment variable overriding the rate limit, in milliseconds.
pub const ENV_RATE_LIMIT: &str = "ETHOS_RATE_LIMIT";
/// Environment variable overriding the attempt count.
pub const ENV_MAX_RETRIES: &str = "ETHOS_MAX_RETRIES";

/// Optional overrides merged over the defaults by [`EthosConfig::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EthosConfigOptions {
    /// API base URL
    pub base_url: Option<String>,
    /// Client identifier header value
    pub client_name: Option<String>,
    /// Per-attempt timeout
    pub timeout: Option<Duration>,
    /// Minimum interval between request starts
    pub rate_limit: Option<Duration>,
    /// Attempts per call
    pub max_retries: Option<u32>,
}

impl EthosConfigOptions {
    /// Creates an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the client identifier
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the minimum interval between request starts
    pub fn rate_limit(mut self, interval: Duration) -> Self {
        self.rate_limit = Some(interval);
        self
    }

    /// Set the number of attempts per call
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}

/// Effective, immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthosConfig {
    base_url: String,
    client_name: String,
    timeout: Duration,
    rate_limit: Duration,
    max_retries: u32,
}

impl Default for EthosConfig {
    fn default() -> Self {
        Self::new(EthosConfigOptions::default())
    }
}

impl From<EthosConfigOptions> for EthosConfig {
    fn from(options: EthosConfigOptions) -> Self {
        Self::new(options)
    }
}

impl EthosConfig {
    /// Merges `options` over the defaults.
    pub fn new(options: EthosConfigOptions) -> Self {
        Self {
            base_url: options
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client_name: options
                .client_name
                .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT),
            rate_limit: options.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
            max_retries: options.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        }
    }

    /// Builds a configuration from `ETHOS_*` environment variables.
    ///
    /// Unset or empty variables fall back to the defaults. Numeric variables
    /// that do not parse as integers yield [`Error::Validation`].
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`EthosConfig::from_env`] with an injectable variable lookup.
    ///
    /// ```rust
    /// use ethos_core::config::EthosConfig;
    /// use std::time::Duration;
    ///
    /// let config = EthosConfig::from_env_with(|key| match key {
    ///     "ETHOS_TIMEOUT" => Some("1500".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.timeout(), Duration::from_millis(1500));
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let options = EthosConfigOptions {
            base_url: var(ENV_BASE_URL),
            client_name: var(ENV_CLIENT_NAME),
            timeout: var(ENV_TIMEOUT)
                .map(|v| parse_integer(ENV_TIMEOUT, &v))
                .transpose()?
                .map(Duration::from_millis),
            rate_limit: var(ENV_RATE_LIMIT)
                .map(|v| parse_integer(ENV_RATE_LIMIT, &v))
                .transpose()?
                .map(Duration::from_millis),
            max_retries: var(ENV_MAX_RETRIES)
                .map(|v| parse_integer(ENV_MAX_RETRIES, &v))
                .transpose()?
                .map(|n| u32::try_from(n).unwrap_or(u32::MAX)),
        };

        Ok(Self::new(options))
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client identifier header value
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Minimum interval between request starts
    pub fn rate_limit(&self) -> Duration {
        self.rate_limit
    }

    /// Attempts per call
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

fn parse_integer(key: &'static str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|e| {
        Error::validation(
            format!("{key} must be a non-negative integer, got {value:?}"),
            vec![serde_json::json!({ "variable": key, "reason": e.to_string() })],
        )
    })
}
