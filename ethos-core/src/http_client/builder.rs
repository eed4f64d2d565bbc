use crate::config::EthosConfig;
use crate::error::{Error, Result};
use crate::rate_limiter::RateLimiter;
use crate::retry_strategy::{RetryConfig, RetryStrategy};
use reqwest::Client;

use super::headers::default_headers;

/// HTTP client with retry and rate limiting support.
///
/// Cloning shares the connection pool and the rate limiter state, so clones
/// are paced together.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: EthosConfig,
    rate_limiter: RateLimiter,
    retry_strategy: RetryStrategy,
}

impl HttpClient {
    /// Creates a new HTTP client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client name is not a valid header value
    /// - The HTTP client cannot be built
    pub fn new(config: EthosConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers(config.client_name())?)
            .gzip(true)
            .user_agent(concat!("ethos-rust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {e}")))?;

        let rate_limiter = RateLimiter::new(config.rate_limit());
        let retry_strategy = RetryStrategy::new(RetryConfig::new(config.max_retries()));

        Ok(Self {
            client,
            config,
            rate_limiter,
            retry_strategy,
        })
    }

    /// Replaces the retry strategy, e.g. to shorten the backoff base delay.
    ///
    /// ```rust
    /// use ethos_core::config::EthosConfig;
    /// use ethos_core::http_client::HttpClient;
    /// use ethos_core::retry_strategy::{RetryConfig, RetryStrategy};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new(EthosConfig::default())
    ///     .unwrap()
    ///     .with_retry_strategy(RetryStrategy::new(
    ///         RetryConfig::new(3).with_base_delay(Duration::from_millis(10)),
    ///     ));
    /// assert_eq!(client.retry_strategy().max_attempts(), 3);
    /// ```
    #[must_use]
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Returns a reference to the client configuration.
    pub fn config(&self) -> &EthosConfig {
        &self.config
    }

    /// Returns the rate limiter shared by every request of this client.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Returns the retry strategy.
    pub fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry_strategy
    }

    /// Internal: Returns reference to the underlying reqwest client.
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}
