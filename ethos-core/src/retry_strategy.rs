//! Retry strategy module.
//!
//! Decides whether a failed attempt is retried and how long to back off:
//! - Bounded attempt count (the configured `max_retries`)
//! - Exponential backoff: `base_delay * 2^attempt_index`
//! - Client errors (API responses with a status in `[400, 500)`) are final

use crate::error::Error;
use std::time::Duration;

/// Default base delay of the exponential backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each further attempt.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: crate::config::DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryConfig {
    /// Creates a configuration with the default base delay.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Set the base delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

/// Retry strategy.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    config: RetryConfig,
}

impl RetryStrategy {
    /// Creates a new retry strategy with the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Determines whether another attempt follows a failure.
    ///
    /// # Arguments
    ///
    /// * `error` - The error of the failed attempt.
    /// * `attempt` - Zero-based index of the failed attempt.
    ///
    /// # Returns
    ///
    /// `true` if the error is retryable and attempts remain.
    pub fn should_retry(&self, error: &Error, attempt: u32) -> bool {
        !Self::is_fatal(error) && self.has_attempts_left(attempt)
    }

    /// Returns `true` if `attempt` (zero-based) is not the last allowed one.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) < self.config.max_attempts
    }

    /// Errors that abort the retry loop immediately.
    pub fn is_fatal(error: &Error) -> bool {
        !error.is_retryable()
    }

    /// Backoff before the attempt following `attempt` (zero-based).
    ///
    /// ```rust
    /// use ethos_core::retry_strategy::{RetryConfig, RetryStrategy};
    /// use std::time::Duration;
    ///
    /// let strategy = RetryStrategy::new(RetryConfig::default());
    /// assert_eq!(strategy.calculate_delay(0), Duration::from_millis(1000));
    /// assert_eq!(strategy.calculate_delay(1), Duration::from_millis(2000));
    /// assert_eq!(strategy.calculate_delay(2), Duration::from_millis(4000));
    /// ```
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let factor = 2_u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.config
            .base_delay
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
    }

    /// Returns a reference to the retry configuration.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Returns the maximum number of attempts.
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }
}
