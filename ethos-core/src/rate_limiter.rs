//! Rate Limiter Module
//!
//! Paces request *starts*: before every attempt the caller waits until at
//! least `min_interval` has passed since the previous attempt began, then
//! records the new start time.
//!
//! # Features
//!
//! - **Minimum interval pacing**: one request start per interval
//! - **Async-Friendly**: Built on tokio for async/await support
//! - **Thread-Safe**: concurrent callers are serialised on one mutex
//!
//! # Example
//!
//! ```rust
//! use ethos_core::rate_limiter::RateLimiter;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let limiter = RateLimiter::new(Duration::from_millis(500));
//!
//! limiter.wait().await; // returns immediately
//! limiter.wait().await; // returns ~500ms after the first call
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Minimum-interval rate limiter.
///
/// Cloning is cheap and clones share the same last-request timestamp.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter enforcing `min_interval` between request starts.
    ///
    /// A zero interval never waits.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may start, then mark it as started.
    ///
    /// The lock is held across the sleep so that concurrent callers queue up
    /// and each observes the previous caller's start time.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                debug!(
                    wait_ms = %remaining.as_millis(),
                    "Rate limiter delaying request"
                );
                sleep(remaining).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Time until the next request may start without waiting.
    pub async fn time_until_ready(&self) -> Duration {
        let last = self.last_request.lock().await;
        match *last {
            Some(previous) => self.min_interval.saturating_sub(previous.elapsed()),
            None => Duration::ZERO,
        }
    }
}
