use crate::error::{Error, Result};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::builder::HttpClient;

impl HttpClient {
    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent. The operation receives the zero-based
    /// attempt index.
    pub(crate) async fn execute_with_retry<F, Fut>(&self, operation: F) -> Result<Value>
    where
        F: Fn(u32) -> Fut,
        Fut: std::future::Future<Output = Result<Value>>,
    {
        let max_attempts = self.retry_strategy().max_attempts();
        if max_attempts == 0 {
            error!("Retry budget is zero, no request attempted");
            return Err(Error::network("No request attempted: max_retries is 0"));
        }

        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(response) => {
                    debug!(attempt = attempt + 1, "Operation completed successfully");
                    return Ok(response);
                }
                Err(e) => {
                    let should_retry = self.retry_strategy().should_retry(&e, attempt);

                    if should_retry {
                        let delay = self.retry_strategy().calculate_delay(attempt);

                        warn!(
                            attempt = attempt + 1,
                            max_attempts = max_attempts,
                            delay_ms = %delay.as_millis(),
                            error = %e,
                            error_debug = ?e,
                            is_retryable = e.is_retryable(),
                            "Operation failed, retrying after delay"
                        );

                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    } else {
                        error!(
                            attempt = attempt + 1,
                            max_attempts = max_attempts,
                            error = %e,
                            error_debug = ?e,
                            is_retryable = e.is_retryable(),
                            "Operation failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }
    }
}
