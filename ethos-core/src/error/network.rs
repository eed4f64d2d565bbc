//! Network-related error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Transport-level failures, hiding the HTTP library's own error type.
///
/// Every variant is treated as transient by the retry loop.
///
/// # Example
///
/// ```rust
/// use ethos_core::error::{Error, NetworkError};
///
/// let err = Error::from(NetworkError::Timeout);
/// assert!(err.is_retryable());
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetworkError {
    /// Request timed out inside the HTTP stack.
    #[error("Request timeout")]
    Timeout,

    /// Connection failed or the request could not be sent.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Opaque transport error for underlying issues.
    #[error("Transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
}
