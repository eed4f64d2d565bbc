//! Payload carried by API-derived errors.

use serde_json::Value;
use std::fmt;

/// Status, message and raw payload of a non-success API response.
///
/// Boxed inside [`super::Error`] to keep the enum small.
///
/// # Example
///
/// ```rust
/// use ethos_core::error::ApiErrorDetails;
///
/// let details = ApiErrorDetails::new(500, "Internal error");
/// assert_eq!(details.to_string(), "[500] Internal error");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ApiErrorDetails {
    /// HTTP status code.
    pub status: u16,
    /// Message extracted from the response, or a default.
    pub message: String,
    /// Raw response payload, when one was received.
    pub body: Option<Value>,
}

impl ApiErrorDetails {
    /// Creates details without a response payload.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Creates details carrying the raw response payload.
    pub fn with_body(status: u16, message: impl Into<String>, body: Value) -> Self {
        Self {
            status,
            message: message.into(),
            body: Some(body),
        }
    }
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}
