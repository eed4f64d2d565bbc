//! # Error Handling for the Ethos client
//!
//! Every failure surfaced by the client is a variant of a single [`Error`]
//! enum. Callers branch on the variant (or on [`Error::kind`]) instead of on
//! a type hierarchy.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error
//! ├── Network        - transport failures (via NetworkError), retryable
//! ├── Timeout        - a single attempt exceeded its deadline, retryable
//! ├── Parse          - malformed response or unusable record (via ParseError)
//! ├── NotFound       - HTTP 404
//! ├── RateLimit      - HTTP 429, with optional retry-after hint
//! ├── Authentication - HTTP 401 / 403
//! ├── Api            - any other non-2xx response
//! ├── Validation     - caller-side validation, never raised by the transport
//! └── Context        - error with additional context
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ethos_core::error::{Error, ErrorKind};
//!
//! fn handle(err: &Error) {
//!     match err.kind() {
//!         ErrorKind::RateLimit => {
//!             if let Some(wait) = err.retry_after() {
//!                 println!("back off for {wait:?}");
//!             }
//!         }
//!         ErrorKind::NotFound => println!("unknown identifier"),
//!         _ => println!("{}", err.report()),
//!     }
//! }
//! # handle(&Error::not_found());
//! ```
//!
//! API-derived variants keep the status code and the raw response payload:
//!
//! ```rust
//! use ethos_core::error::Error;
//!
//! let err = Error::api(500, "boom", Some(serde_json::json!({"message": "boom"})));
//! assert_eq!(err.status_code(), Some(500));
//! assert!(err.response_body().is_some());
//! ```

mod context;
mod convert;
mod details;
mod network;
mod parse;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub(crate) use convert::truncate_message;
pub use context::ContextExt;
pub use details::ApiErrorDetails;
pub use network::NetworkError;
pub use parse::ParseError;

/// Result type alias for all Ethos operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Default message of a [`Error::NotFound`] error.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
/// Default message of a [`Error::RateLimit`] error.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limited";
/// Default message of a [`Error::Authentication`] error.
pub const AUTHENTICATION_MESSAGE: &str = "Authentication failed";

/// The primary error type of the Ethos client.
///
/// Large payloads are boxed to keep the enum small.
///
/// # Example
///
/// ```rust
/// use ethos_core::error::Error;
///
/// let err = Error::rate_limited(Some(std::time::Duration::from_secs(60)));
/// assert_eq!(err.status_code(), Some(429));
/// assert!(err.to_string().contains("Rate limited"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Network-related errors encapsulating transport layer issues.
    #[error("Network error: {0}")]
    Network(Box<NetworkError>),

    /// A single request attempt exceeded the configured deadline.
    #[error("Timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// Errors during response parsing.
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),

    /// The requested resource does not exist (HTTP 404).
    #[error("{0}")]
    NotFound(Box<ApiErrorDetails>),

    /// The API rejected the request because of rate limiting (HTTP 429).
    #[error("{details}")]
    RateLimit {
        /// Status, message and payload of the response
        details: Box<ApiErrorDetails>,
        /// Server-suggested wait before retrying, from `Retry-After`
        retry_after: Option<Duration>,
    },

    /// The API rejected the client identity (HTTP 401 or 403).
    #[error("{0}")]
    Authentication(Box<ApiErrorDetails>),

    /// Any other non-success response.
    #[error("{0}")]
    Api(Box<ApiErrorDetails>),

    /// Request validation failed before anything was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Summary message
        message: Cow<'static, str>,
        /// Individual validation failures
        errors: Vec<serde_json::Value>,
    },

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

/// Stable discriminant of an [`Error`], penetrating context layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network failure, timeout or malformed response.
    Transport,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimit,
    /// HTTP 401 / 403.
    Authentication,
    /// Any other API error response.
    Api,
    /// Caller-side validation failure.
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Api => "api",
            ErrorKind::Validation => "validation",
        };
        f.write_str(s)
    }
}

impl Error {
    // ==================== Constructor Methods ====================

    /// Creates a not-found error with the default message.
    pub fn not_found() -> Self {
        Self::NotFound(Box::new(ApiErrorDetails::new(404, NOT_FOUND_MESSAGE)))
    }

    /// Creates a rate limit error with the default message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ethos_core::error::Error;
    /// use std::time::Duration;
    ///
    /// let err = Error::rate_limited(Some(Duration::from_secs(60)));
    /// assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
    /// ```
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::RateLimit {
            details: Box::new(ApiErrorDetails::new(429, RATE_LIMIT_MESSAGE)),
            retry_after,
        }
    }

    /// Creates an authentication error with the default message.
    pub fn authentication() -> Self {
        Self::Authentication(Box::new(ApiErrorDetails::new(401, AUTHENTICATION_MESSAGE)))
    }

    /// Creates a generic API error.
    pub fn api(status: u16, message: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        let mut details = ApiErrorDetails::new(status, message);
        details.body = body;
        Self::Api(Box::new(details))
    }

    /// Creates a validation error.
    pub fn validation(
        message: impl Into<Cow<'static, str>>,
        errors: Vec<serde_json::Value>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    /// Creates a network error from a message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(NetworkError::ConnectionFailed(msg.into())))
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Replaces the message of an API-derived error. Other variants are
    /// returned unchanged.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(details) = self.details_mut() {
            details.message = message.into();
        }
        self
    }

    /// Attaches the raw response payload to an API-derived error. Other
    /// variants are returned unchanged.
    #[must_use]
    pub fn with_response_body(mut self, body: Option<serde_json::Value>) -> Self {
        if let Some(details) = self.details_mut() {
            details.body = body;
        }
        self
    }

    /// Attaches context to an existing error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ethos_core::error::Error;
    ///
    /// let err = Error::not_found().context("Failed to fetch profile 42");
    /// assert_eq!(err.status_code(), Some(404));
    /// ```
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    // ==================== Chain Traversal Methods ====================

    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Generates a detailed error report with the full chain.
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    // ==================== Helper Methods (Context Penetrating) ====================

    /// Returns the stable discriminant of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Api(_) => ErrorKind::Api,
            Error::Validation { .. } => ErrorKind::Validation,
            _ => ErrorKind::Transport,
        }
    }

    /// Returns the status, message and payload of an API-derived error.
    #[must_use]
    pub fn details(&self) -> Option<&ApiErrorDetails> {
        match self.root_cause() {
            Error::NotFound(details)
            | Error::Authentication(details)
            | Error::Api(details)
            | Error::RateLimit { details, .. } => Some(details),
            _ => None,
        }
    }

    fn details_mut(&mut self) -> Option<&mut ApiErrorDetails> {
        match self {
            Error::NotFound(details)
            | Error::Authentication(details)
            | Error::Api(details)
            | Error::RateLimit { details, .. } => Some(details),
            Error::Context { source, .. } => source.details_mut(),
            _ => None,
        }
    }

    /// HTTP status code of an API-derived error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.details().map(|d| d.status)
    }

    /// Raw response payload of an API-derived error, when one was received.
    #[must_use]
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        self.details().and_then(|d| d.body.as_ref())
    }

    /// Returns `true` for API-derived errors with a status in `[400, 500)`.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .is_some_and(|status| (400..500).contains(&status))
    }

    /// Checks if the transport may retry after this error.
    ///
    /// Client errors (any API-derived 4xx) and validation failures are never
    /// retried. Network failures, timeouts, malformed responses and 5xx
    /// responses are.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Validation { .. } => false,
            err => !err.is_client_error(),
        }
    }

    /// Returns the retry delay if this is a rate limit error.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self.root_cause() {
            Error::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Checks if this is a rate limit error.
    /// Returns the message and optional retry duration.
    #[must_use]
    pub fn as_rate_limit(&self) -> Option<(&str, Option<Duration>)> {
        match self.root_cause() {
            Error::RateLimit {
                details,
                retry_after,
            } => Some((details.message.as_str(), *retry_after)),
            _ => None,
        }
    }

    /// Checks if this is a validation error.
    /// Returns the message and the individual failures.
    #[must_use]
    pub fn as_validation(&self) -> Option<(&str, &[serde_json::Value])> {
        match self.root_cause() {
            Error::Validation { message, errors } => Some((message.as_ref(), errors.as_slice())),
            _ => None,
        }
    }
}
