//! Context attachment trait and implementations.

use crate::error::{Error, ParseError, Result};
use std::borrow::Cow;
use std::fmt;

/// Extension trait for attaching context to errors.
///
/// Works with `Result<T, E>` for any `E: Into<Error>` and with `Option<T>`,
/// where `None` becomes a [`ParseError::MissingField`] carrying the context.
///
/// # Examples
///
/// ```rust
/// use ethos_core::error::{ContextExt, Result};
///
/// fn profile_id(json: &serde_json::Value) -> Result<u64> {
///     json.get("profileId")
///         .and_then(serde_json::Value::as_u64)
///         .context("profileId")
/// }
/// # assert!(profile_id(&serde_json::json!({"profileId": 7})).is_ok());
/// ```
pub trait ContextExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds lazy context to an error (only evaluated on error).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ContextExt<T, E> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| e.into().context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f().to_string()))
    }
}

impl<T> ContextExt<T, Error> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| missing(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| missing(f().to_string()))
    }
}

fn missing(field: String) -> Error {
    Error::from(ParseError::MissingField(Cow::Owned(field)))
}
