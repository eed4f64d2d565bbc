use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use std::time::Duration;

/// Header identifying the calling application to the API.
pub const CLIENT_HEADER: &str = "X-Ethos-Client";

const JSON: &str = "application/json";

pub(crate) fn default_headers(client_name: &str) -> Result<HeaderMap> {
    let client = HeaderValue::from_str(client_name).map_err(|e| {
        Error::network(format!("Invalid client name {client_name:?} for header: {e}"))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
    headers.insert(HeaderName::from_static("x-ethos-client"), client);
    Ok(headers)
}

/// Reads `Retry-After` as a number of seconds.
///
/// Only the leading digits count, so `60s` reads as 60 seconds. HTTP-date
/// values are ignored.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim_start();
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value, |end| &value[..end]);
    digits.parse::<u64>().ok().map(Duration::from_secs)
}
