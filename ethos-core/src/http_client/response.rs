use crate::error::{Error, Result, truncate_message};
use reqwest::{Response, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::builder::HttpClient;
use super::headers::retry_after;

const BODY_PREVIEW_SIZE: usize = 200;

impl HttpClient {
    pub(crate) async fn process_response(&self, response: Response, url: &str) -> Result<Value> {
        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());

        if status == StatusCode::NO_CONTENT {
            debug!(status = %status, url = %url, "HTTP response without content");
            return Ok(Value::Object(Map::new()));
        }

        let retry_after = retry_after(response.headers());
        let body_bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            Error::network(format!("Failed to read response body: {e}"))
        })?;

        let body_preview = preview(&body_bytes);
        debug!(
            status = %status,
            body_length = body_bytes.len(),
            body_preview = %body_preview,
            "HTTP response received"
        );

        if !status.is_success() {
            return Err(Self::handle_http_error(status, retry_after, &body_bytes));
        }

        serde_json::from_slice(&body_bytes).map_err(|e| {
            warn!(
                url = %url,
                error = %e,
                body_preview = %body_preview,
                "Malformed JSON in success response"
            );
            Error::from(e)
        })
    }

    #[instrument(
        name = "http_handle_error",
        skip(retry_after, body),
        fields(status = status.as_u16())
    )]
    pub(crate) fn handle_http_error(
        status: StatusCode,
        retry_after: Option<Duration>,
        body: &[u8],
    ) -> Error {
        let (message, body) = error_message(status, body);

        match status {
            StatusCode::NOT_FOUND => {
                info!("Resource not found");
                Error::not_found().with_response_body(body)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                match retry_after {
                    Some(delay) => warn!(
                        retry_after_seconds = delay.as_secs(),
                        "Rate limit exceeded with retry-after header"
                    ),
                    None => warn!("Rate limit exceeded without retry-after header"),
                }
                Error::rate_limited(retry_after).with_response_body(body)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(status = status.as_u16(), "Authentication error");
                Error::authentication().with_response_body(body)
            }
            _ => {
                let message = truncate_message(message);
                if status.is_server_error() {
                    error!(message = %message, "Server error response");
                } else {
                    warn!(message = %message, "HTTP error response");
                }
                Error::api(status.as_u16(), message, body)
            }
        }
    }
}

/// Human-readable message and stored body of an error response.
///
/// JSON bodies yield their `message` field, then their `error` field, then
/// their serialized text. Other bodies yield their raw text, or
/// `HTTP <status>` when empty.
fn error_message(status: StatusCode, bytes: &[u8]) -> (String, Option<Value>) {
    if let Ok(json) = serde_json::from_slice::<Value>(bytes) {
        let message = field_text(&json, "message")
            .or_else(|| field_text(&json, "error"))
            .unwrap_or_else(|| json.to_string());
        return (message, Some(json));
    }

    let text = String::from_utf8_lossy(bytes).into_owned();
    if text.trim().is_empty() {
        (format!("HTTP {}", status.as_u16()), None)
    } else {
        (text.clone(), Some(Value::String(text)))
    }
}

fn field_text(json: &Value, key: &str) -> Option<String> {
    match json.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn preview(bytes: &[u8]) -> String {
    let end = bytes.len().min(BODY_PREVIEW_SIZE);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
