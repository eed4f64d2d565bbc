//! Offset pagination over the transport.
//!
//! Two traversal strategies share one termination rule:
//! - [`paginate_query`] sends `limit`/`offset` as GET query parameters and
//!   accepts a bare array or a `data` / `values` / `results` envelope.
//! - [`paginate_body`] sends `limit`/`offset` inside a POST body next to the
//!   filters and reads the `{ values, total }` envelope.
//!
//! A traversal starts at offset 0 and stops after an empty page or a page
//! shorter than the limit. A data set that is an exact multiple of the limit
//! therefore costs one extra request that comes back empty.
//!
//! Pages are fetched lazily: the next request is only issued once every item
//! of the current page has been consumed. Each call to a strategy starts a
//! fresh traversal.
//!
//! # Example
//!
//! ```rust,no_run
//! use ethos_core::config::EthosConfig;
//! use ethos_core::http_client::{HttpClient, QueryParams};
//! use ethos_core::pagination::{collect_all, paginate_query};
//! use std::sync::Arc;
//!
//! # async fn example() -> ethos_core::Result<()> {
//! let http = Arc::new(HttpClient::new(EthosConfig::default())?);
//! let stream = paginate_query(http, "/reviews", QueryParams::new(), 100, Ok);
//! let raw_reviews = collect_all(stream).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::http_client::{HttpClient, QueryParams};
use futures::future::Future;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Envelope keys probed, in order, for the item array of a page.
pub const ENVELOPE_KEYS: [&str; 3] = ["data", "values", "results"];

/// Response envelope of POST-paginated listings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BodyPage {
    /// Items of the page.
    #[serde(default)]
    pub values: Vec<Value>,
    /// Total number of matching items, when reported.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Pulls the item array out of a page response.
///
/// A bare array is returned as is. For objects the first of `data`,
/// `values` and `results` that holds an array wins. Anything else is an
/// empty page.
///
/// ```rust
/// use ethos_core::pagination::extract_items;
/// use serde_json::json;
///
/// assert_eq!(extract_items(json!([1, 2])).len(), 2);
/// assert_eq!(extract_items(json!({"data": null, "values": [1]})).len(), 1);
/// assert!(extract_items(json!({"items": [1]})).is_empty());
/// ```
pub fn extract_items(page: Value) -> Vec<Value> {
    match page {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let key = ENVELOPE_KEYS
                .iter()
                .find(|key| matches!(map.get(**key), Some(Value::Array(_))));
            match key.and_then(|key| map.remove(*key)) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Traverses a GET listing, merging `limit` and `offset` into `params`.
///
/// A `limit` of zero is treated as one.
pub fn paginate_query<T, F>(
    http: Arc<HttpClient>,
    path: impl Into<String>,
    params: QueryParams,
    limit: u32,
    parse: F,
) -> BoxStream<'static, Result<T>>
where
    T: Send + 'static,
    F: Fn(Value) -> Result<T> + Send + 'static,
{
    let path = path.into();
    let limit = limit.max(1);

    let fetch_page = move |offset: u64| {
        let http = Arc::clone(&http);
        let path = path.clone();
        let mut query = params.clone();
        query.insert("limit", limit);
        query.insert("offset", offset);
        async move {
            let page = http.fetch(&path, Some(&query)).await?;
            Ok(extract_items(page))
        }
    };

    paginate(limit, fetch_page, parse).boxed()
}

/// Traverses a POST listing, sending `limit` and `offset` in the body next to
/// `filters`.
///
/// A `limit` of zero is treated as one.
pub fn paginate_body<T, F>(
    http: Arc<HttpClient>,
    path: impl Into<String>,
    filters: Map<String, Value>,
    limit: u32,
    parse: F,
) -> BoxStream<'static, Result<T>>
where
    T: Send + 'static,
    F: Fn(Value) -> Result<T> + Send + 'static,
{
    let path = path.into();
    let limit = limit.max(1);

    let fetch_page = move |offset: u64| {
        let http = Arc::clone(&http);
        let path = path.clone();
        let mut body = filters.clone();
        body.insert("limit".to_string(), Value::from(limit));
        body.insert("offset".to_string(), Value::from(offset));
        async move {
            let page: BodyPage = http.submit_as(&path, Some(&Value::Object(body)), None).await?;
            debug!(total = ?page.total, returned = page.values.len(), "Body page received");
            Ok(page.values)
        }
    };

    paginate(limit, fetch_page, parse).boxed()
}

/// Drains a paginated stream, stopping at the first error.
pub async fn collect_all<T, S>(stream: S) -> Result<Vec<T>>
where
    S: Stream<Item = Result<T>>,
{
    stream.try_collect().await
}

struct Cursor<P, F> {
    fetch_page: P,
    parse: F,
    limit: u32,
    offset: u64,
    page: std::vec::IntoIter<Value>,
    last_page: bool,
}

fn paginate<T, P, Fut, F>(limit: u32, fetch_page: P, parse: F) -> impl Stream<Item = Result<T>>
where
    P: Fn(u64) -> Fut,
    Fut: Future<Output = Result<Vec<Value>>>,
    F: Fn(Value) -> Result<T>,
{
    let cursor = Cursor {
        fetch_page,
        parse,
        limit,
        offset: 0,
        page: Vec::new().into_iter(),
        last_page: false,
    };

    stream::try_unfold(cursor, |mut cursor| async move {
        loop {
            if let Some(raw) = cursor.page.next() {
                let item = (cursor.parse)(raw)?;
                return Ok(Some((item, cursor)));
            }
            if cursor.last_page {
                return Ok(None);
            }

            let items = (cursor.fetch_page)(cursor.offset).await?;
            debug!(
                offset = cursor.offset,
                limit = cursor.limit,
                items = items.len(),
                "Fetched page"
            );
            if items.is_empty() {
                return Ok(None);
            }

            cursor.last_page = items.len() < cursor.limit as usize;
            cursor.offset += u64::from(cursor.limit);
            cursor.page = items.into_iter();
        }
    })
}
