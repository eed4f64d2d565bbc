//! Resource wrappers organised by API area.
//!
//! - `profiles`: lookup by id, address or userkey, search and listing
//! - `vouches`: stakes between profiles (POST-paginated)
//! - `reviews`: reviews left between profiles
//! - `markets`: reputation markets and client-side rankings
//! - `activities`: on-chain activity feed
//! - `scores`: credibility scores and their breakdown
//!
//! Every wrapper holds a shared [`HttpClient`] and only talks to the API
//! through `fetch`, `submit` and the pagination helpers of `ethos_core`.
//! `list` methods return lazy streams; `list_all` and friends drain them.

pub mod activities;
pub mod markets;
pub mod profiles;
pub mod reviews;
pub mod scores;
pub mod vouches;

pub use activities::{Activities, ActivityListParams};
pub use markets::{MarketListParams, Markets};
pub use profiles::{ProfileListParams, ProfileSearchParams, Profiles};
pub use reviews::{ReviewListParams, Reviews};
pub use scores::Scores;
pub use vouches::{VouchListParams, Vouches};

use ethos_core::Result;
use ethos_core::http_client::HttpClient;
use ethos_core::pagination::extract_items;
use serde_json::Value;

/// Path segment with reserved characters percent-encoded.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Parses every item of a single (unpaginated) page.
pub(crate) fn parse_page<T>(page: Value, parse: fn(Value) -> Result<T>) -> Result<Vec<T>> {
    extract_items(page).into_iter().map(parse).collect()
}

/// GET `path` and parse the body as one record.
pub(crate) async fn fetch_record<T>(
    http: &HttpClient,
    path: &str,
    parse: fn(Value) -> Result<T>,
) -> Result<T> {
    parse(http.fetch(path, None).await?)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segment_encodes_userkey() {
        assert_eq!(segment("x.com/user/alice"), "x.com%2Fuser%2Falice");
        assert_eq!(segment("address:0xabc"), "address%3A0xabc");
    }

    #[test]
    fn test_parse_page_envelopes() {
        let parse = |v: Value| -> Result<u64> { Ok(v["id"].as_u64().unwrap_or_default()) };
        let ids = parse_page(json!({"values": [{"id": 1}, {"id": 2}]}), parse).unwrap();
        assert_eq!(ids, vec![1, 2]);
        assert!(parse_page(json!({"unexpected": true}), parse).unwrap().is_empty());
    }
}
