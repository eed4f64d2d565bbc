//! Shared helpers for the integration tests.

#![allow(dead_code)]

use ethos_rust::Ethos;
use ethos_rust::ethos_core::config::{EthosConfig, EthosConfigOptions};
use ethos_rust::ethos_core::http_client::HttpClient;
use ethos_rust::ethos_core::retry_strategy::{RetryConfig, RetryStrategy};
use serde_json::{Value, json};
use std::time::Duration;

/// Base delay of the backoff used by the mock clients.
pub const TEST_BACKOFF: Duration = Duration::from_millis(10);

/// Client against `base_url` with the given spacing and attempt budget.
pub fn mock_client(base_url: &str, rate_limit: Duration, max_retries: u32) -> Ethos {
    let config = EthosConfig::new(
        EthosConfigOptions::new()
            .base_url(base_url)
            .client_name("integration-tests")
            .rate_limit(rate_limit)
            .timeout(Duration::from_secs(5))
            .max_retries(max_retries),
    );
    let http = HttpClient::new(config)
        .expect("client")
        .with_retry_strategy(RetryStrategy::new(
            RetryConfig::new(max_retries).with_base_delay(TEST_BACKOFF),
        ));
    Ethos::with_http(http)
}

/// Client with no spacing and three attempts.
pub fn fast_client(base_url: &str) -> Ethos {
    mock_client(base_url, Duration::ZERO, 3)
}

/// Review records `first..first + count`.
pub fn reviews(first: u64, count: u64) -> Vec<Value> {
    (first..first + count)
        .map(|id| {
            json!({
                "id": id,
                "authorProfileId": 1,
                "subjectProfileId": 2,
                "score": if id % 2 == 0 { "positive" } else { "negative" }
            })
        })
        .collect()
}
