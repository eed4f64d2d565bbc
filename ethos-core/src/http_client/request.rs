use crate::error::{Error, NetworkError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, instrument, warn};
use url::Url;

use super::builder::HttpClient;
use super::params::QueryParams;

impl HttpClient {
    /// Executes a GET request and returns the parsed JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the configured base URL
    /// * `query` - Optional query parameters; `null` values are skipped
    ///
    /// # Errors
    ///
    /// Returns the classified error of the last attempt once retries are
    /// exhausted, or immediately for client errors (4xx).
    #[instrument(name = "http_fetch", skip(self, query), fields(path = %path))]
    pub async fn fetch(&self, path: &str, query: Option<&QueryParams>) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    /// Executes a POST request with an optional JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the configured base URL
    /// * `body` - Optional request payload, serialized as JSON
    /// * `query` - Optional query parameters; `null` values are skipped
    #[instrument(name = "http_submit", skip(self, body, query), fields(path = %path))]
    pub async fn submit(
        &self,
        path: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<Value> {
        self.request(Method::POST, path, query, body).await
    }

    /// [`HttpClient::fetch`] followed by deserialization into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<T> {
        let value = self.fetch(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// [`HttpClient::submit`] followed by deserialization into `T`.
    pub async fn submit_as<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> Result<T> {
        let value = self.submit(path, body, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Executes a request through the rate limiter and retry loop.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.build_url(path, query)?;
        let body = body.map(serde_json::to_string).transpose()?;

        let url = &url;
        let body = body.as_deref();
        self.execute_with_retry(move |attempt| {
            self.fetch_once(attempt, method.clone(), url, body)
        })
        .await
    }

    /// Resolves `path` against the base URL and appends the non-null query
    /// parameters.
    ///
    /// The path is appended to the base URL rather than resolved as an
    /// absolute reference, so a base path prefix such as `/api/v2` is kept.
    ///
    /// ```rust
    /// use ethos_core::config::{EthosConfig, EthosConfigOptions};
    /// use ethos_core::http_client::{HttpClient, QueryParams};
    ///
    /// let client = HttpClient::new(EthosConfig::new(
    ///     EthosConfigOptions::new().base_url("https://api.example/api/v2/"),
    /// ))
    /// .unwrap();
    /// let query = QueryParams::new().with("limit", 10).with("offset", None::<u64>);
    /// let url = client.build_url("/profiles", Some(&query)).unwrap();
    /// assert_eq!(url.as_str(), "https://api.example/api/v2/profiles?limit=10");
    /// ```
    pub fn build_url(&self, path: &str, query: Option<&QueryParams>) -> Result<Url> {
        let base = self.config().base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let joined = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };

        let mut url = Url::parse(&joined).map_err(|e| {
            Error::from(NetworkError::InvalidUrl(format!("{joined}: {e}")))
        })?;

        if let Some(query) = query {
            let pairs = query.to_pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        Ok(url)
    }

    #[instrument(
        name = "http_attempt",
        skip(self, body),
        fields(attempt = attempt + 1, method = %method, url = %url, has_body = body.is_some(), status)
    )]
    async fn fetch_once(
        &self,
        attempt: u32,
        method: Method,
        url: &Url,
        body: Option<&str>,
    ) -> Result<Value> {
        self.rate_limiter().wait().await;

        let mut request = self.client().request(method, url.clone());
        if let Some(body) = body {
            request = request.body(body.to_owned());
        }

        let timeout = self.config().timeout();
        let exchange = async {
            let response = request.send().await.map_err(|e| {
                error!(error = %e, "HTTP request send failed");
                Error::from(e)
            })?;
            self.process_response(response, url.as_str()).await
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(
                    url = %url,
                    timeout_ms = %timeout.as_millis(),
                    "HTTP request timed out"
                );
                Err(Error::timeout(format!(
                    "Request to {} timed out after {}ms",
                    url,
                    timeout.as_millis()
                )))
            }
        }
    }
}
