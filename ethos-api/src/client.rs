//! The `Ethos` client facade.

use crate::resources::{Activities, Markets, Profiles, Reviews, Scores, Vouches};
use ethos_core::Result;
use ethos_core::config::{EthosConfig, EthosConfigOptions};
use ethos_core::http_client::HttpClient;
use std::sync::Arc;
use tracing::info;

/// Entry point of the Ethos API client.
///
/// Owns one transport and one wrapper per resource. Cloning is cheap: clones
/// share the connection pool and the rate limiter, so requests from every
/// clone are paced together.
///
/// # Example
///
/// ```no_run
/// use ethos_api::Ethos;
/// use ethos_core::config::EthosConfigOptions;
/// use std::time::Duration;
///
/// # async fn example() -> ethos_core::Result<()> {
/// let ethos = Ethos::new(
///     EthosConfigOptions::new()
///         .client_name("my-dapp")
///         .rate_limit(Duration::from_millis(250)),
/// )?;
///
/// let profile = ethos.profiles().get(1).await?;
/// let received = ethos.vouches().for_profile(profile.id).await?;
/// println!("{} vouches received", received.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Ethos {
    http: Arc<HttpClient>,
    profiles: Profiles,
    vouches: Vouches,
    reviews: Reviews,
    markets: Markets,
    activities: Activities,
    scores: Scores,
}

impl Ethos {
    /// Creates a client with `options` merged over the defaults.
    pub fn new(options: EthosConfigOptions) -> Result<Self> {
        Self::from_config(EthosConfig::new(options))
    }

    /// Creates a client from a complete configuration.
    pub fn from_config(config: EthosConfig) -> Result<Self> {
        Ok(Self::with_http(HttpClient::new(config)?))
    }

    /// Creates a client configured from `ETHOS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(EthosConfig::from_env()?)
    }

    /// Creates a client with the default configuration.
    pub fn default_client() -> Result<Self> {
        Self::from_config(EthosConfig::default())
    }

    /// Creates a client around an already built transport, e.g. one with a
    /// custom retry strategy.
    pub fn with_http(http: HttpClient) -> Self {
        let config = http.config();
        info!(
            base_url = config.base_url(),
            client_name = config.client_name(),
            max_retries = config.max_retries(),
            "Ethos client initialized"
        );

        let http = Arc::new(http);
        Self {
            profiles: Profiles::new(Arc::clone(&http)),
            vouches: Vouches::new(Arc::clone(&http)),
            reviews: Reviews::new(Arc::clone(&http)),
            markets: Markets::new(Arc::clone(&http)),
            activities: Activities::new(Arc::clone(&http)),
            scores: Scores::new(Arc::clone(&http)),
            http,
        }
    }

    /// Effective configuration.
    pub fn config(&self) -> &EthosConfig {
        self.http.config()
    }

    /// Shared transport, for endpoints without a wrapper.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Profiles API.
    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    /// Vouches API.
    pub fn vouches(&self) -> &Vouches {
        &self.vouches
    }

    /// Reviews API.
    pub fn reviews(&self) -> &Reviews {
        &self.reviews
    }

    /// Markets API.
    pub fn markets(&self) -> &Markets {
        &self.markets
    }

    /// Activities API.
    pub fn activities(&self) -> &Activities {
        &self.activities
    }

    /// Scores API.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }
}
