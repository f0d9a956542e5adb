//! Price feed configuration.

use std::time::Duration;

use tokenswap_common::time::{constants, DurationExt};

/// Default price feed endpoint.
pub const DEFAULT_FEED_URL: &str = "https://interview.switcheo.com/prices.json";

/// Configuration for fetching and refreshing the price catalog.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// URL of the JSON price list.
    pub url: String,
    /// How long a snapshot stays fresh before it is refetched.
    pub revalidate_interval: Duration,
    /// Retries after a failed fetch.
    pub retry_attempts: u32,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// User agent sent with requests.
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            revalidate_interval: constants::revalidate_interval().as_std(),
            retry_attempts: constants::RETRY_ATTEMPTS,
            request_timeout: constants::request_timeout().as_std(),
            user_agent: format!("tokenswap/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PRICE_FEED_URL") {
            config.url = url;
        }

        if let Ok(secs) = std::env::var("PRICE_FEED_REVALIDATE_SECS") {
            if let Ok(secs) = secs.parse() {
                config.revalidate_interval = Duration::from_secs(secs);
            }
        }

        if let Ok(retries) = std::env::var("PRICE_FEED_RETRIES") {
            if let Ok(retries) = retries.parse() {
                config.retry_attempts = retries;
            }
        }

        if let Ok(secs) = std::env::var("PRICE_FEED_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Price feed URL cannot be empty".to_string());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!("Price feed URL must be http(s): {}", self.url));
        }

        if self.revalidate_interval.is_zero() {
            return Err("Revalidate interval cannot be zero".to_string());
        }

        if self.request_timeout.is_zero() {
            return Err("Request timeout cannot be zero".to_string());
        }

        Ok(())
    }
}
