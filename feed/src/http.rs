//! HTTP price feed.

use async_trait::async_trait;
use tokenswap_common::PriceRecord;
use tracing::{debug, instrument};

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::provider::PriceFeed;

/// Fetches the JSON price list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPriceFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpPriceFeed {
    /// Create a feed from configuration.
    pub fn new(config: &FeedConfig) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FeedError::Transport(format!("client setup failed: {}", e)))?;

        Ok(Self::with_client(client, config.url.clone()))
    }

    /// Create a feed with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The endpoint being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    fn name(&self) -> &str {
        "HTTP"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> FeedResult<Vec<PriceRecord>> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Transport(format!("request timeout: {}", e))
            } else if e.is_connect() {
                FeedError::Transport(format!("connection failed: {}", e))
            } else {
                FeedError::Transport(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(format!("failed to read response body: {}", e)))?;

        let records = decode_records(&body)?;
        debug!(records = records.len(), "Fetched price records");
        Ok(records)
    }
}

/// Decode a price list payload.
pub fn decode_records(body: &str) -> FeedResult<Vec<PriceRecord>> {
    serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_records() {
        let body = r#"[
            {"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525423728813},
            {"currency":"USD","date":"2023-08-29T07:10:30.000Z","price":1}
        ]"#;

        let records = decode_records(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].price, Some(1.0));
    }

    #[test]
    fn test_decode_rejects_object() {
        let result = decode_records(r#"{"error":"rate limited"}"#);
        assert!(matches!(result, Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_feed_from_config() {
        let feed = HttpPriceFeed::new(&FeedConfig::default()).unwrap();
        assert_eq!(feed.url(), crate::config::DEFAULT_FEED_URL);
    }
}
