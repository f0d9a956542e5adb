//! Price feed trait and implementations.

use async_trait::async_trait;
use std::sync::Arc;
use tokenswap_common::{PriceCatalog, PriceRecord};
use tracing::{debug, warn};

use crate::error::FeedResult;

/// A source of price records.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Get the feed name.
    fn name(&self) -> &str;

    /// Fetch the full list of price records.
    async fn fetch(&self) -> FeedResult<Vec<PriceRecord>>;

    /// Fetch and build a catalog snapshot.
    async fn fetch_catalog(&self) -> FeedResult<PriceCatalog> {
        let records = self.fetch().await?;
        let total = records.len();
        let catalog = PriceCatalog::from_records(records);
        debug!(
            feed = self.name(),
            records = total,
            instruments = catalog.len(),
            "Built price catalog"
        );
        Ok(catalog)
    }
}

/// Retries a failing feed a fixed number of times, without delay.
pub struct RetryingFeed {
    inner: Arc<dyn PriceFeed>,
    retries: u32,
}

impl RetryingFeed {
    /// Wrap `inner`, allowing `retries` extra attempts after a failure.
    pub fn new(inner: Arc<dyn PriceFeed>, retries: u32) -> Self {
        Self { inner, retries }
    }
}

#[async_trait]
impl PriceFeed for RetryingFeed {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self) -> FeedResult<Vec<PriceRecord>> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch().await {
                Ok(records) => return Ok(records),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        feed = self.inner.name(),
                        attempt,
                        error = %e,
                        "Price fetch failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Mock price feed for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockPriceFeed {
    name: String,
    responses: parking_lot::Mutex<std::collections::VecDeque<FeedResult<Vec<PriceRecord>>>>,
    fallback: parking_lot::Mutex<FeedResult<Vec<PriceRecord>>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockPriceFeed {
    /// Create a mock that answers with an empty list until scripted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: parking_lot::Mutex::new(std::collections::VecDeque::new()),
            fallback: parking_lot::Mutex::new(Ok(Vec::new())),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Queue a one-off response.
    pub fn push(&self, response: FeedResult<Vec<PriceRecord>>) {
        self.responses.lock().push_back(response);
    }

    /// Set the response used once the queue is drained.
    pub fn set_fallback(&self, response: FeedResult<Vec<PriceRecord>>) {
        *self.fallback.lock() = response;
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl PriceFeed for MockPriceFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> FeedResult<Vec<PriceRecord>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let queued = self.responses.lock().pop_front();
        queued.unwrap_or_else(|| self.fallback.lock().clone())
    }
}
