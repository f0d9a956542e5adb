//! Background catalog revalidation.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::{FeedError, FeedResult};
use crate::provider::PriceFeed;
use crate::store::CatalogStore;

/// Periodically refetches the catalog into a [`CatalogStore`].
///
/// The first fetch happens immediately. Fetches never overlap; a manual
/// [`CatalogStore::refresh`] racing the loop is resolved by refresh tickets.
/// The task stops when the refresher is dropped.
pub struct CatalogRefresher {
    task: JoinHandle<()>,
}

impl CatalogRefresher {
    /// Spawn the refresh loop on the current runtime. The period must be non-zero.
    pub fn spawn(
        feed: Arc<dyn PriceFeed>,
        store: Arc<CatalogStore>,
        every: Duration,
    ) -> FeedResult<Self> {
        if every.is_zero() {
            return Err(FeedError::Config(
                "refresh interval must be greater than zero".to_string(),
            ));
        }

        info!(feed = feed.name(), interval_secs = every.as_secs(), "Starting catalog refresher");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let status = store.refresh(feed.as_ref()).await;
                debug!(available = status.is_available(), "Catalog refresh finished");
            }
        });

        Ok(Self { task })
    }

    /// Check if the loop is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for CatalogRefresher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
