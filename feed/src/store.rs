//! Catalog snapshot store.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokenswap_common::time::{self, constants, Timestamp};
use tokenswap_common::{CatalogStatus, PriceCatalog};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::FeedResult;
use crate::provider::PriceFeed;

/// Identifies one refresh attempt. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug)]
struct Snapshot {
    status: CatalogStatus,
    fetched_at: Option<Timestamp>,
    applied: u64,
    last_error: Option<String>,
}

/// Holds the current catalog status and replaces it atomically.
///
/// A refresh result is applied only if its ticket is newer than the last
/// applied one, so a slow response never overwrites a fresher snapshot. A
/// failure after a successful load keeps the previous catalog.
pub struct CatalogStore {
    snapshot: RwLock<Snapshot>,
    next_ticket: AtomicU64,
    max_age: chrono::Duration,
    notify: watch::Sender<CatalogStatus>,
}

impl CatalogStore {
    /// Create an empty store whose snapshots go stale after `max_age`.
    pub fn new(max_age: std::time::Duration) -> Self {
        let (notify, _) = watch::channel(CatalogStatus::Loading);
        Self {
            snapshot: RwLock::new(Snapshot {
                status: CatalogStatus::Loading,
                fetched_at: None,
                applied: 0,
                last_error: None,
            }),
            next_ticket: AtomicU64::new(1),
            max_age: chrono::Duration::from_std(max_age)
                .unwrap_or_else(|_| constants::revalidate_interval()),
            notify,
        }
    }

    /// Current status.
    pub fn status(&self) -> CatalogStatus {
        self.snapshot.read().status.clone()
    }

    /// Current catalog, if available.
    pub fn catalog(&self) -> Option<Arc<PriceCatalog>> {
        self.snapshot.read().status.catalog().cloned()
    }

    /// When the current catalog was fetched.
    pub fn fetched_at(&self) -> Option<Timestamp> {
        self.snapshot.read().fetched_at
    }

    /// Message of the most recent failed refresh, cleared on success.
    pub fn last_error(&self) -> Option<String> {
        self.snapshot.read().last_error.clone()
    }

    /// Check if the catalog is missing or older than the revalidate interval.
    pub fn is_stale(&self) -> bool {
        match self.snapshot.read().fetched_at {
            Some(fetched_at) => time::is_stale(fetched_at, self.max_age),
            None => true,
        }
    }

    /// Watch status changes.
    pub fn subscribe(&self) -> watch::Receiver<CatalogStatus> {
        self.notify.subscribe()
    }

    /// Start a refresh attempt.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst))
    }

    /// Apply the result of a refresh. Returns `false` if it was superseded.
    pub fn complete(&self, ticket: RefreshTicket, result: FeedResult<PriceCatalog>) -> bool {
        let status = {
            let mut snapshot = self.snapshot.write();

            if ticket.0 <= snapshot.applied {
                debug!(ticket = ticket.0, applied = snapshot.applied, "Discarding superseded catalog");
                return false;
            }
            snapshot.applied = ticket.0;

            match result {
                Ok(catalog) => {
                    info!(instruments = catalog.len(), "Price catalog updated");
                    snapshot.status = CatalogStatus::from_catalog(catalog);
                    snapshot.fetched_at = Some(time::now());
                    snapshot.last_error = None;
                }
                Err(e) if snapshot.status.is_available() => {
                    warn!(error = %e, "Price refresh failed, keeping previous catalog");
                    snapshot.last_error = Some(e.to_string());
                }
                Err(e) => {
                    warn!(error = %e, "Price catalog unavailable");
                    snapshot.status = CatalogStatus::Failed(e.to_string());
                    snapshot.last_error = Some(e.to_string());
                }
            }

            snapshot.status.clone()
        };

        self.notify.send_replace(status);
        true
    }

    /// Fetch from `feed` and apply the result.
    pub async fn refresh(&self, feed: &dyn PriceFeed) -> CatalogStatus {
        let ticket = self.begin_refresh();
        let result = feed.fetch_catalog().await;
        self.complete(ticket, result);
        self.status()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(constants::revalidate_interval().to_std().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::provider::MockPriceFeed;
    use std::time::Duration;
    use tokenswap_common::{Instrument, PriceRecord};

    fn catalog(symbols: &[&str]) -> PriceCatalog {
        PriceCatalog::new(symbols.iter().map(|s| Instrument::new(*s, 1.0)))
    }

    #[test]
    fn test_starts_loading_and_stale() {
        let store = CatalogStore::default();

        assert_eq!(store.status(), CatalogStatus::Loading);
        assert!(store.is_stale());
        assert!(store.catalog().is_none());
    }

    #[test]
    fn test_apply_catalog() {
        let store = CatalogStore::default();
        let ticket = store.begin_refresh();

        assert!(store.complete(ticket, Ok(catalog(&["A", "B"]))));
        assert_eq!(store.catalog().unwrap().len(), 2);
        assert!(!store.is_stale());
        assert!(store.fetched_at().is_some());
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let store = CatalogStore::default();
        let older = store.begin_refresh();
        let newer = store.begin_refresh();

        assert!(store.complete(newer, Ok(catalog(&["NEW"]))));
        assert!(!store.complete(older, Ok(catalog(&["OLD"]))));

        assert!(store.catalog().unwrap().contains("NEW"));
        assert!(!store.catalog().unwrap().contains("OLD"));
    }

    #[test]
    fn test_initial_failure() {
        let store = CatalogStore::default();
        let ticket = store.begin_refresh();
        store.complete(ticket, Err(FeedError::Status(500)));

        assert_eq!(
            store.status(),
            CatalogStatus::Failed("Price feed returned HTTP 500".to_string())
        );
    }

    #[test]
    fn test_failure_keeps_previous_catalog() {
        let store = CatalogStore::default();
        store.complete(store.begin_refresh(), Ok(catalog(&["A"])));
        store.complete(store.begin_refresh(), Err(FeedError::Transport("reset".into())));

        assert!(store.status().is_available());
        assert!(store.last_error().is_some());
    }

    #[test]
    fn test_empty_catalog() {
        let store = CatalogStore::default();
        store.complete(store.begin_refresh(), Ok(PriceCatalog::default()));

        assert_eq!(store.status(), CatalogStatus::Empty);
    }

    #[test]
    fn test_zero_max_age_is_always_stale() {
        let store = CatalogStore::new(Duration::ZERO);
        store.complete(store.begin_refresh(), Ok(catalog(&["A"])));

        assert!(store.is_stale());
    }

    #[tokio::test]
    async fn test_refresh_notifies_subscribers() {
        let store = CatalogStore::default();
        let mut updates = store.subscribe();
        let feed = MockPriceFeed::new("test");
        feed.push(Ok(vec![PriceRecord::new("ETH", Some(1645.93))]));

        let status = store.refresh(&feed).await;

        assert!(status.is_available());
        assert!(updates.has_changed().unwrap());
        assert!(updates.borrow_and_update().is_available());
    }
}
