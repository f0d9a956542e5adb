//! TokenSwap Price Feed
//!
//! Fetches the token price list and keeps a catalog snapshot fresh for the
//! swap form.
//!
//! # Features
//!
//! - HTTP feed client with retries on transient failures
//! - Catalog store with atomic, ordered snapshot replacement
//! - Stale-while-error: a failed refresh keeps the last good catalog
//! - Background revalidation on an interval
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokenswap_feed::{CatalogRefresher, CatalogStore, FeedConfig, HttpPriceFeed, RetryingFeed};
//!
//! let config = FeedConfig::from_env();
//! let http = Arc::new(HttpPriceFeed::new(&config)?);
//! let feed = Arc::new(RetryingFeed::new(http, config.retry_attempts));
//!
//! let store = Arc::new(CatalogStore::new(config.revalidate_interval));
//! let _refresher = CatalogRefresher::spawn(feed, store.clone(), config.revalidate_interval)?;
//! let mut updates = store.subscribe();
//! updates.changed().await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod refresher;
pub mod store;

pub use config::{FeedConfig, DEFAULT_FEED_URL};
pub use error::{FeedError, FeedResult};
pub use http::{decode_records, HttpPriceFeed};
pub use provider::{PriceFeed, RetryingFeed};
pub use refresher::CatalogRefresher;
pub use store::{CatalogStore, RefreshTicket};

#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockPriceFeed;
