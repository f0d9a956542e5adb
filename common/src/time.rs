//! Time utilities and price feed timing constants.

use chrono::{DateTime, Duration, Utc};

/// Price feed timing constants.
pub mod constants {
    use super::Duration;

    /// How long a catalog snapshot is considered fresh (5 minutes).
    pub fn revalidate_interval() -> Duration {
        Duration::minutes(5)
    }

    /// Per-request timeout for the price feed (10 seconds).
    pub fn request_timeout() -> Duration {
        Duration::seconds(10)
    }

    /// Retries after a failed fetch before reporting the failure.
    pub const RETRY_ATTEMPTS: u32 = 2;
}

/// A timestamp, always UTC.
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Check if a snapshot taken at `fetched_at` is older than `max_age`.
pub fn is_stale(fetched_at: Timestamp, max_age: Duration) -> bool {
    now() - fetched_at >= max_age
}

/// Duration extensions for convenient conversion.
pub trait DurationExt {
    fn as_std(&self) -> std::time::Duration;
}

impl DurationExt for Duration {
    fn as_std(&self) -> std::time::Duration {
        self.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}
