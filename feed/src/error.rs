//! Price feed error types.

use thiserror::Error;

/// Errors that can occur while fetching prices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The request could not be sent or timed out.
    #[error("Price feed request failed: {0}")]
    Transport(String),

    /// The feed answered with a non-success status.
    #[error("Price feed returned HTTP {0}")]
    Status(u16),

    /// The payload is not a list of price records.
    #[error("Price feed payload could not be decoded: {0}")]
    Decode(String),

    /// The feed or refresher was set up with unusable settings.
    #[error("Invalid price feed configuration: {0}")]
    Config(String),
}

impl FeedError {
    /// Check if retrying the request may help.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Transport(_) => true,
            FeedError::Status(code) => *code >= 500 || *code == 429,
            FeedError::Decode(_) | FeedError::Config(_) => false,
        }
    }
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
