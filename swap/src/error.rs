//! Submit action error types.

use thiserror::Error;

/// Reasons the submit action refuses to proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The form has validation errors.
    #[error("Please fix the errors before swapping")]
    InvalidForm,

    /// An instrument is missing or no amount was entered.
    #[error("Please fill in at least one amount")]
    Incomplete,

    /// No price catalog is available, so nothing can be converted.
    #[error("Token prices are unavailable")]
    CatalogUnavailable,
}

/// Result type for submit operations.
pub type SubmitResult<T> = Result<T, SubmitError>;
