//! Validation error taxonomy for the swap form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rule violated by the current form state.
///
/// These are data, not control flow: they are collected into an error set,
/// block submission, and are shown to the user verbatim via `Display`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationError {
    /// Amount text is not a number.
    #[error("Please enter a valid number")]
    InvalidNumber,

    /// Amount is zero or negative.
    #[error("Amount must be greater than 0")]
    NotPositive,

    /// Amount exceeds the wallet balance of the source instrument.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Source and target instrument are the same.
    #[error("Cannot swap the same token")]
    SameInstrument,
}

impl ValidationError {
    /// Get error code for UI bindings.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidNumber => "INVALID_NUMBER",
            ValidationError::NotPositive => "NOT_POSITIVE",
            ValidationError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            ValidationError::SameInstrument => "SAME_INSTRUMENT",
        }
    }

    /// Whether this is the insufficient-balance flavour of amount error.
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, ValidationError::InsufficientBalance)
    }
}
