//! Submission gate: whether the swap button is enabled and what it says.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::state::ConversionState;
use crate::validator::ErrorSet;

/// State of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitLabel {
    /// Neither amount entered.
    EnterAmount,
    /// An amount exceeds the available balance.
    InsufficientBalance,
    /// An amount fails format or range rules.
    InvalidAmount,
    /// Amounts are fine but the form is still not submittable.
    Incomplete,
    /// Ready to submit.
    Ready,
}

impl SubmitLabel {
    /// Button text.
    pub fn label(&self) -> &'static str {
        match self {
            SubmitLabel::EnterAmount => "Enter an amount",
            SubmitLabel::InsufficientBalance => "Insufficient balance",
            SubmitLabel::InvalidAmount => "Invalid amount",
            SubmitLabel::Incomplete => "Enter a valid amount to proceed",
            SubmitLabel::Ready => "Swap",
        }
    }

    /// Tooltip shown while hovering a disabled button. A ready button has none.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SubmitLabel::EnterAmount => Some("Enter a valid amount to proceed"),
            SubmitLabel::InsufficientBalance => Some("Insufficient balance"),
            SubmitLabel::InvalidAmount => Some("Please enter a valid amount"),
            SubmitLabel::Incomplete => Some("Connect your wallet to proceed with the swap"),
            SubmitLabel::Ready => None,
        }
    }

    /// Check if the button is enabled.
    pub fn is_ready(&self) -> bool {
        matches!(self, SubmitLabel::Ready)
    }
}

impl fmt::Display for SubmitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Both instruments set, some amount entered, and no rule violated.
pub fn can_submit(state: &ConversionState, errors: &ErrorSet) -> bool {
    state.instruments().is_some() && !state.amounts_empty() && errors.is_empty()
}

/// Pick the button state. Checked in order: no amount, amount errors,
/// overall validity; the first match wins.
pub fn describe_submit_state(state: &ConversionState, errors: &ErrorSet) -> SubmitLabel {
    if state.amounts_empty() {
        return SubmitLabel::EnterAmount;
    }
    if errors.has_amount_error() {
        if errors.has_insufficient_balance() {
            return SubmitLabel::InsufficientBalance;
        }
        return SubmitLabel::InvalidAmount;
    }
    if !can_submit(state, errors) {
        return SubmitLabel::Incomplete;
    }
    SubmitLabel::Ready
}
