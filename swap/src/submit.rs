//! The submit action and the record of an accepted swap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokenswap_common::{Instrument, SwapId};
use tracing::{info, warn};

use crate::error::{SubmitError, SubmitResult};
use crate::state::ConversionState;
use crate::validator::{validate_with_balances, Balances};

/// An accepted swap request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Unique swap ID.
    pub id: SwapId,
    /// Instrument paid.
    pub source: Instrument,
    /// Instrument received.
    pub target: Instrument,
    /// Amount paid, `"0"` if the field was empty.
    pub source_amount: String,
    /// Amount received, `"0"` if the field was empty.
    pub target_amount: String,
    /// When the swap was accepted.
    pub executed_at: DateTime<Utc>,
}

impl SwapReceipt {
    /// Confirmation text for the user.
    pub fn message(&self) -> String {
        format!(
            "Swapped {} {} for {} {}",
            self.source_amount, self.source.symbol, self.target_amount, self.target.symbol
        )
    }
}

/// Accept the swap described by `state`. Validity is recomputed first.
pub fn submit(state: &ConversionState, balances: &Balances) -> SubmitResult<SwapReceipt> {
    let errors = validate_with_balances(state, balances);
    if !errors.is_empty() {
        warn!(errors = ?errors.messages(), "Swap refused: form has errors");
        return Err(SubmitError::InvalidForm);
    }

    let (source, target) = match state.instruments() {
        Some(pair) if !state.amounts_empty() => pair,
        _ => {
            warn!("Swap refused: form incomplete");
            return Err(SubmitError::Incomplete);
        }
    };

    let or_zero = |text: &str| {
        if text.is_empty() {
            "0".to_string()
        } else {
            text.to_string()
        }
    };

    let receipt = SwapReceipt {
        id: SwapId::new(),
        source: source.clone(),
        target: target.clone(),
        source_amount: or_zero(state.source_amount.text()),
        target_amount: or_zero(state.target_amount.text()),
        executed_at: Utc::now(),
    };

    info!(
        swap_id = %receipt.id,
        source = %receipt.source.symbol,
        target = %receipt.target.symbol,
        source_amount = %receipt.source_amount,
        target_amount = %receipt.target_amount,
        "Swap accepted"
    );

    Ok(receipt)
}
