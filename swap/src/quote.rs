//! Human-readable quote shown under the form.

use serde::{Deserialize, Serialize};

use crate::amount::{format_amount, format_fixed};
use crate::state::ConversionState;
use crate::validator::ErrorSet;

/// Exchange rate and amount summary for the selected pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// `1 A = r B`, with `r` rounded to 8 decimal places.
    pub exchange_rate: String,
    /// `"{target amount} {B}"` when a target amount is present.
    pub receive: Option<String>,
    /// `"{source amount} {A}"` when a source amount is present.
    pub pay: Option<String>,
    /// USD value of the source amount, 2 decimal places.
    pub source_usd_value: Option<String>,
}

impl QuoteSummary {
    /// Summarise the state; `None` until both instruments are selected.
    pub fn from_state(state: &ConversionState, errors: &ErrorSet) -> Option<Self> {
        let (source, target) = state.instruments()?;

        let exchange_rate = format!(
            "1 {} = {} {}",
            source.symbol,
            format_amount(source.rate_to(target)),
            target.symbol
        );

        let receive = (!state.target_amount.is_empty())
            .then(|| format!("{} {}", state.target_amount, target.symbol));
        let pay = (!state.source_amount.is_empty())
            .then(|| format!("{} {}", state.source_amount, source.symbol));

        let source_usd_value = if errors.source_amount.is_none() {
            state
                .source_amount
                .positive()
                .and_then(|amount| format_fixed(amount * source.price, 2))
                .map(|usd| format!("${usd}"))
        } else {
            None
        };

        Some(Self {
            exchange_rate,
            receive,
            pay,
            source_usd_value,
        })
    }
}
