//! Field and selection validation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokenswap_common::{Symbol, ValidationError};

use crate::amount::{AmountField, AmountValue};
use crate::state::{ConversionState, Field};

/// Every rule the current state violates. Recomputed in full on each change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSet {
    /// Problem with the source amount.
    pub source_amount: Option<ValidationError>,
    /// Problem with the target amount.
    pub target_amount: Option<ValidationError>,
    /// Problem with the instrument pair.
    pub selection: Option<ValidationError>,
}

impl ErrorSet {
    /// Check if no rule is violated.
    pub fn is_empty(&self) -> bool {
        self.source_amount.is_none() && self.target_amount.is_none() && self.selection.is_none()
    }

    /// Number of violated rules.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Error for one amount field.
    pub fn amount(&self, field: Field) -> Option<ValidationError> {
        match field {
            Field::Source => self.source_amount,
            Field::Target => self.target_amount,
        }
    }

    /// Check if either amount field has an error.
    pub fn has_amount_error(&self) -> bool {
        self.source_amount.is_some() || self.target_amount.is_some()
    }

    /// Check if an amount error is the insufficient-balance kind.
    pub fn has_insufficient_balance(&self) -> bool {
        [self.source_amount, self.target_amount]
            .iter()
            .flatten()
            .any(|e| e.is_insufficient_balance())
    }

    /// Iterate over present errors: source, target, selection.
    pub fn iter(&self) -> impl Iterator<Item = ValidationError> {
        [self.source_amount, self.target_amount, self.selection]
            .into_iter()
            .flatten()
    }

    /// User-facing messages in display order.
    pub fn messages(&self) -> Vec<String> {
        self.iter().map(|e| e.to_string()).collect()
    }
}

/// Wallet balances available for paying, by symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    available: HashMap<Symbol, f64>,
}

impl Balances {
    /// No known balances; the balance rule is skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the available amount of a symbol.
    pub fn set(&mut self, symbol: impl Into<Symbol>, amount: f64) {
        self.available.insert(symbol.into(), amount);
    }

    /// Builder form of [`Balances::set`].
    pub fn with(mut self, symbol: impl Into<Symbol>, amount: f64) -> Self {
        self.set(symbol, amount);
        self
    }

    /// Available amount of a symbol, if known.
    pub fn get(&self, symbol: &Symbol) -> Option<f64> {
        self.available.get(symbol).copied()
    }

    /// Check if no balance is known.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// Validate the state without balance information.
pub fn validate(state: &ConversionState) -> ErrorSet {
    validate_with_balances(state, &Balances::default())
}

/// Validate the state. Each rule is independent; nothing suppresses another.
pub fn validate_with_balances(state: &ConversionState, balances: &Balances) -> ErrorSet {
    let source_balance = state
        .source_instrument
        .as_ref()
        .and_then(|i| balances.get(&i.symbol));

    let source_amount = check_amount(&state.source_amount).or_else(|| {
        let amount = state.source_amount.positive()?;
        (amount > source_balance?).then_some(ValidationError::InsufficientBalance)
    });

    let selection = match state.instruments() {
        Some((source, target)) if source.same_symbol(target) => {
            Some(ValidationError::SameInstrument)
        }
        _ => None,
    };

    ErrorSet {
        source_amount,
        target_amount: check_amount(&state.target_amount),
        selection,
    }
}

fn check_amount(amount: &AmountField) -> Option<ValidationError> {
    match amount.value() {
        AmountValue::Empty => None,
        AmountValue::Invalid => Some(ValidationError::InvalidNumber),
        AmountValue::Number(v) if v <= 0.0 => Some(ValidationError::NotPositive),
        AmountValue::Number(_) => None,
    }
}
