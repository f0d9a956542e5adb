//! The conversion state owned by the form.

use serde::{Deserialize, Serialize};
use tokenswap_common::Instrument;

use crate::amount::AmountField;
use crate::edit::EditMarker;

/// One of the two linked amount fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// The amount being paid.
    Source,
    /// The amount being received.
    Target,
}

/// Everything the conversion core reads and writes.
///
/// Operations take the state by value and return the next one; the form
/// replaces its copy wholesale, so a half-applied transition is never visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionState {
    /// Instrument being paid.
    pub source_instrument: Option<Instrument>,
    /// Instrument being received.
    pub target_instrument: Option<Instrument>,
    /// Amount of the source instrument.
    pub source_amount: AmountField,
    /// Amount of the target instrument.
    pub target_amount: AmountField,
    /// Which field, if any, the user is typing into.
    pub edit_marker: EditMarker,
}

impl ConversionState {
    /// Empty state: nothing selected, nothing entered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both instruments.
    pub fn with_instruments(mut self, source: Instrument, target: Instrument) -> Self {
        self.source_instrument = Some(source);
        self.target_instrument = Some(target);
        self
    }

    /// Set the source amount text verbatim.
    pub fn with_source_amount(mut self, text: impl Into<String>) -> Self {
        self.source_amount = AmountField::new(text);
        self
    }

    /// Set the target amount text verbatim.
    pub fn with_target_amount(mut self, text: impl Into<String>) -> Self {
        self.target_amount = AmountField::new(text);
        self
    }

    /// Set the edit marker.
    pub fn with_marker(mut self, marker: EditMarker) -> Self {
        self.edit_marker = marker;
        self
    }

    /// Both selected instruments, if both are set.
    pub fn instruments(&self) -> Option<(&Instrument, &Instrument)> {
        Some((self.source_instrument.as_ref()?, self.target_instrument.as_ref()?))
    }

    /// The amount field for `field`.
    pub fn amount(&self, field: Field) -> &AmountField {
        match field {
            Field::Source => &self.source_amount,
            Field::Target => &self.target_amount,
        }
    }

    /// Replace the amount of `field`.
    pub fn set_amount(&mut self, field: Field, amount: AmountField) {
        match field {
            Field::Source => self.source_amount = amount,
            Field::Target => self.target_amount = amount,
        }
    }

    /// Check if neither amount has been entered.
    pub fn amounts_empty(&self) -> bool {
        self.source_amount.is_empty() && self.target_amount.is_empty()
    }
}
