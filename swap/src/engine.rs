//! Conversion engine: derives the non-edited amount from the edited one.

use serde::{Deserialize, Serialize};

use crate::amount::AmountField;
use crate::edit::EditMarker;
use crate::state::ConversionState;

/// Which branch a derivation pass took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Derivation {
    /// An instrument is unset; the target amount was cleared.
    Unpriced,
    /// Target recomputed from source.
    TargetFromSource,
    /// Source recomputed from target.
    SourceFromTarget,
    /// Source emptied, so the stale target was cleared.
    ClearedTarget,
    /// Target emptied, so the stale source was cleared.
    ClearedSource,
    /// Nothing to do.
    Unchanged,
}

/// Recompute whichever amount is not being edited.
///
/// Pure: the outcome depends only on `state`. Run after every change to the
/// instruments, the amounts or the edit marker.
pub fn derive(state: ConversionState) -> ConversionState {
    derive_with_outcome(state).0
}

/// Like [`derive`], also reporting which branch fired.
pub fn derive_with_outcome(mut state: ConversionState) -> (ConversionState, Derivation) {
    let (rate, inverse_rate) = match state.instruments() {
        Some((source, target)) => (source.rate_to(target), target.rate_to(source)),
        None => {
            state.target_amount = AmountField::empty();
            return (state, Derivation::Unpriced);
        }
    };

    let source = state.source_amount.positive();
    let target = state.target_amount.positive();
    let marker = state.edit_marker;

    // The four branches are ordered and exclusive. A driver must parse as a
    // positive number; clearing only follows a field whose text is empty.
    let outcome = if let Some(amount) = source.filter(|_| marker != EditMarker::EditingTarget) {
        state.target_amount = converted(amount, rate);
        Derivation::TargetFromSource
    } else if let Some(amount) = target.filter(|_| marker != EditMarker::EditingSource) {
        state.source_amount = converted(amount, inverse_rate);
        Derivation::SourceFromTarget
    } else if state.source_amount.is_empty()
        && !state.target_amount.is_empty()
        && marker != EditMarker::EditingTarget
    {
        state.target_amount = AmountField::empty();
        Derivation::ClearedTarget
    } else if state.target_amount.is_empty()
        && !state.source_amount.is_empty()
        && marker != EditMarker::EditingSource
    {
        state.source_amount = AmountField::empty();
        Derivation::ClearedSource
    } else {
        Derivation::Unchanged
    };

    (state, outcome)
}

/// Exchange instruments and amounts in a single step.
pub fn swap_direction(mut state: ConversionState) -> ConversionState {
    std::mem::swap(&mut state.source_instrument, &mut state.target_instrument);
    std::mem::swap(&mut state.source_amount, &mut state.target_amount);
    state
}

fn converted(amount: f64, rate: f64) -> AmountField {
    let value = amount * rate;
    if value.is_finite() {
        AmountField::derived(value)
    } else {
        AmountField::empty()
    }
}
