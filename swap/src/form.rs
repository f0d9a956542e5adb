//! The form aggregate: single source of truth for the UI and the submit action.

use tokenswap_common::{CatalogStatus, Instrument, PriceCatalog, Symbol};
use tracing::debug;

use crate::amount::AmountField;
use crate::config::SelectionDefaults;
use crate::edit::{clear_editing, mark_editing};
use crate::engine::{derive_with_outcome, swap_direction};
use crate::error::{SubmitError, SubmitResult};
use crate::gate::{can_submit, describe_submit_state, SubmitLabel};
use crate::quote::QuoteSummary;
use crate::state::{ConversionState, Field};
use crate::submit::{submit, SwapReceipt};
use crate::validator::{validate_with_balances, Balances, ErrorSet};

/// State behind one swap form.
///
/// Every event builds the next [`ConversionState`], derives the linked
/// amount, then validates; the result replaces the previous state and error
/// set together.
#[derive(Debug, Clone)]
pub struct FormState {
    catalog: CatalogStatus,
    state: ConversionState,
    errors: ErrorSet,
    balances: Balances,
    defaults: SelectionDefaults,
    defaults_applied: bool,
}

impl FormState {
    /// Create a form waiting for its first catalog.
    pub fn new(defaults: SelectionDefaults) -> Self {
        Self {
            catalog: CatalogStatus::Loading,
            state: ConversionState::new(),
            errors: ErrorSet::default(),
            balances: Balances::new(),
            defaults,
            defaults_applied: false,
        }
    }

    /// Current conversion state.
    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Current errors.
    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Current catalog status.
    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog
    }

    /// Known wallet balances.
    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    /// React to a new catalog status from the feed.
    ///
    /// The first available catalog selects the default pair. Later ones
    /// re-price the current selection; a symbol no longer listed is unset.
    /// Loading, failed and empty statuses leave the conversion state alone.
    pub fn apply_catalog(&mut self, status: CatalogStatus) {
        let next = match status.catalog() {
            Some(catalog) if !self.defaults_applied => {
                self.defaults_applied = true;
                let mut next = self.state.clone();
                if let Some((source, target)) = self.defaults.resolve(catalog) {
                    debug!(source = %source.symbol, target = %target.symbol, "Selected default pair");
                    next.source_instrument = Some(source.clone());
                    next.target_instrument = Some(target.clone());
                }
                Some(next)
            }
            Some(catalog) => {
                let mut next = self.state.clone();
                next.source_instrument = rebind(catalog, next.source_instrument.as_ref());
                next.target_instrument = rebind(catalog, next.target_instrument.as_ref());
                Some(next)
            }
            None => None,
        };

        self.catalog = status;
        if let Some(next) = next {
            self.replace(next);
        }
    }

    /// Select the instrument to pay with. Returns `false` if it is not listed.
    pub fn select_source(&mut self, symbol: &str) -> bool {
        let Some(instrument) = self.lookup(symbol) else {
            return false;
        };
        let mut next = self.state.clone();
        next.source_instrument = Some(instrument);
        self.replace(next);
        true
    }

    /// Select the instrument to receive. Returns `false` if it is not listed.
    pub fn select_target(&mut self, symbol: &str) -> bool {
        let Some(instrument) = self.lookup(symbol) else {
            return false;
        };
        let mut next = self.state.clone();
        next.target_instrument = Some(instrument);
        self.replace(next);
        true
    }

    /// The user changed the text of an amount field.
    pub fn input(&mut self, field: Field, raw: &str) {
        let mut next = self.state.clone();
        next.set_amount(field, AmountField::from_input(raw));
        self.replace(next);
    }

    /// The user changed the source amount text.
    pub fn input_source(&mut self, raw: &str) {
        self.input(Field::Source, raw);
    }

    /// The user changed the target amount text.
    pub fn input_target(&mut self, raw: &str) {
        self.input(Field::Target, raw);
    }

    /// Focus moved into an amount field.
    pub fn focus(&mut self, field: Field) {
        let next = mark_editing(self.state.clone(), field);
        self.replace(next);
    }

    /// Focus left the amount fields.
    pub fn blur(&mut self) {
        let next = clear_editing(self.state.clone());
        self.replace(next);
    }

    /// Reverse the direction. Only possible once both instruments are set.
    pub fn swap_direction(&mut self) -> bool {
        if self.state.instruments().is_none() {
            return false;
        }
        let next = swap_direction(self.state.clone());
        self.replace(next);
        true
    }

    /// Record the wallet balance of a symbol and revalidate.
    pub fn set_balance(&mut self, symbol: impl Into<Symbol>, amount: f64) {
        self.balances.set(symbol, amount);
        self.errors = validate_with_balances(&self.state, &self.balances);
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        can_submit(&self.state, &self.errors)
    }

    /// Submit button state.
    pub fn submit_label(&self) -> SubmitLabel {
        describe_submit_state(&self.state, &self.errors)
    }

    /// Exchange rate summary, once both instruments are selected.
    pub fn quote(&self) -> Option<QuoteSummary> {
        QuoteSummary::from_state(&self.state, &self.errors)
    }

    /// Submit the current state, rechecking validity first.
    pub fn submit(&self) -> SubmitResult<SwapReceipt> {
        if !self.catalog.is_available() {
            return Err(SubmitError::CatalogUnavailable);
        }
        submit(&self.state, &self.balances)
    }

    fn lookup(&self, symbol: &str) -> Option<Instrument> {
        self.catalog.catalog()?.get(symbol).cloned()
    }

    fn replace(&mut self, next: ConversionState) {
        let (next, outcome) = derive_with_outcome(next);
        let errors = validate_with_balances(&next, &self.balances);

        debug!(
            derivation = ?outcome,
            marker = ?next.edit_marker,
            source_amount = %next.source_amount,
            target_amount = %next.target_amount,
            errors = errors.len(),
            "Form state updated"
        );

        self.state = next;
        self.errors = errors;
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(SelectionDefaults::default())
    }
}

fn rebind(catalog: &PriceCatalog, selected: Option<&Instrument>) -> Option<Instrument> {
    catalog.get(selected?.symbol.as_str()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::EditMarker;
    use tokenswap_common::ValidationError;

    fn catalog(entries: &[(&str, f64)]) -> CatalogStatus {
        CatalogStatus::from_catalog(PriceCatalog::new(
            entries.iter().map(|(s, p)| Instrument::new(*s, *p)),
        ))
    }

    fn ab_form() -> FormState {
        let mut form = FormState::default();
        form.apply_catalog(catalog(&[("A", 2.0), ("B", 4.0)]));
        form
    }

    #[test]
    fn test_defaults_to_distinct_pair() {
        let form = ab_form();

        assert_eq!(form.state().source_instrument.as_ref().unwrap().symbol.as_str(), "A");
        assert_eq!(form.state().target_instrument.as_ref().unwrap().symbol.as_str(), "B");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_typing_scenario() {
        let mut form = ab_form();

        form.focus(Field::Source);
        form.input_source("10");
        assert_eq!(form.state().target_amount.text(), "5");

        form.blur();
        form.focus(Field::Target);
        form.input_target("20");
        assert_eq!(form.state().source_amount.text(), "40");
        assert_eq!(form.state().edit_marker, EditMarker::EditingTarget);

        form.blur();
        assert_eq!(form.state().source_amount.text(), "40");
        assert_eq!(form.state().target_amount.text(), "20");
        assert!(form.can_submit());
    }

    #[test]
    fn test_input_is_sanitized() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("12.3.4");

        assert_eq!(form.state().source_amount.text(), "12.34");
        assert_eq!(form.state().target_amount.text(), "6.17");
    }

    #[test]
    fn test_clearing_source_clears_target() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");
        form.input_source("");

        assert!(form.state().amounts_empty());
        assert_eq!(form.submit_label(), SubmitLabel::EnterAmount);
    }

    #[test]
    fn test_zero_blocks_submit() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("0");

        assert_eq!(form.errors().source_amount, Some(ValidationError::NotPositive));
        assert!(!form.can_submit());
        assert_eq!(form.submit(), Err(SubmitError::InvalidForm));
    }

    #[test]
    fn test_same_token_selection() {
        let mut form = ab_form();
        assert!(form.select_target("A"));

        assert_eq!(form.errors().selection, Some(ValidationError::SameInstrument));
        assert!(!form.select_target("ZZZ"));
    }

    #[test]
    fn test_swap_direction_rederives() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");
        form.blur();
        assert!(form.swap_direction());

        assert_eq!(form.state().source_instrument.as_ref().unwrap().symbol.as_str(), "B");
        assert_eq!(form.state().source_amount.text(), "5");
        assert_eq!(form.state().target_amount.text(), "10");
    }

    #[test]
    fn test_swap_direction_needs_pair() {
        let mut form = FormState::default();
        assert!(!form.swap_direction());
    }

    #[test]
    fn test_refresh_reprices_selection() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");
        form.blur();

        form.apply_catalog(catalog(&[("A", 3.0), ("B", 4.0), ("C", 1.0)]));

        assert_eq!(form.state().source_instrument.as_ref().unwrap().price, 3.0);
        assert_eq!(form.state().target_amount.text(), "7.5");
    }

    #[test]
    fn test_refresh_drops_delisted_symbol() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");
        form.blur();

        form.apply_catalog(catalog(&[("A", 2.0), ("C", 1.0)]));

        assert!(form.state().target_instrument.is_none());
        assert!(form.state().target_amount.is_empty());
        assert_eq!(form.submit_label(), SubmitLabel::Incomplete);
    }

    #[test]
    fn test_failed_catalog_blocks_submit() {
        let mut form = FormState::default();
        form.apply_catalog(CatalogStatus::Failed("connection refused".into()));

        assert_eq!(form.catalog_status().notice(), Some("Failed to load token prices"));
        assert_eq!(form.submit(), Err(SubmitError::CatalogUnavailable));
        assert!(!form.select_source("A"));
    }

    #[test]
    fn test_balance_revalidates() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");
        form.set_balance("A", 4.0);

        assert_eq!(form.submit_label(), SubmitLabel::InsufficientBalance);
        assert_eq!(form.submit(), Err(SubmitError::InvalidForm));

        form.set_balance("A", 100.0);
        assert!(form.submit_label().is_ready());
        assert_eq!(form.submit().unwrap().message(), "Swapped 10 A for 5 B");
    }

    #[test]
    fn test_quote_follows_state() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");

        let quote = form.quote().unwrap();
        assert_eq!(quote.exchange_rate, "1 A = 0.5 B");
        assert_eq!(quote.receive.as_deref(), Some("5 B"));
    }

    #[test]
    fn test_form_snapshot_serializes() {
        let mut form = ab_form();
        form.focus(Field::Source);
        form.input_source("10");

        let json = serde_json::to_string(form.state()).unwrap();
        let state: ConversionState = serde_json::from_str(&json).unwrap();
        assert_eq!(&state, form.state());

        form.select_target("A");
        let json = serde_json::to_value(form.errors()).unwrap();
        assert_eq!(json["selection"], "SameInstrument");
        let errors: ErrorSet = serde_json::from_value(json).unwrap();
        assert_eq!(&errors, form.errors());

        form.select_target("B");
        let receipt = form.submit().unwrap();
        let json = serde_json::to_string(&receipt).unwrap();
        assert_eq!(serde_json::from_str::<SwapReceipt>(&json).unwrap(), receipt);
    }
}
