//! Replays a quote request as form events.

use anyhow::{bail, Result};
use serde_json::json;
use tokenswap_swap::{Field, FormState};
use tracing::{info, warn};

/// The amount the user typed, and into which field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    /// Typed into the pay (source) field.
    Pay(String),
    /// Typed into the receive (target) field.
    Receive(String),
}

impl AmountInput {
    fn field(&self) -> Field {
        match self {
            AmountInput::Pay(_) => Field::Source,
            AmountInput::Receive(_) => Field::Target,
        }
    }

    fn text(&self) -> &str {
        match self {
            AmountInput::Pay(text) | AmountInput::Receive(text) => text,
        }
    }
}

/// A one-shot quote: pair, typed amount and optional source balance.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    /// Symbol to pay with.
    pub from: String,
    /// Symbol to receive.
    pub to: String,
    /// The typed amount.
    pub amount: AmountInput,
    /// Available balance of `from`, if known.
    pub balance: Option<f64>,
}

/// Drive `form` the way a user would: pick the pair, focus the field, type,
/// then leave the field.
pub fn replay(form: &mut FormState, request: &QuoteRequest) -> Result<()> {
    if !form.select_source(&request.from) {
        bail!("Token {} is not listed", request.from);
    }
    if !form.select_target(&request.to) {
        bail!("Token {} is not listed", request.to);
    }

    if let Some(balance) = request.balance {
        form.set_balance(request.from.as_str(), balance);
    }

    let field = request.amount.field();
    form.focus(field);
    form.input(field, request.amount.text());
    form.blur();

    Ok(())
}

/// Render the form outcome as a JSON report.
pub fn report(form: &FormState) -> serde_json::Value {
    let label = form.submit_label();
    let submission = match form.submit() {
        Ok(receipt) => {
            info!(swap_id = %receipt.id, "Swap accepted");
            json!({ "accepted": true, "message": receipt.message(), "receipt": receipt })
        }
        Err(e) => {
            warn!(error = %e, "Swap refused");
            json!({ "accepted": false, "message": e.to_string() })
        }
    };

    json!({
        "source_amount": form.state().source_amount,
        "target_amount": form.state().target_amount,
        "quote": form.quote(),
        "errors": form.errors().messages(),
        "error_codes": form.errors().iter().map(|e| e.error_code()).collect::<Vec<_>>(),
        "label": label.label(),
        "hint": label.hint(),
        "submission": submission,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenswap_common::{CatalogStatus, Instrument, PriceCatalog};

    fn form() -> FormState {
        let mut form = FormState::default();
        form.apply_catalog(CatalogStatus::from_catalog(PriceCatalog::new(vec![
            Instrument::new("ETH", 1645.93),
            Instrument::new("USDC", 1.0),
            Instrument::new("SWTH", 0.004),
        ])));
        form
    }

    fn request(amount: AmountInput) -> QuoteRequest {
        QuoteRequest {
            from: "USDC".into(),
            to: "SWTH".into(),
            amount,
            balance: None,
        }
    }

    #[test]
    fn test_replay_pay_amount() {
        let mut form = form();
        replay(&mut form, &request(AmountInput::Pay("10".into()))).unwrap();

        assert_eq!(form.state().target_amount.text(), "2500");
        assert!(form.can_submit());

        let report = report(&form);
        assert_eq!(report["label"], "Swap");
        assert!(report["hint"].is_null());
        assert_eq!(report["submission"]["accepted"], true);
        assert_eq!(report["submission"]["message"], "Swapped 10 USDC for 2500 SWTH");
    }

    #[test]
    fn test_replay_receive_amount() {
        let mut form = form();
        replay(&mut form, &request(AmountInput::Receive("2500".into()))).unwrap();

        assert_eq!(form.state().source_amount.text(), "10");
    }

    #[test]
    fn test_replay_insufficient_balance() {
        let mut form = form();
        let mut request = request(AmountInput::Pay("10".into()));
        request.balance = Some(5.0);
        replay(&mut form, &request).unwrap();

        let report = report(&form);
        assert_eq!(report["label"], "Insufficient balance");
        assert_eq!(report["submission"]["accepted"], false);
        assert_eq!(report["errors"][0], "Insufficient balance");
        assert_eq!(report["error_codes"][0], "INSUFFICIENT_BALANCE");
    }

    #[test]
    fn test_replay_unknown_token() {
        let mut form = form();
        let mut request = request(AmountInput::Pay("1".into()));
        request.to = "DOGE".into();

        assert!(replay(&mut form, &request).is_err());
    }
}
