//! Amount fields: sanitising user input, parsing and rendering.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places kept in a derived amount.
pub const DERIVED_DECIMAL_PLACES: u32 = 8;

/// Parsed form of an amount field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountValue {
    /// Nothing entered yet.
    Empty,
    /// Text that is not a finite number.
    Invalid,
    /// A finite number, possibly zero or negative.
    Number(f64),
}

impl AmountValue {
    /// The value usable as a conversion input: finite and strictly positive.
    pub fn positive(&self) -> Option<f64> {
        match *self {
            AmountValue::Number(v) if v > 0.0 => Some(v),
            _ => None,
        }
    }
}

/// A free-form decimal typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmountField {
    text: String,
}

impl AmountField {
    /// Create a field holding `text` verbatim.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// An empty field.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a field from a raw keystroke result, sanitising it first.
    pub fn from_input(raw: &str) -> Self {
        Self::new(sanitize(raw))
    }

    /// Create a field holding a derived value, rendered with bounded precision.
    pub fn derived(value: f64) -> Self {
        Self::new(format_amount(value))
    }

    /// The text as displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Parse the text.
    pub fn value(&self) -> AmountValue {
        if self.text.is_empty() {
            return AmountValue::Empty;
        }
        match self.text.parse::<f64>() {
            Ok(v) if v.is_finite() => AmountValue::Number(v),
            _ => AmountValue::Invalid,
        }
    }

    /// Shorthand for `value().positive()`.
    pub fn positive(&self) -> Option<f64> {
        self.value().positive()
    }
}

impl fmt::Display for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Keep ASCII digits and the first decimal point; later points are dropped.
///
/// `"12.3.4"` becomes `"12.34"` and `"1a2"` becomes `"12"`.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '.' if !seen_point => {
                seen_point = true;
                out.push(c);
            }
            _ => {}
        }
    }

    out
}

/// Render a derived amount: round to 8 decimal places, drop trailing zeros.
pub fn format_amount(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(DERIVED_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        // Outside Decimal's range; fall back to float formatting.
        None => {
            let fixed = format!("{:.*}", DERIVED_DECIMAL_PLACES as usize, value);
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Render a value with a fixed number of decimals, e.g. a USD estimate.
pub fn format_fixed(value: f64, places: u32) -> Option<String> {
    let mut d = Decimal::from_f64(value)?
        .round_dp_with_strategy(DERIVED_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    d.rescale(places);
    Some(d.to_string())
}
