//! Instrument types for the swap form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Ticker symbol of a tradable token.
///
/// Symbols are kept verbatim: the feed publishes mixed-case tickers such as
/// `bNEO` and `stATOM`, and two symbols that differ only in case are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A symbol is usable when it is non-empty and has no surrounding whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A tradable token with its price, as published in the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Ticker symbol, unique within a catalog.
    pub symbol: Symbol,
    /// Price in the feed's quote unit (USD). Always finite and positive.
    pub price: f64,
}

impl Instrument {
    /// Create a new instrument.
    pub fn new(symbol: impl Into<Symbol>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }

    /// Check that the price can take part in a conversion.
    pub fn has_usable_price(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }

    /// Ratio that converts an amount of `self` into an amount of `other`.
    pub fn rate_to(&self, other: &Instrument) -> f64 {
        self.price / other.price
    }

    /// Whether both instruments carry the same symbol.
    pub fn same_symbol(&self, other: &Instrument) -> bool {
        self.symbol == other.symbol
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.symbol, self.price)
    }
}

/// One raw entry of the price feed payload.
///
/// The feed publishes `{"currency": "ETH", "date": "...", "price": 1645.93}`;
/// the price may be absent or `null` for delisted tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Ticker symbol.
    pub currency: String,
    /// When the price was sampled. Unparseable dates are treated as absent.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    /// Sampled price.
    #[serde(default)]
    pub price: Option<f64>,
}

impl PriceRecord {
    /// Create a record without a sample time.
    pub fn new(currency: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            currency: currency.into(),
            date: None,
            price,
        }
    }

    /// Attach a sample time.
    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Convert to an instrument if the record carries a usable symbol and price.
    pub fn to_instrument(&self) -> Option<Instrument> {
        let instrument = Instrument::new(self.currency.as_str(), self.price?);
        (instrument.symbol.is_valid() && instrument.has_usable_price()).then_some(instrument)
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|value| value.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|date| date.with_timezone(&Utc)))
}
