//! Price catalog snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::instrument::{Instrument, PriceRecord, Symbol};

/// An immutable snapshot of priced instruments.
///
/// Entries are unique by symbol, carry a positive price, and are ordered by
/// symbol (case-insensitive, ties broken by byte order) so that listings and
/// default selections are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceCatalog {
    instruments: Vec<Instrument>,
}

impl PriceCatalog {
    /// Build a catalog from instruments. Unusable prices are dropped and the
    /// last entry wins for a repeated symbol.
    pub fn new(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        let records = instruments.into_iter().map(|i| PriceRecord {
            currency: i.symbol.as_str().to_string(),
            date: None,
            price: Some(i.price),
        });
        Self::from_records(records)
    }

    /// Build a catalog from raw feed records.
    ///
    /// Records without a usable price are skipped. When a symbol repeats, the
    /// most recently dated record is kept; an undated record never replaces a
    /// dated one, and between equal dates the later record wins.
    pub fn from_records(records: impl IntoIterator<Item = PriceRecord>) -> Self {
        let mut latest: HashMap<Symbol, (Option<DateTime<Utc>>, Instrument)> = HashMap::new();

        for record in records {
            let Some(instrument) = record.to_instrument() else {
                continue;
            };

            match latest.get(&instrument.symbol) {
                Some((kept_date, _)) if record.date < *kept_date => {}
                _ => {
                    latest.insert(instrument.symbol.clone(), (record.date, instrument));
                }
            }
        }

        let mut instruments: Vec<Instrument> = latest.into_values().map(|(_, i)| i).collect();
        instruments.sort_by(|a, b| compare_symbols(&a.symbol, &b.symbol));

        Self { instruments }
    }

    /// Decode a feed payload (a JSON array of records) into a catalog.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<PriceRecord> = serde_json::from_str(payload)?;
        Ok(Self::from_records(records))
    }

    /// Look up an instrument by symbol.
    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol.as_str() == symbol)
    }

    /// Check whether a symbol is listed.
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// First instrument in listing order.
    pub fn first(&self) -> Option<&Instrument> {
        self.instruments.first()
    }

    /// First instrument in listing order whose symbol differs from `symbol`.
    pub fn first_except(&self, symbol: &Symbol) -> Option<&Instrument> {
        self.instruments.iter().find(|i| &i.symbol != symbol)
    }

    /// Iterate over instruments in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Listed symbols in order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        self.instruments.iter().map(|i| &i.symbol).collect()
    }

    /// Number of listed instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Check if the catalog lists nothing.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Availability of the price catalog as seen by the form.
///
/// The four states render differently (loading skeleton, error message,
/// empty message, the form itself); only `Available` permits conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    /// No snapshot has arrived yet.
    Loading,
    /// The feed failed before any snapshot arrived.
    Failed(String),
    /// The feed answered with no usable instruments.
    Empty,
    /// A usable snapshot.
    Available(Arc<PriceCatalog>),
}

impl CatalogStatus {
    /// Wrap a freshly built catalog, mapping an empty one to `Empty`.
    pub fn from_catalog(catalog: PriceCatalog) -> Self {
        if catalog.is_empty() {
            CatalogStatus::Empty
        } else {
            CatalogStatus::Available(Arc::new(catalog))
        }
    }

    /// The snapshot, if one is available.
    pub fn catalog(&self) -> Option<&Arc<PriceCatalog>> {
        match self {
            CatalogStatus::Available(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Check if conversion is possible.
    pub fn is_available(&self) -> bool {
        matches!(self, CatalogStatus::Available(_))
    }

    /// Message shown in place of the form, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            CatalogStatus::Loading => Some("Loading token prices..."),
            CatalogStatus::Failed(_) => Some("Failed to load token prices"),
            CatalogStatus::Empty => Some("No tokens available"),
            CatalogStatus::Available(_) => None,
        }
    }
}

fn compare_symbols(a: &Symbol, b: &Symbol) -> Ordering {
    a.as_str()
        .to_lowercase()
        .cmp(&b.as_str().to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_catalog_filters_unusable_prices() {
        let catalog = PriceCatalog::from_records(vec![
            PriceRecord::new("ETH", Some(1645.93)),
            PriceRecord::new("LUNA", None),
            PriceRecord::new("ZERO", Some(0.0)),
            PriceRecord::new("NEG", Some(-3.0)),
            PriceRecord::new("", Some(1.0)),
        ]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("ETH"));
        assert!(!catalog.contains("LUNA"));
    }

    #[test]
    fn test_catalog_sorted_case_insensitive() {
        let catalog = PriceCatalog::new(vec![
            Instrument::new("USDC", 1.0),
            Instrument::new("bNEO", 7.2),
            Instrument::new("ATOM", 7.1),
            Instrument::new("BUSD", 1.0),
        ]);

        let symbols: Vec<&str> = catalog.symbols().into_iter().map(|s| s.as_str()).collect();
        assert_eq!(symbols, vec!["ATOM", "bNEO", "BUSD", "USDC"]);
    }

    #[test]
    fn test_catalog_keeps_latest_duplicate() {
        let older = Utc.with_ymd_and_hms(2023, 8, 29, 7, 10, 30).unwrap();
        let newer = Utc.with_ymd_and_hms(2023, 8, 29, 7, 10, 40).unwrap();

        let catalog = PriceCatalog::from_records(vec![
            PriceRecord::new("USDC", Some(0.99)).at(newer),
            PriceRecord::new("USDC", Some(1.01)).at(older),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("USDC").unwrap().price, 0.99);
    }

    #[test]
    fn test_catalog_later_entry_wins_without_dates() {
        let catalog = PriceCatalog::new(vec![Instrument::new("A", 1.0), Instrument::new("A", 3.0)]);

        assert_eq!(catalog.get("A").unwrap().price, 3.0);
    }

    #[test]
    fn test_first_except() {
        let catalog = PriceCatalog::new(vec![Instrument::new("A", 1.0), Instrument::new("B", 2.0)]);

        assert_eq!(catalog.first().unwrap().symbol.as_str(), "A");
        assert_eq!(
            catalog.first_except(&Symbol::new("A")).unwrap().symbol.as_str(),
            "B"
        );

        let single = PriceCatalog::new(vec![Instrument::new("A", 1.0)]);
        assert!(single.first_except(&Symbol::new("A")).is_none());
    }

    #[test]
    fn test_catalog_from_json() {
        let payload = r#"[
            {"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525423728813},
            {"currency":"bNEO","date":"2023-08-29T07:10:50.000Z","price":7.1282679},
            {"currency":"KUJI","date":"2023-08-29T07:10:45.000Z","price":null}
        ]"#;

        let catalog = PriceCatalog::from_json(payload).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.first().unwrap().symbol.as_str(), "BLUR");
        assert!(catalog.contains("bNEO"));
    }

    #[test]
    fn test_catalog_from_json_rejects_garbage() {
        assert!(PriceCatalog::from_json("{\"not\":\"an array\"}").is_err());
    }

    #[test]
    fn test_catalog_status() {
        assert_eq!(
            CatalogStatus::from_catalog(PriceCatalog::default()),
            CatalogStatus::Empty
        );

        let status = CatalogStatus::from_catalog(PriceCatalog::new(vec![Instrument::new("A", 1.0)]));
        assert!(status.is_available());
        assert_eq!(status.catalog().unwrap().len(), 1);
        assert_eq!(status.notice(), None);

        assert_eq!(CatalogStatus::Loading.notice(), Some("Loading token prices..."));
        assert_eq!(
            CatalogStatus::Failed("timeout".into()).notice(),
            Some("Failed to load token prices")
        );
        assert_eq!(CatalogStatus::Empty.notice(), Some("No tokens available"));
    }
}
