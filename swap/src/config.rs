//! Form configuration.

use tokenswap_common::{Instrument, PriceCatalog, Symbol};

/// Preferred instruments selected when the catalog first arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDefaults {
    /// Preferred source symbol.
    pub source: Symbol,
    /// Preferred target symbol.
    pub target: Symbol,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            source: Symbol::new("SWTH"),
            target: Symbol::new("ETH"),
        }
    }
}

impl SelectionDefaults {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(symbol) = std::env::var("SWAP_DEFAULT_SOURCE") {
            config.source = Symbol::new(symbol);
        }

        if let Ok(symbol) = std::env::var("SWAP_DEFAULT_TARGET") {
            config.target = Symbol::new(symbol);
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.source.is_valid() || !self.target.is_valid() {
            return Err("Default symbols cannot be empty".to_string());
        }

        if self.source == self.target {
            return Err("Default source and target symbols must differ".to_string());
        }

        Ok(())
    }

    /// Resolve the default pair against a catalog.
    ///
    /// Preferred symbols win when listed. Otherwise the source falls back to
    /// the first entry and the target to the first entry distinct from the
    /// source; a single-entry catalog yields the same instrument twice.
    pub fn resolve<'a>(
        &self,
        catalog: &'a PriceCatalog,
    ) -> Option<(&'a Instrument, &'a Instrument)> {
        let source = catalog
            .get(self.source.as_str())
            .or_else(|| catalog.first())?;

        let target = catalog
            .get(self.target.as_str())
            .filter(|t| !t.same_symbol(source))
            .or_else(|| catalog.first_except(&source.symbol))
            .unwrap_or(source);

        Some((source, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert!(SelectionDefaults::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = SelectionDefaults {
            source: Symbol::new("ETH"),
            target: Symbol::new("ETH"),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_preferred() {
        let catalog = PriceCatalog::new(vec![
            Instrument::new("ATOM", 7.0),
            Instrument::new("ETH", 1645.0),
            Instrument::new("SWTH", 0.004),
        ]);
        let (source, target) = SelectionDefaults::default().resolve(&catalog).unwrap();

        assert_eq!(source.symbol.as_str(), "SWTH");
        assert_eq!(target.symbol.as_str(), "ETH");
    }

    #[test]
    fn test_resolve_fallback_is_distinct() {
        // Source falls back to ETH, so the preferred target would collide.
        let catalog = PriceCatalog::new(vec![
            Instrument::new("ETH", 1645.0),
            Instrument::new("USDC", 1.0),
        ]);
        let (source, target) = SelectionDefaults::default().resolve(&catalog).unwrap();

        assert_eq!(source.symbol.as_str(), "ETH");
        assert_eq!(target.symbol.as_str(), "USDC");
    }

    #[test]
    fn test_resolve_single_and_empty() {
        let single = PriceCatalog::new(vec![Instrument::new("USDC", 1.0)]);
        let (source, target) = SelectionDefaults::default().resolve(&single).unwrap();
        assert_eq!(source, target);

        assert!(SelectionDefaults::default().resolve(&PriceCatalog::default()).is_none());
    }
}
