//! # Market Catalog
//!
//! Static mapping from canonical symbols to venue-native symbols.
//!
//! Each exchange spells the same pair differently (`XBTUSDT`, `BTC-USDT`,
//! `BTC_USDT`); the catalog owns those tables. Like the venue registry it
//! is built once at startup and never mutated.

use crate::domain::value_objects::{Symbol, VenueId};
use std::collections::HashMap;

/// One venue's native spelling of a canonical symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSymbol {
    /// The venue.
    pub venue_id: VenueId,
    /// The venue-native symbol string to send on the wire.
    pub native: String,
}

impl VenueSymbol {
    /// Creates a venue/native-symbol pairing.
    #[must_use]
    pub fn new(venue_id: VenueId, native: impl Into<String>) -> Self {
        Self {
            venue_id,
            native: native.into(),
        }
    }
}

/// Immutable symbol → venue-native-symbol tables.
#[derive(Debug, Clone, Default)]
pub struct MarketCatalog {
    mappings: HashMap<Symbol, Vec<VenueSymbol>>,
}

impl MarketCatalog {
    /// Builds a catalog from explicit mappings.
    #[must_use]
    pub fn new(mappings: HashMap<Symbol, Vec<VenueSymbol>>) -> Self {
        Self { mappings }
    }

    /// Builds the default catalog for the supported USDT pairs.
    #[must_use]
    pub fn builtin() -> Self {
        let kraken = VenueId::new("kraken");
        let okx = VenueId::new("okx");
        let gateio = VenueId::new("gateio");

        let mut mappings = HashMap::new();
        for base in ["BTC", "ETH", "SOL", "ADA"] {
            let Ok(symbol) = Symbol::new(format!("{}/USDT", base)) else {
                continue;
            };
            // Kraken spells bitcoin XBT.
            let kraken_base = if base == "BTC" { "XBT" } else { base };
            mappings.insert(
                symbol,
                vec![
                    VenueSymbol::new(kraken.clone(), format!("{}USDT", kraken_base)),
                    VenueSymbol::new(okx.clone(), format!("{}-USDT", base)),
                    VenueSymbol::new(gateio.clone(), format!("{}_USDT", base)),
                ],
            );
        }

        Self { mappings }
    }

    /// Returns the venue mappings for a symbol, or `None` if unsupported.
    #[must_use]
    pub fn venue_symbols(&self, symbol: &Symbol) -> Option<&[VenueSymbol]> {
        self.mappings.get(symbol).map(Vec::as_slice)
    }

    /// Returns true if the symbol is routable.
    #[must_use]
    pub fn is_supported(&self, symbol: &Symbol) -> bool {
        self.mappings.contains_key(symbol)
    }

    /// Parses and validates a caller-supplied symbol string.
    ///
    /// Returns `None` when the string is malformed or the symbol is not in
    /// the catalog.
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<Symbol> {
        let symbol = Symbol::new(input).ok()?;
        self.is_supported(&symbol).then_some(symbol)
    }

    /// All supported symbols, sorted for stable output.
    #[must_use]
    pub fn supported_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.mappings.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}
