//! # Symbol Value Object
//!
//! Validated trading pair in `BASE/QUOTE` form.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::value_objects::Symbol;
//!
//! let symbol = Symbol::new("btc/usdt").unwrap();
//! assert_eq!(symbol.as_str(), "BTC/USDT");
//! assert_eq!(symbol.base(), "BTC");
//! assert_eq!(symbol.quote(), "USDT");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a symbol string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The string is not of the form `BASE/QUOTE`.
    #[error("symbol must be of the form BASE/QUOTE, got '{0}'")]
    InvalidFormat(String),

    /// A segment contains characters outside `[A-Z0-9]`.
    #[error("symbol segment '{0}' contains invalid characters")]
    InvalidSegment(String),
}

/// A trading pair such as `BTC/USDT`.
///
/// Normalized to uppercase at construction. Both segments must be
/// non-empty and ASCII alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a validated symbol, uppercasing the input.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError`] if the input is not `BASE/QUOTE` with
    /// alphanumeric segments.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, SymbolError> {
        let normalized = symbol.as_ref().trim().to_uppercase();
        let mut parts = normalized.split('/');

        let (Some(base), Some(quote), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SymbolError::InvalidFormat(normalized));
        };

        for segment in [base, quote] {
            if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(SymbolError::InvalidSegment(segment.to_string()));
            }
        }

        Ok(Self(normalized))
    }

    /// Returns the symbol as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base asset code.
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    /// Returns the quote asset code.
    #[must_use]
    pub fn quote(&self) -> &str {
        self.0.split('/').nth(1).unwrap_or_default()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_input() {
        let symbol = Symbol::new("eth/usdt").unwrap();
        assert_eq!(symbol.as_str(), "ETH/USDT");
    }

    #[test]
    fn base_and_quote() {
        let symbol = Symbol::new("SOL/USDT").unwrap();
        assert_eq!(symbol.base(), "SOL");
        assert_eq!(symbol.quote(), "USDT");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            Symbol::new("BTCUSDT"),
            Err(SymbolError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_extra_separator() {
        assert!(Symbol::new("BTC/USDT/EUR").is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(matches!(
            Symbol::new("BTC/"),
            Err(SymbolError::InvalidSegment(_))
        ));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(Symbol::new("BTC/US DT").is_err());
        assert!(Symbol::new("BTC/USD-T").is_err());
    }

    #[test]
    fn serde_rejects_malformed() {
        let result: Result<Symbol, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }

    #[test]
    fn serde_round_trip() {
        let symbol = Symbol::new("ada/usdt").unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"ADA/USDT\"");
        let back: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, symbol);
    }
}
