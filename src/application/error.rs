//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Deliberately small: per-venue fetch failures are contained inside the
//! snapshot aggregator and never reach this type, and "no comparable
//! venues" is a valid result rather than an error. What remains is the
//! one request the core cannot satisfy at all.

use thiserror::Error;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The requested symbol is not in the market catalog.
    #[error("unsupported symbol: {symbol}")]
    UnsupportedSymbol {
        /// The symbol as requested.
        symbol: String,
    },
}

impl RouterError {
    /// Creates an unsupported-symbol error.
    #[must_use]
    pub fn unsupported_symbol(symbol: impl Into<String>) -> Self {
        Self::UnsupportedSymbol {
            symbol: symbol.into(),
        }
    }
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;
