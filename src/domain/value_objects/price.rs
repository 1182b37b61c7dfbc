//! # Price Value Object
//!
//! Positive decimal price with validated construction.
//!
//! Quote feeds deliver prices as strings; [`Price::parse`] goes straight
//! from the wire representation to a validated decimal without an
//! intermediate float.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::value_objects::Price;
//!
//! let price = Price::new(65000.5).unwrap();
//! assert!(price.get() > rust_decimal::Decimal::ZERO);
//!
//! let parsed = Price::parse("65000.50").unwrap();
//! assert_eq!(parsed.to_string(), "65000.50");
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a price value is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The value is zero or negative.
    #[error("price must be strictly positive, got {0}")]
    NotPositive(Decimal),

    /// The value is not a finite representable number.
    #[error("price is not a finite number: {0}")]
    NotFinite(String),
}

/// A strictly positive price.
///
/// # Invariants
///
/// - Always finite
/// - Always greater than zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
#[serde(into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Creates a price from a float.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFinite`] for NaN or infinite input, and
    /// [`PriceError::NotPositive`] for zero or negative input.
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite(value.to_string()));
        }
        let decimal =
            Decimal::from_f64(value).ok_or_else(|| PriceError::NotFinite(value.to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Creates a price from a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if the value is not strictly
    /// positive.
    pub fn from_decimal(value: Decimal) -> Result<Self, PriceError> {
        if value <= Decimal::ZERO {
            return Err(PriceError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parses a price from its wire (string) representation.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFinite`] if the string is not a decimal
    /// number, or [`PriceError::NotPositive`] if it does not validate.
    pub fn parse(value: &str) -> Result<Self, PriceError> {
        let decimal: Decimal = value
            .trim()
            .parse()
            .map_err(|_| PriceError::NotFinite(value.to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}
