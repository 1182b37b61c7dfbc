//! # Domain Enums
//!
//! Enumeration types for domain concepts:
//!
//! - [`OrderSide`] - Buy or Sell direction for route simulation
//! - [`VenueStatus`] - Operational state of an exchange venue
//!
//! Both serialize in lowercase, matching the wire format of the REST
//! surface (`"buy"`, `"active"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side indicating buy or sell direction.
///
/// # Examples
///
/// ```
/// use spot_router::domain::value_objects::OrderSide;
///
/// let side: OrderSide = "buy".parse().unwrap();
/// assert_eq!(side, OrderSide::Buy);
/// assert_eq!(side.opposite(), OrderSide::Sell);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order - acquiring the asset.
    Buy,
    /// Sell order - disposing of the asset.
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns true if this is a buy order.
    #[inline]
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Returns true if this is a sell order.
    #[inline]
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        };
        write!(f, "{}", s)
    }
}

/// Error returned when parsing an order side fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOrderSideError(pub String);

impl fmt::Display for InvalidOrderSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side must be \"buy\" or \"sell\", got '{}'", self.0)
    }
}

impl std::error::Error for InvalidOrderSideError {}

impl FromStr for OrderSide {
    type Err = InvalidOrderSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(InvalidOrderSideError(s.to_string())),
        }
    }
}

/// Operational status of an exchange venue.
///
/// Only [`VenueStatus::Active`] venues participate in comparisons; the
/// other states exist so the registry can reflect exchange downtime
/// without removing the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueStatus {
    /// Venue is operational and quotable.
    #[default]
    Active,
    /// Venue is temporarily down for maintenance.
    Maintenance,
    /// Venue is disabled.
    Inactive,
}

impl VenueStatus {
    /// Returns true if the venue participates in routing.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for VenueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}
