//! # Venue Entity
//!
//! Represents an exchange venue and its fee schedule.
//!
//! A [`Venue`] is loaded once into the registry at process start and never
//! mutated at runtime. Only venues with [`VenueStatus::Active`] participate
//! in comparisons.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::entities::venue::{FeeSchedule, Venue};
//! use spot_router::domain::value_objects::{Symbol, VenueId};
//!
//! let venue = Venue::new(
//!     VenueId::new("kraken"),
//!     "Kraken",
//!     FeeSchedule::from_bps(16, 26),
//! )
//! .with_pair(Symbol::new("BTC/USDT").unwrap());
//!
//! assert!(venue.is_active());
//! assert!(venue.supports_pair(&Symbol::new("btc/usdt").unwrap()));
//! ```

use crate::domain::value_objects::{Symbol, VenueId, VenueStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maker/taker trading fee rates, as fractions (0.001 = 0.1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fee rate for resting (maker) orders.
    maker: Decimal,
    /// Fee rate for aggressive (taker) orders.
    taker: Decimal,
}

impl FeeSchedule {
    /// Creates a fee schedule from fractional rates.
    #[must_use]
    pub fn new(maker: Decimal, taker: Decimal) -> Self {
        Self { maker, taker }
    }

    /// Creates a fee schedule from basis points (26 bps = 0.26%).
    #[must_use]
    pub fn from_bps(maker_bps: i64, taker_bps: i64) -> Self {
        Self {
            maker: Decimal::new(maker_bps, 4),
            taker: Decimal::new(taker_bps, 4),
        }
    }

    /// Returns the maker fee rate.
    #[inline]
    #[must_use]
    pub fn maker(&self) -> Decimal {
        self.maker
    }

    /// Returns the taker fee rate.
    #[inline]
    #[must_use]
    pub fn taker(&self) -> Decimal {
        self.taker
    }

    /// Returns the rate for the given liquidity role.
    #[inline]
    #[must_use]
    pub fn rate(&self, is_maker: bool) -> Decimal {
        if is_maker { self.maker } else { self.taker }
    }
}

/// An exchange venue.
///
/// Immutable after registry construction: id, display name, fee schedule,
/// the set of supported trading pairs and the operational status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Unique identifier for this venue.
    id: VenueId,
    /// Human-readable display label.
    name: String,
    /// Trading fee schedule.
    fees: FeeSchedule,
    /// Trading pairs quotable on this venue.
    supported_pairs: Vec<Symbol>,
    /// Operational status.
    status: VenueStatus,
}

impl Venue {
    /// Creates an active venue with no supported pairs.
    #[must_use]
    pub fn new(id: VenueId, name: impl Into<String>, fees: FeeSchedule) -> Self {
        Self {
            id,
            name: name.into(),
            fees,
            supported_pairs: Vec::new(),
            status: VenueStatus::Active,
        }
    }

    /// Adds a supported trading pair.
    #[must_use]
    pub fn with_pair(mut self, pair: Symbol) -> Self {
        if !self.supported_pairs.contains(&pair) {
            self.supported_pairs.push(pair);
        }
        self
    }

    /// Replaces the supported pair set.
    #[must_use]
    pub fn with_pairs(mut self, pairs: impl IntoIterator<Item = Symbol>) -> Self {
        self.supported_pairs = pairs.into_iter().collect();
        self
    }

    /// Sets the operational status.
    #[must_use]
    pub fn with_status(mut self, status: VenueStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the venue id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &VenueId {
        &self.id
    }

    /// Returns the display label.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fee schedule.
    #[inline]
    #[must_use]
    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Returns the operational status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> VenueStatus {
        self.status
    }

    /// Returns true if the venue participates in routing.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns the supported trading pairs.
    #[inline]
    #[must_use]
    pub fn supported_pairs(&self) -> &[Symbol] {
        &self.supported_pairs
    }

    /// Returns true if the venue quotes the given pair.
    #[must_use]
    pub fn supports_pair(&self, pair: &Symbol) -> bool {
        self.supported_pairs.contains(pair)
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Venue({} '{}' [{}])", self.id, self.name, self.status)
    }
}
