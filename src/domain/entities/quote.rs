//! # Raw Quote Entity
//!
//! Top-of-book bid/ask as delivered by a venue's ticker endpoint.
//!
//! A [`RawQuote`] is ephemeral: it lives in the quote cache for at most the
//! cache TTL and is never persisted. `bid < ask` is expected but not
//! enforced; a crossed book is the venue's data, not ours to repair.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::entities::quote::RawQuote;
//! use spot_router::domain::value_objects::{Price, Timestamp, VenueId};
//!
//! let quote = RawQuote::new(
//!     VenueId::new("kraken"),
//!     Price::new(64990.0).unwrap(),
//!     Price::new(65010.0).unwrap(),
//!     Timestamp::from_millis(1704067200000).unwrap(),
//! );
//!
//! assert_eq!(quote.mid(), rust_decimal::Decimal::from(65000));
//! assert!(!quote.is_crossed());
//! ```

use crate::domain::value_objects::{Price, Timestamp, VenueId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw top-of-book quote from one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Venue that produced the quote.
    venue_id: VenueId,
    /// Best bid price.
    bid: Price,
    /// Best ask price.
    ask: Price,
    /// Capture instant.
    captured_at: Timestamp,
}

impl RawQuote {
    /// Creates a raw quote.
    #[must_use]
    pub fn new(venue_id: VenueId, bid: Price, ask: Price, captured_at: Timestamp) -> Self {
        Self {
            venue_id,
            bid,
            ask,
            captured_at,
        }
    }

    /// Returns the venue id.
    #[inline]
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// Returns the best bid.
    #[inline]
    #[must_use]
    pub fn bid(&self) -> Price {
        self.bid
    }

    /// Returns the best ask.
    #[inline]
    #[must_use]
    pub fn ask(&self) -> Price {
        self.ask
    }

    /// Returns the capture instant.
    #[inline]
    #[must_use]
    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }

    /// Mid price, `(bid + ask) / 2`.
    #[must_use]
    pub fn mid(&self) -> Decimal {
        (self.bid.get() + self.ask.get()) / Decimal::TWO
    }

    /// Quoted spread, `ask - bid`. Negative when the book is crossed.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        self.ask.get() - self.bid.get()
    }

    /// Returns true if bid exceeds ask.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        self.bid.get() > self.ask.get()
    }
}

impl fmt::Display for RawQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RawQuote({} bid={} ask={} at={})",
            self.venue_id, self.bid, self.ask, self.captured_at
        )
    }
}
