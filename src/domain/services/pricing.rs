//! # Fee-Adjusted Pricing
//!
//! Turns raw venue quotes into effective execution prices.
//!
//! The effective price inflates the raw price by the venue's trading fee:
//! `raw * (1 + rate)`. Comparison and routing always assume aggressive
//! execution and therefore always use the taker rate; the maker path
//! exists for fee reporting but never drives venue selection.
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use spot_router::domain::entities::venue::{FeeSchedule, Venue};
//! use spot_router::domain::services::pricing;
//! use spot_router::domain::value_objects::{Price, VenueId};
//!
//! let venue = Venue::new(VenueId::new("okx"), "OKX", FeeSchedule::from_bps(8, 10));
//! let effective = pricing::effective_price(Price::new(100.0).unwrap(), &venue, false);
//!
//! assert_eq!(effective, Decimal::new(1001, 1)); // 100 * 1.001
//! ```

use crate::domain::entities::quote::RawQuote;
use crate::domain::entities::venue::Venue;
use crate::domain::value_objects::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Basis points per unit: 1.0 == 10_000 bps.
const BPS_SCALE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Fee-inflated view of one raw quote.
///
/// The effective spread is not clamped; with a crossed or malformed book
/// it is simply negative. Callers that need validity filter upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAdjustedQuote {
    /// Bid inflated by the applied fee rate.
    pub effective_bid: Decimal,
    /// Ask inflated by the applied fee rate.
    pub effective_ask: Decimal,
    /// Midpoint of the effective bid/ask.
    pub effective_mid: Decimal,
    /// `effective_ask - effective_bid`.
    pub effective_spread: Decimal,
}

/// Computes the effective price for one raw price at one venue.
///
/// `is_maker` selects the fee rate; the routing path always passes
/// `false` (taker).
#[must_use]
pub fn effective_price(raw: Price, venue: &Venue, is_maker: bool) -> Decimal {
    raw.get() * (Decimal::ONE + venue.fees().rate(is_maker))
}

/// Computes the taker-fee-adjusted view of a raw quote.
#[must_use]
pub fn effective_quote(venue: &Venue, quote: &RawQuote) -> FeeAdjustedQuote {
    let effective_bid = effective_price(quote.bid(), venue, false);
    let effective_ask = effective_price(quote.ask(), venue, false);

    FeeAdjustedQuote {
        effective_bid,
        effective_ask,
        effective_mid: (effective_bid + effective_ask) / Decimal::TWO,
        effective_spread: effective_ask - effective_bid,
    }
}

/// Expresses a spread as basis points of a mid price.
///
/// Returns `None` unless `mid` is strictly positive; a bps figure against
/// a zero or negative mid is not computable.
#[must_use]
pub fn spread_bps(spread: Decimal, mid: Decimal) -> Option<Decimal> {
    (mid > Decimal::ZERO).then(|| spread / mid * BPS_SCALE)
}

/// Expresses a price difference as basis points of a reference price.
///
/// Returns `None` unless the reference is strictly positive.
#[must_use]
pub fn diff_bps(diff: Decimal, reference: Decimal) -> Option<Decimal> {
    (reference > Decimal::ZERO).then(|| diff / reference * BPS_SCALE)
}
