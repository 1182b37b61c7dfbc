//! # Venue Comparator
//!
//! Ranks venues for one symbol by fee-adjusted mid price.
//!
//! The comparator resolves each raw quote against the venue registry,
//! silently dropping quotes from unknown or non-active venues (a filter,
//! not a failure), computes the taker-fee-adjusted view of the rest and
//! flags the single cheapest venue.
//!
//! # Invariants
//!
//! - Non-empty output has exactly one entry with `is_best = true`, the
//!   one with the minimum effective mid price (first-seen wins ties).
//! - Output is sorted ascending by effective mid price.

use crate::domain::entities::quote::RawQuote;
use crate::domain::registry::VenueRegistry;
use crate::domain::services::pricing;
use crate::domain::value_objects::{Price, Symbol, Timestamp, VenueId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-venue, per-symbol comparison record.
///
/// Recomputed fresh on every aggregation cycle and never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueComparison {
    /// Venue that produced the quote.
    pub venue_id: VenueId,
    /// Venue display label.
    pub venue_label: String,
    /// Taker fee rate applied to the effective prices.
    pub taker_fee: Decimal,
    /// Raw best bid.
    pub bid: Price,
    /// Raw best ask.
    pub ask: Price,
    /// Raw mid price.
    pub mid_price: Decimal,
    /// Fee-inflated bid.
    pub effective_bid: Decimal,
    /// Fee-inflated ask.
    pub effective_ask: Decimal,
    /// Fee-inflated mid price; the ranking key.
    pub effective_mid_price: Decimal,
    /// Raw spread, `ask - bid`.
    pub spread: Decimal,
    /// Effective spread, unclamped.
    pub effective_spread: Decimal,
    /// When the underlying quote was captured.
    pub captured_at: Timestamp,
    /// True for the single cheapest venue of the set.
    pub is_best: bool,
}

/// Ranks raw venue quotes by effective execution price.
#[derive(Debug, Clone)]
pub struct VenueComparator {
    registry: Arc<VenueRegistry>,
}

impl VenueComparator {
    /// Creates a comparator over the given registry.
    #[must_use]
    pub fn new(registry: Arc<VenueRegistry>) -> Self {
        Self { registry }
    }

    /// Compares venues for one symbol.
    ///
    /// Quotes whose venue is unknown or not active are dropped without
    /// error. Zero or one surviving quote runs the same path; a single
    /// venue is trivially best.
    #[must_use]
    pub fn compare(&self, symbol: &Symbol, quotes: &[RawQuote]) -> Vec<VenueComparison> {
        let mut comparisons: Vec<VenueComparison> = quotes
            .iter()
            .filter_map(|quote| {
                let venue = self.registry.get_by_id(quote.venue_id())?;
                if !venue.is_active() {
                    return None;
                }

                let adjusted = pricing::effective_quote(venue, quote);
                Some(VenueComparison {
                    venue_id: venue.id().clone(),
                    venue_label: venue.name().to_string(),
                    taker_fee: venue.fees().taker(),
                    bid: quote.bid(),
                    ask: quote.ask(),
                    mid_price: quote.mid(),
                    effective_bid: adjusted.effective_bid,
                    effective_ask: adjusted.effective_ask,
                    effective_mid_price: adjusted.effective_mid,
                    spread: quote.spread(),
                    effective_spread: adjusted.effective_spread,
                    captured_at: quote.captured_at(),
                    is_best: false,
                })
            })
            .collect();

        if let Some(best_index) = index_of_min_effective_mid(&comparisons) {
            if let Some(best) = comparisons.get_mut(best_index) {
                best.is_best = true;
            }
        }

        // Stable sort keeps the flagged entry first among equal mids.
        comparisons.sort_by(|a, b| a.effective_mid_price.cmp(&b.effective_mid_price));

        tracing::debug!(
            %symbol,
            input = quotes.len(),
            ranked = comparisons.len(),
            "venue comparison computed"
        );

        comparisons
    }
}

/// First index holding the minimum effective mid price.
fn index_of_min_effective_mid(comparisons: &[VenueComparison]) -> Option<usize> {
    let mut best: Option<(usize, Decimal)> = None;
    for (index, comparison) in comparisons.iter().enumerate() {
        match best {
            // Strict comparison keeps the first-seen entry on ties.
            Some((_, min)) if comparison.effective_mid_price >= min => {}
            _ => best = Some((index, comparison.effective_mid_price)),
        }
    }
    best.map(|(index, _)| index)
}
