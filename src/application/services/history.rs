//! # Best-Venue History
//!
//! Per-symbol ring of best-venue observations.
//!
//! Every aggregation cycle appends one [`HistoryPoint`], even when no
//! venue was comparable (the point then carries all-`None` values; the
//! gap itself is information). Rings are capped at [`HISTORY_LIMIT`]
//! points with FIFO eviction.

use crate::application::services::comparator::VenueComparison;
use crate::domain::services::pricing;
use crate::domain::value_objects::{Symbol, Timestamp, VenueId};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Maximum points retained per symbol.
pub const HISTORY_LIMIT: usize = 120;

/// Default trailing window returned with snapshots.
pub const DEFAULT_HISTORY_WINDOW: usize = 60;

/// One best-venue observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// When the observation was made.
    pub timestamp: Timestamp,
    /// Best venue id, `None` when no venue was comparable.
    pub best_venue_id: Option<VenueId>,
    /// Best venue display label.
    pub best_venue_label: Option<String>,
    /// Best effective mid price.
    pub best_effective_mid_price: Option<Decimal>,
    /// Best effective spread in basis points of the effective mid.
    pub best_effective_spread_bps: Option<Decimal>,
}

impl HistoryPoint {
    /// Builds a point from the cycle's best comparison, if any.
    #[must_use]
    pub fn from_best(best: Option<&VenueComparison>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            best_venue_id: best.map(|b| b.venue_id.clone()),
            best_venue_label: best.map(|b| b.venue_label.clone()),
            best_effective_mid_price: best.map(|b| b.effective_mid_price),
            best_effective_spread_bps: best
                .and_then(|b| pricing::spread_bps(b.effective_spread, b.effective_mid_price)),
        }
    }

    /// Returns true if no venue was comparable at this point.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        self.best_venue_id.is_none()
    }
}

/// Process-wide per-symbol history rings.
///
/// Guarded by a `parking_lot` lock; operations are short and never await.
#[derive(Debug)]
pub struct HistoryStore {
    rings: RwLock<HashMap<Symbol, VecDeque<HistoryPoint>>>,
    limit: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    /// Creates a store with the standard 120-point limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Creates a store with a custom ring limit (tests).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            rings: RwLock::new(HashMap::new()),
            limit,
        }
    }

    /// Appends a point derived from the cycle's best comparison.
    ///
    /// Evicts the oldest point once the ring exceeds its limit.
    pub fn record(&self, symbol: &Symbol, best: Option<&VenueComparison>) {
        let point = HistoryPoint::from_best(best);
        let mut rings = self.rings.write();
        let ring = rings.entry(symbol.clone()).or_default();

        ring.push_back(point);
        while ring.len() > self.limit {
            ring.pop_front();
        }
    }

    /// Returns the trailing `limit` points for a symbol, oldest first.
    #[must_use]
    pub fn tail(&self, symbol: &Symbol, limit: usize) -> Vec<HistoryPoint> {
        let rings = self.rings.read();
        let Some(ring) = rings.get(symbol) else {
            return Vec::new();
        };

        let skip = ring.len().saturating_sub(limit);
        ring.iter().skip(skip).cloned().collect()
    }

    /// Number of points currently held for a symbol.
    #[must_use]
    pub fn len(&self, symbol: &Symbol) -> usize {
        self.rings.read().get(symbol).map_or(0, VecDeque::len)
    }

    /// Returns true if no points are held for the symbol.
    #[must_use]
    pub fn is_empty(&self, symbol: &Symbol) -> bool {
        self.len(symbol) == 0
    }
}
