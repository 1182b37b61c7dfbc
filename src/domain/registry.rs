//! # Venue Registry
//!
//! Static directory of exchange venues.
//!
//! The registry is constructed once at process start, shared by reference
//! into every component that needs it and never mutated afterwards. Lookup
//! failures are absences, not errors.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::registry::VenueRegistry;
//!
//! let registry = VenueRegistry::builtin();
//!
//! assert!(registry.get("KRAKEN").is_some());
//! assert!(registry.get("nyse").is_none());
//! assert_eq!(registry.active_venues().len(), 3);
//! ```

use crate::domain::entities::venue::{FeeSchedule, Venue};
use crate::domain::value_objects::{Symbol, SymbolError, VenueId};
use std::collections::HashMap;

/// Immutable directory of known exchange venues.
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    venues: HashMap<VenueId, Venue>,
}

impl VenueRegistry {
    /// Builds a registry from a venue list.
    ///
    /// Later entries with a duplicate id replace earlier ones.
    #[must_use]
    pub fn new(venues: impl IntoIterator<Item = Venue>) -> Self {
        Self {
            venues: venues
                .into_iter()
                .map(|venue| (venue.id().clone(), venue))
                .collect(),
        }
    }

    /// Builds the default registry of supported spot exchanges.
    ///
    /// Fee rates are the venues' public base-tier schedules.
    #[must_use]
    pub fn builtin() -> Self {
        let pairs = default_pairs();

        Self::new([
            Venue::new(
                VenueId::new("kraken"),
                "Kraken",
                FeeSchedule::from_bps(16, 26),
            )
            .with_pairs(pairs.clone()),
            Venue::new(VenueId::new("okx"), "OKX", FeeSchedule::from_bps(8, 10))
                .with_pairs(pairs.clone()),
            Venue::new(
                VenueId::new("gateio"),
                "Gate.io",
                FeeSchedule::from_bps(20, 20),
            )
            .with_pairs(pairs),
        ])
    }

    /// Looks up a venue by id, case-insensitively.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Venue> {
        self.venues.get(&VenueId::new(id))
    }

    /// Looks up a venue by its typed id.
    #[must_use]
    pub fn get_by_id(&self, id: &VenueId) -> Option<&Venue> {
        self.venues.get(id)
    }

    /// Returns all venues with active status.
    #[must_use]
    pub fn active_venues(&self) -> Vec<&Venue> {
        let mut active: Vec<&Venue> = self.venues.values().filter(|v| v.is_active()).collect();
        active.sort_by(|a, b| a.id().cmp(b.id()));
        active
    }

    /// Returns true if the venue exists and quotes the given pair.
    #[must_use]
    pub fn venue_supports_pair(&self, id: &VenueId, pair: &Symbol) -> bool {
        self.get_by_id(id).is_some_and(|v| v.supports_pair(pair))
    }

    /// Resolves a caller-supplied venue reference.
    ///
    /// Matches case-insensitively against venue ids first, then against
    /// display labels ("Gate.io" resolves as well as "gateio").
    #[must_use]
    pub fn resolve_reference(&self, input: &str) -> Option<&Venue> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(venue) = self.get(trimmed) {
            return Some(venue);
        }

        let lowered = trimmed.to_lowercase();
        self.venues
            .values()
            .find(|v| v.name().to_lowercase() == lowered)
    }

    /// Number of registered venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Returns true if the registry holds no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

fn default_pairs() -> Vec<Symbol> {
    ["BTC/USDT", "ETH/USDT", "SOL/USDT", "ADA/USDT"]
        .into_iter()
        .map(Symbol::new)
        .collect::<Result<Vec<_>, SymbolError>>()
        .unwrap_or_default()
}
