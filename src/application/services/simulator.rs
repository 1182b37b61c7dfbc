//! # Route Simulator
//!
//! Hypothetical order routing with savings versus a reference venue.
//!
//! A simulation always takes a fresh snapshot (there is no
//! simulation-specific cache), selects the economically best venue for
//! the side (cheapest effective ask for a buy, highest effective bid
//! for a sell) and, when a distinct reference venue resolves, computes
//! what routing to the best venue saves against it.

use crate::application::error::RouterResult;
use crate::application::services::comparator::VenueComparison;
use crate::application::services::router::RouterService;
use crate::domain::registry::VenueRegistry;
use crate::domain::services::pricing;
use crate::domain::value_objects::{OrderSide, Price, Symbol, Timestamp, VenueId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Input of one route simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSimulationInput {
    /// Symbol to route.
    pub symbol: Symbol,
    /// Buy or sell.
    pub side: OrderSide,
    /// Order size in base units.
    pub size: Decimal,
    /// Optional reference venue (id or display label, case-insensitive).
    #[serde(default)]
    pub reference_venue: Option<String>,
}

/// One venue's route quote within a simulation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuote {
    /// The venue.
    pub venue_id: VenueId,
    /// Venue display label.
    pub venue_label: String,
    /// The side-selected effective price (ask for buy, bid for sell).
    pub effective_price: Decimal,
    /// Raw best bid.
    pub bid: Price,
    /// Raw best ask.
    pub ask: Price,
    /// Fee-inflated bid.
    pub effective_bid: Decimal,
    /// Fee-inflated ask.
    pub effective_ask: Decimal,
    /// Effective spread.
    pub effective_spread: Decimal,
}

impl RouteQuote {
    fn from_comparison(comparison: &VenueComparison, side: OrderSide) -> Self {
        Self {
            venue_id: comparison.venue_id.clone(),
            venue_label: comparison.venue_label.clone(),
            effective_price: select_price(comparison, side),
            bid: comparison.bid,
            ask: comparison.ask,
            effective_bid: comparison.effective_bid,
            effective_ask: comparison.effective_ask,
            effective_spread: comparison.effective_spread,
        }
    }
}

/// Result of one route simulation. Constructed fresh per call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSimulationResult {
    /// Simulated symbol.
    pub symbol: Symbol,
    /// Simulated side.
    pub side: OrderSide,
    /// Requested size.
    pub size: Decimal,
    /// When the simulation ran.
    pub timestamp: Timestamp,
    /// Best route, absent when no venue was comparable.
    pub best_route: Option<RouteQuote>,
    /// Reference route, absent when unresolvable or not quoting.
    pub reference_route: Option<RouteQuote>,
    /// Savings in quote currency; `None` means not computable, not zero.
    pub savings_usd: Option<Decimal>,
    /// Savings in basis points of the reference price.
    pub savings_bps: Option<Decimal>,
    /// The full ranked comparison list behind the simulation.
    pub quotes: Vec<VenueComparison>,
}

/// Simulates order routing over fresh snapshots.
#[derive(Debug)]
pub struct RouteSimulator {
    router: Arc<RouterService>,
    registry: Arc<VenueRegistry>,
}

impl RouteSimulator {
    /// Creates a simulator over the shared router service and registry.
    #[must_use]
    pub fn new(router: Arc<RouterService>, registry: Arc<VenueRegistry>) -> Self {
        Self { router, registry }
    }

    /// Runs one route simulation.
    ///
    /// An empty comparable-venue set is a valid no-liquidity outcome:
    /// `best_route` and both savings fields come back `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::application::error::RouterError::UnsupportedSymbol`]
    /// for a symbol outside the catalog.
    pub async fn simulate(
        &self,
        input: RouteSimulationInput,
    ) -> RouterResult<RouteSimulationResult> {
        let snapshot = self.router.get_symbol_snapshot(&input.symbol).await?;
        let quotes = snapshot.comparisons;

        let best = best_for_side(&quotes, input.side);
        let best_route = best.map(|c| RouteQuote::from_comparison(c, input.side));

        let reference = input
            .reference_venue
            .as_deref()
            .and_then(|raw| self.registry.resolve_reference(raw))
            .and_then(|venue| quotes.iter().find(|c| &c.venue_id == venue.id()));
        let reference_route = reference.map(|c| RouteQuote::from_comparison(c, input.side));

        let (savings_usd, savings_bps) =
            savings(best_route.as_ref(), reference_route.as_ref(), &input);

        Ok(RouteSimulationResult {
            symbol: input.symbol,
            side: input.side,
            size: input.size,
            timestamp: Timestamp::now(),
            best_route,
            reference_route,
            savings_usd,
            savings_bps,
            quotes,
        })
    }
}

fn select_price(comparison: &VenueComparison, side: OrderSide) -> Decimal {
    match side {
        OrderSide::Buy => comparison.effective_ask,
        OrderSide::Sell => comparison.effective_bid,
    }
}

/// Best comparison for the side: cheapest acquisition for a buy,
/// highest proceeds for a sell. First-seen wins ties.
fn best_for_side(quotes: &[VenueComparison], side: OrderSide) -> Option<&VenueComparison> {
    quotes.iter().reduce(|best, candidate| {
        let better = match side {
            OrderSide::Buy => select_price(candidate, side) < select_price(best, side),
            OrderSide::Sell => select_price(candidate, side) > select_price(best, side),
        };
        if better { candidate } else { best }
    })
}

/// Savings versus the reference, computable only when best and reference
/// exist and name different venues.
fn savings(
    best: Option<&RouteQuote>,
    reference: Option<&RouteQuote>,
    input: &RouteSimulationInput,
) -> (Option<Decimal>, Option<Decimal>) {
    let (Some(best), Some(reference)) = (best, reference) else {
        return (None, None);
    };
    if best.venue_id == reference.venue_id {
        return (None, None);
    }

    let diff = match input.side {
        OrderSide::Buy => reference.effective_price - best.effective_price,
        OrderSide::Sell => best.effective_price - reference.effective_price,
    };

    (
        Some(diff * input.size),
        pricing::diff_bps(diff, reference.effective_price),
    )
}
