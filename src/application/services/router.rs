//! # Router Service
//!
//! Snapshot aggregation across venues for one or more symbols.
//!
//! For each symbol the service issues one cache-backed fetch per mapped
//! venue concurrently and joins them fail-soft: every fetch settles
//! before the snapshot resolves, and a venue's failure becomes a
//! per-venue error record rather than aborting its siblings. Successful
//! quotes feed the comparator, and each cycle appends one point to the
//! symbol's history ring.

use crate::application::error::{RouterError, RouterResult};
use crate::application::services::comparator::{VenueComparator, VenueComparison};
use crate::application::services::history::{DEFAULT_HISTORY_WINDOW, HistoryPoint, HistoryStore};
use crate::domain::markets::{MarketCatalog, VenueSymbol};
use crate::domain::registry::VenueRegistry;
use crate::domain::value_objects::{Price, Symbol, Timestamp, VenueId};
use crate::infrastructure::cache::quote_cache::QuoteCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome marker of one venue's fetch within a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// The venue returned a valid quote.
    Ok,
    /// The fetch failed; see the record's error message.
    Error,
}

/// Per-venue entry of a snapshot, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueQuoteRecord {
    /// The venue.
    pub venue_id: VenueId,
    /// Best bid, present on success.
    pub bid: Option<Price>,
    /// Best ask, present on success.
    pub ask: Option<Price>,
    /// Capture instant, present on success.
    pub timestamp: Option<Timestamp>,
    /// Success or failure marker.
    pub status: QuoteStatus,
    /// Failure description, present on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VenueQuoteRecord {
    fn ok(quote: &crate::domain::entities::quote::RawQuote) -> Self {
        Self {
            venue_id: quote.venue_id().clone(),
            bid: Some(quote.bid()),
            ask: Some(quote.ask()),
            timestamp: Some(quote.captured_at()),
            status: QuoteStatus::Ok,
            error: None,
        }
    }

    fn error(venue_id: VenueId, message: impl Into<String>) -> Self {
        Self {
            venue_id,
            bid: None,
            ask: None,
            timestamp: None,
            status: QuoteStatus::Error,
            error: Some(message.into()),
        }
    }
}

/// Aggregated point-in-time view of one symbol across all venues.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSnapshot {
    /// The symbol.
    pub symbol: Symbol,
    /// One record per mapped venue, failed fetches included.
    pub venues: Vec<VenueQuoteRecord>,
    /// Ranked comparisons over the successful quotes.
    pub comparisons: Vec<VenueComparison>,
    /// The winning comparison, absent when nothing was comparable.
    pub best_venue: Option<VenueComparison>,
    /// Trailing best-venue history for the symbol.
    pub history: Vec<HistoryPoint>,
}

/// Orchestrates quote retrieval, comparison and history recording.
#[derive(Debug)]
pub struct RouterService {
    catalog: Arc<MarketCatalog>,
    cache: Arc<QuoteCache>,
    comparator: VenueComparator,
    history: HistoryStore,
}

impl RouterService {
    /// Creates the service over shared registry, catalog and cache.
    #[must_use]
    pub fn new(
        registry: Arc<VenueRegistry>,
        catalog: Arc<MarketCatalog>,
        cache: Arc<QuoteCache>,
    ) -> Self {
        Self {
            catalog,
            cache,
            comparator: VenueComparator::new(registry),
            history: HistoryStore::new(),
        }
    }

    /// Returns the market catalog this service routes over.
    #[must_use]
    pub fn catalog(&self) -> &MarketCatalog {
        &self.catalog
    }

    /// Aggregates a fresh snapshot for one symbol.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnsupportedSymbol`] when the symbol is not
    /// in the catalog. Venue failures never error; they surface as
    /// per-venue records.
    pub async fn get_symbol_snapshot(&self, symbol: &Symbol) -> RouterResult<SymbolSnapshot> {
        let mappings: Vec<VenueSymbol> = self
            .catalog
            .venue_symbols(symbol)
            .ok_or_else(|| RouterError::unsupported_symbol(symbol.as_str()))?
            .to_vec();

        let mut tasks = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let cache = Arc::clone(&self.cache);
            let venue_id = mapping.venue_id.clone();
            let native = mapping.native.clone();

            tasks.push(tokio::spawn(async move {
                let result = cache.get_or_fetch(&venue_id, &native).await;
                (venue_id, result)
            }));
        }

        // Settle all fetches; no venue aborts its siblings.
        let mut venues = Vec::with_capacity(mappings.len());
        let mut ok_quotes = Vec::new();

        for (task, mapping) in tasks.into_iter().zip(&mappings) {
            match task.await {
                Ok((_, Ok(quote))) => {
                    venues.push(VenueQuoteRecord::ok(&quote));
                    ok_quotes.push(quote);
                }
                Ok((venue_id, Err(error))) => {
                    tracing::warn!(%symbol, venue = %venue_id, %error, "venue fetch failed");
                    venues.push(VenueQuoteRecord::error(venue_id, error.to_string()));
                }
                Err(join_error) => {
                    tracing::warn!(%symbol, venue = %mapping.venue_id, %join_error, "fetch task failed");
                    venues.push(VenueQuoteRecord::error(
                        mapping.venue_id.clone(),
                        format!("fetch task failed: {}", join_error),
                    ));
                }
            }
        }

        let comparisons = self.comparator.compare(symbol, &ok_quotes);
        let best_venue = comparisons.iter().find(|c| c.is_best).cloned();

        self.history.record(symbol, best_venue.as_ref());

        Ok(SymbolSnapshot {
            symbol: symbol.clone(),
            venues,
            comparisons,
            best_venue,
            history: self.history.tail(symbol, DEFAULT_HISTORY_WINDOW),
        })
    }

    /// Aggregates snapshots for several symbols concurrently.
    ///
    /// Symbols are independent: one symbol's failure (an unsupported
    /// symbol is the only one possible) does not affect the others.
    pub async fn get_symbol_snapshots(
        &self,
        symbols: &[Symbol],
    ) -> Vec<RouterResult<SymbolSnapshot>> {
        futures::future::join_all(symbols.iter().map(|s| self.get_symbol_snapshot(s))).await
    }

    /// Returns the trailing `limit` history points for a symbol.
    #[must_use]
    pub fn get_router_history(&self, symbol: &Symbol, limit: usize) -> Vec<HistoryPoint> {
        self.history.tail(symbol, limit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::quote::RawQuote;
    use crate::domain::entities::venue::{FeeSchedule, Venue};
    use crate::domain::markets::VenueSymbol;
    use crate::infrastructure::venues::error::{FetchError, FetchResult};
    use crate::infrastructure::venues::registry::FetcherRegistry;
    use crate::infrastructure::venues::traits::OrderBookFetcher;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Debug)]
    struct ScriptedFetcher {
        venue_id: VenueId,
        bid: Option<f64>, // None -> fail
        ask: f64,
    }

    #[async_trait]
    impl OrderBookFetcher for ScriptedFetcher {
        fn venue_id(&self) -> &VenueId {
            &self.venue_id
        }

        async fn fetch_order_book(&self, _venue_symbol: &str) -> FetchResult<RawQuote> {
            match self.bid {
                Some(bid) => Ok(RawQuote::new(
                    self.venue_id.clone(),
                    Price::new(bid).map_err(|e| {
                        FetchError::invalid_payload(self.venue_id.clone(), e.to_string())
                    })?,
                    Price::new(self.ask).map_err(|e| {
                        FetchError::invalid_payload(self.venue_id.clone(), e.to_string())
                    })?,
                    Timestamp::now(),
                )),
                None => Err(FetchError::status(self.venue_id.clone(), 503, "down")),
            }
        }
    }

    fn symbol() -> Symbol {
        Symbol::new("BTC/USDT").unwrap()
    }

    fn build_service(fetchers: Vec<ScriptedFetcher>) -> RouterService {
        let registry = Arc::new(VenueRegistry::new([
            Venue::new(VenueId::new("alpha"), "Alpha", FeeSchedule::from_bps(0, 10)),
            Venue::new(VenueId::new("beta"), "Beta", FeeSchedule::from_bps(0, 10)),
            Venue::new(VenueId::new("gamma"), "Gamma", FeeSchedule::from_bps(0, 10)),
        ]));

        let mut mappings = HashMap::new();
        mappings.insert(
            symbol(),
            fetchers
                .iter()
                .map(|f| VenueSymbol::new(f.venue_id.clone(), "BTCUSDT"))
                .collect(),
        );
        let catalog = Arc::new(MarketCatalog::new(mappings));

        let mut fetcher_registry = FetcherRegistry::new();
        for fetcher in fetchers {
            fetcher_registry = fetcher_registry.with_fetcher(Arc::new(fetcher));
        }
        // Zero TTL so repeated snapshot tests always refetch.
        let cache = Arc::new(QuoteCache::with_ttl(
            Arc::new(fetcher_registry),
            Duration::ZERO,
        ));

        RouterService::new(registry, catalog, cache)
    }

    fn fetcher(venue: &str, bid: Option<f64>, ask: f64) -> ScriptedFetcher {
        ScriptedFetcher {
            venue_id: VenueId::new(venue),
            bid,
            ask,
        }
    }

    #[tokio::test]
    async fn snapshot_aggregates_all_venues() {
        let service = build_service(vec![
            fetcher("alpha", Some(100.0), 102.0),
            fetcher("beta", Some(99.0), 101.0),
        ]);

        let snapshot = service.get_symbol_snapshot(&symbol()).await.unwrap();

        assert_eq!(snapshot.venues.len(), 2);
        assert_eq!(snapshot.comparisons.len(), 2);
        assert_eq!(
            snapshot
                .best_venue
                .as_ref()
                .map(|b| b.venue_id.as_str()),
            Some("beta")
        );
        assert_eq!(snapshot.history.len(), 1);
    }

    #[tokio::test]
    async fn one_venue_failure_is_fail_soft() {
        let service = build_service(vec![
            fetcher("alpha", Some(100.0), 102.0),
            fetcher("beta", None, 0.0), // fails with 503
            fetcher("gamma", Some(98.0), 100.0),
        ]);

        let snapshot = service.get_symbol_snapshot(&symbol()).await.unwrap();

        // All venues present for observability, one marked error.
        assert_eq!(snapshot.venues.len(), 3);
        let failed: Vec<_> = snapshot
            .venues
            .iter()
            .filter(|v| v.status == QuoteStatus::Error)
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].venue_id.as_str(), "beta");
        assert!(failed[0].error.as_ref().unwrap().contains("503"));
        assert!(failed[0].bid.is_none());

        // Comparisons only over successful quotes.
        assert_eq!(snapshot.comparisons.len(), 2);
        assert!(snapshot.best_venue.is_some());
    }

    #[tokio::test]
    async fn all_venues_down_yields_no_liquidity_not_error() {
        let service = build_service(vec![
            fetcher("alpha", None, 0.0),
            fetcher("beta", None, 0.0),
        ]);

        let snapshot = service.get_symbol_snapshot(&symbol()).await.unwrap();

        assert_eq!(snapshot.venues.len(), 2);
        assert!(snapshot.comparisons.is_empty());
        assert!(snapshot.best_venue.is_none());
        // A gap point is still recorded.
        assert_eq!(snapshot.history.len(), 1);
        assert!(snapshot.history[0].is_gap());
    }

    #[tokio::test]
    async fn unsupported_symbol_is_typed_error() {
        let service = build_service(vec![fetcher("alpha", Some(100.0), 102.0)]);
        let unsupported = Symbol::new("DOGE/USDT").unwrap();

        let result = service.get_symbol_snapshot(&unsupported).await;
        assert!(matches!(
            result,
            Err(RouterError::UnsupportedSymbol { .. })
        ));
    }

    #[tokio::test]
    async fn history_accumulates_across_snapshots() {
        let service = build_service(vec![fetcher("alpha", Some(100.0), 102.0)]);

        for _ in 0..5 {
            service.get_symbol_snapshot(&symbol()).await.unwrap();
        }

        assert_eq!(service.get_router_history(&symbol(), 60).len(), 5);
        assert_eq!(service.get_router_history(&symbol(), 3).len(), 3);
    }

    #[tokio::test]
    async fn multi_symbol_fanout_is_independent() {
        let service = build_service(vec![fetcher("alpha", Some(100.0), 102.0)]);
        let supported = symbol();
        let unsupported = Symbol::new("DOGE/USDT").unwrap();

        let results = service
            .get_symbol_snapshots(&[supported, unsupported])
            .await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
