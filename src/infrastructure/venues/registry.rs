//! # Fetcher Registry
//!
//! Maps venue ids to their order book fetch adapters.
//!
//! The registry is assembled once at startup alongside the venue
//! registry; the quote cache dispatches through it on every miss.

use crate::domain::entities::quote::RawQuote;
use crate::domain::value_objects::VenueId;
use crate::infrastructure::venues::error::{FetchError, FetchResult};
use crate::infrastructure::venues::gateio::GateioFetcher;
use crate::infrastructure::venues::kraken::KrakenFetcher;
use crate::infrastructure::venues::okx::OkxFetcher;
use crate::infrastructure::venues::traits::OrderBookFetcher;
use std::collections::HashMap;
use std::sync::Arc;

/// Dispatch table from venue id to fetch adapter.
#[derive(Debug, Clone, Default)]
pub struct FetcherRegistry {
    fetchers: HashMap<VenueId, Arc<dyn OrderBookFetcher>>,
}

impl FetcherRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fetcher under its own venue id.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn OrderBookFetcher>) -> Self {
        self.fetchers.insert(fetcher.venue_id().clone(), fetcher);
        self
    }

    /// Builds the registry for all supported exchanges.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if any underlying HTTP client cannot be
    /// built.
    pub fn builtin(timeout_ms: u64) -> FetchResult<Self> {
        Ok(Self::new()
            .with_fetcher(Arc::new(KrakenFetcher::new(timeout_ms)?))
            .with_fetcher(Arc::new(OkxFetcher::new(timeout_ms)?))
            .with_fetcher(Arc::new(GateioFetcher::new(timeout_ms)?)))
    }

    /// Returns the fetcher registered for a venue.
    #[must_use]
    pub fn get(&self, venue_id: &VenueId) -> Option<Arc<dyn OrderBookFetcher>> {
        self.fetchers.get(venue_id).cloned()
    }

    /// Fetches an order book, dispatching by venue id.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::UnknownVenue`] for an unregistered venue, or
    /// whatever the adapter itself fails with.
    pub async fn fetch(&self, venue_id: &VenueId, venue_symbol: &str) -> FetchResult<RawQuote> {
        let fetcher = self
            .get(venue_id)
            .ok_or_else(|| FetchError::unknown_venue(venue_id.clone()))?;
        fetcher.fetch_order_book(venue_symbol).await
    }

    /// Number of registered fetchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    /// Returns true if no fetchers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }
}
