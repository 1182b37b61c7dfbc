//! # Quote Cache
//!
//! Short-TTL in-memory cache in front of the fetcher registry.
//!
//! Keyed by the composite `venue:venue_symbol` string; one entry per key,
//! newer fetch results overwrite older ones. A failed fetch propagates
//! its error and leaves any existing entry untouched. Expired-but-present
//! entries are not served, and failures are not negatively cached, so the
//! next call retries the network.
//!
//! The map is shared process-wide and unbounded in key count; in practice
//! it is bounded by the fixed symbol × venue universe.

use crate::domain::entities::quote::RawQuote;
use crate::domain::value_objects::VenueId;
use crate::infrastructure::venues::error::FetchResult;
use crate::infrastructure::venues::registry::FetcherRegistry;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// How long a cached quote may be reused.
pub const CACHE_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
struct CacheEntry {
    quote: RawQuote,
    stored_at: Instant,
}

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Requests served from a live entry.
    pub hits: u64,
    /// Requests that went to the network.
    pub misses: u64,
    /// Entries currently held (live or expired).
    pub entries: usize,
}

/// TTL cache over the venue fetch adapters.
#[derive(Debug)]
pub struct QuoteCache {
    fetchers: Arc<FetcherRegistry>,
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl QuoteCache {
    /// Creates a cache with the standard 5 s TTL.
    #[must_use]
    pub fn new(fetchers: Arc<FetcherRegistry>) -> Self {
        Self::with_ttl(fetchers, CACHE_TTL)
    }

    /// Creates a cache with a custom TTL (tests).
    #[must_use]
    pub fn with_ttl(fetchers: Arc<FetcherRegistry>, ttl: Duration) -> Self {
        Self {
            fetchers,
            entries: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached quote or fetches a fresh one.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's [`crate::infrastructure::venues::error::FetchError`]
    /// on a miss whose network call fails. The previous cache state is
    /// left as it was.
    pub async fn get_or_fetch(
        &self,
        venue_id: &VenueId,
        venue_symbol: &str,
    ) -> FetchResult<RawQuote> {
        let key = cache_key(venue_id, venue_symbol);

        if let Some(quote) = self.live_entry(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(venue = %venue_id, symbol = venue_symbol, "quote cache hit");
            return Ok(quote);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let quote = self.fetchers.fetch(venue_id, venue_symbol).await?;

        self.entries.insert(
            key,
            CacheEntry {
                quote: quote.clone(),
                stored_at: Instant::now(),
            },
        );

        Ok(quote)
    }

    /// Returns current hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    // Clones out of the map so no shard guard is held across an await.
    fn live_entry(&self, key: &str) -> Option<RawQuote> {
        let entry = self.entries.get(key)?;
        (entry.stored_at.elapsed() <= self.ttl).then(|| entry.quote.clone())
    }
}

fn cache_key(venue_id: &VenueId, venue_symbol: &str) -> String {
    format!("{}:{}", venue_id, venue_symbol)
}
