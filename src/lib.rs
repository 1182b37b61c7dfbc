//! # Spot Router
//!
//! Fee-adjusted smart order routing engine for spot cryptocurrency
//! exchanges.
//!
//! The engine aggregates top-of-book quotes for a small set of pairs
//! from several spot venues, normalizes them for taker fees, ranks the
//! venues by effective execution price, tracks best-venue history over
//! time and simulates hypothetical order routing with savings versus a
//! reference venue.
//!
//! ## Architecture
//!
//! - [`domain`]: venues, quotes, registry, market catalog and pure
//!   pricing/backtest math
//! - [`application`]: the comparator, snapshot aggregator, history rings
//!   and route simulator
//! - [`infrastructure`]: exchange ticker adapters, the TTL quote cache
//!   and service settings
//! - [`api`]: the REST boundary
//!
//! ## Example
//!
//! ```no_run
//! use spot_router::application::services::router::RouterService;
//! use spot_router::domain::markets::MarketCatalog;
//! use spot_router::domain::registry::VenueRegistry;
//! use spot_router::domain::value_objects::Symbol;
//! use spot_router::infrastructure::cache::quote_cache::QuoteCache;
//! use spot_router::infrastructure::venues::registry::FetcherRegistry;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(VenueRegistry::builtin());
//! let catalog = Arc::new(MarketCatalog::builtin());
//! let fetchers = Arc::new(FetcherRegistry::builtin(5000)?);
//! let cache = Arc::new(QuoteCache::new(fetchers));
//!
//! let router = RouterService::new(registry, catalog, cache);
//! let snapshot = router.get_symbol_snapshot(&Symbol::new("BTC/USDT")?).await?;
//!
//! if let Some(best) = snapshot.best_venue {
//!     println!("best venue: {} @ {}", best.venue_id, best.effective_mid_price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
