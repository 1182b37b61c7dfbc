//! # Caching
//!
//! In-process quote caching in front of the venue fetch adapters.

pub mod quote_cache;

pub use quote_cache::{CACHE_TTL, CacheStats, QuoteCache};
