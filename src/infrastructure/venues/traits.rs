//! # Order Book Fetcher Trait
//!
//! Port definition for per-venue ticker integrations.
//!
//! Every exchange adapter implements [`OrderBookFetcher`]: given the
//! venue-native symbol string, return a validated top-of-book
//! [`RawQuote`] or a venue-tagged [`FetchError`]. Adapters own payload
//! parsing and numeric validation (bid/ask finite and strictly positive);
//! the layers above never see venue-specific shapes.
//!
//! # Examples
//!
//! ```ignore
//! use spot_router::infrastructure::venues::traits::OrderBookFetcher;
//!
//! struct MyFetcher { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl OrderBookFetcher for MyFetcher {
//!     // ... implement venue_id() and fetch_order_book()
//! }
//! ```

use crate::domain::entities::quote::RawQuote;
use crate::domain::value_objects::VenueId;
use crate::infrastructure::venues::error::FetchResult;
use async_trait::async_trait;
use std::fmt;

/// Uniform contract for fetching one venue's top of book.
#[async_trait]
pub trait OrderBookFetcher: Send + Sync + fmt::Debug {
    /// The venue this fetcher serves.
    fn venue_id(&self) -> &VenueId;

    /// Fetches the current top of book for a venue-native symbol.
    ///
    /// # Errors
    ///
    /// Returns a venue-tagged [`crate::infrastructure::venues::error::FetchError`]
    /// when the upstream is unreachable, responds with a non-success
    /// status, or returns a payload that fails numeric validation.
    async fn fetch_order_book(&self, venue_symbol: &str) -> FetchResult<RawQuote>;
}
