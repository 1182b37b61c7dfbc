//! # Venue Integrations
//!
//! Fetch adapters for exchange ticker endpoints, the shared HTTP client
//! and the fetcher dispatch table.

pub mod error;
pub mod gateio;
pub mod http_client;
pub mod kraken;
pub mod okx;
pub mod registry;
pub mod traits;

pub use error::{FetchError, FetchResult};
pub use gateio::GateioFetcher;
pub use http_client::HttpClient;
pub use kraken::KrakenFetcher;
pub use okx::OkxFetcher;
pub use registry::FetcherRegistry;
pub use traits::OrderBookFetcher;
