//! # Gate.io Ticker Adapter
//!
//! Fetches top of book from Gate.io's public spot tickers endpoint.
//!
//! Gate.io returns a JSON array (one element when filtered by
//! `currency_pair`) with `highest_bid` / `lowest_ask` as strings.

use crate::domain::entities::quote::RawQuote;
use crate::domain::value_objects::{Price, Timestamp, VenueId};
use crate::infrastructure::venues::error::{FetchError, FetchResult};
use crate::infrastructure::venues::http_client::HttpClient;
use crate::infrastructure::venues::traits::OrderBookFetcher;
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.gateio.ws";

#[derive(Debug, Deserialize)]
struct TickerEntry {
    highest_bid: String,
    lowest_ask: String,
}

/// Order book fetcher for Gate.io.
#[derive(Debug, Clone)]
pub struct GateioFetcher {
    http: HttpClient,
    base_url: String,
}

impl GateioFetcher {
    /// Creates a fetcher against the public Gate.io API.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the HTTP client cannot be built.
    pub fn new(timeout_ms: u64) -> FetchResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_ms)
    }

    /// Creates a fetcher against an alternate base URL (tests).
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>, timeout_ms: u64) -> FetchResult<Self> {
        Ok(Self {
            http: HttpClient::new(VenueId::new("gateio"), timeout_ms)?,
            base_url: base_url.into(),
        })
    }

    fn parse_price(&self, raw: &str, side: &str) -> FetchResult<Price> {
        Price::parse(raw).map_err(|e| {
            FetchError::invalid_payload(self.venue_id().clone(), format!("{}: {}", side, e))
        })
    }
}

#[async_trait]
impl OrderBookFetcher for GateioFetcher {
    fn venue_id(&self) -> &VenueId {
        self.http.venue_id()
    }

    async fn fetch_order_book(&self, venue_symbol: &str) -> FetchResult<RawQuote> {
        // Accept either the canonical or already-underscored spelling.
        let pair = if venue_symbol.contains('_') {
            venue_symbol.to_string()
        } else {
            venue_symbol.replace('/', "_")
        };

        let url = format!("{}/api/v4/spot/tickers", self.base_url);
        let response: Vec<TickerEntry> = self
            .http
            .get_with_params(&url, &[("currency_pair", pair.as_str())])
            .await?;

        let entry = response.into_iter().next().ok_or_else(|| {
            FetchError::invalid_payload(
                self.venue_id().clone(),
                format!("no ticker entry for {}", pair),
            )
        })?;

        let bid = self.parse_price(&entry.highest_bid, "bid")?;
        let ask = self.parse_price(&entry.lowest_ask, "ask")?;

        Ok(RawQuote::new(
            self.venue_id().clone(),
            bid,
            ask,
            Timestamp::now(),
        ))
    }
}
