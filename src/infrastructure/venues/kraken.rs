//! # Kraken Ticker Adapter
//!
//! Fetches top of book from Kraken's public `Ticker` endpoint.
//!
//! Kraken responds with a `result` map keyed by its own pair spelling
//! (which may differ from the requested one, e.g. `XBTUSDT`), with best
//! ask in `a[0]` and best bid in `b[0]` as strings.

use crate::domain::entities::quote::RawQuote;
use crate::domain::value_objects::{Timestamp, VenueId};
use crate::infrastructure::venues::error::{FetchError, FetchResult};
use crate::infrastructure::venues::http_client::HttpClient;
use crate::infrastructure::venues::traits::OrderBookFetcher;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

const DEFAULT_BASE_URL: &str = "https://api.kraken.com";

#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: HashMap<String, TickerEntry>,
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    /// Ask array: `[price, whole lot volume, lot volume]`.
    a: Vec<String>,
    /// Bid array, same layout.
    b: Vec<String>,
}

/// Order book fetcher for Kraken.
#[derive(Debug, Clone)]
pub struct KrakenFetcher {
    http: HttpClient,
    base_url: String,
}

impl KrakenFetcher {
    /// Creates a fetcher against the public Kraken API.
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
            http: HttpClient::new(VenueId::new("kraken"), timeout_ms)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl OrderBookFetcher for KrakenFetcher {
    fn venue_id(&self) -> &VenueId {
        self.http.venue_id()
    }

    async fn fetch_order_book(&self, venue_symbol: &str) -> FetchResult<RawQuote> {
        let url = format!("{}/0/public/Ticker", self.base_url);
        let response: TickerResponse = self
            .http
            .get_with_params(&url, &[("pair", venue_symbol)])
            .await?;

        if !response.error.is_empty() {
            return Err(FetchError::invalid_payload(
                self.venue_id().clone(),
                response.error.join(", "),
            ));
        }

        let entry = response.result.into_values().next().ok_or_else(|| {
            FetchError::invalid_payload(
                self.venue_id().clone(),
                format!("no ticker entry for {}", venue_symbol),
            )
        })?;

        let bid = parse_level(&entry.b, "bid", self.venue_id())?;
        let ask = parse_level(&entry.a, "ask", self.venue_id())?;

        Ok(RawQuote::new(
            self.venue_id().clone(),
            bid,
            ask,
            Timestamp::now(),
        ))
    }
}

fn parse_level(
    level: &[String],
    side: &str,
    venue_id: &VenueId,
) -> FetchResult<crate::domain::value_objects::Price> {
    let raw = level.first().ok_or_else(|| {
        FetchError::invalid_payload(venue_id.clone(), format!("missing {} level", side))
    })?;

    crate::domain::value_objects::Price::parse(raw)
        .map_err(|e| FetchError::invalid_payload(venue_id.clone(), format!("{}: {}", side, e)))
}
