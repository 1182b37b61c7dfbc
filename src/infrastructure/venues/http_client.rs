//! # HTTP Client Utilities
//!
//! Shared HTTP client for venue ticker adapters.
//!
//! Thin wrapper over `reqwest` that owns the venue attribution: every
//! failure comes back as a venue-tagged [`FetchError`], so adapters only
//! deal with their payload shape. The request timeout configured here is
//! the only timeout in the fetch path; the routing core above imposes
//! none of its own.

use crate::domain::value_objects::VenueId;
use crate::infrastructure::venues::error::{FetchError, FetchResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default request timeout for venue ticker calls.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

const USER_AGENT: &str = concat!("spot-router/", env!("CARGO_PKG_VERSION"));

/// Venue-tagged HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    venue_id: VenueId,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a client for one venue with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Connection`] if the underlying client cannot
    /// be constructed.
    pub fn new(venue_id: VenueId, timeout_ms: u64) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                FetchError::connection(venue_id.clone(), format!("client build failed: {}", e))
            })?;

        Ok(Self {
            client,
            venue_id,
            timeout_ms,
        })
    }

    /// Returns the venue this client is tagged with.
    #[inline]
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] / [`FetchError::Connection`] on
    /// transport failure, [`FetchError::Status`] on a non-2xx response and
    /// [`FetchError::InvalidPayload`] if the body does not deserialize.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> FetchResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> FetchResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                FetchError::invalid_payload(
                    self.venue_id.clone(),
                    format!("response body did not parse: {}", e),
                )
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &body))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(self.venue_id.clone())
        } else {
            FetchError::connection(self.venue_id.clone(), error.to_string())
        }
    }

    fn map_status_error(&self, status: StatusCode, body: &str) -> FetchError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return FetchError::rate_limited(self.venue_id.clone());
        }
        FetchError::status(self.venue_id.clone(), status.as_u16(), body.to_string())
    }
}
