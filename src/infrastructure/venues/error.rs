//! # Venue Fetch Errors
//!
//! Error types for order book fetch operations.
//!
//! Every error is tagged with the venue that produced it so the snapshot
//! aggregator can surface per-venue failures without losing attribution.
//!
//! # Examples
//!
//! ```
//! use spot_router::domain::value_objects::VenueId;
//! use spot_router::infrastructure::venues::error::FetchError;
//!
//! let error = FetchError::status(VenueId::new("kraken"), 503, "upstream down");
//! assert_eq!(error.status_code(), Some(503));
//! assert!(error.is_retryable());
//! ```

use crate::domain::value_objects::VenueId;
use thiserror::Error;

/// Error type for per-venue order book fetches.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request exceeded the configured timeout.
    #[error("{venue_id}: request timed out")]
    Timeout {
        /// Venue that timed out.
        venue_id: VenueId,
    },

    /// Network or connection failure.
    #[error("{venue_id}: connection error: {message}")]
    Connection {
        /// Venue that was unreachable.
        venue_id: VenueId,
        /// Error message.
        message: String,
    },

    /// Upstream returned a non-success HTTP status.
    #[error("{venue_id}: request failed with status {code}: {message}")]
    Status {
        /// Venue that responded.
        venue_id: VenueId,
        /// HTTP status code.
        code: u16,
        /// Response body or reason.
        message: String,
    },

    /// Upstream payload failed parsing or numeric validation.
    #[error("{venue_id}: invalid payload: {message}")]
    InvalidPayload {
        /// Venue whose payload was rejected.
        venue_id: VenueId,
        /// What failed to validate.
        message: String,
    },

    /// Upstream rate limit hit.
    #[error("{venue_id}: rate limit exceeded")]
    RateLimited {
        /// Venue that throttled us.
        venue_id: VenueId,
    },

    /// No fetch adapter registered for the venue.
    #[error("no fetcher registered for venue {venue_id}")]
    UnknownVenue {
        /// The unregistered venue id.
        venue_id: VenueId,
    },
}

impl FetchError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(venue_id: VenueId) -> Self {
        Self::Timeout { venue_id }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(venue_id: VenueId, message: impl Into<String>) -> Self {
        Self::Connection {
            venue_id,
            message: message.into(),
        }
    }

    /// Creates a non-success-status error.
    #[must_use]
    pub fn status(venue_id: VenueId, code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            venue_id,
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid payload error.
    #[must_use]
    pub fn invalid_payload(venue_id: VenueId, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            venue_id,
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(venue_id: VenueId) -> Self {
        Self::RateLimited { venue_id }
    }

    /// Creates an unknown venue error.
    #[must_use]
    pub fn unknown_venue(venue_id: VenueId) -> Self {
        Self::UnknownVenue { venue_id }
    }

    /// Returns the venue this error is tagged with.
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        match self {
            Self::Timeout { venue_id }
            | Self::Connection { venue_id, .. }
            | Self::Status { venue_id, .. }
            | Self::InvalidPayload { venue_id, .. }
            | Self::RateLimited { venue_id }
            | Self::UnknownVenue { venue_id } => venue_id,
        }
    }

    /// Returns the HTTP status code, if the upstream produced one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns true if a later attempt may succeed.
    ///
    /// Malformed payloads and unregistered venues are not retryable;
    /// network failures, throttling and 5xx responses are.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. } => true,
            Self::Status { code, .. } => *code >= 500,
            Self::InvalidPayload { .. } | Self::UnknownVenue { .. } => false,
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
