//! # REST API
//!
//! REST endpoints using axum for the routing engine.
//!
//! # Endpoints
//!
//! - `GET  /api/v1/health` - Health check
//! - `GET  /api/v1/venues` - Venue registry listing
//! - `GET  /api/v1/router/quotes` - Per-symbol venue snapshots
//! - `GET  /api/v1/router/history` - Best-venue history for a symbol
//! - `POST /api/v1/router/simulate` - Route simulation with savings
//!
//! # Usage
//!
//! ```ignore
//! use spot_router::api::rest::{AppState, create_router};
//! use std::sync::Arc;
//!
//! let router = create_router(Arc::new(AppState {
//!     router: /* ... */,
//!     simulator: /* ... */,
//!     registry: /* ... */,
//! }));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    AppState, ErrorResponse, HealthResponse, HistoryQuery, HistoryResponse, QuotesQuery,
    QuotesResponse, SimulateRequest, SimulateResponse, VenueListResponse,
};
pub use routes::create_router;
