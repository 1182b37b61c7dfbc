//! # REST Handlers
//!
//! Boundary layer over the routing engine.
//!
//! Input validation lives here, not in the core: unsupported symbols,
//! malformed sides and non-positive sizes are rejected with 400 before
//! the engine is invoked. Handlers wrap every payload in the
//! `{ success, ... }` envelope.

use crate::application::error::RouterError;
use crate::application::services::history::{DEFAULT_HISTORY_WINDOW, HistoryPoint};
use crate::application::services::router::{RouterService, SymbolSnapshot};
use crate::application::services::simulator::{
    RouteSimulationInput, RouteSimulationResult, RouteSimulator,
};
use crate::domain::entities::venue::Venue;
use crate::domain::registry::VenueRegistry;
use crate::domain::value_objects::{OrderSide, Symbol, Timestamp};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    /// Snapshot aggregation service.
    pub router: Arc<RouterService>,
    /// Route simulation service.
    pub simulator: Arc<RouteSimulator>,
    /// Venue directory.
    pub registry: Arc<VenueRegistry>,
}

/// Error payload, `{ success: false, error }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Human-readable error description.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error payload.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Fixed "ok" marker.
    pub status: &'static str,
    /// Server time.
    pub timestamp: Timestamp,
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Timestamp::now(),
    })
}

/// Venue listing payload.
#[derive(Debug, Clone, Serialize)]
pub struct VenueListResponse {
    /// Always true.
    pub success: bool,
    /// Active venues, sorted by id.
    pub venues: Vec<Venue>,
}

/// `GET /api/v1/venues`
pub async fn list_venues(State(state): State<Arc<AppState>>) -> Json<VenueListResponse> {
    let mut venues: Vec<Venue> = state
        .registry
        .active_venues()
        .into_iter()
        .cloned()
        .collect();
    venues.sort_by(|a, b| a.id().cmp(b.id()));

    Json(VenueListResponse {
        success: true,
        venues,
    })
}

/// Query string of the snapshot endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotesQuery {
    /// Comma-separated symbol list; absent means all supported.
    #[serde(default)]
    pub symbols: Option<String>,
}

/// Snapshot listing payload.
#[derive(Debug, Clone, Serialize)]
pub struct QuotesResponse {
    /// Always true.
    pub success: bool,
    /// Server time of the aggregation.
    pub timestamp: Timestamp,
    /// One snapshot per requested symbol.
    pub symbols: Vec<SymbolSnapshot>,
}

/// `GET /api/v1/router/quotes?symbols=BTC/USDT,ETH/USDT`
///
/// Unknown symbols in the list are filtered out; an empty or missing
/// list falls back to every supported symbol.
pub async fn get_quotes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuotesQuery>,
) -> Json<QuotesResponse> {
    let catalog = state.router.catalog();

    let mut symbols: Vec<Symbol> = query
        .symbols
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|part| catalog.resolve(part.trim()))
                .collect()
        })
        .unwrap_or_default();

    if symbols.is_empty() {
        symbols = catalog.supported_symbols();
    }

    let snapshots = state
        .router
        .get_symbol_snapshots(&symbols)
        .await
        .into_iter()
        .filter_map(Result::ok)
        .collect();

    Json(QuotesResponse {
        success: true,
        timestamp: Timestamp::now(),
        symbols: snapshots,
    })
}

/// Query string of the history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// The symbol to read history for.
    pub symbol: String,
    /// Trailing window size; defaults to 60.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// History payload.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// Always true.
    pub success: bool,
    /// The resolved symbol.
    pub symbol: Symbol,
    /// Trailing history points, oldest first.
    pub history: Vec<HistoryPoint>,
}

/// `GET /api/v1/router/history?symbol=BTC/USDT&limit=60`
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let symbol = state
        .router
        .catalog()
        .resolve(&query.symbol)
        .ok_or_else(|| bad_request("Unsupported symbol"))?;

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_WINDOW);
    let history = state.router.get_router_history(&symbol, limit);

    Ok(Json(HistoryResponse {
        success: true,
        symbol,
        history,
    }))
}

/// Body of the simulation endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// Symbol to route.
    pub symbol: String,
    /// `"buy"` or `"sell"`.
    pub side: String,
    /// Order size in base units.
    pub size: f64,
    /// Optional reference venue id or label.
    #[serde(default)]
    pub reference_venue: Option<String>,
}

/// Simulation payload.
#[derive(Debug, Clone, Serialize)]
pub struct SimulateResponse {
    /// Always true.
    pub success: bool,
    /// The simulation result.
    pub result: RouteSimulationResult,
}

/// `POST /api/v1/router/simulate`
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let symbol = state
        .router
        .catalog()
        .resolve(&request.symbol)
        .ok_or_else(|| bad_request("Unsupported symbol"))?;

    let side: OrderSide = request
        .side
        .parse()
        .map_err(|_| bad_request("Side must be \"buy\" or \"sell\""))?;

    if !request.size.is_finite() || request.size <= 0.0 {
        return Err(bad_request("Size must be a positive number"));
    }
    let size = Decimal::from_f64(request.size)
        .ok_or_else(|| bad_request("Size must be a positive number"))?;

    let result = state
        .simulator
        .simulate(RouteSimulationInput {
            symbol,
            side,
            size,
            reference_venue: request.reference_venue,
        })
        .await
        .map_err(|error| match error {
            RouterError::UnsupportedSymbol { .. } => bad_request("Unsupported symbol"),
        })?;

    Ok(Json(SimulateResponse {
        success: true,
        result,
    }))
}
