//! # REST Routes
//!
//! Route table and middleware stack for the REST surface.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the axum router over the shared application state.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/venues", get(handlers::list_venues))
        .route("/api/v1/router/quotes", get(handlers::get_quotes))
        .route("/api/v1/router/history", get(handlers::get_history))
        .route("/api/v1/router/simulate", post(handlers::simulate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::router::RouterService;
    use crate::application::services::simulator::RouteSimulator;
    use crate::domain::entities::quote::RawQuote;
    use crate::domain::entities::venue::{FeeSchedule, Venue};
    use crate::domain::markets::{MarketCatalog, VenueSymbol};
    use crate::domain::registry::VenueRegistry;
    use crate::domain::value_objects::{Price, Symbol, Timestamp, VenueId};
    use crate::infrastructure::cache::quote_cache::QuoteCache;
    use crate::infrastructure::venues::error::FetchResult;
    use crate::infrastructure::venues::registry::FetcherRegistry;
    use crate::infrastructure::venues::traits::OrderBookFetcher;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::collections::HashMap;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct StaticFetcher {
        venue_id: VenueId,
        bid: f64,
        ask: f64,
    }

    #[async_trait]
    impl OrderBookFetcher for StaticFetcher {
        fn venue_id(&self) -> &VenueId {
            &self.venue_id
        }

        async fn fetch_order_book(&self, _venue_symbol: &str) -> FetchResult<RawQuote> {
            Ok(RawQuote::new(
                self.venue_id.clone(),
                Price::new(self.bid).unwrap(),
                Price::new(self.ask).unwrap(),
                Timestamp::now(),
            ))
        }
    }

    fn test_app() -> Router {
        let registry = Arc::new(VenueRegistry::new([
            Venue::new(VenueId::new("alpha"), "Alpha", FeeSchedule::from_bps(0, 0)),
            Venue::new(VenueId::new("beta"), "Beta", FeeSchedule::from_bps(0, 0)),
        ]));

        let symbol = Symbol::new("BTC/USDT").unwrap();
        let mut mappings = HashMap::new();
        mappings.insert(
            symbol,
            vec![
                VenueSymbol::new(VenueId::new("alpha"), "BTCUSDT"),
                VenueSymbol::new(VenueId::new("beta"), "BTCUSDT"),
            ],
        );
        let catalog = Arc::new(MarketCatalog::new(mappings));

        let fetchers = FetcherRegistry::new()
            .with_fetcher(Arc::new(StaticFetcher {
                venue_id: VenueId::new("alpha"),
                bid: 100.00,
                ask: 100.10,
            }))
            .with_fetcher(Arc::new(StaticFetcher {
                venue_id: VenueId::new("beta"),
                bid: 100.00,
                ask: 100.05,
            }));
        let cache = Arc::new(QuoteCache::with_ttl(Arc::new(fetchers), Duration::ZERO));

        let router = Arc::new(RouterService::new(
            Arc::clone(&registry),
            catalog,
            cache,
        ));
        let simulator = Arc::new(RouteSimulator::new(
            Arc::clone(&router),
            Arc::clone(&registry),
        ));

        create_router(Arc::new(AppState {
            router,
            simulator,
            registry,
        }))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn venues_endpoint_lists_registry() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/venues")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["venues"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn quotes_endpoint_returns_snapshot() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/router/quotes?symbols=BTC/USDT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let snapshot = &json["symbols"][0];
        assert_eq!(snapshot["symbol"], "BTC/USDT");
        assert_eq!(snapshot["venues"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["bestVenue"]["venueId"], "beta");
    }

    #[tokio::test]
    async fn simulate_happy_path() {
        let body = serde_json::json!({
            "symbol": "btc/usdt",
            "side": "buy",
            "size": 10.0,
            "referenceVenue": "Alpha"
        });

        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/router/simulate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"]["bestRoute"]["venueId"], "beta");
        assert_eq!(json["result"]["savingsUsd"], "0.50");
    }

    #[tokio::test]
    async fn simulate_rejects_bad_inputs() {
        let cases = [
            serde_json::json!({"symbol": "DOGE/USDT", "side": "buy", "size": 1.0}),
            serde_json::json!({"symbol": "BTC/USDT", "side": "hold", "size": 1.0}),
            serde_json::json!({"symbol": "BTC/USDT", "side": "buy", "size": 0.0}),
            serde_json::json!({"symbol": "BTC/USDT", "side": "buy", "size": -3.0}),
        ];

        for case in cases {
            let response = test_app()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/router/simulate")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(case.to_string()))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case {case}");
            let json = body_json(response).await;
            assert_eq!(json["success"], false);
        }
    }

    #[tokio::test]
    async fn history_requires_known_symbol() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/router/history?symbol=DOGE/USDT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
