//! Service binary: wires the registry, catalog, cache and services
//! together and serves the REST API.

use anyhow::Context;
use spot_router::api::rest::{AppState, create_router};
use spot_router::application::services::router::RouterService;
use spot_router::application::services::simulator::RouteSimulator;
use spot_router::domain::markets::MarketCatalog;
use spot_router::domain::registry::VenueRegistry;
use spot_router::infrastructure::cache::quote_cache::QuoteCache;
use spot_router::infrastructure::settings::Settings;
use spot_router::infrastructure::venues::registry::FetcherRegistry;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environments set variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    let registry = Arc::new(VenueRegistry::builtin());
    let catalog = Arc::new(MarketCatalog::builtin());
    let fetchers = Arc::new(
        FetcherRegistry::builtin(settings.fetch_timeout_ms)
            .context("failed to build venue fetchers")?,
    );
    let cache = Arc::new(QuoteCache::new(fetchers));

    let router_service = Arc::new(RouterService::new(
        Arc::clone(&registry),
        Arc::clone(&catalog),
        cache,
    ));
    let simulator = Arc::new(RouteSimulator::new(
        Arc::clone(&router_service),
        Arc::clone(&registry),
    ));

    let app = create_router(Arc::new(AppState {
        router: router_service,
        simulator,
        registry: Arc::clone(&registry),
    }));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!(
        addr = %settings.bind_addr,
        venues = registry.len(),
        symbols = catalog.supported_symbols().len(),
        "spot-router listening"
    );

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
