//! BookBridge API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bookbridge_booking::application::service::BookingService;
use bookbridge_cart::CartLedger;
use bookbridge_catalog::Catalog;
use bookbridge_core::clock::SystemClock;
use bookbridge_store::{CachedStore, JsonFileStore};
use bookbridge_sync::{CartMaterializer, readiness};

use bookbridge_api::routes;
use bookbridge_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting BookBridge API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let store_path = std::env::var("BOOKING_STORE_PATH")
        .unwrap_or_else(|_| "booking_state.json".to_string());

    // Build the durable layer and the service around it.
    let store = Arc::new(CachedStore::new(JsonFileStore::new(store_path)));
    let service = Arc::new(BookingService::new(store, Arc::new(SystemClock)));
    service.init().await;

    let ledger = Arc::new(RwLock::new(CartLedger::new()));
    let (ready_signal, ready) = readiness();
    let materializer = Arc::new(CartMaterializer::new(
        Arc::clone(&service),
        Arc::clone(&ledger),
        ready,
    ));

    // The service is hydrated; waiters may proceed.
    ready_signal.set_ready();

    // Boot-time materialization of bookings queued before this process.
    match materializer.run_when_ready(Duration::from_secs(5)).await {
        Ok(materialized) if materialized > 0 => {
            tracing::info!(materialized, "materialized bookings queued before startup");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "boot materialization pass failed"),
    }

    // Build application state.
    let app_state = AppState::new(
        service,
        ledger,
        materializer,
        Arc::new(Catalog::builtin()),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .nest("/api/v1/bookings", routes::bookings::router())
        .nest("/api/v1/cart", routes::cart::router())
        .nest("/api/v1/checkout", routes::checkout::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
