//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use tower::ServiceExt;

use bookbridge_booking::application::service::BookingService;
use bookbridge_cart::CartLedger;
use bookbridge_catalog::Catalog;
use bookbridge_core::clock::Clock;
use bookbridge_sync::{CartMaterializer, readiness};
use bookbridge_test_support::{FixedClock, InMemoryStateStore};

use bookbridge_api::routes;
use bookbridge_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over an in-memory store and deterministic
/// clock. Uses the same route structure as `main.rs`. The router is cheap
/// to clone and all clones share the same state.
pub async fn build_test_app() -> Router {
    let store = Arc::new(InMemoryStateStore::new());
    let service = Arc::new(BookingService::new(store, fixed_clock()));
    service.init().await;

    let ledger = Arc::new(RwLock::new(CartLedger::new()));
    let (signal, ready) = readiness();
    signal.set_ready();
    let materializer = Arc::new(CartMaterializer::new(
        Arc::clone(&service),
        Arc::clone(&ledger),
        ready,
    ));

    let app_state = AppState::new(service, ledger, materializer, Arc::new(Catalog::builtin()));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .nest("/api/v1/bookings", routes::bookings::router())
        .nest("/api/v1/cart", routes::cart::router())
        .nest("/api/v1/checkout", routes::checkout::router())
        .with_state(app_state)
}

/// Send a request with a JSON body and return the status and parsed body.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a bodyless request (POST/DELETE) and return only the status. Used
/// for endpoints that answer 204 No Content.
pub async fn send_empty(app: Router, method: &str, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}
