//! Routes for the dish catalog surface.

use axum::extract::State;
use axum::{Json, Router, routing::get};

use bookbridge_catalog::{Catalog, Dish};

use crate::state::AppState;

/// GET /
async fn full_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

/// GET /featured
async fn featured(State(state): State<AppState>) -> Json<Vec<Dish>> {
    Json(state.catalog.featured.clone())
}

/// Returns the router for the catalog surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(full_catalog))
        .route("/featured", get(featured))
}
