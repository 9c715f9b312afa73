//! Routes for the cart ledger surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bookbridge_cart::{CartLineItem, CartTotals, QuantityAction};
use bookbridge_core::product::ProductId;

use crate::error::ApiError;
use crate::state::AppState;

/// Full cart rendering payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Ledger lines in insertion order.
    pub items: Vec<CartLineItem>,
    /// Derived totals.
    pub totals: CartTotals,
    /// The "empty cart" display state.
    pub empty: bool,
}

/// Request body for PATCH /items/{product_id}.
#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    /// Which quantity control was pressed.
    pub action: QuantityAction,
}

/// Response body for quantity adjustments.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityResponse {
    /// The adjusted line's product id.
    pub product_id: ProductId,
    /// The line quantity after the adjustment.
    pub quantity: u32,
}

/// Response body for POST /update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Confirmation message shown to the user.
    pub message: String,
}

/// GET /
async fn view_cart(State(state): State<AppState>) -> Json<CartView> {
    let ledger = state.ledger.read().await;
    Json(CartView {
        items: ledger.lines().to_vec(),
        totals: ledger.totals(),
        empty: ledger.is_empty(),
    })
}

/// PATCH /items/{product_id}
#[instrument(skip(state, request))]
async fn adjust_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<AdjustQuantityRequest>,
) -> Result<Json<AdjustQuantityResponse>, ApiError> {
    let product_id = ProductId::from(product_id);
    let mut ledger = state.ledger.write().await;
    let quantity = ledger.update_quantity(&product_id, request.action)?;
    Ok(Json(AdjustQuantityResponse {
        product_id,
        quantity,
    }))
}

/// DELETE /items/{product_id}
#[instrument(skip(state))]
async fn remove_item(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartLineItem>, ApiError> {
    let product_id = ProductId::from(product_id);
    let mut ledger = state.ledger.write().await;
    let removed = ledger.remove_item(&product_id)?;
    Ok(Json(removed))
}

/// DELETE /
async fn clear_cart(State(state): State<AppState>) -> StatusCode {
    state.ledger.write().await.clear();
    StatusCode::NO_CONTENT
}

/// POST /update
///
/// The ledger recomputes totals on every read, so this endpoint only
/// confirms the refresh the way the cart page's update button does.
async fn update_cart() -> Json<UpdateResponse> {
    Json(UpdateResponse {
        message: "Cart updated successfully!".to_string(),
    })
}

/// Returns the router for the cart surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route("/update", post(update_cart))
        .route("/items/{product_id}", patch(adjust_quantity).delete(remove_item))
}
