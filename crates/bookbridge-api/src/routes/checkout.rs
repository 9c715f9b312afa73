//! Checkout submission route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use serde::Serialize;
use tracing::{info, instrument};

use bookbridge_cart::{CartEntry, CartTotals};

use crate::error::ErrorBody;
use crate::state::AppState;

/// Successful checkout payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Snapshot of the submitted lines.
    pub items: Vec<CartEntry>,
    /// Totals at submission time.
    pub totals: CartTotals,
}

/// POST /
#[instrument(skip(state))]
async fn submit_checkout(
    State(state): State<AppState>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ErrorBody>)> {
    let ledger = state.ledger.read().await;
    if ledger.is_empty() {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorBody {
                error: "empty_cart",
                message: "Your cart is empty. Add items before checkout!".to_string(),
            }),
        ));
    }

    let response = CheckoutResponse {
        items: ledger.snapshot(),
        totals: ledger.totals(),
    };
    info!(
        lines = response.items.len(),
        total = %response.totals.total,
        "checkout submitted"
    );
    Ok(Json(response))
}

/// Returns the router for the checkout surface.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_checkout))
}
