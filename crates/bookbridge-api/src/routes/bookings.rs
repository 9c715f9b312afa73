//! Routes for the booking queue surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use bookbridge_booking::application::service::BookingSummary;
use bookbridge_booking::domain::queue::BookingRequest;
use bookbridge_core::error::BridgeError;
use bookbridge_core::product::ProductId;
use bookbridge_core::store::PendingBooking;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for PUT /{product_id}.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity; zero removes the booking.
    pub quantity: u32,
}

/// Response body for quantity updates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityResponse {
    /// The updated booking's product id.
    pub product_id: ProductId,
    /// The quantity now pending (zero after removal).
    pub quantity: u32,
}

/// Response body for POST /process.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    /// Number of bookings added to the cart by this pass.
    pub materialized: usize,
}

/// POST /
#[instrument(skip(state, request), fields(name = %request.name))]
async fn add_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<PendingBooking>), ApiError> {
    let item = state.service.add_booking(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /
async fn list_bookings(State(state): State<AppState>) -> Json<Vec<PendingBooking>> {
    Json(state.service.pending_bookings().await)
}

/// GET /summary
async fn booking_summary(State(state): State<AppState>) -> Json<BookingSummary> {
    Json(state.service.booking_summary().await)
}

/// PUT /{product_id}
#[instrument(skip(state, request))]
async fn update_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<QuantityResponse>, ApiError> {
    let product_id = ProductId::from(product_id);
    let existed = state
        .service
        .update_booking_quantity(&product_id, request.quantity)
        .await?;
    if !existed {
        return Err(ApiError(BridgeError::ProductNotFound(product_id)));
    }
    Ok(Json(QuantityResponse {
        product_id,
        quantity: request.quantity,
    }))
}

/// DELETE /{product_id}
#[instrument(skip(state))]
async fn remove_booking(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let product_id = ProductId::from(product_id);
    let removed = state.service.remove_booking(&product_id).await?;
    if !removed {
        return Err(ApiError(BridgeError::ProductNotFound(product_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /
async fn clear_bookings(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.service.clear_bookings().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /process
#[instrument(skip(state))]
async fn process_bookings(
    State(state): State<AppState>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let materialized = state.materializer.run().await?;
    info!(materialized, "explicit materialization pass");
    Ok(Json(ProcessResponse { materialized }))
}

/// POST /reset
async fn reset_processed(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.service.reset_processed_flag().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the booking queue surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_booking).get(list_bookings).delete(clear_bookings))
        .route("/summary", get(booking_summary))
        .route("/process", post(process_bookings))
        .route("/reset", post(reset_processed))
        .route("/{product_id}", put(update_quantity).delete(remove_booking))
}
