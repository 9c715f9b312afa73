//! BookBridge — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookbridge_core::error::BridgeError;
use serde::Serialize;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `BridgeError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub BridgeError);

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            BridgeError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "product_not_found"),
            BridgeError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            BridgeError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            BridgeError::NotReady(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_ready"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
