//! Domain error types.

use thiserror::Error;

use crate::product::ProductId;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A product was not found in the queue or ledger.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A durable-storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// A collaborator was not ready within its wait budget.
    #[error("not ready: {0}")]
    NotReady(String),
}
