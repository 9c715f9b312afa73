//! The cart materializer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use bookbridge_booking::application::service::BookingService;
use bookbridge_cart::CartLedger;
use bookbridge_core::error::BridgeError;

use crate::readiness::Readiness;

/// Drives the booking queue into the shared cart ledger.
///
/// All materialization flows through `BookingService::process_bookings`,
/// which deduplicates by product id and seals the epoch with the processed
/// flag. Any number of passes (boot, explicit trigger, visibility regained)
/// converge to the same ledger state as one successful pass.
pub struct CartMaterializer {
    service: Arc<BookingService>,
    ledger: Arc<RwLock<CartLedger>>,
    readiness: Readiness,
}

impl CartMaterializer {
    /// Creates a materializer over the shared service and ledger.
    #[must_use]
    pub fn new(
        service: Arc<BookingService>,
        ledger: Arc<RwLock<CartLedger>>,
        readiness: Readiness,
    ) -> Self {
        Self {
            service,
            ledger,
            readiness,
        }
    }

    /// One materialization pass. A clean no-op when nothing is pending or
    /// the epoch is already sealed. Returns the number of items
    /// materialized.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if sealing the epoch cannot be
    /// persisted.
    pub async fn run(&self) -> Result<usize, BridgeError> {
        if !self.service.has_pending_bookings().await {
            tracing::debug!("no pending bookings to materialize");
            return Ok(0);
        }

        let mut ledger = self.ledger.write().await;
        let materialized = self.service.process_bookings(&mut ledger).await?;
        if materialized > 0 {
            tracing::info!(materialized, "added booked items to cart");
        }
        Ok(materialized)
    }

    /// Waits for the readiness signal up to `budget`, then runs one pass.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::NotReady` with a terminal warning if the
    /// signal does not arrive within the budget, and `BridgeError::Storage`
    /// if the pass itself fails to persist.
    pub async fn run_when_ready(&self, budget: Duration) -> Result<usize, BridgeError> {
        match tokio::time::timeout(budget, self.readiness.wait()).await {
            Ok(true) => self.run().await,
            Ok(false) | Err(_) => {
                tracing::warn!(
                    budget_ms = budget.as_millis(),
                    "booking service never became ready; giving up"
                );
                Err(BridgeError::NotReady(
                    "booking service was not ready within the wait budget".to_owned(),
                ))
            }
        }
    }

    /// Re-invocation hook for when the destination surface regains
    /// visibility (a booking may have been queued from another context).
    /// A correct no-op once the epoch is sealed.
    ///
    /// # Errors
    ///
    /// Same as [`CartMaterializer::run`].
    pub async fn on_page_visible(&self) -> Result<usize, BridgeError> {
        tracing::debug!("visibility regained, checking for new bookings");
        self.run().await
    }
}
