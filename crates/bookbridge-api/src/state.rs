//! Shared application state.

use std::sync::Arc;

use tokio::sync::RwLock;

use bookbridge_booking::application::service::BookingService;
use bookbridge_cart::CartLedger;
use bookbridge_catalog::Catalog;
use bookbridge_sync::CartMaterializer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Owner of the booking queue.
    pub service: Arc<BookingService>,
    /// The cart ledger, written by the materializer and the cart routes.
    pub ledger: Arc<RwLock<CartLedger>>,
    /// Drives pending bookings into the ledger.
    pub materializer: Arc<CartMaterializer>,
    /// The built-in dish catalog.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        service: Arc<BookingService>,
        ledger: Arc<RwLock<CartLedger>>,
        materializer: Arc<CartMaterializer>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            service,
            ledger,
            materializer,
            catalog,
        }
    }
}
