//! Booking queue state and the store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BridgeError;
use crate::money::Money;
use crate::product::ProductId;

/// One queued catalog selection, unique by `product_id` while unprocessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBooking {
    /// Globally unique token, assigned at creation and never reused.
    pub id: Uuid,
    /// Natural dedup key derived from the display name.
    pub product_id: ProductId,
    /// Display name, opaque to the core.
    pub name: String,
    /// Normalized price (accepts formatted strings or bare numbers on the
    /// wire).
    pub price: Money,
    /// Display image URL, opaque to the core.
    pub image: String,
    /// Display location/category text, opaque to the core.
    pub location: String,
    /// Booked quantity, at least 1.
    pub quantity: u32,
    /// Creation time; informative only, never used for ordering.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// The persisted queue aggregate.
///
/// Once `processed` is true the queue is logically drained: no further
/// automatic materialization occurs until `clear_bookings` or
/// `reset_processed_flag` starts a new epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQueueState {
    /// Ordered pending items, unique by product id while unprocessed.
    pub pending_items: Vec<PendingBooking>,
    /// Whether the current epoch has been materialized.
    pub processed: bool,
}

/// Durable key-value persistence for the booking queue.
///
/// Implementations must fail soft on reads: a missing or corrupt durable
/// entry degrades to the empty state, never to an error.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the queue state. First run or corrupt data yields the empty
    /// state with `processed == false`.
    async fn load(&self) -> BookingQueueState;

    /// Authoritative read: bypasses any in-process cache and re-reads the
    /// durable layer, so updates written by another context are observed.
    async fn refresh(&self) -> BookingQueueState {
        self.load().await
    }

    /// Persists the queue state.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if the durable layer cannot be
    /// written.
    async fn save(&self, state: &BookingQueueState) -> Result<(), BridgeError>;
}
