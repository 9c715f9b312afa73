//! Pure state transitions over the booking queue.
//!
//! These functions carry the queue's invariants — at most one pending item
//! per product id, quantities at least 1 — and know nothing about storage.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use bookbridge_core::money::Money;
use bookbridge_core::product::ProductId;
use bookbridge_core::store::{BookingQueueState, PendingBooking};

/// A "Book" action arriving from the catalog surface.
///
/// The price is the raw display string; it is normalized into a structured
/// amount exactly once, when the request enters the queue.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    /// Dish display name; the dedup key is derived from it.
    pub name: String,
    /// Raw display price, e.g. `"$12"` or `"₦25,000.00"`.
    pub price: String,
    /// Display image URL.
    #[serde(default)]
    pub image: String,
    /// Display location/category text.
    #[serde(default)]
    pub location: String,
    /// Requested quantity; zero and absent both mean 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Adds a booking to the queue: merges quantities into an existing
/// unprocessed item with the same derived product id, or appends a new item
/// with a fresh id and timestamp. Returns the index of the resulting item.
///
/// Booking against a sealed queue starts a fresh epoch: the materialized
/// items are dropped and the processed flag cleared before the new item is
/// queued, so the next materialization pass picks it up.
pub fn add(state: &mut BookingQueueState, request: BookingRequest, now: DateTime<Utc>) -> usize {
    if state.processed {
        *state = BookingQueueState::default();
    }

    let product_id = ProductId::derive(&request.name);
    let quantity = request.quantity.max(1);

    if let Some(pos) = position(state, &product_id) {
        let item = &mut state.pending_items[pos];
        item.quantity = item.quantity.saturating_add(quantity);
        return pos;
    }

    state.pending_items.push(PendingBooking {
        id: Uuid::now_v7(),
        product_id,
        name: request.name,
        price: Money::parse_lenient(&request.price),
        image: request.image,
        location: request.location,
        quantity,
        timestamp: now,
    });
    state.pending_items.len() - 1
}

/// Removes the pending item with `product_id`. Returns whether a removal
/// occurred.
pub fn remove(state: &mut BookingQueueState, product_id: &ProductId) -> bool {
    match position(state, product_id) {
        Some(pos) => {
            state.pending_items.remove(pos);
            true
        }
        None => false,
    }
}

/// Sets the quantity of the pending item with `product_id` (callers handle
/// the zero-means-remove case). Returns whether the item existed.
pub fn set_quantity(state: &mut BookingQueueState, product_id: &ProductId, quantity: u32) -> bool {
    match position(state, product_id) {
        Some(pos) => {
            state.pending_items[pos].quantity = quantity;
            true
        }
        None => false,
    }
}

/// Sum of all pending quantities (the "cart count" display value).
#[must_use]
pub fn total_quantity(state: &BookingQueueState) -> u32 {
    state
        .pending_items
        .iter()
        .fold(0, |acc, item| acc.saturating_add(item.quantity))
}

fn position(state: &BookingQueueState, product_id: &ProductId) -> Option<usize> {
    state
        .pending_items
        .iter()
        .position(|item| item.product_id == *product_id)
}
