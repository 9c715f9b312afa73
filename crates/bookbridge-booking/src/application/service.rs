//! The booking service — the queue's single owner.
//!
//! An explicit service object constructed once per process with an injected
//! store and clock. It keeps an in-process copy of the queue behind a mutex
//! and a `watch` channel broadcasting the aggregate pending quantity for
//! any subscribed count display.
//!
//! Every mutating operation follows the same discipline: reload the
//! authoritative state from the store, mutate a copy, persist it, and only
//! then commit the copy in memory. A failed save therefore leaves both the
//! durable layer and the in-process copy untouched.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use bookbridge_cart::CartLedger;
use bookbridge_core::clock::Clock;
use bookbridge_core::error::BridgeError;
use bookbridge_core::money::{Currency, Money};
use bookbridge_core::product::ProductId;
use bookbridge_core::store::{BookingQueueState, PendingBooking, StateStore};
use serde::Serialize;

use crate::domain::queue::{self, BookingRequest};

/// Reload-free aggregate over the in-memory pending items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    /// Number of distinct pending items.
    pub count: usize,
    /// Sum of pending quantities.
    pub total_items: u32,
    /// Sum of price × quantity over pending items.
    pub total_value: Money,
}

/// Owner of the booking queue state machine.
pub struct BookingService {
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<BookingQueueState>,
    pending_tx: watch::Sender<u32>,
}

impl BookingService {
    /// Creates the service with its injected dependencies. Call
    /// [`BookingService::init`] to hydrate from durable state.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>, clock: Arc<dyn Clock>) -> Self {
        let (pending_tx, _) = watch::channel(0);
        Self {
            store,
            clock,
            state: Mutex::new(BookingQueueState::default()),
            pending_tx,
        }
    }

    /// Hydrates the in-process copy from the durable layer and publishes
    /// the pending count.
    pub async fn init(&self) {
        let mut guard = self.state.lock().await;
        *guard = self.store.refresh().await;
        let pending = queue::total_quantity(&guard);
        drop(guard);
        self.pending_tx.send_replace(pending);
        tracing::info!(pending, "booking service initialized");
    }

    /// Subscribes to the aggregate pending quantity (the cart count
    /// display). The receiver observes every committed mutation.
    #[must_use]
    pub fn subscribe_pending_count(&self) -> watch::Receiver<u32> {
        self.pending_tx.subscribe()
    }

    /// Queues a booking: merges quantities into an existing unprocessed
    /// item with the same derived product id, or appends a new item.
    /// Returns the resulting (merged or new) item.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if persisting fails; the queue is
    /// left untouched.
    pub async fn add_booking(&self, request: BookingRequest) -> Result<PendingBooking, BridgeError> {
        let mut guard = self.state.lock().await;
        let mut next = self.store.refresh().await;

        let pos = queue::add(&mut next, request, self.clock.now());
        self.store.save(&next).await?;

        let item = next.pending_items[pos].clone();
        let pending = queue::total_quantity(&next);
        *guard = next;
        drop(guard);
        self.pending_tx.send_replace(pending);

        tracing::info!(product_id = %item.product_id, quantity = item.quantity, "queued booking");
        Ok(item)
    }

    /// Authoritative read of the pending items (re-reads the durable
    /// layer first, so another context's writes are observed).
    pub async fn pending_bookings(&self) -> Vec<PendingBooking> {
        let mut guard = self.state.lock().await;
        *guard = self.store.refresh().await;
        guard.pending_items.clone()
    }

    /// Whether an unprocessed, non-empty queue exists (authoritative read).
    pub async fn has_pending_bookings(&self) -> bool {
        let mut guard = self.state.lock().await;
        *guard = self.store.refresh().await;
        !guard.pending_items.is_empty() && !guard.processed
    }

    /// Removes the pending item with `product_id`. Returns whether a
    /// removal occurred.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if persisting fails; the queue is
    /// left untouched.
    pub async fn remove_booking(&self, product_id: &ProductId) -> Result<bool, BridgeError> {
        let mut guard = self.state.lock().await;
        let mut next = self.store.refresh().await;

        let removed = queue::remove(&mut next, product_id);
        if removed {
            self.store.save(&next).await?;
            tracing::info!(%product_id, "removed booking");
        }

        let pending = queue::total_quantity(&next);
        *guard = next;
        drop(guard);
        self.pending_tx.send_replace(pending);
        Ok(removed)
    }

    /// Sets the quantity of the pending item with `product_id`; zero is
    /// equivalent to removal. Returns whether the target existed.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if persisting fails; the queue is
    /// left untouched.
    pub async fn update_booking_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, BridgeError> {
        let mut guard = self.state.lock().await;
        let mut next = self.store.refresh().await;

        let existed = if quantity == 0 {
            queue::remove(&mut next, product_id)
        } else {
            queue::set_quantity(&mut next, product_id, quantity)
        };
        if existed {
            self.store.save(&next).await?;
            tracing::info!(%product_id, quantity, "updated booking quantity");
        }

        let pending = queue::total_quantity(&next);
        *guard = next;
        drop(guard);
        self.pending_tx.send_replace(pending);
        Ok(existed)
    }

    /// Materializes every pending item into `ledger` and seals the epoch.
    ///
    /// A no-op returning 0 when the queue is already processed or empty,
    /// without touching the `processed` flag. Otherwise each item is merged
    /// into the ledger via its merge-add contract; a failure on one item is
    /// logged and does not block the rest. After attempting all items the
    /// queue is marked processed and persisted. Returns the number of items
    /// successfully materialized.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if persisting the processed flag
    /// fails; the queue state is left untouched.
    pub async fn process_bookings(&self, ledger: &mut CartLedger) -> Result<usize, BridgeError> {
        let mut guard = self.state.lock().await;
        let mut next = self.store.refresh().await;

        if next.processed || next.pending_items.is_empty() {
            tracing::debug!(
                processed = next.processed,
                pending = next.pending_items.len(),
                "nothing to materialize"
            );
            *guard = next;
            return Ok(0);
        }

        let mut materialized = 0;
        for item in &next.pending_items {
            match ledger.add_item(
                item.product_id.clone(),
                item.name.clone(),
                item.price,
                item.image.clone(),
                item.quantity,
            ) {
                Ok(()) => materialized += 1,
                Err(e) => {
                    tracing::warn!(product_id = %item.product_id, error = %e, "skipping unmaterializable booking");
                }
            }
        }

        next.processed = true;
        self.store.save(&next).await?;

        let pending = queue::total_quantity(&next);
        *guard = next;
        drop(guard);
        self.pending_tx.send_replace(pending);

        tracing::info!(materialized, "sealed booking epoch");
        Ok(materialized)
    }

    /// Resets to the empty state, starting a fresh epoch.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if persisting fails; the queue is
    /// left untouched.
    pub async fn clear_bookings(&self) -> Result<(), BridgeError> {
        let mut guard = self.state.lock().await;
        let next = BookingQueueState::default();
        self.store.save(&next).await?;
        *guard = next;
        drop(guard);
        self.pending_tx.send_replace(0);
        tracing::info!("cleared all bookings");
        Ok(())
    }

    /// Clears the processed flag so materialization can be replayed.
    /// Replayed items merge into existing ledger lines rather than
    /// duplicating them.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Storage` if persisting fails; the queue is
    /// left untouched.
    pub async fn reset_processed_flag(&self) -> Result<(), BridgeError> {
        let mut guard = self.state.lock().await;
        let mut next = self.store.refresh().await;
        next.processed = false;
        self.store.save(&next).await?;
        *guard = next;
        tracing::info!("reset processed flag");
        Ok(())
    }

    /// Reload-free summary of the in-memory pending items. A price that
    /// failed normalization contributes zero to the total value; the total
    /// carries the first item's currency.
    pub async fn booking_summary(&self) -> BookingSummary {
        let guard = self.state.lock().await;
        let currency = guard
            .pending_items
            .first()
            .map_or(Currency::default(), |item| item.price.currency());
        let total_value = guard
            .pending_items
            .iter()
            .fold(Money::zero(currency), |acc, item| {
                acc + item.price.times(item.quantity)
            });
        BookingSummary {
            count: guard.pending_items.len(),
            total_items: queue::total_quantity(&guard),
            total_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookbridge_test_support::{FailingStateStore, FixedClock, InMemoryStateStore};
    use chrono::TimeZone;

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ))
    }

    fn service_with(store: Arc<InMemoryStateStore>) -> BookingService {
        BookingService::new(store, fixed_clock())
    }

    fn request(name: &str, price: &str, quantity: u32) -> BookingRequest {
        BookingRequest {
            name: name.to_owned(),
            price: price.to_owned(),
            image: "img.jpg".to_owned(),
            location: "Street Food".to_owned(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_booking_merges_repeat_products_and_persists() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(Arc::clone(&store));

        // Act
        service.add_booking(request("Suya", "$12", 1)).await.unwrap();
        let merged = service.add_booking(request("Suya", "$12", 2)).await.unwrap();

        // Assert
        assert_eq!(merged.quantity, 3);
        let persisted = store.saved_states().pop().unwrap();
        assert_eq!(persisted.pending_items.len(), 1);
        assert_eq!(persisted.pending_items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_add_booking_publishes_pending_count() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        let rx = service.subscribe_pending_count();

        // Act
        service.add_booking(request("Suya", "$12", 2)).await.unwrap();
        service.add_booking(request("Akara", "$8", 1)).await.unwrap();

        // Assert
        assert_eq!(*rx.borrow(), 3);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_queue_untouched() {
        // Arrange
        let service = BookingService::new(Arc::new(FailingStateStore), fixed_clock());

        // Act
        let result = service.add_booking(request("Suya", "$12", 1)).await;

        // Assert
        assert!(matches!(result, Err(BridgeError::Storage(_))));
        let summary = service.booking_summary().await;
        assert_eq!(summary.count, 0);
    }

    #[tokio::test]
    async fn test_has_pending_observes_another_contexts_write() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(Arc::clone(&store));
        assert!(!service.has_pending_bookings().await);

        // Act — another page context writes directly to the durable layer.
        let mut external = BookingQueueState::default();
        queue::add(
            &mut external,
            request("Moi Moi", "$10", 1),
            chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        );
        store.write_behind(external);

        // Assert
        assert!(service.has_pending_bookings().await);
    }

    #[tokio::test]
    async fn test_process_bookings_materializes_and_seals_epoch() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(Arc::clone(&store));
        service.add_booking(request("Suya", "$12", 3)).await.unwrap();
        let mut ledger = CartLedger::new();

        // Act
        let materialized = service.process_bookings(&mut ledger).await.unwrap();

        // Assert
        assert_eq!(materialized, 1);
        assert_eq!(ledger.lines()[0].quantity, 3);
        assert!(store.saved_states().pop().unwrap().processed);
    }

    #[tokio::test]
    async fn test_process_bookings_is_idempotent() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        service.add_booking(request("Suya", "$12", 3)).await.unwrap();
        let mut ledger = CartLedger::new();

        // Act — the destination page may attempt materialization several
        // times during load.
        let first = service.process_bookings(&mut ledger).await.unwrap();
        let second = service.process_bookings(&mut ledger).await.unwrap();

        // Assert — ledger quantity matches queue quantity, not double.
        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.lines()[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_process_bookings_on_empty_queue_does_not_seal() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(Arc::clone(&store));
        let mut ledger = CartLedger::new();

        // Act
        let materialized = service.process_bookings(&mut ledger).await.unwrap();

        // Assert — returns 0 and never persists a processed flag.
        assert_eq!(materialized, 0);
        assert!(!service.has_pending_bookings().await);
        assert!(store.saved_states().is_empty());
    }

    #[tokio::test]
    async fn test_process_bookings_isolates_per_item_failures() {
        // Arrange — one poisoned item (zero quantity) persisted by an
        // earlier context must not block the rest.
        let mut seeded = BookingQueueState::default();
        let now = chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        queue::add(&mut seeded, request("Suya", "$12", 1), now);
        queue::add(&mut seeded, request("Akara", "$8", 2), now);
        seeded.pending_items[0].quantity = 0;
        let store = Arc::new(InMemoryStateStore::seeded(seeded));
        let service = service_with(Arc::clone(&store));
        let mut ledger = CartLedger::new();

        // Act
        let materialized = service.process_bookings(&mut ledger).await.unwrap();

        // Assert — the good item landed, the epoch still sealed.
        assert_eq!(materialized, 1);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.lines()[0].product_id, ProductId::derive("Akara"));
        assert!(store.saved_states().pop().unwrap().processed);
    }

    #[tokio::test]
    async fn test_reset_then_reprocess_merges_instead_of_duplicating_lines() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        service.add_booking(request("Suya", "$12", 3)).await.unwrap();
        let mut ledger = CartLedger::new();
        service.process_bookings(&mut ledger).await.unwrap();

        // Act
        service.reset_processed_flag().await.unwrap();
        service.process_bookings(&mut ledger).await.unwrap();

        // Assert — replay merges into the existing line, never a second row.
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.lines()[0].quantity, 6);
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes_item() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        service.add_booking(request("Suya", "$12", 2)).await.unwrap();

        // Act
        let existed = service
            .update_booking_quantity(&ProductId::derive("Suya"), 0)
            .await
            .unwrap();

        // Assert
        assert!(existed);
        assert!(!service.has_pending_bookings().await);
    }

    #[tokio::test]
    async fn test_update_quantity_on_missing_item_reports_false() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);

        // Act
        let existed = service
            .update_booking_quantity(&ProductId::derive("Ghost"), 4)
            .await
            .unwrap();

        // Assert
        assert!(!existed);
    }

    #[tokio::test]
    async fn test_remove_booking_updates_pending_count() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        service.add_booking(request("Suya", "$12", 2)).await.unwrap();
        let rx = service.subscribe_pending_count();

        // Act
        let removed = service.remove_booking(&ProductId::derive("Suya")).await.unwrap();

        // Assert
        assert!(removed);
        assert_eq!(*rx.borrow(), 0);
    }

    #[tokio::test]
    async fn test_clear_bookings_starts_fresh_epoch() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(Arc::clone(&store));
        service.add_booking(request("Suya", "$12", 1)).await.unwrap();
        let mut ledger = CartLedger::new();
        service.process_bookings(&mut ledger).await.unwrap();

        // Act
        service.clear_bookings().await.unwrap();

        // Assert
        let persisted = store.saved_states().pop().unwrap();
        assert!(persisted.pending_items.is_empty());
        assert!(!persisted.processed);
    }

    #[tokio::test]
    async fn test_booking_summary_totals_normalized_values() {
        // Arrange
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        service
            .add_booking(request("Pounded Yam", "₦25,000.00", 2))
            .await
            .unwrap();
        service
            .add_booking(request("Mystery Dish", "market price", 1))
            .await
            .unwrap();

        // Act
        let summary = service.booking_summary().await;

        // Assert — the unparsable price contributes zero, not an error.
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_value.minor(), 5_000_000);
    }

    #[tokio::test]
    async fn test_booking_summary_carries_first_items_currency() {
        // Arrange — an all-dollar queue must not report a naira total.
        let store = Arc::new(InMemoryStateStore::new());
        let service = service_with(store);
        service.add_booking(request("Suya", "$12", 2)).await.unwrap();
        service.add_booking(request("Akara", "$8", 1)).await.unwrap();

        // Act
        let summary = service.booking_summary().await;

        // Assert
        assert_eq!(summary.total_value.currency(), Currency::Dollar);
        assert_eq!(summary.total_value.minor(), 3_200);
    }

    #[tokio::test]
    async fn test_init_hydrates_from_durable_state() {
        // Arrange
        let mut seeded = BookingQueueState::default();
        queue::add(
            &mut seeded,
            request("Suya", "$12", 4),
            chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        );
        let store = Arc::new(InMemoryStateStore::seeded(seeded));
        let service = service_with(store);

        // Act
        service.init().await;

        // Assert
        let summary = service.booking_summary().await;
        assert_eq!(summary.total_items, 4);
        assert_eq!(*service.subscribe_pending_count().borrow(), 4);
    }
}
