//! Test stores — mock `StateStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bookbridge_core::error::BridgeError;
use bookbridge_core::store::{BookingQueueState, StateStore};

/// A functional in-memory store that records every save.
///
/// `load` and `refresh` both return the current state; `saved_states`
/// exposes the full write history for assertions.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    state: Mutex<BookingQueueState>,
    saves: Mutex<Vec<BookingQueueState>>,
}

impl InMemoryStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with `state`, as if a previous page
    /// context had written it.
    #[must_use]
    pub fn seeded(state: BookingQueueState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: Mutex::new(Vec::new()),
        }
    }

    /// Overwrites the stored state without recording a save, simulating a
    /// write from another context.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn write_behind(&self, state: BookingQueueState) {
        *self.state.lock().unwrap() = state;
    }

    /// Returns a snapshot of every state that was saved, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn saved_states(&self) -> Vec<BookingQueueState> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self) -> BookingQueueState {
        self.state.lock().unwrap().clone()
    }

    async fn save(&self, state: &BookingQueueState) -> Result<(), BridgeError> {
        *self.state.lock().unwrap() = state.clone();
        self.saves.lock().unwrap().push(state.clone());
        Ok(())
    }
}

/// A store whose saves always fail. Loads return the empty state. Useful
/// for testing that mutating operations leave prior state untouched.
#[derive(Debug, Default)]
pub struct FailingStateStore;

#[async_trait]
impl StateStore for FailingStateStore {
    async fn load(&self) -> BookingQueueState {
        BookingQueueState::default()
    }

    async fn save(&self, _state: &BookingQueueState) -> Result<(), BridgeError> {
        Err(BridgeError::Storage("disk full".into()))
    }
}
