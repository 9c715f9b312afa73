//! Read-through cache over any `StateStore`.

use async_trait::async_trait;
use tokio::sync::Mutex;

use bookbridge_core::error::BridgeError;
use bookbridge_core::store::{BookingQueueState, StateStore};

/// A small in-process cache in front of the durable store.
///
/// `load` serves the cached copy when one exists; `save` writes through and
/// replaces the cache; `refresh` invalidates the cache and re-reads the
/// durable layer so writes from another context are observed. This is the
/// single-authoritative-store replacement for the original dual
/// window/localStorage arrangement.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    cache: Mutex<Option<BookingQueueState>>,
}

impl<S: StateStore> CachedStore<S> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<S: StateStore> StateStore for CachedStore<S> {
    async fn load(&self) -> BookingQueueState {
        let mut cache = self.cache.lock().await;
        if let Some(state) = cache.as_ref() {
            return state.clone();
        }
        let state = self.inner.load().await;
        *cache = Some(state.clone());
        state
    }

    async fn refresh(&self) -> BookingQueueState {
        let mut cache = self.cache.lock().await;
        let state = self.inner.refresh().await;
        *cache = Some(state.clone());
        state
    }

    async fn save(&self, state: &BookingQueueState) -> Result<(), BridgeError> {
        let mut cache = self.cache.lock().await;
        self.inner.save(state).await?;
        *cache = Some(state.clone());
        Ok(())
    }
}
