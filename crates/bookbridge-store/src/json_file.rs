//! JSON file implementation of the `StateStore` trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use bookbridge_core::error::BridgeError;
use bookbridge_core::store::{BookingQueueState, StateStore};

/// File-backed booking queue store.
///
/// The state is one JSON document at a fixed path. Reads fail soft: a
/// missing file is a first run and a corrupt file is discarded, both
/// degrading to the empty state. Writes go through a sibling temp file and
/// a rename so a crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the durable file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone();
        path.as_mut_os_string().push(".tmp");
        path
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> BookingQueueState {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored bookings, starting empty");
                return BookingQueueState::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable booking store, starting empty");
                return BookingQueueState::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt booking store, starting empty");
                BookingQueueState::default()
            }
        }
    }

    async fn save(&self, state: &BookingQueueState) -> Result<(), BridgeError> {
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| BridgeError::Storage(format!("serializing queue state: {e}")))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|e| BridgeError::Storage(format!("writing {}: {e}", temp.display())))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| BridgeError::Storage(format!("replacing {}: {e}", self.path.display())))?;

        Ok(())
    }
}
