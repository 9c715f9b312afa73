//! Explicit initialization signal.
//!
//! Replaces timing-dependent "is the other component loaded yet" retry
//! loops: the boot path flips the signal once its dependencies are
//! constructed, and waiters block on the watch channel instead of polling.

use tokio::sync::watch;

/// Sender half: flipped exactly once by the boot path.
#[derive(Debug)]
pub struct ReadinessSignal {
    tx: watch::Sender<bool>,
}

impl ReadinessSignal {
    /// Marks the dependencies as ready. Idempotent.
    pub fn set_ready(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiver half: cheap to clone, waits without polling.
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: watch::Receiver<bool>,
}

impl Readiness {
    /// Waits until the signal is set. Returns `false` if the signal's
    /// sender was dropped before ever becoming ready.
    pub async fn wait(&self) -> bool {
        let mut rx = self.rx.clone();
        rx.wait_for(|ready| *ready).await.is_ok()
    }

    /// Whether the signal is currently set, without waiting.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Creates a linked signal/receiver pair, initially not ready.
#[must_use]
pub fn readiness() -> (ReadinessSignal, Readiness) {
    let (tx, rx) = watch::channel(false);
    (ReadinessSignal { tx }, Readiness { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wait_returns_once_signal_is_set() {
        let (signal, ready) = readiness();
        assert!(!ready.is_ready());

        signal.set_ready();

        assert!(ready.is_ready());
        assert!(ready.wait().await);
    }

    #[tokio::test]
    async fn test_wait_reports_false_when_sender_dropped_unready() {
        let (signal, ready) = readiness();
        drop(signal);

        assert!(!ready.wait().await);
    }

    #[tokio::test]
    async fn test_set_ready_is_idempotent() {
        let (signal, ready) = readiness();

        signal.set_ready();
        signal.set_ready();

        assert!(ready.is_ready());
    }
}
