//! Cooperative stop signal shared by the live loops.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Trigger side of a shutdown signal.
///
/// Cheap to clone; any clone can stop every loop holding a
/// [`ShutdownSignal`] from the same pair.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

/// Waiting side of a shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, ShutdownSignal { rx })
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger on Ctrl-C. Must be called inside a tokio runtime.
    pub fn trigger_on_ctrl_c(&self) {
        let shutdown = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
                shutdown.trigger();
            }
        });
    }
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is triggered.
    ///
    /// If every [`Shutdown`] handle is dropped first, this never resolves.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancelled_resolves_after_trigger() {
        let (shutdown, mut signal) = Shutdown::new();
        assert!(!signal.is_triggered());
        shutdown.trigger();
        signal.cancelled().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn test_every_signal_sees_trigger() {
        let (shutdown, signal) = Shutdown::new();
        let mut late = shutdown.signal();
        let mut cloned = signal.clone();
        shutdown.clone().trigger();
        cloned.cancelled().await;
        late.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_trigger_never_cancels() {
        let (shutdown, mut signal) = Shutdown::new();
        drop(shutdown);
        let waited = tokio::time::timeout(Duration::from_secs(60), signal.cancelled()).await;
        assert!(waited.is_err());
    }
}
