//! Run-stop signaling.
//!
//! A stop is a level, not an edge: once requested it stays requested, so a
//! signal observed at any point — even before the engine loop starts — still
//! interrupts the run. The engine finishes the node it is between, pushes
//! any in-flight node back to the frontier front, and writes a final
//! checkpoint before returning.

use tokio::signal;
use tokio::sync::watch;

/// Requests that a traversal run stop after the current node.
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

/// The engine-side view of a stop request.
#[derive(Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A signal the engine can wait on. Signals created after [`stop`] was
    /// called still observe the stop.
    ///
    /// [`stop`]: StopHandle::stop
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request the stop.
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }

    /// Wait for SIGINT or SIGTERM, then request the stop.
    pub async fn stop_on_signal(&self) {
        #[cfg(unix)]
        {
            use signal::unix::{signal as unix_signal, SignalKind};
            match unix_signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = signal::ctrl_c() => {}
                        _ = sigterm.recv() => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "no SIGTERM handler, listening for SIGINT only");
                    let _ = signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        let _ = signal::ctrl_c().await;

        tracing::info!("stop requested, checkpointing after the current node");
        self.stop();
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    /// Wait until a stop has been requested.
    ///
    /// If every [`StopHandle`] is gone without stopping, no stop can ever
    /// arrive and this pends forever; the run then ends through its own
    /// termination conditions.
    pub async fn stopped(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Whether a stop has already been requested.
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }
}
