//! Progress Coordinator - drives an [`Indicator`] on its own thread while the
//! pipeline blocks the main one.
//!
//! The indicator is released exactly once: on [`ProgressCoordinator::stop`],
//! when the coordinator is dropped during unwinding, or when the indicator
//! itself panics mid-frame.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::Indicator;

/// Frame interval used by the CLI spinner.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Calls `release` when dropped, including on unwind.
struct ReleaseOnDrop<I: Indicator>(I);

impl<I: Indicator> Drop for ReleaseOnDrop<I> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Handle to the running indicator thread.
pub struct ProgressCoordinator {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressCoordinator {
    /// Spawn the indicator thread. Ticks every `interval` until stopped.
    pub fn start<I: Indicator>(indicator: I, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        // Guard is built before spawning so a failed spawn still releases.
        let guard = ReleaseOnDrop(indicator);

        let spawned = thread::Builder::new()
            .name("jotl-progress".into())
            .spawn(move || {
                let mut guard = guard;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => guard.0.tick(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Could not start progress indicator");
                None
            }
        };

        debug!("Progress indicator started");
        Self {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    /// Whether the indicator thread is still owned by this handle.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop ticking, release the indicator, and wait for the thread to exit.
    ///
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already be gone if the indicator panicked.
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Progress indicator panicked; terminal was released during unwind");
            }
            debug!("Progress indicator stopped");
        }
    }
}

impl Drop for ProgressCoordinator {
    fn drop(&mut self) {
        self.stop();
    }
}
