//! Fixed-cadence session driver
//!
//! Ticks a shared [`Session`] on a Tokio interval and publishes the resulting
//! telemetry. All access to the session goes through its async mutex, so
//! control calls from other tasks are serialized with the ticks.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::noise::NoiseSource;
use crate::session::Session;
use crate::telemetry::Telemetry;

/// Background task ticking a session. Dropping the runner aborts the task.
pub struct SimulationRunner {
    handle: JoinHandle<()>,
    telemetry: watch::Receiver<Option<Telemetry>>,
}

impl SimulationRunner {
    /// Spawn a task that steps `session` at its configured tick interval.
    ///
    /// The cadence is read from the session's settings when the task starts,
    /// so each wall-clock tick advances the simulation by exactly one tick of
    /// simulated time. Ticks while the session is stopped publish nothing.
    /// Must be called from within a Tokio runtime.
    pub fn spawn<T, J>(session: Arc<Mutex<Session<T, J>>>) -> Self
    where
        T: NoiseSource + Send + 'static,
        J: NoiseSource + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let interval = session.lock().await.settings().tick_interval();
            tracing::info!("Simulation runner started, {} ms cadence", interval.as_millis());

            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;

                let update = session.lock().await.step();
                if let Some(telemetry) = update {
                    if tx.send(Some(telemetry)).is_err() {
                        tracing::debug!("All telemetry receivers dropped, runner exiting");
                        break;
                    }
                }
            }
        });

        Self {
            handle,
            telemetry: rx,
        }
    }

    /// Receiver for the latest telemetry
    pub fn subscribe(&self) -> watch::Receiver<Option<Telemetry>> {
        self.telemetry.clone()
    }

    /// Whether the background task has ended
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the background task. The session itself is left as is.
    pub fn stop(self) {
        tracing::info!("Simulation runner stopped");
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
