//! Periodic cache flush
//!
//! Clears a [`ResponseCache`] on a fixed wall-clock interval from a
//! background tokio task. The task lives until [`SweeperHandle::stop`] is
//! called or the handle is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::ResponseCache;

/// Default interval between full flushes (10 minutes)
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(600);

/// Configuration for the flush sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Time between full flushes
    pub interval: Duration,
    /// Whether the sweeper runs at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FLUSH_INTERVAL,
            enabled: true,
        }
    }
}

/// Handle for controlling the background flush task
pub struct SweeperHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Spawns the flush task for `cache`
    ///
    /// The first flush happens one full interval after start; flushes are
    /// unconditional and drop every entry regardless of age.
    pub fn start(cache: ResponseCache, config: SweeperConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = if config.enabled {
            let mut interval = tokio::time::interval(config.interval);

            Some(tokio::spawn(async move {
                // Skip the first tick (immediate)
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            cache.clear();
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("cache sweeper stopping");
                            break;
                        }
                    }
                }
            }))
        } else {
            None
        };

        Self { shutdown_tx, task }
    }

    /// Whether a flush task was spawned
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the flush task and waits for it to exit
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
