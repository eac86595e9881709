//! Provider detection
//!
//! Extension providers inject themselves into the host environment at an
//! unpredictable point after page load, so the adapter polls a probe until
//! one shows up. The poll runs as a spawned task owned by a handle; dropping
//! the handle (or calling [`DetectionHandle::cancel`]) stops the poll.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::provider::{ProviderProbe, WalletProvider};

/// Configuration for the provider detection poll
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Delay between probe attempts
    pub interval: Duration,
    /// Stop after this many failed attempts; `None` polls until cancelled
    pub max_attempts: Option<u32>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: None,
        }
    }
}

impl DetectorConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Handle to a running detection task.
///
/// The task stops when the provider is found, when the attempt budget is
/// exhausted, or when this handle is cancelled or dropped.
pub struct DetectionHandle {
    task: JoinHandle<()>,
}

impl DetectionHandle {
    /// Stop the detection task
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the task has stopped (found, exhausted, or cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DetectionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a detection task polling `probe` per `config`. On the first probe
/// that yields a provider, `on_detected` runs once and the task stops.
pub fn spawn_detector<F, Fut>(
    config: DetectorConfig,
    probe: ProviderProbe,
    on_detected: F,
) -> DetectionHandle
where
    F: FnOnce(Arc<dyn WalletProvider>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(config.interval);
        let mut attempts: u32 = 0;

        loop {
            interval.tick().await;

            if let Some(provider) = probe() {
                debug!(attempts, "wallet provider detected");
                on_detected(provider).await;
                return;
            }

            attempts += 1;
            if let Some(max) = config.max_attempts {
                if attempts >= max {
                    debug!(attempts, "wallet provider not detected, giving up");
                    return;
                }
            }
        }
    });

    DetectionHandle { task }
}
