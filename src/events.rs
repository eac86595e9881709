//! Adapter event notifications
//!
//! Typed events broadcast to any number of subscribers. Subscribers that
//! fall behind observe `RecvError::Lagged`; events are notifications, not a
//! durable log.

use tokio::sync::broadcast;
use tracing::debug;

use crate::error::WalletAdapterError;
use crate::types::WalletReadyState;

/// Default capacity of the broadcast channel backing an adapter's events
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Notifications emitted by the adapter
#[derive(Debug, Clone)]
pub enum AdapterEvent {
    /// Provider detection state changed
    ReadyStateChange(WalletReadyState),
    /// A session was established
    Connect { public_key: String },
    /// The session was torn down
    Disconnect,
    /// An operation failed
    Error(WalletAdapterError),
}

/// Broadcast emitter for [`AdapterEvent`]s
pub struct AdapterEvents {
    sender: broadcast::Sender<AdapterEvent>,
}

impl AdapterEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to adapter events. Each receiver sees every event emitted
    /// after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<AdapterEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all current subscribers. A send with no subscribers
    /// is a no-op.
    pub(crate) fn emit(&self, event: AdapterEvent) {
        debug!(?event, "adapter event");
        let _ = self.sender.send(event);
    }
}

impl Default for AdapterEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
