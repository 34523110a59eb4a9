//! Event channel port interface

use std::fmt;

use tokio::sync::mpsc;

use crate::domain::event::ChannelEnvelope;

/// Identifier of a registered channel listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// A registered listener: its id and the stream of envelopes delivered to it
#[derive(Debug)]
pub struct Subscription {
    pub id: ListenerId,
    pub receiver: mpsc::UnboundedReceiver<ChannelEnvelope>,
}

/// Port for the named screen-share event channel.
///
/// Delivery is at-least-once and unordered across senders. Removing a
/// listener is idempotent; publishing to a removed listener is a no-op.
pub trait EventChannel: Send + Sync {
    /// Channel identifier
    fn name(&self) -> &str;

    /// Register a new listener
    fn subscribe(&self) -> Subscription;

    /// Remove a listener.
    ///
    /// # Returns
    /// `true` the first time the listener is removed, `false` afterwards
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Deliver an envelope to every registered listener.
    ///
    /// # Returns
    /// The number of listeners reached
    fn publish(&self, envelope: ChannelEnvelope) -> usize;

    /// Number of registered listeners
    fn listener_count(&self) -> usize;
}
