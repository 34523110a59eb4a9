//! In-process named event bus

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::application::ports::{EventChannel, ListenerId, Subscription};
use crate::domain::event::ChannelEnvelope;

/// Named fan-out channel backed by one unbounded queue per listener.
///
/// Listeners whose receiver was dropped are pruned on the next publish.
pub struct EventBus {
    name: String,
    listeners: Mutex<HashMap<ListenerId, mpsc::UnboundedSender<ChannelEnvelope>>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl EventChannel for EventBus {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, tx);
        tracing::debug!(channel = %self.name, listener = %id, "Listener added");
        Subscription { id, receiver: rx }
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some();
        if removed {
            tracing::debug!(channel = %self.name, listener = %id, "Listener removed");
        }
        removed
    }

    fn publish(&self, envelope: ChannelEnvelope) -> usize {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.retain(|id, tx| {
            let alive = tx.send(envelope.clone()).is_ok();
            if !alive {
                tracing::debug!(channel = %self.name, listener = %id, "Pruned dead listener");
            }
            alive
        });
        listeners.len()
    }

    fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}
