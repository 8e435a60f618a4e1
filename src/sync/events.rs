use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::debug;
use tokio::sync::mpsc;

/// Signals published by the sync layer. Connectivity and delivery events
/// arrive through explicit subscriptions; there are no ambient listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The queue gained or lost items
    QueueUpdated { pending: usize },
    SyncStarted,
    SyncCompleted { processed: usize, failed: usize },
    ConnectivityChanged { online: bool },
}

pub type SubscriptionId = u64;

/// A live subscription. Dropping the receiver ends delivery; calling
/// [`EventBus::unsubscribe`] with the id removes it eagerly.
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: mpsc::UnboundedReceiver<SyncEvent>,
}

struct Subscriber {
    id: SubscriptionId,
    sender: mpsc::UnboundedSender<SyncEvent>,
}

/// Fan-out bus for [`SyncEvent`]s.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber { id, sender });
        }
        Subscription { id, receiver }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|s| s.id != id);
        }
    }

    /// Deliver an event to every live subscriber, pruning closed ones.
    pub fn publish(&self, event: SyncEvent) {
        debug!("Sync event: {:?}", event);
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|s| s.sender.send(event.clone()).is_ok());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}
