//! Synchronous change listeners.

use std::fmt;

use teeplatform_bridge::change::StateChange;

/// Callback invoked with every effective mutation.
pub type Listener = Box<dyn Fn(&StateChange) + Send + Sync>;

/// Token returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listeners in registration order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if the id was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn notify(&self, change: &StateChange) {
        for (_, listener) in &self.listeners {
            listener(change);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
