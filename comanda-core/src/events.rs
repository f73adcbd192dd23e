//! Change-notification fan-out
//!
//! Listeners observe completed mutations only: the stores mutate under
//! their own lock, drop it, and then emit - so a listener reading a store
//! always sees the finished state, never a partial one.

use parking_lot::RwLock;
use shared::event::ChangeEvent;

/// Registered change listener
pub type Listener = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Listener registry shared by both stores
#[derive(Default)]
pub(crate) struct Listeners {
    subscribers: RwLock<Vec<Listener>>,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&self, listener: Listener) {
        self.subscribers.write().push(listener);
    }

    /// Deliver to every subscriber, in registration order.
    pub(crate) fn emit(&self, event: ChangeEvent) {
        for listener in self.subscribers.read().iter() {
            listener(&event);
        }
    }
}
