//! Periodic tick service
//!
//! Components subscribe a handler and receive one call per tick. Nothing here
//! knows about time: the background task (or a test) decides when to call
//! [`Ticker::tick`].

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};
use tracing::debug;

/// Receiver of tick events
pub trait TickHandler: Send + Sync {
    fn on_tick(&self);
}

/// Handle returned by [`Ticker::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Ticker {
    next_id: AtomicU64,
    subscribers: Mutex<BTreeMap<SubscriptionId, Arc<dyn TickHandler>>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Arc<dyn TickHandler>) -> Result<SubscriptionId, String> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .map_err(|e| format!("Failed to lock tick subscribers: {}", e))?
            .insert(id, handler);
        debug!("Tick subscription {:?} added", id);
        Ok(id)
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, String> {
        let removed = self
            .subscribers
            .lock()
            .map_err(|e| format!("Failed to lock tick subscribers: {}", e))?
            .remove(&id)
            .is_some();
        if removed {
            debug!("Tick subscription {:?} removed", id);
        }
        Ok(removed)
    }

    /// Deliver one tick to every current subscriber and return how many were
    /// called. Handlers may (un)subscribe while being dispatched.
    pub fn tick(&self) -> Result<usize, String> {
        let handlers: Vec<Arc<dyn TickHandler>> = self
            .subscribers
            .lock()
            .map_err(|e| format!("Failed to lock tick subscribers: {}", e))?
            .values()
            .cloned()
            .collect();

        for handler in &handlers {
            handler.on_tick();
        }
        Ok(handlers.len())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Poison the subscriber lock so later calls fail
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _subscribers = self.subscribers.lock();
            panic!("subscriber lock poisoned");
        }));
    }
}
