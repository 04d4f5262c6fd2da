//! Reusable change-listener registry for [`Document`](super::Document) implementations

use super::traits::{ChangeHandler, DocumentChange, Subscription};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Thread-safe list of change handlers
///
/// Handlers are called outside the internal lock, so a handler may subscribe
/// or unsubscribe without deadlocking.
#[derive(Default)]
pub struct ChangeListeners {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(Subscription, ChangeHandler)>>,
}

impl ChangeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        let subscription = Subscription::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((subscription, handler));
        subscription
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.lock().retain(|(s, _)| *s != subscription);
    }

    /// Delivers a change to every registered handler
    pub fn emit(&self, change: &DocumentChange) {
        let handlers: Vec<ChangeHandler> = self.lock().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(change);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Subscription, ChangeHandler)>> {
        // Handlers never run under this lock; a poisoned Vec is still intact.
        self.handlers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
