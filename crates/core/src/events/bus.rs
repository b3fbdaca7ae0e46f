//! Observer registry for change events.
//!
//! A plain in-memory listener map keyed by entity kind. Listeners are
//! invoked synchronously on `emit` and stay registered until explicitly
//! unsubscribed.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{ChangeEvent, EntityKind};

type ListenerFn = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId {
    kind: EntityKind,
    id: u64,
}

/// In-memory change-event bus.
///
/// The process-wide instance is available through [`EventBus::global`];
/// independent instances can be created for tests or isolated contexts.
pub struct EventBus {
    listeners: DashMap<EntityKind, Vec<(u64, ListenerFn)>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// Creates a new, empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the process-wide bus.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: Lazy<EventBus> = Lazy::new(EventBus::new);
        &GLOBAL
    }

    /// Registers a listener for events of `kind`.
    ///
    /// The listener stays registered until [`EventBus::unsubscribe`] is
    /// called with the returned handle.
    pub fn subscribe<F>(&self, kind: EntityKind, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Arc::new(listener)));
        SubscriptionId { kind, id }
    }

    /// Removes a listener. Returns true if it was still registered.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let Some(mut entry) = self.listeners.get_mut(&subscription.kind) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|(id, _)| *id != subscription.id);
        before != entry.len()
    }

    /// Delivers `event` synchronously to every listener of its entity
    /// kind. Returns the number of listeners invoked.
    ///
    /// Listeners are cloned out of the registry before invocation so a
    /// callback may subscribe or unsubscribe without deadlocking.
    pub fn emit(&self, event: &ChangeEvent) -> usize {
        let snapshot: Vec<ListenerFn> = match self.listeners.get(&event.entity) {
            Some(entry) => entry.iter().map(|(_, l)| Arc::clone(l)).collect(),
            None => return 0,
        };

        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EntityKind) -> usize {
        self.listeners.get(&kind).map_or(0, |entry| entry.len())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
