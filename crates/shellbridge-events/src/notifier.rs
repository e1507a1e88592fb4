//! Publish/subscribe registry for application events.
//!
//! One notifier is created at application start and shared through an
//! [`Arc`]. Components publish [`DomainEvent`]s without knowing who listens;
//! UI components subscribe when they mount and unsubscribe when they unmount.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::event::DomainEvent;
use crate::names::EventName;

/// Callback invoked for each published event of the subscribed name.
pub type EventHandler = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

/// Shared notifier for use across components.
pub type SharedEventNotifier = Arc<EventNotifier>;

/// Handle returned by [`EventNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct Subscription {
    id: SubscriptionId,
    handler: EventHandler,
}

/// Process-wide event bus.
pub struct EventNotifier {
    /// Subscriptions grouped by event name.
    subscriptions: Mutex<HashMap<EventName, Vec<Subscription>>>,
    /// Counter for generating subscription ids.
    next_id: AtomicU64,
}

impl EventNotifier {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a notifier wrapped for sharing.
    pub fn shared() -> SharedEventNotifier {
        Arc::new(Self::new())
    }

    /// Register `handler` for events named `name`.
    pub fn subscribe<F>(&self, name: EventName, handler: F) -> SubscriptionId
    where
        F: Fn(&DomainEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .lock()
            .entry(name)
            .or_default()
            .push(Subscription {
                id,
                handler: Arc::new(handler),
            });

        tracing::debug!(event = %name, subscription = %id, "subscribed");
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.lock();
        for handlers in subscriptions.values_mut() {
            if let Some(pos) = handlers.iter().position(|s| s.id == id) {
                handlers.remove(pos);
                tracing::debug!(subscription = %id, "unsubscribed");
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every current subscriber of its name.
    ///
    /// Handlers are called after the registry lock is released, so a handler
    /// may subscribe or unsubscribe without deadlocking. Returns the number
    /// of handlers invoked.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let name = event.name();
        let handlers: Vec<EventHandler> = self
            .subscriptions
            .lock()
            .get(&name)
            .map(|subs| subs.iter().map(|s| s.handler.clone()).collect())
            .unwrap_or_default();

        tracing::debug!(event = %name, subscribers = handlers.len(), "publishing event");

        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Number of subscribers registered for `name`.
    pub fn subscriber_count(&self, name: EventName) -> usize {
        self.subscriptions.lock().get(&name).map_or(0, |v| v.len())
    }
}

impl Default for EventNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<EventName, usize> = self
            .subscriptions
            .lock()
            .iter()
            .map(|(name, subs)| (*name, subs.len()))
            .collect();
        f.debug_struct("EventNotifier")
            .field("subscriptions", &counts)
            .finish()
    }
}
