//! # Subscriber Registry
//!
//! Callbacks invoked with an item snapshot after every successful mutation.
//!
//! ## Ordering Guarantees
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  • Subscribers run in registration order                                │
//! │  • Synchronously, strictly before the mutating call returns            │
//! │  • Exactly once per successful mutation                                │
//! │  • Each receives a snapshot (fresh copy) of the POST-mutation items    │
//! │                                                                         │
//! │  A caller awaiting a mutation can therefore read summary() right       │
//! │  afterwards and see state consistent with what subscribers saw.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-entrancy
//! The entry list is snapshotted before invocation, so a callback may call
//! `subscribe`/`unsubscribe` on the engine from inside its own notification.
//! Registry changes made that way take effect from the NEXT notification:
//! the in-flight pass still runs the list as it was when the mutation
//! completed (an unsubscribed callback can thus be invoked one final time).

use std::sync::Arc;

use medcart_core::CartItem;

/// A registered cart observer.
pub type CartSubscriber = Box<dyn Fn(&[CartItem]) + Send + Sync + 'static>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Registration-ordered list of subscribers.
///
/// Entries are shared (`Arc`) so the engine can snapshot the list under its
/// registry lock and invoke the callbacks after releasing it.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    entries: Vec<(SubscriberId, Arc<CartSubscriber>)>,
}

impl SubscriberRegistry {
    /// Registers a subscriber; it will observe every subsequent mutation.
    pub fn subscribe(&mut self, subscriber: CartSubscriber) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Arc::new(subscriber)));
        id
    }

    /// De-registers a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != initial_len
    }

    /// Returns the current subscribers, in registration order, for
    /// invocation outside the registry lock.
    pub fn snapshot(&self) -> Vec<Arc<CartSubscriber>> {
        self.entries
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect()
    }

    /// Number of registered subscribers (diagnostics).
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn notify_all(registry: &SubscriberRegistry, items: &[CartItem]) {
        for subscriber in registry.snapshot() {
            subscriber(items);
        }
    }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SubscriberRegistry::default();

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.subscribe(Box::new(move |_| {
                order.lock().unwrap().push(tag);
            }));
        }

        notify_all(&registry, &[]);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = SubscriberRegistry::default();

        let calls_clone = Arc::clone(&calls);
        let id = registry.subscribe(Box::new(move |_| {
            *calls_clone.lock().unwrap() += 1;
        }));

        notify_all(&registry, &[]);
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id)); // already gone
        notify_all(&registry, &[]);

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_snapshot_is_stable_against_later_registrations() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = SubscriberRegistry::default();

        let calls_clone = Arc::clone(&calls);
        registry.subscribe(Box::new(move |_| {
            *calls_clone.lock().unwrap() += 1;
        }));

        let snapshot = registry.snapshot();

        // A registration after the snapshot does not join the in-flight pass
        let calls_clone = Arc::clone(&calls);
        registry.subscribe(Box::new(move |_| {
            *calls_clone.lock().unwrap() += 100;
        }));

        for subscriber in snapshot {
            subscriber(&[]);
        }
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
