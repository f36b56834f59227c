//! Events and listener registries

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Callback invoked when an event is dispatched
pub type Listener = Rc<dyn Fn(&Event)>;

/// Handle returned by listener registration, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// A dispatched event. Carries only its type name.
#[derive(Debug)]
pub struct Event {
    kind: String,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            default_prevented: Cell::new(false),
        }
    }

    /// The event type name
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

struct ListenerEntry {
    id: ListenerId,
    event: String,
    listener: Listener,
}

/// Listeners registered on one event target
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<ListenerEntry>,
}

impl ListenerRegistry {
    pub fn add(&mut self, event: &str, listener: Listener) -> ListenerId {
        let id = ListenerId::new();
        self.entries.push(ListenerEntry {
            id,
            event: event.to_string(),
            listener,
        });
        id
    }

    pub fn remove(&mut self, event: &str, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !(entry.id == id && entry.event == event));
        self.entries.len() != before
    }

    /// Snapshot of the listeners for `event`, in registration order.
    ///
    /// Dispatch invokes the snapshot after the registry borrow is released,
    /// so listeners may add or remove listeners themselves.
    pub fn listeners_for(&self, event: &str) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|entry| entry.event == event)
            .map(|entry| entry.listener.clone())
            .collect()
    }

    pub fn count(&self, event: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.event == event)
            .count()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| (&entry.event, entry.id)))
            .finish()
    }
}

/// Invoke every listener in `listeners` with a fresh event named `kind`.
///
/// Returns `false` when a listener cancelled the event.
pub(crate) fn dispatch(kind: &str, listeners: Vec<Listener>) -> bool {
    let event = Event::new(kind);
    for listener in listeners {
        listener(&event);
    }
    !event.default_prevented()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_remove_only_matching_event_and_id() {
        let mut registry = ListenerRegistry::default();
        let first = registry.add("load", Rc::new(|_| {}));
        let second = registry.add("load", Rc::new(|_| {}));

        assert!(!registry.remove("click", first));
        assert!(registry.remove("load", first));
        assert!(!registry.remove("load", first));
        assert_eq!(registry.count("load"), 1);
        assert!(registry.remove("load", second));
    }

    #[test]
    fn test_dispatch_runs_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::default();
        for n in 0..3 {
            let seen = seen.clone();
            registry.add("ping", Rc::new(move |_| seen.borrow_mut().push(n)));
        }

        assert!(dispatch("ping", registry.listeners_for("ping")));
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_prevent_default_is_reported() {
        let mut registry = ListenerRegistry::default();
        registry.add("submit", Rc::new(|event| event.prevent_default()));
        assert!(!dispatch("submit", registry.listeners_for("submit")));
    }

    #[test]
    fn test_listener_ids_are_unique() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }
}
