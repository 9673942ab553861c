//! Entry sources.
//!
//! This module provides where the feed's entries come from:
//! - `EntrySource`: the host's query result (entries + sort specification)
//! - `ChangeNotifier`: listener registry backing `EntrySource::subscribe`
//! - `SourceWatch`: a subscription that raises a changed flag for the feed to poll
//! - `MemorySource`: an in-memory source the host can mutate
//! - `ManifestSource`: a JSONL manifest of notes on disk

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::model::EntryRef;
use crate::ordering::SortSpec;

pub mod manifest;
pub mod memory;

pub use manifest::ManifestSource;
pub use memory::MemorySource;

/// The query result driving the feed.
pub trait EntrySource {
    /// Current entries in source order. `None` when the data is unavailable.
    fn entries(&self) -> Option<Vec<EntryRef>>;

    /// The configured sort specification.
    fn sort_spec(&self) -> SortSpec;

    /// Registry notified whenever entries or sort change.
    fn notifier(&self) -> &ChangeNotifier;

    /// Register `listener` for change notifications.
    fn subscribe(&self, listener: Box<dyn Fn()>) -> SubscriptionId {
        self.notifier().subscribe(listener)
    }
}

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single-threaded listener registry.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
}

impl ChangeNotifier {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&self, listener: Box<dyn Fn()>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::from(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    /// Call every listener once.
    ///
    /// Listeners run on a snapshot of the registry, so they may subscribe or unsubscribe
    /// while being notified.
    pub fn notify(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// A registered listener that marks the source as changed.
///
/// The feed polls [`SourceWatch::take_changed`] between frames instead of re-rendering
/// inside the listener, so notifications never re-enter the view.
#[derive(Debug)]
pub struct SourceWatch {
    id: SubscriptionId,
    changed: Rc<Cell<bool>>,
}

impl SourceWatch {
    /// Subscribe to `source`.
    pub fn attach(source: &dyn EntrySource) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        let id = source.subscribe(Box::new(move || flag.set(true)));
        Self { id, changed }
    }

    /// Whether a notification arrived since the last call. Clears the flag.
    pub fn take_changed(&self) -> bool {
        self.changed.replace(false)
    }

    /// Unsubscribe from `source`, which must be the source this watch was attached to.
    pub fn detach(self, source: &dyn EntrySource) -> bool {
        source.notifier().unsubscribe(self.id)
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_calls_every_listener() {
        let notifier = ChangeNotifier::new();
        let calls = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let calls = Rc::clone(&calls);
            notifier.subscribe(Box::new(move || calls.set(calls.get() + 1)));
        }
        notifier.notify();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let notifier = ChangeNotifier::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = notifier.subscribe(Box::new(move || counter.set(counter.get() + 1)));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify();
        assert_eq!(calls.get(), 0);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn listener_may_unsubscribe_itself() {
        let notifier = Rc::new(ChangeNotifier::new());
        let id = Rc::new(Cell::new(None));
        let (inner, slot) = (Rc::clone(&notifier), Rc::clone(&id));
        let registered = notifier.subscribe(Box::new(move || {
            if let Some(own) = slot.get() {
                inner.unsubscribe(own);
            }
        }));
        id.set(Some(registered));

        notifier.notify();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn watch_flags_changes_until_taken() {
        let source = MemorySource::new(Vec::new());
        let watch = SourceWatch::attach(&source);
        assert!(!watch.take_changed());

        source.clear();
        source.clear();
        assert!(watch.take_changed());
        assert!(!watch.take_changed());

        assert!(watch.detach(&source));
        assert_eq!(source.notifier().listener_count(), 0);
    }
}
