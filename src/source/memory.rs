//! In-memory entry source.

use std::cell::RefCell;

use super::{ChangeNotifier, EntrySource};
use crate::model::EntryRef;
use crate::ordering::SortSpec;

/// Entry source held in memory. Every mutation notifies subscribers.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: RefCell<Option<Vec<EntryRef>>>,
    sort: RefCell<SortSpec>,
    notifier: ChangeNotifier,
}

impl MemorySource {
    /// Source with no data yet.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Source holding `entries` with no sort.
    pub fn new(entries: Vec<EntryRef>) -> Self {
        Self::with_sort(entries, SortSpec::none())
    }

    /// Source holding `entries` sorted by `sort`.
    pub fn with_sort(entries: Vec<EntryRef>, sort: SortSpec) -> Self {
        Self {
            entries: RefCell::new(Some(entries)),
            sort: RefCell::new(sort),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Replace the entries.
    pub fn set_entries(&self, entries: Vec<EntryRef>) {
        *self.entries.borrow_mut() = Some(entries);
        self.notifier.notify();
    }

    /// Drop the data, as when the query is no longer available.
    pub fn clear(&self) {
        *self.entries.borrow_mut() = None;
        self.notifier.notify();
    }

    /// Replace the sort specification.
    pub fn set_sort(&self, sort: SortSpec) {
        *self.sort.borrow_mut() = sort;
        self.notifier.notify();
    }
}

impl EntrySource for MemorySource {
    fn entries(&self) -> Option<Vec<EntryRef>> {
        self.entries.borrow().clone()
    }

    fn sort_spec(&self) -> SortSpec {
        self.sort.borrow().clone()
    }

    fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
