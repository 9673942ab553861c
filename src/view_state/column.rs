//! One virtualized column: an entry sequence plus the virtualizer that windows it.

use super::types::SequenceId;
use super::virtualizer::{MeasureOutcome, VirtualRow, Virtualizer, VirtualizerOptions};
use crate::model::EntryRef;

/// An ordered entry sequence and its own virtualizer.
///
/// The single feed is one column; masonry mode owns several that share one scroll element.
#[derive(Debug, Clone)]
pub struct VirtualColumn {
    entries: Vec<EntryRef>,
    virtualizer: Virtualizer,
}

impl VirtualColumn {
    /// Empty column.
    pub fn new(options: VirtualizerOptions) -> Self {
        Self {
            entries: Vec::new(),
            virtualizer: Virtualizer::new(options),
        }
    }

    /// Replace the entry sequence. Returns `true` when the size cache was reset.
    pub fn set_entries(&mut self, entries: Vec<EntryRef>) -> bool {
        let identity = SequenceId::of(&entries);
        let count = entries.len();
        self.entries = entries;
        self.virtualizer.set_sequence(count, identity)
    }

    /// Entries in column order.
    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    /// Entry at a column position.
    pub fn entry(&self, index: usize) -> Option<&EntryRef> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the column holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The column's virtualizer.
    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    /// Mutable access to the column's virtualizer.
    pub fn virtualizer_mut(&mut self) -> &mut Virtualizer {
        &mut self.virtualizer
    }

    /// Rendered rows paired with their entries.
    pub fn rows(&self) -> Vec<(VirtualRow, &EntryRef)> {
        self.virtualizer
            .virtual_rows()
            .into_iter()
            .filter_map(|row| self.entries.get(row.index).map(|entry| (row, entry)))
            .collect()
    }

    /// Scrollable height of this column.
    pub fn total_size(&self) -> u64 {
        self.virtualizer.total_size()
    }

    /// Feed back a measured row height.
    pub fn measure(&mut self, index: usize, observed: u32) -> MeasureOutcome {
        self.virtualizer.measure(index, observed)
    }
}
