//! Column distribution layer for masonry mode.
//!
//! Entries are dealt round-robin across `column_count` columns, each column virtualized
//! independently against the shared scroll element. Round-robin assignment is not stable
//! under a column count change, so any change of count redistributes everything and gives
//! every column a fresh size cache.

use tracing::debug;

use super::column::VirtualColumn;
use super::virtualizer::{MeasureOutcome, VirtualizerOptions};
use crate::model::EntryRef;

/// Gap between columns and the container's side padding, in pixels.
pub const COLUMN_GAP: u32 = 16;

/// Default maximum card width, in pixels.
pub const DEFAULT_MAX_CARD_WIDTH: u32 = 400;

/// Number of columns that fit a container.
///
/// `max(1, floor((available + gap) / (max_card_width + gap)))` with
/// `available = container_width - 2 * gap`.
///
/// # Examples
///
/// ```
/// # use notefeed::view_state::masonry::column_count;
/// assert_eq!(column_count(0, 400), 1);
/// assert_eq!(column_count(1280, 400), 3);
/// assert_eq!(column_count(900, 400), 2);
/// ```
pub fn column_count(container_width: u32, max_card_width: u32) -> usize {
    let gap = COLUMN_GAP as i64;
    let available = container_width as i64 - 2 * gap;
    let columns = (available + gap).div_euclid(max_card_width as i64 + gap);
    columns.max(1) as usize
}

/// Where one entry of the global sequence lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    /// Column index.
    pub column: usize,
    /// Position within the column.
    pub position: usize,
}

/// Column and position of global index `index`.
pub fn assignment(index: usize, column_count: usize) -> ColumnSlot {
    let column_count = column_count.max(1);
    ColumnSlot {
        column: index % column_count,
        position: index / column_count,
    }
}

/// Global index of a column slot. Inverse of [`assignment`].
pub fn global_index(slot: ColumnSlot, column_count: usize) -> usize {
    slot.position * column_count.max(1) + slot.column
}

/// Deal items round-robin: `columns[i % column_count].push(items[i])`.
pub fn distribute<T: Clone>(items: &[T], column_count: usize) -> Vec<Vec<T>> {
    let column_count = column_count.max(1);
    let mut columns: Vec<Vec<T>> = (0..column_count)
        .map(|_| Vec::with_capacity(items.len() / column_count + 1))
        .collect();
    for (index, item) in items.iter().enumerate() {
        columns[index % column_count].push(item.clone());
    }
    columns
}

/// Rebuild the original sequence from round-robin columns.
pub fn reinterleave<T: Clone>(columns: &[Vec<T>]) -> Vec<T> {
    let total: usize = columns.iter().map(Vec::len).sum();
    let mut items = Vec::with_capacity(total);
    let mut position = 0;
    while items.len() < total {
        for column in columns {
            if let Some(item) = column.get(position) {
                items.push(item.clone());
            }
        }
        position += 1;
    }
    items
}

/// Masonry layout: N virtualized columns sharing one scroll element.
#[derive(Debug, Clone)]
pub struct MasonryLayout {
    options: VirtualizerOptions,
    max_card_width: u32,
    container_width: u32,
    viewport_height: u32,
    scroll_offset: u64,
    entries: Vec<EntryRef>,
    columns: Vec<VirtualColumn>,
}

impl MasonryLayout {
    /// Empty single-column layout.
    pub fn new(max_card_width: u32, options: VirtualizerOptions) -> Self {
        let mut layout = Self {
            options,
            max_card_width,
            container_width: 0,
            viewport_height: 0,
            scroll_offset: 0,
            entries: Vec::new(),
            columns: Vec::new(),
        };
        layout.redistribute();
        layout
    }

    /// Current number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order.
    pub fn columns(&self) -> &[VirtualColumn] {
        &self.columns
    }

    /// The global entry sequence.
    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    /// Width the column count was derived from.
    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    /// Replace the global entry sequence and redistribute.
    pub fn set_entries(&mut self, entries: Vec<EntryRef>) {
        self.entries = entries;
        self.redistribute();
    }

    /// React to an observed container width. Returns `true` when the column count changed.
    pub fn set_container_width(&mut self, width: u32) -> bool {
        self.container_width = width;
        self.redistribute()
    }

    /// Change the configured max card width. Returns `true` when the column count changed.
    pub fn set_max_card_width(&mut self, max_card_width: u32) -> bool {
        self.max_card_width = max_card_width;
        self.redistribute()
    }

    /// Update the shared viewport height.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        for column in &mut self.columns {
            column.virtualizer_mut().set_viewport_height(height);
        }
    }

    /// Report the shared scroll offset to every column.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
        for column in &mut self.columns {
            column.virtualizer_mut().set_scroll_offset(offset);
        }
    }

    /// Scrolling stopped.
    pub fn scroll_ended(&mut self) {
        for column in &mut self.columns {
            column.virtualizer_mut().scroll_ended();
        }
    }

    /// Feed back a measured row height in one column.
    ///
    /// A resulting scroll adjustment moves the shared scroll element, so it is applied to
    /// every column.
    pub fn measure(&mut self, column: usize, index: usize, observed: u32) -> MeasureOutcome {
        let Some(target) = self.columns.get_mut(column) else {
            return MeasureOutcome::OutOfRange;
        };
        let outcome = target.measure(index, observed);
        if let MeasureOutcome::Recorded {
            scroll_adjustment, ..
        } = outcome
        {
            if scroll_adjustment != 0 {
                self.scroll_offset = self.scroll_offset.saturating_add_signed(scroll_adjustment);
                for column in &mut self.columns {
                    column.virtualizer_mut().adjust_scroll(scroll_adjustment);
                }
            }
        }
        outcome
    }

    /// Tallest column height: the scrollable height of the grid.
    pub fn total_size(&self) -> u64 {
        self.columns
            .iter()
            .map(VirtualColumn::total_size)
            .max()
            .unwrap_or(0)
    }

    /// Deal entries to columns. A changed column count rebuilds every column; an unchanged
    /// count hands each column its new share, keeping caches of unchanged columns.
    fn redistribute(&mut self) -> bool {
        let count = column_count(self.container_width, self.max_card_width);
        let changed = count != self.columns.len();
        if changed {
            debug!(
                from = self.columns.len(),
                to = count,
                width = self.container_width,
                "Masonry: column count changed, full redistribution"
            );
            self.columns = (0..count)
                .map(|_| {
                    let mut column = VirtualColumn::new(self.options);
                    let virtualizer = column.virtualizer_mut();
                    virtualizer.set_viewport_height(self.viewport_height);
                    virtualizer.set_scroll_offset(self.scroll_offset);
                    virtualizer.scroll_ended();
                    column
                })
                .collect();
        }

        for (column, share) in self
            .columns
            .iter_mut()
            .zip(distribute(&self.entries, count))
        {
            column.set_entries(share);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentPath, NoteEntry};
    use proptest::prelude::*;

    fn entries(n: usize) -> Vec<EntryRef> {
        (0..n)
            .map(|i| NoteEntry::new(DocumentPath::new(format!("n{i}.md")).unwrap()).into_ref())
            .collect()
    }

    fn titles(column: &VirtualColumn) -> Vec<String> {
        column.entries().iter().map(|e| e.title().to_string()).collect()
    }

    #[test]
    fn column_count_examples() {
        assert_eq!(column_count(0, 400), 1);
        assert_eq!(column_count(399, 400), 1);
        // available 1248 -> (1248 + 16) / 416 = 3.03
        assert_eq!(column_count(1280, 400), 3);
        // available 836 -> (836 + 16) / 416 = 2.04
        assert_eq!(column_count(868, 400), 2);
        assert_eq!(column_count(4000, 200), 18);
    }

    #[test]
    fn distribute_deals_round_robin() {
        let columns = distribute(&[0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(columns, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn distribute_with_more_columns_than_items() {
        let columns = distribute(&[0, 1], 4);
        assert_eq!(columns, vec![vec![0], vec![1], vec![], vec![]]);
    }

    #[test]
    fn assignment_matches_distribute() {
        assert_eq!(assignment(7, 3), ColumnSlot { column: 1, position: 2 });
        assert_eq!(global_index(ColumnSlot { column: 1, position: 2 }, 3), 7);
    }

    #[test]
    fn layout_starts_with_one_column() {
        let layout = MasonryLayout::new(400, VirtualizerOptions::column());
        assert_eq!(layout.column_count(), 1);
    }

    #[test]
    fn width_change_redistributes_fully() {
        let mut layout = MasonryLayout::new(400, VirtualizerOptions::column());
        layout.set_entries(entries(7));
        assert!(layout.set_container_width(1280));
        assert_eq!(layout.column_count(), 3);
        assert_eq!(titles(&layout.columns()[0]), vec!["n0", "n3", "n6"]);
        layout.measure(0, 0, 120);

        assert!(layout.set_container_width(868));
        assert_eq!(layout.column_count(), 2);
        assert_eq!(titles(&layout.columns()[0]), vec!["n0", "n2", "n4", "n6"]);
        assert_eq!(titles(&layout.columns()[1]), vec!["n1", "n3", "n5"]);
        assert_eq!(
            layout.columns()[0].virtualizer().size_cache().measured_count(),
            0,
            "fresh columns start unmeasured"
        );
    }

    #[test]
    fn same_width_keeps_columns() {
        let mut layout = MasonryLayout::new(400, VirtualizerOptions::column());
        layout.set_entries(entries(6));
        layout.set_container_width(1280);
        layout.measure(1, 0, 150);
        assert!(!layout.set_container_width(1290));
        assert_eq!(
            layout.columns()[1].virtualizer().size_cache().measurement(0),
            Some(150)
        );
    }

    #[test]
    fn new_columns_inherit_shared_viewport() {
        let mut layout = MasonryLayout::new(400, VirtualizerOptions::column());
        layout.set_viewport_height(700);
        layout.set_scroll_offset(250);
        layout.set_entries(entries(10));
        layout.set_container_width(1280);
        for column in layout.columns() {
            assert_eq!(column.virtualizer().viewport_height(), 700);
            assert_eq!(column.virtualizer().scroll_offset(), 250);
        }
    }

    #[test]
    fn scroll_adjustment_moves_every_column() {
        let mut layout = MasonryLayout::new(400, VirtualizerOptions::column());
        layout.set_entries(entries(30));
        layout.set_container_width(1280);
        layout.set_scroll_offset(1_000);
        let outcome = layout.measure(2, 0, 330);
        assert!(matches!(
            outcome,
            MeasureOutcome::Recorded {
                scroll_adjustment: 50,
                ..
            }
        ));
        for column in layout.columns() {
            assert_eq!(column.virtualizer().scroll_offset(), 1_050);
        }
    }

    #[test]
    fn total_size_is_tallest_column() {
        let mut layout = MasonryLayout::new(400, VirtualizerOptions::column());
        layout.set_entries(entries(5));
        layout.set_container_width(1280);
        // columns hold 2, 2, 1 entries at 280 each
        assert_eq!(layout.total_size(), 560);
    }

    proptest! {
        #[test]
        fn prop_columns_are_balanced(n in 0usize..200, c in 1usize..12) {
            let items: Vec<usize> = (0..n).collect();
            let columns = distribute(&items, c);
            prop_assert_eq!(columns.len(), c);
            let max = columns.iter().map(Vec::len).max().unwrap_or(0);
            let min = columns.iter().map(Vec::len).min().unwrap_or(0);
            prop_assert!(max - min <= 1);
        }

        #[test]
        fn prop_reinterleave_reconstructs(n in 0usize..200, c in 1usize..12) {
            let items: Vec<usize> = (0..n).collect();
            prop_assert_eq!(reinterleave(&distribute(&items, c)), items);
        }

        #[test]
        fn prop_column_count_is_at_least_one(width in 0u32..10_000, card in 200u32..=800) {
            let count = column_count(width, card);
            prop_assert!(count >= 1);
            if count > 1 {
                let used = count as u32 * card + (count as u32 - 1) * COLUMN_GAP;
                prop_assert!(used <= width.saturating_sub(2 * COLUMN_GAP));
            }
        }
    }
}
