//! Visible range calculation result

/// Range of item indices rendered for the current viewport.
///
/// Computed via binary search on cumulative offsets, then widened by overscan.
///
/// # Invariants
/// - `start_index <= end_index`
/// - `end_index <= count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of first rendered item (inclusive).
    pub start_index: usize,
    /// Index one past the last rendered item (exclusive).
    pub end_index: usize,
}

impl VisibleRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if start_index > end_index.
    pub fn new(start_index: usize, end_index: usize) -> Self {
        debug_assert!(
            start_index <= end_index,
            "start_index {} > end_index {}",
            start_index,
            end_index
        );
        Self {
            start_index,
            end_index,
        }
    }

    /// Number of items in range.
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Iterate over item indices in range.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start_index..self.end_index
    }

    /// Check if a specific index is in range.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Widen by `before` items at the start and `after` items at the end, clamped to
    /// `[0, count)`.
    pub fn widen(&self, before: usize, after: usize, count: usize) -> Self {
        Self::new(
            self.start_index.saturating_sub(before),
            self.end_index.saturating_add(after).min(count),
        )
    }
}
