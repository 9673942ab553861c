//! Virtualizer - visible window, offsets and measurement feedback for one item sequence.
//!
//! The virtualizer is headless: the host reports viewport geometry, scroll offsets and
//! measured heights, and reads back the rows to render. It never holds UI objects.
//!
//! # Anti-jitter measurement rule
//!
//! While scrolling toward later indices (or before a direction is established) every
//! measurement is recorded, so heights are corrected forward. While scrolling toward
//! earlier indices, an index that already has a cached measurement keeps it, even when the
//! host now observes a different height. Re-measuring rows above the viewport while
//! scrolling up shifts everything below them, which reads as stutter.

use tracing::trace;

use super::size_cache::SizeCache;
use super::types::{ScrollDirection, SequenceId};
use super::visible_range::VisibleRange;

/// Estimated card height for unmeasured rows, in pixels.
pub const DEFAULT_ESTIMATED_SIZE: u32 = 280;

/// Overscan for the single-column feed.
pub const FEED_OVERSCAN: usize = 8;

/// Overscan per masonry column. Smaller, since several columns render at once.
pub const COLUMN_OVERSCAN: usize = 5;

/// Fixed per-instance configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualizerOptions {
    /// Size assumed for rows that were never measured.
    pub estimate_size: u32,
    /// Extra rows rendered beyond each edge of the viewport.
    pub overscan: usize,
}

impl VirtualizerOptions {
    /// Options for the single-column feed.
    pub fn feed() -> Self {
        Self {
            estimate_size: DEFAULT_ESTIMATED_SIZE,
            overscan: FEED_OVERSCAN,
        }
    }

    /// Options for one masonry column.
    pub fn column() -> Self {
        Self {
            estimate_size: DEFAULT_ESTIMATED_SIZE,
            overscan: COLUMN_OVERSCAN,
        }
    }
}

impl Default for VirtualizerOptions {
    fn default() -> Self {
        Self::feed()
    }
}

/// One rendered row: `{index, key, start, size}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualRow {
    /// Position in the sequence.
    pub index: usize,
    /// Render key. Rows are keyed by index.
    pub key: usize,
    /// Offset of the row's first pixel from the top of the list.
    pub start: u64,
    /// Best-known size (measured, or the estimate).
    pub size: u32,
}

impl VirtualRow {
    /// Offset one past the row's last pixel.
    pub fn end(&self) -> u64 {
        self.start + self.size as u64
    }
}

/// Result of feeding one measurement back into the virtualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureOutcome {
    /// The observed size was stored.
    Recorded {
        /// Best-known size before this measurement.
        previous: u32,
        /// Newly stored size.
        size: u32,
        /// Pixels the shared scroll element should move to keep content anchored.
        /// Non-zero only when a row starting above the scroll offset changed size.
        scroll_adjustment: i64,
    },
    /// The observed size equals the cached measurement.
    Unchanged,
    /// Scrolling backward over a cached row: the cached size was kept.
    Retained {
        /// The size that stays in effect.
        cached: u32,
    },
    /// No such index in the current sequence.
    OutOfRange,
}

/// A headless virtualization engine for one ordered item sequence.
#[derive(Debug, Clone)]
pub struct Virtualizer {
    options: VirtualizerOptions,
    cache: SizeCache,
    identity: Option<SequenceId>,
    viewport_height: u32,
    scroll_offset: u64,
    direction: Option<ScrollDirection>,
}

impl Virtualizer {
    /// Creates an empty virtualizer.
    pub fn new(options: VirtualizerOptions) -> Self {
        Self {
            cache: SizeCache::new(0, options.estimate_size),
            options,
            identity: None,
            viewport_height: 0,
            scroll_offset: 0,
            direction: None,
        }
    }

    /// Instance configuration.
    pub fn options(&self) -> VirtualizerOptions {
        self.options
    }

    /// Adopt an item sequence.
    ///
    /// The size cache survives when `identity` and `count` match the current sequence;
    /// otherwise every size resets to the estimate. Returns `true` when the cache was reset.
    pub fn set_sequence(&mut self, count: usize, identity: SequenceId) -> bool {
        if self.identity == Some(identity) && self.cache.len() == count {
            return false;
        }
        trace!(count, identity = identity.get(), "Virtualizer: new sequence, size cache reset");
        self.cache = SizeCache::new(count, self.options.estimate_size);
        self.identity = Some(identity);
        true
    }

    /// Number of items in the sequence.
    pub fn count(&self) -> usize {
        self.cache.len()
    }

    /// Visible height of the scroll element.
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Update the visible height of the scroll element.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
    }

    /// Current scroll offset of the shared scroll element.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Report a new scroll offset. Updates the scroll direction when the offset moved.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        if let Some(direction) = ScrollDirection::between(self.scroll_offset, offset) {
            self.direction = Some(direction);
        }
        self.scroll_offset = offset;
    }

    /// Shift the scroll offset without touching the scroll direction.
    ///
    /// Used when the scroll element moves to compensate a size change above the viewport.
    pub fn adjust_scroll(&mut self, delta: i64) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    /// Scrolling stopped; the direction is no longer established.
    pub fn scroll_ended(&mut self) {
        self.direction = None;
    }

    /// Direction of the current scroll gesture, if established.
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Read access to the size cache.
    pub fn size_cache(&self) -> &SizeCache {
        &self.cache
    }

    /// Items intersecting `[scroll_offset, scroll_offset + viewport_height)`, no overscan.
    ///
    /// A zero-height viewport still yields the row at the scroll offset. An offset past
    /// the end clamps to the last row.
    pub fn visible_range(&self) -> VisibleRange {
        let count = self.count();
        if count == 0 {
            return VisibleRange::default();
        }

        let start = self
            .cache
            .index_at(self.scroll_offset)
            .unwrap_or(count - 1);
        let bottom = self.scroll_offset + self.viewport_height as u64;
        let end = match self.cache.index_at(bottom) {
            Some(index) if self.cache.start(index) == bottom => index,
            Some(index) => index + 1,
            None => count,
        };

        VisibleRange::new(start, end.max(start + 1))
    }

    /// The visible range widened by overscan on both sides.
    pub fn range(&self) -> VisibleRange {
        let overscan = self.options.overscan;
        self.visible_range().widen(overscan, overscan, self.count())
    }

    /// Rows to render, all read from one cache snapshot.
    pub fn virtual_rows(&self) -> Vec<VirtualRow> {
        self.range()
            .indices()
            .map(|index| VirtualRow {
                index,
                key: index,
                start: self.cache.start(index),
                size: self.cache.best_known(index),
            })
            .collect()
    }

    /// Sum of all best-known sizes: the scrollable height of the list.
    pub fn total_size(&self) -> u64 {
        self.cache.total()
    }

    /// Feed back the observed height of a rendered row.
    ///
    /// The returned scroll adjustment is not applied here; the owner applies it to every
    /// virtualizer sharing the scroll element via [`adjust_scroll`](Self::adjust_scroll).
    pub fn measure(&mut self, index: usize, observed: u32) -> MeasureOutcome {
        if index >= self.count() {
            return MeasureOutcome::OutOfRange;
        }

        let cached = self.cache.measurement(index);
        if self.direction == Some(ScrollDirection::Backward) {
            if let Some(cached) = cached {
                return MeasureOutcome::Retained { cached };
            }
        }
        if cached == Some(observed) {
            return MeasureOutcome::Unchanged;
        }

        let previous = self.cache.record(index, observed);
        let delta = observed as i64 - previous as i64;
        let scroll_adjustment = if delta != 0 && self.cache.start(index) < self.scroll_offset {
            delta
        } else {
            0
        };
        trace!(index, previous, observed, scroll_adjustment, "Virtualizer: measurement recorded");

        MeasureOutcome::Recorded {
            previous,
            size: observed,
            scroll_adjustment,
        }
    }
}

#[cfg(test)]
#[path = "virtualizer_tests.rs"]
mod tests;
