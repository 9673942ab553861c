//! Size cache: measured item heights with estimate fallback.
//!
//! Owned by exactly one [`Virtualizer`](super::virtualizer::Virtualizer). Every offset,
//! row size and the total size are read from the same [`HeightIndex`], so a render pass
//! always sees one consistent snapshot.

use super::height_index::HeightIndex;

/// Per-index measured heights plus the prefix-sum index over best-known sizes.
///
/// # Invariants
/// - `measured.len() == sizes.len()`
/// - `sizes.get(i) == measured[i].unwrap_or(estimate)`
#[derive(Debug, Clone)]
pub struct SizeCache {
    measured: Vec<Option<u32>>,
    sizes: HeightIndex,
    estimate: u32,
}

impl SizeCache {
    /// Cache for `count` unmeasured items, all at the estimated size.
    pub fn new(count: usize, estimate: u32) -> Self {
        Self {
            measured: vec![None; count],
            sizes: HeightIndex::filled(count, estimate),
            estimate,
        }
    }

    /// Number of items covered.
    pub fn len(&self) -> usize {
        self.measured.len()
    }

    /// Whether the cache covers no items.
    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }

    /// Estimated size used for unmeasured items.
    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Last recorded measurement, if the item has been measured.
    pub fn measurement(&self, index: usize) -> Option<u32> {
        self.measured.get(index).copied().flatten()
    }

    /// Number of items with a real measurement.
    pub fn measured_count(&self) -> usize {
        self.measured.iter().filter(|m| m.is_some()).count()
    }

    /// Measured size, or the estimate when unmeasured.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn best_known(&self, index: usize) -> u32 {
        self.sizes.get(index)
    }

    /// Record a measurement. Returns the previous best-known size.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn record(&mut self, index: usize, size: u32) -> u32 {
        let previous = self.sizes.get(index);
        self.measured[index] = Some(size);
        self.sizes.set(index, size);
        previous
    }

    /// Offset of the first pixel of item `index`. `start(len())` is the total.
    pub fn start(&self, index: usize) -> u64 {
        self.sizes.start_of(index)
    }

    /// Index of the item covering `offset`, or `None` past the end.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        self.sizes.lower_bound(offset)
    }

    /// Sum of all best-known sizes.
    pub fn total(&self) -> u64 {
        self.sizes.total()
    }
}
