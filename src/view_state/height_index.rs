//! HeightIndex - O(log n) prefix sums and lower_bound via Fenwick tree
//!
//! Provides efficient operations for computing cumulative item offsets and finding
//! item indices by vertical offset (scroll position).
//!
//! # Complexity
//!
//! - `from_sizes`: O(n log n)
//! - `set`: O(log n)
//! - `prefix_sum` / `start_of`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `total`: O(log n)
//! - `len`: O(1)

/// HeightIndex wraps a Fenwick tree for O(log n) prefix sum queries and updates.
///
/// The tree is sized exactly to the item count; a sequence of a different length gets a
/// new index.
#[derive(Debug, Clone)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (1-indexed internally, but we expose 0-indexed API)
    tree: Vec<isize>,
}

impl HeightIndex {
    /// Builds an index over the given item sizes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use notefeed::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_sizes([10, 20, 15]);
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.total(), 45);
    /// ```
    pub fn from_sizes(sizes: impl IntoIterator<Item = u32>) -> Self {
        let sizes: Vec<u32> = sizes.into_iter().collect();
        let mut tree = vec![0isize; sizes.len()];
        for (index, &size) in sizes.iter().enumerate() {
            if size != 0 {
                fenwick::array::update(&mut tree, index, size as isize);
            }
        }
        Self { tree }
    }

    /// Builds an index of `len` items that all have the same size.
    pub fn filled(len: usize, size: u32) -> Self {
        Self::from_sizes(std::iter::repeat(size).take(len))
    }

    /// Sets the size at the given index.
    ///
    /// Computes the delta from the current size and updates the Fenwick tree.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use notefeed::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::filled(3, 5);
    /// index.set(1, 10);
    /// assert_eq!(index.prefix_sum(1), 15);
    /// ```
    pub fn set(&mut self, index: usize, size: u32) {
        let current = self.get(index);
        let delta = size as isize - current as isize;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Size of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> u32 {
        let upto = self.prefix_sum(index);
        let before = self.start_of(index);
        (upto - before) as u32
    }

    /// Returns the cumulative size up to and including the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use notefeed::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_sizes([3, 4, 5]);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> u64 {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let sum = fenwick::array::prefix_sum(&self.tree, index);
        sum.max(0) as u64
    }

    /// Offset at which the item at `index` starts: the sum of all sizes before it.
    ///
    /// `start_of(len())` is the total.
    pub fn start_of(&self, index: usize) -> u64 {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Binary search for the first index where `prefix_sum(index) > value`.
    ///
    /// Returns the index of the item containing the given vertical offset.
    ///
    /// # Returns
    ///
    /// - `Some(index)` if there exists an index where `prefix_sum(index) > value`
    /// - `None` if `value >= total()` or the index is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use notefeed::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_sizes([10, 20, 15]);
    ///
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), Some(2));
    /// assert_eq!(index.lower_bound(100), None);
    /// ```
    pub fn lower_bound(&self, value: u64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        // Item i covers range [prefix_sum(i-1), prefix_sum(i))
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        if left >= self.len() {
            None
        } else {
            Some(left)
        }
    }

    /// Returns the total cumulative size of all items.
    pub fn total(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Returns the number of items in the index.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the index contains no items.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
