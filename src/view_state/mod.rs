//! View-state layer - virtualization, measurement and column layout
//!
//! Everything here is headless: the host reports geometry and measured heights, and reads
//! back which rows to render at which offsets.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (ScrollDirection, SequenceId, ViewportDimensions)
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `size_cache`: SizeCache - measured heights over an estimate
//! - `visible_range`: VisibleRange - result of visible range calculation
//! - `virtualizer`: Virtualizer - windowing and the measurement feedback loop
//! - `column`: VirtualColumn - one entry sequence plus its virtualizer
//! - `masonry`: MasonryLayout - round-robin columns sharing one scroll element

pub mod column;
pub mod height_index;
pub mod masonry;
pub mod size_cache;
pub mod types;
pub mod virtualizer;
pub mod visible_range;

pub use column::VirtualColumn;
pub use masonry::MasonryLayout;
pub use types::{ScrollDirection, SequenceId, ViewportDimensions};
pub use virtualizer::{MeasureOutcome, VirtualRow, Virtualizer, VirtualizerOptions};
pub use visible_range::VisibleRange;
