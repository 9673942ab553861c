//! View composition root.
//!
//! `FeedView` ties the ordering policy, the layouts and the editor mounts together and
//! exposes the render tree the host paints.

pub mod context;
pub mod feed_view;
pub mod options;
pub mod render;

// Re-export for convenience
pub use context::FeedContext;
pub use feed_view::{EmptyReason, FeedState, FeedView};
pub use options::{clamp_card_width, FeedOptions, LayoutTuning};
pub use render::{ColumnFrame, FeedFrame, RowFrame, RowTarget, NO_DATA_MESSAGE, NO_NOTES_MESSAGE};
