//! User-facing view options.

use crate::view_state::masonry::DEFAULT_MAX_CARD_WIDTH;
use crate::view_state::virtualizer::{
    VirtualizerOptions, COLUMN_OVERSCAN, DEFAULT_ESTIMATED_SIZE, FEED_OVERSCAN,
};

/// Smallest allowed max card width, in pixels.
pub const MIN_CARD_WIDTH: u32 = 200;

/// Largest allowed max card width, in pixels.
pub const MAX_CARD_WIDTH: u32 = 800;

/// Step the max card width snaps to, in pixels.
pub const CARD_WIDTH_STEP: u32 = 10;

/// Clamp a max card width into range and snap it to the nearest step.
///
/// # Examples
///
/// ```
/// # use notefeed::state::options::clamp_card_width;
/// assert_eq!(clamp_card_width(50), 200);
/// assert_eq!(clamp_card_width(404), 400);
/// assert_eq!(clamp_card_width(405), 410);
/// assert_eq!(clamp_card_width(9000), 800);
/// ```
pub fn clamp_card_width(width: u32) -> u32 {
    let clamped = width.clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
    (clamped + CARD_WIDTH_STEP / 2) / CARD_WIDTH_STEP * CARD_WIDTH_STEP
}

/// Virtualizer tuning shared by every layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTuning {
    /// Height assumed for unmeasured cards.
    pub estimate_size: u32,
    /// Overscan of the single-column feed.
    pub feed_overscan: usize,
    /// Overscan of each masonry column.
    pub column_overscan: usize,
}

impl LayoutTuning {
    /// Options for the single-column feed.
    pub fn feed(&self) -> VirtualizerOptions {
        VirtualizerOptions {
            estimate_size: self.estimate_size,
            overscan: self.feed_overscan,
        }
    }

    /// Options for one masonry column.
    pub fn column(&self) -> VirtualizerOptions {
        VirtualizerOptions {
            estimate_size: self.estimate_size,
            overscan: self.column_overscan,
        }
    }
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            estimate_size: DEFAULT_ESTIMATED_SIZE,
            feed_overscan: FEED_OVERSCAN,
            column_overscan: COLUMN_OVERSCAN,
        }
    }
}

/// Options the user can change while the view is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// Show each document's properties block inside its editor.
    pub show_properties: bool,
    /// Masonry layout instead of a single feed.
    pub multiple_columns: bool,
    /// Max card width in masonry mode. Normalized with [`clamp_card_width`].
    pub max_card_width: u32,
    /// Virtualizer tuning.
    pub tuning: LayoutTuning,
}

impl FeedOptions {
    /// The same options with the card width clamped and snapped.
    pub fn normalized(self) -> Self {
        Self {
            max_card_width: clamp_card_width(self.max_card_width),
            ..self
        }
    }
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            show_properties: false,
            multiple_columns: false,
            max_card_width: DEFAULT_MAX_CARD_WIDTH,
            tuning: LayoutTuning::default(),
        }
    }
}
