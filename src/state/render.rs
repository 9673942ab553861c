//! Render tree produced by the feed view.
//!
//! A frame is a snapshot: the host paints it, then reports geometry and measurements back.

use std::fmt;

use crate::model::DocumentPath;
use crate::mount::SlotView;

/// Empty-state message when the query produced no data at all.
pub const NO_DATA_MESSAGE: &str = "No entries to display";

/// Empty-state message when the data holds no markdown notes.
pub const NO_NOTES_MESSAGE: &str = "No notes to display";

/// Address of one row: column and position within the column.
///
/// The single feed is column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowTarget {
    /// Column index.
    pub column: usize,
    /// Position within the column.
    pub index: usize,
}

impl RowTarget {
    /// Row `index` of column `column`.
    pub fn new(column: usize, index: usize) -> Self {
        Self { column, index }
    }
}

/// One card.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFrame {
    /// Row address, for measurements and interactions.
    pub target: RowTarget,
    /// Offset from the top of the column.
    pub start: u64,
    /// Best-known height.
    pub size: u32,
    /// Card title.
    pub title: String,
    /// Document shown by the card.
    pub document: DocumentPath,
    /// Editor slot content.
    pub slot: SlotView,
}

/// One virtualized column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnFrame {
    /// Scrollable height of the column.
    pub total_height: u64,
    /// Rendered rows, top to bottom.
    pub rows: Vec<RowFrame>,
}

/// The whole view.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedFrame {
    /// No data received yet.
    Loading,
    /// A single empty-state node.
    Empty {
        /// Text of the empty-state node.
        message: String,
    },
    /// Single-column feed.
    Feed(ColumnFrame),
    /// Masonry grid.
    Masonry {
        /// Number of columns.
        column_count: usize,
        /// Columns, left to right.
        columns: Vec<ColumnFrame>,
    },
}

impl FeedFrame {
    /// Every rendered row, column by column.
    pub fn rows(&self) -> Vec<&RowFrame> {
        match self {
            Self::Loading | Self::Empty { .. } => Vec::new(),
            Self::Feed(column) => column.rows.iter().collect(),
            Self::Masonry { columns, .. } => columns.iter().flat_map(|c| c.rows.iter()).collect(),
        }
    }

    /// Scrollable height: the tallest column.
    pub fn total_height(&self) -> u64 {
        match self {
            Self::Loading | Self::Empty { .. } => 0,
            Self::Feed(column) => column.total_height,
            Self::Masonry { columns, .. } => {
                columns.iter().map(|c| c.total_height).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for ColumnFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  height {}px, {} rows", self.total_height, self.rows.len())?;
        for row in &self.rows {
            writeln!(
                f,
                "  [{:>4}] {:>7}px +{:<4} {} ({}) [{}]",
                row.target.index, row.start, row.size, row.title, row.document, row.slot
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for FeedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "(loading)"),
            Self::Empty { message } => writeln!(f, "{message}"),
            Self::Feed(column) => {
                writeln!(f, "feed")?;
                write!(f, "{column}")
            }
            Self::Masonry {
                column_count,
                columns,
            } => {
                writeln!(f, "masonry, {column_count} columns")?;
                for (index, column) in columns.iter().enumerate() {
                    writeln!(f, " column {index}")?;
                    write!(f, "{column}")?;
                }
                Ok(())
            }
        }
    }
}
