//! The element a card's editor is mounted into.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Inline message shown when a card cannot host an editor.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load markdown editor";

/// What an editor slot currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotView {
    /// Nothing mounted.
    #[default]
    Empty,
    /// Open in flight.
    Loading,
    /// A live editor is attached.
    Editor,
    /// Inline error message.
    Error(String),
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotView::Empty => write!(f, "-"),
            SlotView::Loading => write!(f, "loading"),
            SlotView::Editor => write!(f, "editor"),
            SlotView::Error(message) => write!(f, "error: {message}"),
        }
    }
}

#[derive(Debug, Default)]
struct SlotState {
    view: SlotView,
    revision: u64,
}

/// Shared handle to one card's editor element.
///
/// Clones refer to the same element. Every write bumps the revision, so observers can
/// tell whether anything touched the element.
#[derive(Debug, Clone, Default)]
pub struct EditorSlot {
    state: Rc<RefCell<SlotState>>,
}

impl EditorSlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn view(&self) -> SlotView {
        self.state.borrow().view.clone()
    }

    /// Number of writes so far.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Replace the content.
    pub fn set(&self, view: SlotView) {
        let mut state = self.state.borrow_mut();
        state.view = view;
        state.revision += 1;
    }

    /// Remove all content.
    pub fn clear(&self) {
        self.set(SlotView::Empty);
    }

    /// Replace the content with the load failure message.
    pub fn show_load_failure(&self) {
        self.set(SlotView::Error(LOAD_FAILED_MESSAGE.to_string()));
    }
}
