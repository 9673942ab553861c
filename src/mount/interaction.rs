//! Row interaction routing.
//!
//! Pointer events on a card are mapped to intents without touching any state; the
//! composition root delivers intents to the host's sinks.

use crate::model::DocumentPath;

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Usually the right button.
    Secondary,
    /// Wheel button.
    Middle,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Command / super key.
    pub meta: bool,
    /// Shift key.
    pub shift: bool,
    /// Alt / option key.
    pub alt: bool,
}

impl Modifiers {
    /// Ctrl or cmd: the platform "open elsewhere" modifier.
    pub fn is_mod(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A pointer event as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Button involved.
    pub button: PointerButton,
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Viewport x coordinate.
    pub x: f64,
    /// Viewport y coordinate.
    pub y: f64,
}

impl PointerEvent {
    /// Event at the origin with `button` and no modifiers.
    pub fn button(button: PointerButton) -> Self {
        Self {
            button,
            ..Self::default()
        }
    }

    /// Same event with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Part of a card an event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPart {
    /// The title link.
    Title,
    /// The editor body and card chrome.
    Body,
}

/// Interaction on one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowEvent {
    /// A button was clicked.
    Click {
        /// Where.
        part: RowPart,
        /// The pointer event.
        pointer: PointerEvent,
    },
    /// The pointer entered a part.
    Enter {
        /// Where.
        part: RowPart,
        /// The pointer event.
        pointer: PointerEvent,
    },
}

/// What the host should do in response to a row event.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Open the document, in place or in a new context.
    Navigate {
        /// Target document.
        document: DocumentPath,
        /// Whether to open a new tab/pane instead of replacing the current one.
        new_context: bool,
    },
    /// Show the document's context menu.
    ContextMenu {
        /// Target document.
        document: DocumentPath,
        /// Triggering event, for menu placement.
        pointer: PointerEvent,
    },
    /// Offer a hover preview of the document.
    HoverPreview {
        /// Target document.
        document: DocumentPath,
        /// Triggering event, for preview placement.
        pointer: PointerEvent,
    },
}

/// Map a row event to an intent. Clicks inside the editor body belong to the editor.
pub fn route(event: &RowEvent, document: &DocumentPath) -> Option<Intent> {
    match *event {
        RowEvent::Click { pointer, .. } if pointer.button == PointerButton::Secondary => {
            Some(Intent::ContextMenu {
                document: document.clone(),
                pointer,
            })
        }
        RowEvent::Click {
            part: RowPart::Title,
            pointer,
        } if pointer.button == PointerButton::Primary => Some(Intent::Navigate {
            document: document.clone(),
            new_context: pointer.modifiers.is_mod(),
        }),
        RowEvent::Enter {
            part: RowPart::Title,
            pointer,
        } => Some(Intent::HoverPreview {
            document: document.clone(),
            pointer,
        }),
        _ => None,
    }
}

/// Opens documents.
pub trait NavigationSink {
    /// Open `document`, in a new context when `new_context` is set.
    fn open_link(&self, document: &DocumentPath, new_context: bool);
}

/// Shows the host's context menu for a document.
pub trait ContextMenuSink {
    /// Show the menu for `document` at `event`.
    fn show_for(&self, event: &PointerEvent, document: &DocumentPath);
}

/// Receives hover-preview notifications.
pub trait HoverPreviewSink {
    /// The pointer entered the title of `document`.
    fn preview(&self, event: &PointerEvent, document: &DocumentPath);
}
