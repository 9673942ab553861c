//! Item lifecycle: live editors mounted into visible rows, and row interaction routing.

pub mod controller;
pub mod host;
pub mod interaction;
pub mod slot;

pub use controller::EditorMount;
pub use host::{EditMode, EditorHost, EditorSurface, OpenRequest, SurfaceKind};
pub use interaction::{
    route, ContextMenuSink, HoverPreviewSink, Intent, Modifiers, NavigationSink, PointerButton,
    PointerEvent, RowEvent, RowPart,
};
pub use slot::{EditorSlot, SlotView, LOAD_FAILED_MESSAGE};
