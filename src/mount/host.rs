//! Editor host capabilities.
//!
//! The host application owns documents and their editable views. The feed only asks it to
//! open a document into a fresh surface and to release that surface again.

use futures::future::LocalBoxFuture;

use crate::model::{DocumentPath, HostError};

/// Editing mode requested when opening a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Rendered markdown that stays editable in place.
    #[default]
    LivePreview,
    /// Raw markdown source.
    Source,
}

/// Everything the host needs to open one card's editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    /// Document to open.
    pub document: DocumentPath,
    /// Editing mode. The feed always asks for live preview.
    pub mode: EditMode,
    /// Whether the surface displays the document's properties block.
    pub show_properties: bool,
}

impl OpenRequest {
    /// Live-preview request for `document`.
    pub fn live_preview(document: DocumentPath, show_properties: bool) -> Self {
        Self {
            document,
            mode: EditMode::LivePreview,
            show_properties,
        }
    }
}

/// What kind of view the host produced for an open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceKind {
    /// A markdown editing surface. The only kind a card can embed.
    Markdown,
    /// Any other view, named by the host.
    Other(String),
}

impl SurfaceKind {
    /// Whether a card can embed this surface.
    pub fn is_markdown(&self) -> bool {
        matches!(self, Self::Markdown)
    }
}

/// A live view produced by the host.
pub trait EditorSurface {
    /// Kind of view.
    fn kind(&self) -> SurfaceKind;
}

/// Opens and releases editable surfaces.
///
/// Every surface handed out by [`open`](Self::open) is given back through
/// [`release`](Self::release) exactly once.
pub trait EditorHost {
    /// Surface type produced by this host.
    type Surface: EditorSurface + 'static;

    /// Begin opening a document. The future may settle long after the caller lost interest.
    fn open(&self, request: OpenRequest) -> LocalBoxFuture<'static, Result<Self::Surface, HostError>>;

    /// Give a surface back to the host.
    fn release(&self, surface: Self::Surface) -> Result<(), HostError>;
}
