//! Test harness: a scriptable editor host and recording interaction sinks.
//!
//! Opens stay pending until the test resolves them, so tests control exactly when each
//! open settles relative to scrolling and teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::model::{DocumentPath, HostError};
use crate::mount::{
    ContextMenuSink, EditorHost, EditorSurface, HoverPreviewSink, NavigationSink, OpenRequest,
    PointerEvent, SurfaceKind,
};

/// Surface handed out by [`ScriptedHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeSurface {
    pub id: usize,
    pub kind: SurfaceKind,
}

impl EditorSurface for FakeSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind.clone()
    }
}

type Reply = oneshot::Sender<Result<FakeSurface, HostError>>;

/// Host whose opens settle only when the test says so.
#[derive(Default)]
pub struct ScriptedHost {
    requests: RefCell<Vec<OpenRequest>>,
    pending: RefCell<Vec<Option<Reply>>>,
    released: RefCell<Vec<usize>>,
    fail_release: Cell<bool>,
}

impl ScriptedHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Every open request so far, in call order.
    pub fn requests(&self) -> Vec<OpenRequest> {
        self.requests.borrow().clone()
    }

    /// Ids of released surfaces, in release order.
    pub fn released(&self) -> Vec<usize> {
        self.released.borrow().clone()
    }

    /// Make every subsequent release fail.
    pub fn fail_releases(&self) {
        self.fail_release.set(true);
    }

    /// Settle open number `open` with a surface of `kind`. The surface id is `open`.
    pub fn resolve(&self, open: usize, kind: SurfaceKind) {
        self.reply(open, Ok(FakeSurface { id: open, kind }));
    }

    /// Settle open number `open` with a host error.
    pub fn fail(&self, open: usize) {
        let path = self.requests.borrow()[open].document.clone();
        self.reply(
            open,
            Err(HostError::OpenFailed {
                path,
                reason: "scripted failure".to_string(),
            }),
        );
    }

    /// Settle every still-pending open with a markdown surface.
    pub fn resolve_all(&self) {
        let count = self.pending.borrow().len();
        for open in 0..count {
            if self.pending.borrow()[open].is_some() {
                self.resolve(open, SurfaceKind::Markdown);
            }
        }
    }

    fn reply(&self, open: usize, result: Result<FakeSurface, HostError>) {
        let sender = self.pending.borrow_mut()[open]
            .take()
            .expect("open already settled");
        // The receiver is gone only if the open task was dropped unpolled.
        let _ = sender.send(result);
    }
}

impl EditorHost for ScriptedHost {
    type Surface = FakeSurface;

    fn open(&self, request: OpenRequest) -> LocalBoxFuture<'static, Result<FakeSurface, HostError>> {
        let (sender, receiver) = oneshot::channel();
        let path: DocumentPath = request.document.clone();
        self.requests.borrow_mut().push(request);
        self.pending.borrow_mut().push(Some(sender));
        async move {
            receiver.await.unwrap_or_else(|_| {
                Err(HostError::OpenFailed {
                    path,
                    reason: "abandoned".to_string(),
                })
            })
        }
        .boxed_local()
    }

    fn release(&self, surface: FakeSurface) -> Result<(), HostError> {
        self.released.borrow_mut().push(surface.id);
        if self.fail_release.get() {
            return Err(HostError::ReleaseFailed {
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

/// One delivered interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivered {
    Navigate(DocumentPath, bool),
    ContextMenu(DocumentPath),
    Hover(DocumentPath),
}

/// Sink recording every navigation, menu and hover request.
#[derive(Debug, Default)]
pub struct RecordingSinks {
    pub delivered: RefCell<Vec<Delivered>>,
}

impl RecordingSinks {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn delivered(&self) -> Vec<Delivered> {
        self.delivered.borrow().clone()
    }
}

impl NavigationSink for RecordingSinks {
    fn open_link(&self, document: &DocumentPath, new_context: bool) {
        self.delivered
            .borrow_mut()
            .push(Delivered::Navigate(document.clone(), new_context));
    }
}

impl ContextMenuSink for RecordingSinks {
    fn show_for(&self, _event: &PointerEvent, document: &DocumentPath) {
        self.delivered
            .borrow_mut()
            .push(Delivered::ContextMenu(document.clone()));
    }
}

impl HoverPreviewSink for RecordingSinks {
    fn preview(&self, _event: &PointerEvent, document: &DocumentPath) {
        self.delivered
            .borrow_mut()
            .push(Delivered::Hover(document.clone()));
    }
}

/// Document path from a literal.
pub fn doc(path: &str) -> DocumentPath {
    DocumentPath::new(path).expect("non-empty test path")
}
