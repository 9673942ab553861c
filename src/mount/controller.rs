//! Per-row editor lifecycle.
//!
//! An [`EditorMount`] asks the host for a live-preview surface when its row enters the
//! rendered window and gives the surface back when the row leaves. The open is a spawned
//! local task guarded by an alive flag: if the row is gone by the time the open settles,
//! the slot is left alone and the surface goes straight back to the host.
//!
//! Teardown lives in `Drop`, so it runs exactly once whichever way the mount goes away
//! (row scrolled out, sequence replaced, whole view unloaded).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, warn};

use super::host::{EditorHost, EditorSurface, OpenRequest, SurfaceKind};
use super::slot::{EditorSlot, SlotView};
use crate::model::{DocumentPath, HostError};

/// Surface slot shared between a mount and its open task.
type Attached<S> = Rc<RefCell<Option<S>>>;

/// One row's live editor.
pub struct EditorMount<H: EditorHost> {
    document: DocumentPath,
    show_properties: bool,
    slot: EditorSlot,
    alive: Rc<Cell<bool>>,
    attached: Attached<H::Surface>,
    host: Rc<H>,
}

impl<H: EditorHost + 'static> EditorMount<H> {
    /// Start mounting an editor for `document`.
    ///
    /// The slot shows [`SlotView::Loading`] until the spawned open settles. If the task
    /// cannot be spawned the slot shows the load failure message.
    pub fn attach(
        host: Rc<H>,
        spawner: &dyn LocalSpawn,
        document: DocumentPath,
        show_properties: bool,
    ) -> Self {
        let slot = EditorSlot::new();
        slot.set(SlotView::Loading);

        let mount = Self {
            document: document.clone(),
            show_properties,
            slot,
            alive: Rc::new(Cell::new(true)),
            attached: Rc::new(RefCell::new(None)),
            host: Rc::clone(&host),
        };

        debug!(document = %document, show_properties, "Editor mount: opening");
        let open = host.open(OpenRequest::live_preview(document, show_properties));
        let task = settle_open(
            open,
            host,
            mount.slot.clone(),
            Rc::clone(&mount.alive),
            Rc::clone(&mount.attached),
            mount.document.clone(),
        );
        if let Err(err) = spawner.spawn_local(task) {
            warn!(document = %mount.document, error = %err, "Editor mount: could not spawn open");
            mount.slot.show_load_failure();
        }

        mount
    }
}

impl<H: EditorHost> EditorMount<H> {
    /// Document this mount is bound to.
    pub fn document(&self) -> &DocumentPath {
        &self.document
    }

    /// Whether the surface was opened with the properties block visible.
    pub fn show_properties(&self) -> bool {
        self.show_properties
    }

    /// The element the editor lives in.
    pub fn slot(&self) -> &EditorSlot {
        &self.slot
    }

    /// Current slot content.
    pub fn view(&self) -> SlotView {
        self.slot.view()
    }

    /// Whether a markdown surface is attached.
    pub fn has_editor(&self) -> bool {
        self.attached.borrow().is_some()
    }

    /// Whether this mount already shows `document` with the same properties toggle.
    /// A mismatch means the row must be torn down and mounted anew.
    pub fn is_bound_to(&self, document: &DocumentPath, show_properties: bool) -> bool {
        &self.document == document && self.show_properties == show_properties
    }
}

impl<H: EditorHost> Drop for EditorMount<H> {
    fn drop(&mut self) {
        self.alive.set(false);
        self.slot.clear();
        let attached = self.attached.borrow_mut().take();
        if let Some(surface) = attached {
            release_quietly(self.host.as_ref(), surface, &self.document);
        }
        debug!(document = %self.document, "Editor mount: torn down");
    }
}

impl<H: EditorHost> fmt::Debug for EditorMount<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorMount")
            .field("document", &self.document)
            .field("show_properties", &self.show_properties)
            .field("view", &self.slot.view())
            .field("alive", &self.alive.get())
            .finish_non_exhaustive()
    }
}

/// Await the host's open and apply the result, unless the mount is gone.
async fn settle_open<H: EditorHost>(
    open: LocalBoxFuture<'static, Result<H::Surface, HostError>>,
    host: Rc<H>,
    slot: EditorSlot,
    alive: Rc<Cell<bool>>,
    attached: Attached<H::Surface>,
    document: DocumentPath,
) {
    match open.await {
        Ok(surface) if !alive.get() => {
            debug!(document = %document, "Editor mount: open settled after teardown");
            release_quietly(host.as_ref(), surface, &document);
        }
        Ok(surface) => match surface.kind() {
            SurfaceKind::Markdown => {
                *attached.borrow_mut() = Some(surface);
                slot.set(SlotView::Editor);
            }
            SurfaceKind::Other(kind) => {
                warn!(document = %document, kind = %kind, "Editor mount: not a markdown surface");
                slot.show_load_failure();
                release_quietly(host.as_ref(), surface, &document);
            }
        },
        Err(err) if alive.get() => {
            warn!(document = %document, error = %err, "Editor mount: open failed");
            slot.show_load_failure();
        }
        Err(err) => {
            debug!(document = %document, error = %err, "Editor mount: open failed after teardown");
        }
    }
}

/// Release a surface, logging and swallowing any failure.
fn release_quietly<H: EditorHost>(host: &H, surface: H::Surface, document: &DocumentPath) {
    if let Err(err) = host.release(surface) {
        debug!(document = %document, error = %err, "Editor mount: release failed");
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
