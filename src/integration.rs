//! Headless driver integration.
//!
//! Runs a [`FeedView`] against documents on disk: a filesystem-backed editor host, logging
//! interaction sinks and a single-threaded executor. The binary uses it to replay a scroll
//! session and print every frame.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, info};

use crate::model::{AppError, DocumentPath, HostError, MARKDOWN_EXTENSION};
use crate::mount::{
    ContextMenuSink, EditorHost, EditorSurface, HoverPreviewSink, NavigationSink, OpenRequest,
    PointerEvent, SlotView, SurfaceKind,
};
use crate::source::EntrySource;
use crate::state::{FeedContext, FeedFrame, FeedOptions, FeedView, RowTarget};
use crate::view_state::MeasureOutcome;

/// Fixed chrome of a card around its text: title bar and padding.
pub const CARD_CHROME: u32 = 48;

/// Height of one rendered text line.
pub const LINE_HEIGHT: u32 = 20;

/// Measurement passes per settle before giving up on convergence.
const MAX_SETTLE_PASSES: usize = 8;

/// Height a card needs to show `content` without scrolling.
pub fn card_height(content: &str) -> u32 {
    let lines = u32::try_from(content.lines().count().max(1)).unwrap_or(u32::MAX);
    CARD_CHROME.saturating_add(lines.saturating_mul(LINE_HEIGHT))
}

/// A document loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSurface {
    document: DocumentPath,
    kind: SurfaceKind,
    height: u32,
}

impl FileSurface {
    /// Document shown by this surface.
    pub fn document(&self) -> &DocumentPath {
        &self.document
    }

    /// Rendered content height.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl EditorSurface for FileSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind.clone()
    }
}

/// Editor host that opens documents from a root directory.
#[derive(Debug)]
pub struct FileEditorHost {
    root: PathBuf,
    live: Rc<Cell<usize>>,
    heights: Rc<RefCell<HashMap<DocumentPath, u32>>>,
}

impl FileEditorHost {
    /// Host resolving document paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            live: Rc::new(Cell::new(0)),
            heights: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Directory documents are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Surfaces opened and not yet released.
    pub fn live_surfaces(&self) -> usize {
        self.live.get()
    }

    /// Content height of a document that has been opened at least once.
    pub fn content_height(&self, document: &DocumentPath) -> Option<u32> {
        self.heights.borrow().get(document).copied()
    }
}

impl EditorHost for FileEditorHost {
    type Surface = FileSurface;

    fn open(&self, request: OpenRequest) -> LocalBoxFuture<'static, Result<FileSurface, HostError>> {
        let path = self.root.join(request.document.as_str());
        let live = Rc::clone(&self.live);
        let heights = Rc::clone(&self.heights);

        async move {
            let document = request.document;
            let content = std::fs::read_to_string(&path).map_err(|e| HostError::OpenFailed {
                path: document.clone(),
                reason: e.to_string(),
            })?;

            let kind = match document.extension() {
                MARKDOWN_EXTENSION => SurfaceKind::Markdown,
                other => SurfaceKind::Other(other.to_string()),
            };
            let height = card_height(&content);
            heights.borrow_mut().insert(document.clone(), height);
            live.set(live.get() + 1);
            debug!(document = %document, height, "Opened document");

            Ok(FileSurface {
                document,
                kind,
                height,
            })
        }
        .boxed_local()
    }

    fn release(&self, surface: FileSurface) -> Result<(), HostError> {
        self.live.set(self.live.get().saturating_sub(1));
        debug!(document = %surface.document, "Released document");
        Ok(())
    }
}

/// Interaction sinks that only log what they receive.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSinks;

impl NavigationSink for LoggingSinks {
    fn open_link(&self, document: &DocumentPath, new_context: bool) {
        info!(document = %document, new_context, "Open document");
    }
}

impl ContextMenuSink for LoggingSinks {
    fn show_for(&self, pointer: &PointerEvent, document: &DocumentPath) {
        info!(document = %document, x = pointer.x, y = pointer.y, "Context menu");
    }
}

impl HoverPreviewSink for LoggingSinks {
    fn preview(&self, pointer: &PointerEvent, document: &DocumentPath) {
        debug!(document = %document, x = pointer.x, y = pointer.y, "Hover preview");
    }
}

/// Geometry and scroll positions replayed by [`run_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSession {
    /// Container width in pixels.
    pub container_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Scroll offsets visited in order, after the initial frame at the top.
    pub offsets: Vec<u64>,
}

/// A feed wired to files on disk and a local executor.
pub struct Driver {
    view: FeedView<FileEditorHost>,
    host: Rc<FileEditorHost>,
    pool: LocalPool,
}

impl Driver {
    /// Driver opening documents below `root`.
    pub fn new(root: impl Into<PathBuf>, options: FeedOptions) -> Self {
        let pool = LocalPool::new();
        let host = Rc::new(FileEditorHost::new(root));
        let context = FeedContext::new(
            Rc::clone(&host),
            Rc::new(pool.spawner()),
            Rc::new(LoggingSinks),
        );
        Self {
            view: FeedView::new(context, options),
            host,
            pool,
        }
    }

    /// The feed.
    pub fn view(&self) -> &FeedView<FileEditorHost> {
        &self.view
    }

    /// The feed, mutably.
    pub fn view_mut(&mut self) -> &mut FeedView<FileEditorHost> {
        &mut self.view
    }

    /// The editor host.
    pub fn host(&self) -> &FileEditorHost {
        &self.host
    }

    /// Apply container geometry.
    pub fn resize(&mut self, width: u32, viewport_height: u32) {
        self.view.set_container_width(width);
        self.view.set_viewport(viewport_height);
        self.settle();
    }

    /// Feed a new collection to the view.
    pub fn load(&mut self, source: &dyn EntrySource) {
        self.view.on_data_updated(source);
        self.settle();
    }

    /// Load `source` and keep listening for its changes.
    pub fn watch(&mut self, source: &dyn EntrySource) {
        self.view.watch(source);
        self.settle();
    }

    /// Reload the watched `source` if it changed. Returns whether a reload happened.
    pub fn sync(&mut self, source: &dyn EntrySource) -> bool {
        let changed = self.view.sync(source);
        if changed {
            self.settle();
        }
        changed
    }

    /// Scroll and let the result settle.
    pub fn scroll_to(&mut self, offset: u64) {
        self.view.scroll_to(offset);
        self.settle();
    }

    /// Run pending opens and report content heights until the layout stops moving.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_PASSES {
            self.pool.run_until_stalled();

            let pending: Vec<(RowTarget, u32)> = self
                .view
                .render()
                .rows()
                .into_iter()
                .filter(|row| row.slot == SlotView::Editor)
                .filter_map(|row| {
                    let height = self.host.content_height(&row.document)?;
                    (height != row.size).then_some((row.target, height))
                })
                .collect();
            if pending.is_empty() {
                return;
            }

            let mut moved = false;
            for (target, height) in pending {
                moved |= matches!(
                    self.view.measure(target, height),
                    MeasureOutcome::Recorded { .. }
                );
            }
            if !moved {
                return;
            }
        }
        debug!("Layout did not converge within the settle budget");
    }

    /// Current frame.
    pub fn frame(&self) -> FeedFrame {
        self.view.render()
    }

    /// Tear the feed down, let in-flight opens settle, and return the surfaces still live.
    pub fn shutdown(self) -> usize {
        let Self {
            view,
            host,
            mut pool,
        } = self;
        drop(view);
        pool.run_until_stalled();
        host.live_surfaces()
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("view", &self.view)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Replay `session` over `source` and write every frame to `out`.
///
/// # Errors
///
/// Returns `AppError::Output` if writing a frame fails.
pub fn run_session<W: Write>(
    driver: &mut Driver,
    source: &dyn EntrySource,
    session: &ScrollSession,
    out: &mut W,
) -> Result<(), AppError> {
    driver.resize(session.container_width, session.viewport_height);
    driver.watch(source);
    write_frame(out, 0, &driver.frame())?;

    for &offset in &session.offsets {
        driver.sync(source);
        driver.scroll_to(offset);
        write_frame(out, driver.view().scroll_offset(), &driver.frame())?;
    }
    driver.view_mut().scroll_ended();
    driver.view_mut().unwatch(source);

    info!(
        frames = session.offsets.len() + 1,
        mounts = driver.view().mount_count(),
        "Session replayed"
    );
    Ok(())
}

fn write_frame<W: Write>(out: &mut W, offset: u64, frame: &FeedFrame) -> Result<(), AppError> {
    writeln!(out, "== offset {offset} ==")?;
    write!(out, "{frame}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteEntry;
    use crate::source::{ManifestSource, MemorySource};
    use futures::executor::block_on;
    use std::fs;

    fn doc(path: &str) -> DocumentPath {
        DocumentPath::new(path).unwrap()
    }

    /// Fresh directory under the system temp dir holding `files`.
    fn fixture(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("notefeed_integration_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for (path, content) in files {
            fs::write(dir.join(path), content).unwrap();
        }
        dir
    }

    fn manifest(root: &Path, paths: &[&str]) -> ManifestSource {
        let content: String = paths
            .iter()
            .map(|p| format!("{{\"path\":\"{p}\"}}\n"))
            .collect();
        ManifestSource::parse(root.to_path_buf(), &content)
    }

    #[test]
    fn card_height_counts_lines() {
        assert_eq!(card_height(""), CARD_CHROME + LINE_HEIGHT);
        assert_eq!(card_height("one\ntwo\nthree"), CARD_CHROME + 3 * LINE_HEIGHT);
    }

    #[test]
    fn host_opens_markdown_and_tracks_live_surfaces() {
        let root = fixture("host_open", &[("a.md", "# A\nbody")]);
        let host = FileEditorHost::new(&root);

        let surface = block_on(host.open(OpenRequest::live_preview(doc("a.md"), false))).unwrap();
        assert_eq!(surface.kind(), SurfaceKind::Markdown);
        assert_eq!(surface.height(), CARD_CHROME + 2 * LINE_HEIGHT);
        assert_eq!(host.live_surfaces(), 1);
        assert_eq!(host.content_height(&doc("a.md")), Some(surface.height()));

        host.release(surface).unwrap();
        assert_eq!(host.live_surfaces(), 0);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn host_reports_other_kind_for_non_markdown() {
        let root = fixture("host_other", &[("data.csv", "a,b")]);
        let host = FileEditorHost::new(&root);

        let surface =
            block_on(host.open(OpenRequest::live_preview(doc("data.csv"), false))).unwrap();
        assert_eq!(surface.kind(), SurfaceKind::Other("csv".to_string()));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn host_fails_to_open_missing_file() {
        let root = fixture("host_missing", &[]);
        let host = FileEditorHost::new(&root);

        let result = block_on(host.open(OpenRequest::live_preview(doc("gone.md"), false)));
        assert!(matches!(result, Err(HostError::OpenFailed { .. })));
        assert_eq!(host.live_surfaces(), 0);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn driver_mounts_and_measures_visible_cards() {
        let root = fixture(
            "driver_measure",
            &[("a.md", "one"), ("b.md", "one\ntwo"), ("c.md", "one\ntwo\nthree")],
        );
        let source = manifest(&root, &["c.md", "a.md", "b.md"]);
        let mut driver = Driver::new(&root, FeedOptions::default());
        driver.resize(800, 600);
        driver.load(&source);

        let frame = driver.frame();
        let rows = frame.rows();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert!(rows.iter().all(|r| r.slot == SlotView::Editor));
        let sizes: Vec<u32> = rows.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![68, 88, 108]);
        assert_eq!(frame.total_height(), 68 + 88 + 108);

        assert_eq!(driver.shutdown(), 0);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn driver_shows_inline_error_for_unreadable_note() {
        let root = fixture("driver_error", &[("a.md", "one")]);
        let source = manifest(&root, &["a.md", "missing.md"]);
        let mut driver = Driver::new(&root, FeedOptions::default());
        driver.resize(800, 600);
        driver.load(&source);

        let frame = driver.frame();
        let missing = frame
            .rows()
            .into_iter()
            .find(|r| r.title == "missing")
            .cloned()
            .unwrap();
        assert!(matches!(missing.slot, SlotView::Error(_)));

        assert_eq!(driver.shutdown(), 0);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn driver_reloads_watched_source_after_change() {
        let root = fixture("driver_watch", &[("a.md", "one"), ("b.md", "one\ntwo")]);
        let source = MemorySource::new(vec![NoteEntry::new(doc("a.md")).into_ref()]);
        let mut driver = Driver::new(&root, FeedOptions::default());
        driver.resize(800, 600);
        driver.watch(&source);
        assert_eq!(driver.frame().rows().len(), 1);
        assert!(!driver.sync(&source));

        source.set_entries(vec![
            NoteEntry::new(doc("b.md")).into_ref(),
            NoteEntry::new(doc("a.md")).into_ref(),
        ]);
        assert!(driver.sync(&source));

        let frame = driver.frame();
        let rows = frame.rows();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(rows[1].size, 88);

        assert_eq!(driver.shutdown(), 0);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn shutdown_releases_surfaces_still_opening() {
        let root = fixture("driver_shutdown", &[("a.md", "one")]);
        let source = manifest(&root, &["a.md"]);
        let mut driver = Driver::new(&root, FeedOptions::default());
        driver.view_mut().set_viewport(600);
        // Opens are spawned but the pool has not run yet.
        driver.view_mut().on_data_updated(&source);

        assert_eq!(driver.shutdown(), 0);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn run_session_writes_each_frame() {
        let root = fixture("driver_session", &[("a.md", "one"), ("b.md", "two")]);
        let source = manifest(&root, &["a.md", "b.md"]);
        let mut driver = Driver::new(&root, FeedOptions::default());
        let session = ScrollSession {
            container_width: 800,
            viewport_height: 400,
            offsets: vec![0, 40],
        };

        let mut out = Vec::new();
        run_session(&mut driver, &source, &session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("== offset").count(), 3);
        assert!(text.contains("feed"));
        assert!(text.contains("a (a.md) [editor]"));

        driver.shutdown();
        let _ = fs::remove_dir_all(root);
    }
}
