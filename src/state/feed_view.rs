//! Feed view: the composition root.
//!
//! Owns the ordered entries, the active layout and one editor mount per rendered row.
//! Every input that can move the rendered window ends with mount reconciliation, so the
//! set of live editors always equals the set of rendered rows.
//!
//! # State Machine
//!
//! - **Loading**: no data received yet (also after `unload`)
//! - **Empty**: data unavailable, or no eligible notes
//! - **Populated**: at least one note laid out

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use super::context::FeedContext;
use super::options::FeedOptions;
use super::render::{
    ColumnFrame, FeedFrame, RowFrame, RowTarget, NO_DATA_MESSAGE, NO_NOTES_MESSAGE,
};
use crate::model::{DocumentPath, EntryRef};
use crate::mount::{route, EditorHost, EditorMount, Intent, RowEvent, SlotView};
use crate::ordering::order_entries;
use crate::source::{EntrySource, SourceWatch};
use crate::view_state::{
    MasonryLayout, MeasureOutcome, VirtualColumn, ViewportDimensions,
};

/// Why the view shows its empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The source has no data.
    NoData,
    /// The data holds no markdown notes.
    NoNotes,
}

impl EmptyReason {
    /// Text of the empty-state node.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoData => NO_DATA_MESSAGE,
            Self::NoNotes => NO_NOTES_MESSAGE,
        }
    }
}

/// Lifecycle state of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// Waiting for the first data update.
    Loading,
    /// Showing the empty-state node.
    Empty(EmptyReason),
    /// Showing cards.
    Populated,
}

/// Active layout.
#[derive(Debug)]
enum Layout {
    Feed(VirtualColumn),
    Masonry(MasonryLayout),
}

impl Layout {
    fn build(options: &FeedOptions, viewport: ViewportDimensions, scroll_offset: u64) -> Self {
        let mut layout = if options.multiple_columns {
            let mut masonry = MasonryLayout::new(options.max_card_width, options.tuning.column());
            masonry.set_container_width(viewport.width);
            Self::Masonry(masonry)
        } else {
            Self::Feed(VirtualColumn::new(options.tuning.feed()))
        };
        layout.set_viewport_height(viewport.height);
        layout.set_scroll_offset(scroll_offset);
        layout.scroll_ended();
        layout
    }

    fn columns(&self) -> &[VirtualColumn] {
        match self {
            Self::Feed(column) => std::slice::from_ref(column),
            Self::Masonry(masonry) => masonry.columns(),
        }
    }

    fn set_entries(&mut self, entries: Vec<EntryRef>) {
        match self {
            Self::Feed(column) => {
                column.set_entries(entries);
            }
            Self::Masonry(masonry) => masonry.set_entries(entries),
        }
    }

    fn set_viewport_height(&mut self, height: u32) {
        match self {
            Self::Feed(column) => column.virtualizer_mut().set_viewport_height(height),
            Self::Masonry(masonry) => masonry.set_viewport_height(height),
        }
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        match self {
            Self::Feed(column) => column.virtualizer_mut().set_scroll_offset(offset),
            Self::Masonry(masonry) => masonry.set_scroll_offset(offset),
        }
    }

    fn scroll_ended(&mut self) {
        match self {
            Self::Feed(column) => column.virtualizer_mut().scroll_ended(),
            Self::Masonry(masonry) => masonry.scroll_ended(),
        }
    }

    /// Record a measurement and apply any resulting scroll adjustment to every column.
    fn measure(&mut self, target: RowTarget, observed: u32) -> MeasureOutcome {
        match self {
            Self::Feed(column) if target.column == 0 => {
                let outcome = column.measure(target.index, observed);
                if let MeasureOutcome::Recorded {
                    scroll_adjustment, ..
                } = outcome
                {
                    column.virtualizer_mut().adjust_scroll(scroll_adjustment);
                }
                outcome
            }
            Self::Feed(_) => MeasureOutcome::OutOfRange,
            Self::Masonry(masonry) => masonry.measure(target.column, target.index, observed),
        }
    }
}

/// The composition root of the feed.
#[derive(Debug)]
pub struct FeedView<H: EditorHost + 'static> {
    context: FeedContext<H>,
    options: FeedOptions,
    state: FeedState,
    entries: Vec<EntryRef>,
    layout: Layout,
    viewport: ViewportDimensions,
    scroll_offset: u64,
    mounts: HashMap<RowTarget, EditorMount<H>>,
    watch: Option<SourceWatch>,
}

impl<H: EditorHost + 'static> FeedView<H> {
    /// A view in the loading state.
    pub fn new(context: FeedContext<H>, options: FeedOptions) -> Self {
        let options = options.normalized();
        let viewport = ViewportDimensions::default();
        Self {
            layout: Layout::build(&options, viewport, 0),
            context,
            options,
            state: FeedState::Loading,
            entries: Vec::new(),
            viewport,
            scroll_offset: 0,
            mounts: HashMap::new(),
            watch: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FeedState {
        self.state
    }

    /// Current options.
    pub fn options(&self) -> FeedOptions {
        self.options
    }

    /// The ordered entry sequence.
    pub fn entries(&self) -> &[EntryRef] {
        &self.entries
    }

    /// Scroll offset of the shared scroll element, including applied adjustments.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Scrollable height of the current layout.
    pub fn total_height(&self) -> u64 {
        if self.state != FeedState::Populated {
            return 0;
        }
        match &self.layout {
            Layout::Feed(column) => column.total_size(),
            Layout::Masonry(masonry) => masonry.total_size(),
        }
    }

    /// Number of live editor mounts.
    pub fn mount_count(&self) -> usize {
        self.mounts.len()
    }

    /// The mount of one row, if rendered.
    pub fn mount(&self, target: RowTarget) -> Option<&EditorMount<H>> {
        self.mounts.get(&target)
    }

    /// Addresses of rows holding a mount, sorted.
    pub fn mounted_targets(&self) -> Vec<RowTarget> {
        let mut targets: Vec<RowTarget> = self.mounts.keys().copied().collect();
        targets.sort();
        targets
    }

    /// Pull entries and sort from `source` and re-render.
    ///
    /// Unchanged entries in unchanged order keep their sizes, scroll position and mounts.
    pub fn on_data_updated(&mut self, source: &dyn EntrySource) {
        let Some(raw) = source.entries() else {
            self.teardown();
            self.state = FeedState::Empty(EmptyReason::NoData);
            info!("Feed: data unavailable");
            return;
        };

        let total = raw.len();
        let ordered = order_entries(raw, &source.sort_spec());
        debug!(total, eligible = ordered.len(), "Feed: data updated");

        self.state = if ordered.is_empty() {
            FeedState::Empty(EmptyReason::NoNotes)
        } else {
            FeedState::Populated
        };
        self.entries = ordered;
        self.layout.set_entries(self.entries.clone());
        self.reconcile();
    }

    /// Render `source` and subscribe to its change notifications.
    ///
    /// Changes are picked up by [`FeedView::sync`]. Switching sources needs
    /// [`FeedView::unwatch`] on the old one first, or its listener stays registered.
    pub fn watch(&mut self, source: &dyn EntrySource) {
        self.watch = Some(SourceWatch::attach(source));
        self.on_data_updated(source);
    }

    /// Re-render from the watched `source` if it notified since the last sync.
    pub fn sync(&mut self, source: &dyn EntrySource) -> bool {
        let changed = self.watch.as_ref().is_some_and(SourceWatch::take_changed);
        if changed {
            debug!("Feed: source changed");
            self.on_data_updated(source);
        }
        changed
    }

    /// Stop listening to `source`. Returns `false` if nothing was watched.
    pub fn unwatch(&mut self, source: &dyn EntrySource) -> bool {
        self.watch
            .take()
            .is_some_and(|watch| watch.detach(source))
    }

    /// Apply new options. Layout mode or tuning changes rebuild the layout; a properties
    /// toggle remounts every editor.
    pub fn set_options(&mut self, options: FeedOptions) {
        let options = options.normalized();
        if options == self.options {
            return;
        }
        let previous = std::mem::replace(&mut self.options, options);

        if previous.multiple_columns != options.multiple_columns
            || previous.tuning != options.tuning
        {
            debug!(multiple_columns = options.multiple_columns, "Feed: rebuilding layout");
            self.mounts.clear();
            self.layout = Layout::build(&options, self.viewport, self.scroll_offset);
            self.layout.set_entries(self.entries.clone());
        } else if previous.max_card_width != options.max_card_width {
            if let Layout::Masonry(masonry) = &mut self.layout {
                masonry.set_max_card_width(options.max_card_width);
            }
        }
        self.reconcile();
    }

    /// Observed width of the feed container.
    pub fn set_container_width(&mut self, width: u32) {
        self.viewport.width = width;
        if let Layout::Masonry(masonry) = &mut self.layout {
            if masonry.set_container_width(width) {
                info!(columns = masonry.column_count(), width, "Feed: masonry columns changed");
            }
        }
        self.reconcile();
    }

    /// Visible height of the scroll element.
    pub fn set_viewport(&mut self, height: u32) {
        self.viewport.height = height;
        self.layout.set_viewport_height(height);
        self.reconcile();
    }

    /// The scroll element moved to `offset`.
    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset;
        self.layout.set_scroll_offset(offset);
        self.reconcile();
    }

    /// Scrolling stopped.
    pub fn scroll_ended(&mut self) {
        self.layout.scroll_ended();
    }

    /// Report a card's measured height.
    ///
    /// A `Recorded` outcome with a non-zero scroll adjustment has already been applied to
    /// the view's offset; the host moves its scroll element by the same amount.
    pub fn measure(&mut self, target: RowTarget, observed: u32) -> MeasureOutcome {
        let outcome = self.layout.measure(target, observed);
        if let MeasureOutcome::Recorded {
            scroll_adjustment, ..
        } = outcome
        {
            self.scroll_offset = self.scroll_offset.saturating_add_signed(scroll_adjustment);
            self.reconcile();
        }
        outcome
    }

    /// Route a card interaction to the host's sinks. Returns the delivered intent.
    pub fn dispatch(&self, target: RowTarget, event: &RowEvent) -> Option<Intent> {
        let document = self.document_at(target)?;
        let intent = route(event, document)?;
        match &intent {
            Intent::Navigate {
                document,
                new_context,
            } => self.context.navigation.open_link(document, *new_context),
            Intent::ContextMenu { document, pointer } => {
                self.context.context_menu.show_for(pointer, document)
            }
            Intent::HoverPreview { document, pointer } => {
                self.context.hover.preview(pointer, document)
            }
        }
        Some(intent)
    }

    /// Current render tree.
    pub fn render(&self) -> FeedFrame {
        match self.state {
            FeedState::Loading => FeedFrame::Loading,
            FeedState::Empty(reason) => FeedFrame::Empty {
                message: reason.message().to_string(),
            },
            FeedState::Populated => match &self.layout {
                Layout::Feed(column) => FeedFrame::Feed(self.column_frame(0, column)),
                Layout::Masonry(masonry) => FeedFrame::Masonry {
                    column_count: masonry.column_count(),
                    columns: masonry
                        .columns()
                        .iter()
                        .enumerate()
                        .map(|(index, column)| self.column_frame(index, column))
                        .collect(),
                },
            },
        }
    }

    /// Tear down every mount and forget the entries. The view returns to loading.
    pub fn unload(&mut self) {
        self.teardown();
        self.state = FeedState::Loading;
        debug!("Feed: unloaded");
    }

    fn document_at(&self, target: RowTarget) -> Option<&DocumentPath> {
        self.layout
            .columns()
            .get(target.column)?
            .entry(target.index)
            .map(|entry| entry.path())
    }

    fn column_frame(&self, column_index: usize, column: &VirtualColumn) -> ColumnFrame {
        ColumnFrame {
            total_height: column.total_size(),
            rows: column
                .rows()
                .into_iter()
                .map(|(row, entry)| {
                    let target = RowTarget::new(column_index, row.index);
                    RowFrame {
                        target,
                        start: row.start,
                        size: row.size,
                        title: entry.title().to_string(),
                        document: entry.path().clone(),
                        slot: self
                            .mounts
                            .get(&target)
                            .map_or(SlotView::Empty, EditorMount::view),
                    }
                })
                .collect(),
        }
    }

    /// Drop mounts whose row left the window or changed identity, then mount new rows.
    fn reconcile(&mut self) {
        let show_properties = self.options.show_properties;
        let wanted: BTreeMap<RowTarget, DocumentPath> = if self.state == FeedState::Populated {
            self.layout
                .columns()
                .iter()
                .enumerate()
                .flat_map(|(column_index, column)| {
                    column.rows().into_iter().map(move |(row, entry)| {
                        (RowTarget::new(column_index, row.index), entry.path().clone())
                    })
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        let before = self.mounts.len();
        self.mounts.retain(|target, mount| {
            wanted
                .get(target)
                .is_some_and(|document| mount.is_bound_to(document, show_properties))
        });
        let dropped = before - self.mounts.len();

        let mut created = 0;
        for (target, document) in wanted {
            if self.mounts.contains_key(&target) {
                continue;
            }
            let mount = EditorMount::attach(
                std::rc::Rc::clone(&self.context.host),
                self.context.spawner.as_ref(),
                document,
                show_properties,
            );
            self.mounts.insert(target, mount);
            created += 1;
        }

        if dropped > 0 || created > 0 {
            debug!(dropped, created, live = self.mounts.len(), "Feed: mounts reconciled");
        }
    }

    fn teardown(&mut self) {
        self.mounts.clear();
        self.entries.clear();
        self.layout = Layout::build(&self.options, self.viewport, self.scroll_offset);
    }
}

#[cfg(test)]
#[path = "feed_view_tests.rs"]
mod tests;
