//! Host capabilities handed to the view at construction.

use std::fmt;
use std::rc::Rc;

use futures::task::LocalSpawn;

use crate::mount::{ContextMenuSink, EditorHost, HoverPreviewSink, NavigationSink};

/// Everything the view needs from its host, passed explicitly.
pub struct FeedContext<H: EditorHost> {
    /// Opens and releases editor surfaces.
    pub host: Rc<H>,
    /// Runs editor opens as local tasks.
    pub spawner: Rc<dyn LocalSpawn>,
    /// Opens documents.
    pub navigation: Rc<dyn NavigationSink>,
    /// Shows document context menus.
    pub context_menu: Rc<dyn ContextMenuSink>,
    /// Receives hover-preview notifications.
    pub hover: Rc<dyn HoverPreviewSink>,
}

impl<H: EditorHost> FeedContext<H> {
    /// Bundle a host and spawner with one object serving every sink.
    pub fn new<S>(host: Rc<H>, spawner: Rc<dyn LocalSpawn>, sinks: Rc<S>) -> Self
    where
        S: NavigationSink + ContextMenuSink + HoverPreviewSink + 'static,
    {
        Self {
            host,
            spawner,
            navigation: sinks.clone(),
            context_menu: sinks.clone(),
            hover: sinks,
        }
    }
}

impl<H: EditorHost> Clone for FeedContext<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            spawner: Rc::clone(&self.spawner),
            navigation: Rc::clone(&self.navigation),
            context_menu: Rc::clone(&self.context_menu),
            hover: Rc::clone(&self.hover),
        }
    }
}

impl<H: EditorHost> fmt::Debug for FeedContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedContext").finish_non_exhaustive()
    }
}
