//! Entries: one document shown as one card.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::error::PropertyError;
use super::identifiers::{DocumentPath, PropertyId};
use super::value::Value;

/// Extension of documents the feed can display.
pub const MARKDOWN_EXTENSION: &str = "md";

/// One document exposed by the host's query engine.
///
/// Implementors only need `path` and `value`; title and extension derive from the path.
pub trait Entry: fmt::Debug {
    /// Stable identity of the underlying document.
    fn path(&self) -> &DocumentPath;

    /// Display title. Defaults to the file basename.
    fn title(&self) -> &str {
        self.path().basename()
    }

    /// File extension without the dot.
    fn extension(&self) -> &str {
        self.path().extension()
    }

    /// Read a property value. Missing properties are `Ok(Value::Null)`.
    fn value(&self, property: &PropertyId) -> Result<Value, PropertyError>;
}

/// Shared handle to an entry. The feed is single-threaded, so `Rc` suffices.
pub type EntryRef = Rc<dyn Entry>;

/// Whether the entry is a markdown document the feed can mount an editor for.
pub fn is_markdown(entry: &dyn Entry) -> bool {
    entry.extension() == MARKDOWN_EXTENSION
}

/// Plain in-memory entry backed by a property map.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry {
    path: DocumentPath,
    properties: HashMap<String, Value>,
}

impl NoteEntry {
    /// Create an entry with no properties.
    pub fn new(path: DocumentPath) -> Self {
        Self {
            path,
            properties: HashMap::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Set or replace a property value.
    pub fn set_property(&mut self, property: impl Into<String>, value: Value) {
        self.properties.insert(property.into(), value);
    }

    /// Wrap into a shared [`EntryRef`].
    pub fn into_ref(self) -> EntryRef {
        Rc::new(self)
    }
}

impl Entry for NoteEntry {
    fn path(&self) -> &DocumentPath {
        &self.path
    }

    fn value(&self, property: &PropertyId) -> Result<Value, PropertyError> {
        Ok(self
            .properties
            .get(property.as_str())
            .cloned()
            .unwrap_or(Value::Null))
    }
}
