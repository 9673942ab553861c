//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod entry;
pub mod error;
pub mod identifiers;
pub mod value;

// Re-export for convenience
pub use entry::{is_markdown, Entry, EntryRef, NoteEntry, MARKDOWN_EXTENSION};
pub use error::{AppError, HostError, PropertyError, SourceError};
pub use identifiers::{DocumentPath, InvalidDocumentPath, InvalidPropertyId, PropertyId};
pub use value::{SortKey, Value};
