//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

/// Vault-relative path of a document. Stable identity of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Smart constructor: validates non-empty path.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidDocumentPath> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidDocumentPath::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without directories and without the final extension.
    ///
    /// `notes/Daily 2024.md` has basename `Daily 2024`. A leading dot is part of
    /// the name, so `.hidden` keeps its full name.
    pub fn basename(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }

    /// Extension after the final dot of the file name, empty when there is none.
    pub fn extension(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => "",
            Some(dot) => &name[dot + 1..],
        }
    }

    fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an entry property (e.g. `note.status`, `file.mtime`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyId(String);

impl PropertyId {
    /// Smart constructor: validates non-empty property ID.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidPropertyId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidPropertyId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw property ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Error Types =====

/// Rejected document path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDocumentPath {
    /// Path was empty or whitespace.
    #[error("Document path cannot be empty")]
    Empty,
}

/// Rejected property ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPropertyId {
    /// Property ID was empty or whitespace.
    #[error("Property ID cannot be empty")]
    Empty,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_path_rejects_empty() {
        assert_eq!(DocumentPath::new(""), Err(InvalidDocumentPath::Empty));
        assert_eq!(DocumentPath::new("   "), Err(InvalidDocumentPath::Empty));
    }

    #[test]
    fn document_path_basename_strips_directories_and_extension() {
        let path = DocumentPath::new("notes/daily/2024-01-01.md").unwrap();
        assert_eq!(path.basename(), "2024-01-01");
        assert_eq!(path.extension(), "md");
    }

    #[test]
    fn document_path_keeps_inner_dots_in_basename() {
        let path = DocumentPath::new("v1.2 release.notes.md").unwrap();
        assert_eq!(path.basename(), "v1.2 release.notes");
        assert_eq!(path.extension(), "md");
    }

    #[test]
    fn document_path_without_extension() {
        let path = DocumentPath::new("inbox/README").unwrap();
        assert_eq!(path.basename(), "README");
        assert_eq!(path.extension(), "");
    }

    #[test]
    fn document_path_dotfile_has_no_extension() {
        let path = DocumentPath::new(".obsidian").unwrap();
        assert_eq!(path.basename(), ".obsidian");
        assert_eq!(path.extension(), "");
    }

    #[test]
    fn document_path_display_is_raw_path() {
        let path = DocumentPath::new("a/b.md").unwrap();
        assert_eq!(path.to_string(), "a/b.md");
    }

    #[test]
    fn property_id_rejects_empty() {
        assert_eq!(PropertyId::new(""), Err(InvalidPropertyId::Empty));
        assert_eq!(PropertyId::new("note.status").unwrap().as_str(), "note.status");
    }
}
