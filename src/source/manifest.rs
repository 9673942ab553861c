//! JSONL manifest of notes.
//!
//! Each non-blank line describes one document:
//!
//! ```text
//! {"path": "notes/today.md", "properties": {"rating": 4, "created": "2024-03-01"}}
//! ```
//!
//! Paths are relative to the manifest's directory. Strings that parse as RFC 3339
//! timestamps or `YYYY-MM-DD` dates become date values. Malformed lines are logged and
//! skipped; a missing manifest is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::{ChangeNotifier, EntrySource};
use crate::model::{DocumentPath, EntryRef, NoteEntry, SourceError, Value};
use crate::ordering::SortSpec;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestLine {
    path: String,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

/// Entries loaded from a JSONL manifest.
#[derive(Debug)]
pub struct ManifestSource {
    root: PathBuf,
    entries: Vec<EntryRef>,
    skipped: usize,
    sort: SortSpec,
    notifier: ChangeNotifier,
}

impl ManifestSource {
    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::ManifestNotFound` if the file does not exist.
    /// Returns `SourceError::Io` for other I/O errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SourceError::ManifestNotFound {
                path: path.to_path_buf(),
            },
            _ => SourceError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let source = Self::parse(root, &content);
        info!(
            manifest = %path.display(),
            entries = source.entries.len(),
            skipped = source.skipped,
            "Loaded manifest"
        );
        Ok(source)
    }

    /// Parse manifest content whose paths are relative to `root`.
    pub fn parse(root: PathBuf, content: &str) -> Self {
        let mut entries = Vec::new();
        let mut skipped = 0;
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(index + 1, line) {
                Ok(entry) => entries.push(entry.into_ref()),
                Err(err) => {
                    warn!(error = %err, "Skipping manifest line");
                    skipped += 1;
                }
            }
        }
        Self {
            root,
            entries,
            skipped,
            sort: SortSpec::none(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Use `sort` as the sort specification.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Directory document paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of malformed lines that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl EntrySource for ManifestSource {
    fn entries(&self) -> Option<Vec<EntryRef>> {
        Some(self.entries.clone())
    }

    fn sort_spec(&self) -> SortSpec {
        self.sort.clone()
    }

    fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

/// Parse one manifest line into an entry.
fn parse_line(line: usize, raw: &str) -> Result<NoteEntry, SourceError> {
    let invalid = |reason: String| SourceError::InvalidLine { line, reason };
    let record: ManifestLine = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
    let path = DocumentPath::new(record.path).map_err(|e| invalid(e.to_string()))?;

    let mut entry = NoteEntry::new(path);
    for (property, value) in record.properties {
        entry.set_property(property, convert(value));
    }
    Ok(entry)
}

/// Convert a JSON value into a property value.
fn convert(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => parse_date(&s).map_or(Value::Text(s), Value::Date),
        serde_json::Value::Array(items) => Value::List(items.into_iter().map(convert).collect()),
        object @ serde_json::Value::Object(_) => Value::Text(object.to_string()),
    }
}

/// RFC 3339 timestamp or plain `YYYY-MM-DD` date (midnight UTC).
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
