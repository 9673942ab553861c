//! Error types for notefeed.
//!
//! This module defines the error taxonomy using `thiserror` for structured error handling.
//! Errors compose via `?` and `From` conversions up to [`AppError`], which is only used by
//! the headless driver binary.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level driver error wrapping all fatal failures
//!   - [`SourceError`] - Entry manifest reading failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup failures
//! - [`HostError`] - Editor host failures (never fatal, never propagated past a row)
//! - [`PropertyError`] - Property accessor failures (never fatal, read as null)
//!
//! # Error Recovery Strategy
//!
//! Failures inside the feed are **localized to a single row**. A document that fails to open
//! shows an inline error in its own card; a surface that fails to release is logged and
//! forgotten; a property that cannot be read sorts as null. Nothing in one row affects
//! sibling rows, scrolling, or the rest of the list.

use std::path::PathBuf;
use thiserror::Error;

use super::identifiers::{DocumentPath, PropertyId};

/// Top-level driver error encompassing all fatal failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// The entry manifest could not be loaded.
    #[error("Failed to load entries: {0}")]
    Source(#[from] SourceError),

    /// The configuration file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Writing a frame to the output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Failures reported by an [`EditorHost`](crate::mount::EditorHost).
///
/// # Recovery
///
/// - **OpenFailed**: the row shows an inline error, no retry.
/// - **ReleaseFailed**: logged at debug level and swallowed; teardown always completes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host could not open the document into an editable surface.
    #[error("Failed to open {path}: {reason}")]
    OpenFailed {
        /// Document that was being opened.
        path: DocumentPath,
        /// Host-provided failure description.
        reason: String,
    },

    /// The host raised while detaching a surface.
    #[error("Failed to release editor surface: {reason}")]
    ReleaseFailed {
        /// Host-provided failure description.
        reason: String,
    },
}

/// A property accessor raised instead of producing a value.
///
/// The ordering policy treats this as a null value for the affected entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to read property {property}: {reason}")]
pub struct PropertyError {
    /// Property that was being read.
    pub property: PropertyId,
    /// Accessor-provided failure description.
    pub reason: String,
}

/// Errors encountered when loading an entry manifest.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The manifest file does not exist.
    #[error("Manifest not found: {path}")]
    ManifestNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Generic I/O failure while reading the manifest.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The manifest path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A manifest line is not a valid entry record.
    ///
    /// Non-fatal: the line is logged and skipped.
    #[error("Invalid manifest line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number.
        line: usize,
        /// Parse failure description.
        reason: String,
    },
}
