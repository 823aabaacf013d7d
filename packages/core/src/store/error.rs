//! Store Error Types
//!
//! Only persistence can fail. Lookups of unknown ids are not errors; they
//! return `None`, `false` or [`UpdateOutcome::NotFound`](crate::services::UpdateOutcome).

use std::path::PathBuf;
use thiserror::Error;

/// Save/load errors
///
/// A failed load never mutates the store, so every variant is
/// recoverable: the caller may retry, pick another file, or tell the user.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The data file does not exist
    #[error("Data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Reading, writing, renaming or creating directories failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON
    #[error("Failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Valid JSON, but not shaped like a store document
    #[error("Invalid data file {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// The path has no file name component to write next to
    #[error("Invalid data file path: {path}")]
    InvalidPath { path: PathBuf },

    /// Encoding the in-memory store failed
    #[error("Failed to serialize store: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No explicit path was given and the platform has no data directory
    #[error("Cannot determine a per-user data directory")]
    NoDataDirectory,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_document(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// `io::ErrorKind::NotFound` becomes [`StoreError::FileNotFound`]
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
