//! History store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing the history snapshot.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not a valid JSON record array
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store has no backing file
    #[error("History store is in-memory only")]
    NoSnapshotPath,
}

impl HistoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HistoryError::Io {
            path: path.into(),
            source,
        }
    }
}
