//! Error types for report export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A report file could not be created or written.
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Building the zip bundle failed.
    #[error("Zip archive failed: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ExportError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
