//! Error types for repostatslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a scan.
///
/// Per-file problems (unreadable files, metadata failures, binary content)
/// never show up here: those files are skipped and left out of the report.
#[derive(Error, Debug)]
pub enum ScanError {
    /// No root directory was supplied
    #[error("no root directory available")]
    NoRoot,

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Root is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to read a directory during the walk
    #[error("failed to read directory '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// Scan was cancelled before it finished
    #[error("scan cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// True for the "nothing to scan" condition, as opposed to a failure.
    pub fn is_no_root(&self) -> bool {
        matches!(self, ScanError::NoRoot)
    }
}
