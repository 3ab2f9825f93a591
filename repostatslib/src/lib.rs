//! # repostatslib
//!
//! Per-file-type line and size statistics for a directory tree.
//!
//! ## Overview
//!
//! A scan walks a directory, drops everything that should not be counted,
//! streams the remaining files to count their lines, and groups the results
//! by lowercase file extension:
//!
//! - **Hidden entries**: any name starting with `.` (pruned when a directory)
//! - **Ignored paths**: patterns from the root `.gitignore`
//! - **Symbolic links**: never followed, never counted
//! - **Binary files**: known binary extensions, or a zero byte in the first
//!   512 bytes
//!
//! For every extension the report holds the file count, total lines, and the
//! min/max of lines and size, alongside grand totals.
//!
//! ## Pipeline
//!
//! 1. [`source`]: ignore rules, glob filters, directory walking
//! 2. [`data`]: binary detection, line counting, aggregation
//! 3. [`output`]: presentation-ready tables
//!
//! The library logs through `tracing` and never installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use repostatslib::{scan, ScanOptions, NO_EXTENSION};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("notes.txt"), "hello\nworld\n").unwrap();
//! fs::write(dir.path().join("README"), "x").unwrap();
//! fs::write(dir.path().join("photo.bin"), b"\x00\x01").unwrap();
//!
//! let report = scan(Some(dir.path()), &ScanOptions::new()).unwrap();
//! assert_eq!(report.total_files, 2);
//! assert_eq!(report.get(".txt").unwrap().total_lines, 2);
//! assert_eq!(report.get(NO_EXTENSION).unwrap().total_lines, 1);
//!
//! // No root at all is reported as its own condition
//! let err = scan(None, &ScanOptions::new()).unwrap_err();
//! assert!(err.is_no_root());
//! ```

pub mod cancellation;
pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use cancellation::ScanCancellation;
pub use data::{
    count_lines, count_lines_in, extension_label, is_binary, measure_file, scan, scan_directory,
    sniff, Aggregator, BinaryExtensions, ExtensionStats, FileMeasure, Report, ScanOptions,
    DEFAULT_BINARY_EXTENSIONS, NEWLINE, NO_EXTENSION, SNIFF_WINDOW,
};
pub use error::ScanError;
pub use output::{status_line, StatsTable, TableRow};
pub use source::{walk, CandidateFile, FilterConfig, IgnoreRules, Walk, DEFAULT_IGNORE_FILE};

/// Result type for repostatslib operations
pub type Result<T> = std::result::Result<T, ScanError>;
