//! Data collection: classify files, count lines, collect statistics.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Binary detection**: extension deny list plus a 512-byte sniff
//! - **Line counting**: streaming `\n` counter
//! - **Statistics**: `ExtensionStats`, `Aggregator` and the final `Report`
//! - **Scanning**: High-level API (`scan`, `scan_directory`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::data::{scan_directory, ScanOptions};
//!
//! let report = scan_directory(".", &ScanOptions::new())?;
//! println!("Total lines: {}", report.total_lines);
//! ```

pub mod binary;
pub mod lines;
pub mod scanner;
pub mod stats;

pub use binary::{is_binary, sniff, BinaryExtensions, DEFAULT_BINARY_EXTENSIONS, SNIFF_WINDOW};
pub use lines::{count_lines, count_lines_in, NEWLINE};
pub use scanner::{measure_file, scan, scan_directory, FileMeasure, ScanOptions};
pub use stats::{extension_label, Aggregator, ExtensionStats, Report, NO_EXTENSION};
