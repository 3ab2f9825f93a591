//! Core data structures for per-file-type statistics.
//!
//! Every counted file contributes one `(extension, lines, bytes)` triple.
//! The [`Aggregator`] folds those triples into one [`ExtensionStats`] per
//! extension label plus independent grand totals, and [`Aggregator::finalize`]
//! turns the running state into an immutable [`Report`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Label used for files without an extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// Extension label for a file name: lowercase extension with its leading dot,
/// or [`NO_EXTENSION`].
///
/// `notes.TXT` → `.txt`, `archive.tar.gz` → `.gz`, `README` → `(no extension)`,
/// `trailing.` → `.`.
pub fn extension_label(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => NO_EXTENSION.to_string(),
    }
}

/// Round `total / count` half up. Returns 0 for an empty bucket.
fn rounded_mean(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    let (total, count) = (total as u128, count as u128);
    ((2 * total + count) / (2 * count)) as u64
}

/// Running statistics for one extension bucket.
///
/// Until the first fold the minimums hold `u64::MAX` and the maximums hold
/// `0`; buckets that were never folded are not part of a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    /// Number of files in this bucket
    pub file_count: u64,
    /// Sum of line counts
    pub total_lines: u64,
    /// Sum of file sizes in bytes
    pub total_size_bytes: u64,
    pub min_lines: u64,
    pub max_lines: u64,
    pub min_size_bytes: u64,
    pub max_size_bytes: u64,
}

impl Default for ExtensionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionStats {
    /// Create an empty accumulator with sentinel bounds.
    pub fn new() -> Self {
        Self {
            file_count: 0,
            total_lines: 0,
            total_size_bytes: 0,
            min_lines: u64::MAX,
            max_lines: 0,
            min_size_bytes: u64::MAX,
            max_size_bytes: 0,
        }
    }

    /// Add one file.
    pub fn add(&mut self, lines: u64, size_bytes: u64) {
        self.file_count += 1;
        self.total_lines += lines;
        self.total_size_bytes += size_bytes;
        if lines < self.min_lines {
            self.min_lines = lines;
        }
        if lines > self.max_lines {
            self.max_lines = lines;
        }
        if size_bytes < self.min_size_bytes {
            self.min_size_bytes = size_bytes;
        }
        if size_bytes > self.max_size_bytes {
            self.max_size_bytes = size_bytes;
        }
    }

    /// Combine with another accumulator for the same extension.
    pub fn merge(&mut self, other: &ExtensionStats) {
        self.file_count += other.file_count;
        self.total_lines += other.total_lines;
        self.total_size_bytes += other.total_size_bytes;
        self.min_lines = self.min_lines.min(other.min_lines);
        self.max_lines = self.max_lines.max(other.max_lines);
        self.min_size_bytes = self.min_size_bytes.min(other.min_size_bytes);
        self.max_size_bytes = self.max_size_bytes.max(other.max_size_bytes);
    }

    /// True until the first file has been added.
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Mean line count, rounded half up.
    pub fn average_lines(&self) -> u64 {
        rounded_mean(self.total_lines, self.file_count)
    }

    /// Mean file size in bytes, rounded half up.
    pub fn average_size(&self) -> u64 {
        rounded_mean(self.total_size_bytes, self.file_count)
    }
}

/// Final result of a scan.
///
/// Extension labels are kept sorted so that output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Name of the scanned root directory (last path component).
    pub root_name: String,
    /// Per-extension statistics, sorted by label.
    pub extensions: BTreeMap<String, ExtensionStats>,
    /// Number of files counted, across all extensions.
    pub total_files: u64,
    /// Number of lines counted, across all extensions.
    pub total_lines: u64,
}

impl Report {
    /// Look up the statistics for one extension label.
    pub fn get(&self, label: &str) -> Option<&ExtensionStats> {
        self.extensions.get(label)
    }

    /// True when no file was counted.
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Sum of all bucket sizes in bytes.
    pub fn total_size_bytes(&self) -> u64 {
        self.extensions.values().map(|s| s.total_size_bytes).sum()
    }
}

/// Mutable running state of a scan.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    extensions: HashMap<String, ExtensionStats>,
    total_files: u64,
    total_lines: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one counted file into the running statistics.
    ///
    /// Grand totals are updated separately from the bucket.
    pub fn fold(&mut self, label: &str, lines: u64, size_bytes: u64) {
        match self.extensions.get_mut(label) {
            Some(stats) => stats.add(lines, size_bytes),
            None => {
                let mut stats = ExtensionStats::new();
                stats.add(lines, size_bytes);
                self.extensions.insert(label.to_string(), stats);
            }
        }
        self.total_files += 1;
        self.total_lines += lines;
    }

    /// Merge a partial aggregate (e.g. from another worker) into this one.
    pub fn merge(&mut self, other: Aggregator) {
        for (label, stats) in other.extensions {
            self.extensions
                .entry(label)
                .or_insert_with(ExtensionStats::new)
                .merge(&stats);
        }
        self.total_files += other.total_files;
        self.total_lines += other.total_lines;
    }

    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    /// Freeze the running state into a [`Report`].
    pub fn finalize(self, root_name: impl Into<String>) -> Report {
        Report {
            root_name: root_name.into(),
            extensions: self
                .extensions
                .into_iter()
                .filter(|(_, stats)| !stats.is_empty())
                .collect(),
            total_files: self.total_files,
            total_lines: self.total_lines,
        }
    }
}
