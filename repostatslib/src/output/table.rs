//! Table-ready data structures for report output.
//!
//! This module provides `StatsTable`, a presentation-ready view of a
//! [`Report`] that can be rendered directly or serialized to JSON.
//!
//! The data flow is:
//! 1. Report (per-extension numbers)
//! 2. StatsTable (formatted strings for display)
//!
//! StatsTable only formats; it never filters or re-sorts. Rows keep the
//! report's label order.

use serde::{Deserialize, Serialize};

use crate::data::stats::{ExtensionStats, Report};

/// Column headers, in display order.
pub const HEADERS: [&str; 9] = [
    "Filetype",
    "Files",
    "Total LOC",
    "Min LOC",
    "Avg LOC",
    "Max LOC",
    "Min Size (B)",
    "Avg Size (B)",
    "Max Size (B)",
];

/// A single row in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Extension label
    pub label: String,
    /// Values for every numeric column (as strings, ready for display)
    pub values: Vec<String>,
}

/// Table-ready statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTable {
    /// Name of the scanned root
    pub title: String,
    /// Column headers, label column first
    pub headers: Vec<String>,
    /// One row per extension
    pub rows: Vec<TableRow>,
    /// Summary line (`Repo Stats: N files, M lines`)
    pub summary: String,
}

impl StatsTable {
    /// Create a table from a finished report.
    pub fn from_report(report: &Report) -> Self {
        let rows = report
            .extensions
            .iter()
            .map(|(label, stats)| TableRow {
                label: label.clone(),
                values: format_stats(stats),
            })
            .collect();

        StatsTable {
            title: report.root_name.clone(),
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
            summary: status_line(report),
        }
    }

    /// Width of each column, wide enough for header and values.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            if let Some(w) = widths.first_mut() {
                *w = (*w).max(row.label.len());
            }
            for (w, value) in widths.iter_mut().skip(1).zip(&row.values) {
                *w = (*w).max(value.len());
            }
        }
        widths
    }
}

/// Short one-line summary of a report.
pub fn status_line(report: &Report) -> String {
    format!(
        "Repo Stats: {} files, {} lines",
        report.total_files, report.total_lines
    )
}

/// Numeric cells in header order (everything after the label).
fn format_stats(stats: &ExtensionStats) -> Vec<String> {
    [
        stats.file_count,
        stats.total_lines,
        stats.min_lines,
        stats.average_lines(),
        stats.max_lines,
        stats.min_size_bytes,
        stats.average_size(),
        stats.max_size_bytes,
    ]
    .iter()
    .map(|v| v.to_string())
    .collect()
}
