//! Output formatting: present a report as a table.
//!
//! This module handles the last stage of the pipeline: turning a finished
//! [`Report`](crate::Report) into strings. It provides:
//!
//! - **StatsTable**: headers, one row per extension, and a summary line
//! - **TableRow**: individual row with label and formatted values
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::output::StatsTable;
//!
//! let table = StatsTable::from_report(&report);
//! // table.headers: ["Filetype", "Files", "Total LOC", ...]
//! // table.rows: [TableRow { label: ".rs", values: ["12", "3400", ...] }]
//! // table.summary: "Repo Stats: 40 files, 5120 lines"
//! ```

pub mod table;

pub use table::{status_line, StatsTable, TableRow, HEADERS};
