//! Source discovery: find files to count.
//!
//! This module handles the first stage of the pipeline - deciding which
//! files take part in a scan. It provides:
//!
//! - **Ignore rules**: the root-level `.gitignore`
//! - **File filtering**: extra include/exclude glob patterns
//! - **Walking**: depth-first traversal that yields [`CandidateFile`]s
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::source::{walk, IgnoreRules};
//! use repostatslib::BinaryExtensions;
//!
//! let rules = IgnoreRules::from_root(root, ".gitignore");
//! let binary = BinaryExtensions::default();
//! for candidate in walk(root, &rules, &binary) {
//!     println!("{}", candidate?.relative_path.display());
//! }
//! ```

pub mod filter;
pub mod rules;
pub mod walker;

pub use filter::FilterConfig;
pub use rules::{IgnoreRules, DEFAULT_IGNORE_FILE};
pub use walker::{walk, CandidateFile, Walk};
