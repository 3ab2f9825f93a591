//! Directory traversal.
//!
//! Walks a tree depth-first (entries in file-name order) and yields every
//! file that survives the cheap, I/O-free exclusion rules:
//!
//! - names starting with `.` (files and directories)
//! - paths matched by the root ignore rules (directories are pruned)
//! - symbolic links, which are neither followed nor yielded
//! - known binary extensions
//! - user glob filters
//!
//! Content sniffing and line counting happen later, per file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use super::filter::FilterConfig;
use super::rules::IgnoreRules;
use crate::cancellation::ScanCancellation;
use crate::data::binary::BinaryExtensions;
use crate::data::stats::extension_label;
use crate::error::ScanError;
use crate::Result;

/// A file selected for counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute (or root-joined) path used to open the file.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
    /// Size in bytes from the file's metadata.
    pub size_bytes: u64,
    /// Extension label, see [`extension_label`].
    pub extension: String,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn relative<'p>(path: &'p Path, root: &Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// A failed `read_dir` would drop a whole subtree, so it is not skippable.
fn is_directory_error(err: &walkdir::Error) -> bool {
    err.path()
        .and_then(|path| fs::symlink_metadata(path).ok())
        .is_some_and(|meta| meta.is_dir())
}

type EntryIter<'a> = Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'a>;

/// Lazy, single-use iterator over [`CandidateFile`]s.
///
/// Yields `Err` when a directory (the root or any descendant) cannot be
/// read, or when the scan was cancelled; both end the iteration.
pub struct Walk<'a> {
    root: PathBuf,
    entries: EntryIter<'a>,
    binary: &'a BinaryExtensions,
    filter: Option<&'a FilterConfig>,
    cancellation: Option<&'a ScanCancellation>,
    done: bool,
}

/// Start walking `root`.
pub fn walk<'a>(root: &Path, rules: &'a IgnoreRules, binary: &'a BinaryExtensions) -> Walk<'a> {
    let root_buf = root.to_path_buf();
    let prune_root = root_buf.clone();

    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            // Always include the root directory
            if entry.depth() == 0 {
                return true;
            }
            if is_hidden(entry) {
                trace!(path = %entry.path().display(), "skipping hidden entry");
                return false;
            }
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                trace!(path = %entry.path().display(), "skipping symlink");
                return false;
            }
            let rel = relative(entry.path(), &prune_root);
            if rules.matches(rel, file_type.is_dir()) {
                trace!(path = %rel.display(), "skipping ignored entry");
                return false;
            }
            true
        });

    Walk {
        root: root_buf,
        entries: Box::new(entries),
        binary,
        filter: None,
        cancellation: None,
        done: false,
    }
}

impl<'a> Walk<'a> {
    /// Apply user include/exclude globs to file paths.
    pub fn with_filter(mut self, filter: &'a FilterConfig) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Stop early when the handle is cancelled.
    pub fn with_cancellation(mut self, cancellation: &'a ScanCancellation) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    fn walk_error(&self, err: walkdir::Error) -> ScanError {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
        ScanError::Walk { path, source }
    }

    fn candidate(&self, entry: DirEntry) -> Option<CandidateFile> {
        let rel = relative(entry.path(), &self.root).to_path_buf();

        if let Some(filter) = self.filter {
            if !filter.matches(&rel) {
                trace!(path = %rel.display(), "skipping filtered file");
                return None;
            }
        }

        let extension = extension_label(entry.path());
        if self.binary.contains(&extension) {
            trace!(path = %rel.display(), %extension, "skipping binary extension");
            return None;
        }

        let size_bytes = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                trace!(path = %rel.display(), %err, "skipping file without metadata");
                return None;
            }
        };

        Some(CandidateFile {
            path: entry.into_path(),
            relative_path: rel,
            size_bytes,
            extension,
        })
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<CandidateFile>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.cancellation.is_some_and(|c| c.is_cancelled()) {
                debug!("walk cancelled");
                self.done = true;
                return Some(Err(ScanError::Cancelled));
            }

            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 || is_directory_error(&err) => {
                    self.done = true;
                    return Some(Err(self.walk_error(err)));
                }
                Err(err) => {
                    debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };

            // Directories are descended into, not yielded; sockets, fifos and
            // devices are not counted.
            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(candidate) = self.candidate(entry) {
                return Some(Ok(candidate));
            }
        }
    }
}
