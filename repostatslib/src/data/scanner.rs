//! High-level scan API.
//!
//! This module provides the main entry points: resolve the root, load its
//! ignore rules, walk the tree, classify and count each candidate, and fold
//! the results into a [`Report`].

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, trace};

use crate::cancellation::ScanCancellation;
use crate::error::ScanError;
use crate::source::filter::FilterConfig;
use crate::source::rules::{IgnoreRules, DEFAULT_IGNORE_FILE};
use crate::source::walker::{walk, CandidateFile};
use crate::Result;

use super::binary::{is_binary, BinaryExtensions};
use super::lines::count_lines;
use super::stats::{Aggregator, Report};

/// Options for a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Name of the ignore-rules file read from the scan root
    pub ignore_file: String,
    /// Extensions skipped without reading the file
    pub binary_extensions: BinaryExtensions,
    /// Extra include/exclude globs
    pub filter: FilterConfig,
    /// Count files on a worker pool
    pub parallel: bool,
    /// Worker pool size (rayon's default when `None`)
    pub jobs: Option<usize>,
    /// Handle used to abort the scan early
    pub cancellation: Option<ScanCancellation>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            binary_extensions: BinaryExtensions::default(),
            filter: FilterConfig::new(),
            parallel: false,
            jobs: None,
            cancellation: None,
        }
    }
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different ignore-rules file name.
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    /// Replace the binary extension set.
    pub fn binary_extensions(mut self, extensions: BinaryExtensions) -> Self {
        self.binary_extensions = extensions;
        self
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Enable or disable the worker pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run on a worker pool of `jobs` threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self.parallel = true;
        self
    }

    /// Attach a cancellation handle.
    pub fn cancellation(mut self, cancellation: ScanCancellation) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(ScanCancellation::is_cancelled)
    }
}

/// Line count and size of one counted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeasure {
    pub extension: String,
    pub lines: u64,
    pub size_bytes: u64,
}

/// Classify and count a single candidate.
///
/// Returns `None` for binary content and for any read failure; such files
/// are left out of the report entirely.
pub fn measure_file(candidate: &CandidateFile, binary: &BinaryExtensions) -> Option<FileMeasure> {
    let path = &candidate.path;

    match is_binary(path, &candidate.extension, candidate.size_bytes, binary) {
        Ok(false) => {}
        Ok(true) => {
            trace!(path = %path.display(), "skipping binary content");
            return None;
        }
        Err(err) => {
            trace!(path = %path.display(), %err, "skipping unreadable file");
            return None;
        }
    }

    match count_lines(path) {
        Ok(lines) => Some(FileMeasure {
            extension: candidate.extension.clone(),
            lines,
            size_bytes: candidate.size_bytes,
        }),
        Err(err) => {
            trace!(path = %path.display(), %err, "skipping file that failed mid-read");
            None
        }
    }
}

/// Scan the given root, if there is one.
///
/// `None` yields [`ScanError::NoRoot`], which callers should render as an
/// idle state rather than as a failure.
pub fn scan(root: Option<&Path>, options: &ScanOptions) -> Result<Report> {
    let root = root.ok_or(ScanError::NoRoot)?;
    scan_directory(root, options)
}

/// Scan a directory tree.
///
/// # Example
///
/// ```rust
/// use repostatslib::{scan_directory, ScanOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("notes.txt"), "hello\nworld\n").unwrap();
/// fs::create_dir(dir.path().join(".git")).unwrap();
/// fs::write(dir.path().join(".git/config"), "[core]\n").unwrap();
///
/// let report = scan_directory(dir.path(), &ScanOptions::new()).unwrap();
/// assert_eq!(report.total_files, 1);
/// assert_eq!(report.total_lines, 2);
/// assert_eq!(report.get(".txt").unwrap().max_lines, 2);
/// ```
pub fn scan_directory(root: impl AsRef<Path>, options: &ScanOptions) -> Result<Report> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let rules = IgnoreRules::from_root(root, &options.ignore_file);
    info!(
        root = %root.display(),
        rules = rules.len(),
        parallel = options.parallel,
        "starting scan"
    );

    let files = walk(root, &rules, &options.binary_extensions).with_filter(&options.filter);
    let files = match &options.cancellation {
        Some(cancellation) => files.with_cancellation(cancellation),
        None => files,
    };

    let aggregator = if options.parallel {
        scan_parallel(files, options)?
    } else {
        scan_sequential(files, options)?
    };

    info!(
        files = aggregator.total_files(),
        lines = aggregator.total_lines(),
        "scan finished"
    );

    Ok(aggregator.finalize(root_name(root)))
}

fn scan_sequential<I>(files: I, options: &ScanOptions) -> Result<Aggregator>
where
    I: IntoIterator<Item = Result<CandidateFile>>,
{
    let mut aggregator = Aggregator::new();

    for candidate in files {
        let candidate = candidate?;
        if let Some(m) = measure_file(&candidate, &options.binary_extensions) {
            aggregator.fold(&m.extension, m.lines, m.size_bytes);
        }
    }

    Ok(aggregator)
}

/// Discover on the calling thread, then count on the pool. Each worker folds
/// into its own partial aggregate; partials are merged at the end.
fn scan_parallel<I>(files: I, options: &ScanOptions) -> Result<Aggregator>
where
    I: IntoIterator<Item = Result<CandidateFile>>,
{
    let candidates: Vec<CandidateFile> = files.into_iter().collect::<Result<_>>()?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = options.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder
        .build()
        .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

    let aggregator = pool.install(|| {
        candidates
            .par_iter()
            .filter(|_| !options.is_cancelled())
            .filter_map(|candidate| measure_file(candidate, &options.binary_extensions))
            .fold(Aggregator::new, |mut agg, m| {
                agg.fold(&m.extension, m.lines, m.size_bytes);
                agg
            })
            .reduce(Aggregator::new, |mut left, right| {
                left.merge(right);
                left
            })
    });

    if options.is_cancelled() {
        return Err(ScanError::Cancelled);
    }

    Ok(aggregator)
}

/// Last component of the root, resolving `.` and friends.
fn root_name(root: &Path) -> String {
    let resolved = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.to_string_lossy().into_owned())
}
