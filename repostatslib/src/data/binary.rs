//! Binary content detection.
//!
//! Two gates, either of which marks a file as binary:
//!
//! 1. **Extension**: the lowercase extension is in a known deny list. No I/O.
//! 2. **Content**: the first [`SNIFF_WINDOW`] bytes contain a zero byte. Only
//!    runs for non-empty files.
//!
//! A zero byte past the sniff window goes unnoticed; the sniff is a cheap
//! heuristic, not a full scan.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected by the content gate.
pub const SNIFF_WINDOW: usize = 512;

/// Extensions that are always treated as binary.
#[rustfmt::skip]
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico",
    // Archives
    ".zip", ".tar", ".gz", ".rar", ".7z",
    // Executables and compiled objects
    ".exe", ".dll", ".so", ".bin", ".class", ".jar",
    // Media
    ".mp3", ".mp4", ".avi",
    // Documents
    ".pdf",
];

/// Set of extension labels (`.png`, `.zip`, ...) treated as binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExtensions {
    extensions: BTreeSet<String>,
}

impl Default for BinaryExtensions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Normalise `png`, `.PNG` and `.png` to `.png`.
fn normalize(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

impl BinaryExtensions {
    /// An empty set: only the content gate applies.
    pub fn none() -> Self {
        Self {
            extensions: BTreeSet::new(),
        }
    }

    /// Add an extension to the set.
    pub fn with(mut self, ext: &str) -> Self {
        self.extensions.insert(normalize(ext));
        self
    }

    /// Case-insensitive membership test for an extension label.
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(&ext.to_lowercase())
    }

    /// Number of extensions in the set.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// True when only the content gate applies.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extension labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

/// Look for a zero byte in the first `min(SNIFF_WINDOW, size_bytes)` bytes.
///
/// Empty files are never opened.
pub fn sniff(path: &Path, size_bytes: u64) -> io::Result<bool> {
    if size_bytes == 0 {
        return Ok(false);
    }

    let window = size_bytes.min(SNIFF_WINDOW as u64) as usize;
    let mut buf = [0u8; SNIFF_WINDOW];
    let file = File::open(path)?;
    let mut limited = file.take(window as u64);

    let mut filled = 0;
    while filled < window {
        match limited.read(&mut buf[filled..window]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(buf[..filled].contains(&0))
}

/// Decide whether a file should be skipped as binary.
///
/// The extension gate short-circuits without touching the file. An `Err`
/// means the file could not be read and should be skipped as well.
pub fn is_binary(
    path: &Path,
    ext: &str,
    size_bytes: u64,
    extensions: &BinaryExtensions,
) -> io::Result<bool> {
    if extensions.contains(ext) {
        return Ok(true);
    }
    sniff(path, size_bytes)
}
