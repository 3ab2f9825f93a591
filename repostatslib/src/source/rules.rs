//! Root-level ignore rules.
//!
//! A scan honours a single rules file at the root of the tree (`.gitignore`
//! by default). Patterns use gitignore syntax: `build/` only matches
//! directories, `!keep.log` re-includes, later lines win over earlier ones.

use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::debug;

/// Default name of the rules file looked up at the scan root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Parsed ignore rules, queried with paths relative to the scan root.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    gitignore: Gitignore,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnoreRules {
    /// A rule set that matches nothing.
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
        }
    }

    /// Parse rules from the contents of a rules file.
    ///
    /// `None` yields the empty rule set. Lines that fail to parse are
    /// dropped; the rest still apply.
    pub fn load(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::empty();
        };

        let mut builder = GitignoreBuilder::new(".");
        for line in text.lines() {
            if let Err(err) = builder.add_line(None, line) {
                debug!(line, %err, "skipping malformed ignore rule");
            }
        }

        match builder.build() {
            Ok(gitignore) => Self { gitignore },
            Err(err) => {
                debug!(%err, "ignore rules could not be compiled");
                Self::empty()
            }
        }
    }

    /// Read `file_name` below `root` and parse it.
    ///
    /// A missing or unreadable file is not an error: it just contributes no
    /// exclusions.
    pub fn from_root(root: &Path, file_name: &str) -> Self {
        let path = root.join(file_name);
        match fs::read_to_string(&path) {
            Ok(text) => Self::load(Some(&text)),
            Err(err) => {
                debug!(path = %path.display(), %err, "no ignore rules loaded");
                Self::empty()
            }
        }
    }

    /// Number of rules that were loaded.
    pub fn len(&self) -> usize {
        self.gitignore.len()
    }

    /// True if no rules were loaded.
    pub fn is_empty(&self) -> bool {
        self.gitignore.is_empty()
    }

    /// Check whether a path relative to the scan root is excluded.
    ///
    /// `is_dir` must be set for directories so that directory-only patterns
    /// (`target/`) apply.
    pub fn matches(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(relative_path, is_dir).is_ignore()
    }
}
