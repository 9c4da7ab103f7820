//! Named groups of source patterns staged as one unit.

use std::path::{Path, PathBuf};

/// A named group of glob-style source patterns plus a destination root.
///
/// Represents one unit of copying during staging, e.g. "commands and
/// configuration" or "the bootstrap script". Patterns resolve against the
/// project directory, including hidden entries; matched files land under
/// the destination root (relative to the scratch tree) with their relative
/// path structure and permission bits preserved.
#[derive(Debug, Clone)]
pub struct FileSet {
    label: String,
    patterns: Vec<String>,
    dest: PathBuf,
}

impl FileSet {
    /// Creates a file set from its label, source patterns and destination
    /// root (relative to the scratch tree).
    pub fn new<L, P, I, D>(label: L, patterns: I, dest: D) -> Self
    where
        L: Into<String>,
        P: Into<String>,
        I: IntoIterator<Item = P>,
        D: Into<PathBuf>,
    {
        Self {
            label: label.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            dest: dest.into(),
        }
    }

    /// Human-readable name of this unit, used in logs and diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Glob-style source patterns, relative to the project directory.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Destination root relative to the scratch tree.
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}
