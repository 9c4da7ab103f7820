//! Text substitution engine.
//!
//! Applies an ordered list of pattern → replacement rules to file
//! contents. The release rule set rewrites branch-archive download URLs,
//! development build labels, branch-flavored directory names and the
//! copyright year range inside the packaged scripts; the current year is
//! re-derived on every run so repeated releases stay correct.

use crate::manifest::ProjectDescriptor;
use crate::packager::error::{Error, Result};
use chrono::{Datelike, Local};
use regex::Regex;
use std::io;
use std::path::Path;

/// One pattern → replacement rule.
///
/// The pattern is matched globally (all non-overlapping occurrences) and a
/// rule that matches nothing is a no-op, never an error. The replacement
/// may reference capture groups (`$1`, `${name}`).
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    /// Creates a rule from a regex pattern and a replacement template.
    pub fn new<R: Into<String>>(pattern: &str, replacement: R) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::GenericError(format!("invalid substitution pattern `{}`: {}", pattern, e))
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// Replaces all non-overlapping matches in `input`.
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }
}

/// Builds the release rule set for `descriptor`, dated to the current year.
pub fn release_rules(descriptor: &ProjectDescriptor) -> Result<Vec<SubstitutionRule>> {
    release_rules_for_year(descriptor, Local::now().year())
}

/// Builds the release rule set with an explicit end year.
///
/// Rules, in application order:
/// 1. branch-archive URL fragment → tagged-release download fragment
/// 2. `installer MASTER` → `installer v<version>`
/// 3. `<name>-installer-master` → `<name>-installer-<version>`
/// 4. copyright year range ending in any `20xx` year, followed by the
///    author token → same start year, `year` as end year
pub fn release_rules_for_year(
    descriptor: &ProjectDescriptor,
    year: i32,
) -> Result<Vec<SubstitutionRule>> {
    let name = literal(&descriptor.name);
    let version = literal(&descriptor.version);

    Ok(vec![
        SubstitutionRule::new(
            "archive/refs/heads/master",
            format!("releases/download/{version}/{name}-{version}"),
        )?,
        SubstitutionRule::new("installer MASTER", format!("installer v{version}"))?,
        SubstitutionRule::new(
            &format!("{}-installer-master", regex::escape(&descriptor.name)),
            format!("{name}-installer-{version}"),
        )?,
        SubstitutionRule::new(r"(20\d\d)-20\d\d Yu", format!("${{1}}-{year} Yu"))?,
    ])
}

/// Escapes `$` so the replacement expander treats interpolated descriptor
/// text literally.
fn literal(text: &str) -> String {
    text.replace('$', "$$")
}

/// Reads `src`, applies `rules` in list order, writes the result to `dest`.
///
/// Source and destination may be the same file; rewriting an existing file
/// keeps its permission bits.
///
/// # Errors
///
/// [`Error::FileNotFound`] if `src` is absent, [`Error::WriteError`] if
/// `dest` cannot be written.
pub async fn rewrite_file(src: &Path, dest: &Path, rules: &[SubstitutionRule]) -> Result<()> {
    let contents = match tokio::fs::read_to_string(src).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(src.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let rewritten = rules
        .iter()
        .fold(contents, |text, rule| rule.apply(&text));

    tokio::fs::write(dest, rewritten)
        .await
        .map_err(|source| Error::WriteError {
            path: dest.to_path_buf(),
            source,
        })
}

/// Applies `rules` to `path` in place.
pub async fn rewrite_in_place(path: &Path, rules: &[SubstitutionRule]) -> Result<()> {
    rewrite_file(path, path, rules).await
}
