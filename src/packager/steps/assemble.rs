//! Staging assembler - copies source file sets into the scratch tree and
//! promotes the finished tree into the release directory.

use crate::bail;
use crate::packager::error::{Error, Result};
use crate::packager::settings::FileSet;
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// Copies every file set into the scratch tree.
///
/// For each set, resolves its glob patterns against the project directory
/// (hidden entries included) and copies each matched regular file under the
/// set's destination root, preserving relative path structure and
/// permission bits. Directories are created as needed. Copying is additive;
/// the orchestrator guarantees the scratch tree is empty beforehand.
///
/// # Errors
///
/// Fails with [`Error::CopyError`] if a pattern matches no files (every
/// configured pattern expects at least one) or if a copy cannot be
/// completed.
pub async fn stage(file_sets: &[FileSet], project_dir: &Path, scratch_dir: &Path) -> Result<()> {
    for set in file_sets {
        log::info!("Staging {}", set.label());
        let dest_root = scratch_dir.join(set.dest());

        for pattern in set.patterns() {
            let mut copied = 0usize;

            for path in resolve_pattern(project_dir, pattern)? {
                // Directories materialize through the files inside them.
                if !path.is_file() {
                    continue;
                }
                let rel_path = path.strip_prefix(project_dir).map_err(|e| {
                    Error::GenericError(format!("stripping staging prefix: {}", e))
                })?;
                fs::copy_file(&path, &dest_root.join(rel_path)).await?;
                copied += 1;
            }

            if copied == 0 {
                return Err(Error::CopyError {
                    reason: format!(
                        "source pattern `{}` matched no files under {}",
                        pattern,
                        project_dir.display()
                    ),
                });
            }
            log::debug!("staged {} file(s) from `{}`", copied, pattern);
        }
    }

    Ok(())
}

/// Promotes the staged tree into the release directory.
///
/// A second full copy rather than a rename, so scratch cleanup afterwards
/// stays symmetric and the release output never shares storage with
/// scratch state.
pub async fn promote(staging_root: &Path, release_root: &Path) -> Result<()> {
    log::info!("Promoting staged tree to {}", release_root.display());
    fs::copy_tree(staging_root, release_root).await
}

/// Resolves one glob pattern against `base`, hidden entries included.
fn resolve_pattern(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let Some(base_str) = base.to_str() else {
        bail!("project directory {} is not valid UTF-8", base.display());
    };
    let full_pattern = format!("{}/{}", glob::Pattern::escape(base_str), pattern);

    // Defaults leave require_literal_leading_dot off, so dot entries match.
    let matches = glob::glob_with(&full_pattern, glob::MatchOptions::new())
        .map_err(|e| Error::GenericError(format!("invalid source pattern `{}`: {}", pattern, e)))?;

    let mut paths = Vec::new();
    for entry in matches {
        paths.push(entry.map_err(|e| Error::CopyError {
            reason: format!("reading match for `{}`: {}", pattern, e),
        })?);
    }
    Ok(paths)
}
