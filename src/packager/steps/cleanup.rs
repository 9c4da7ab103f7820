//! Release finalizer - clean-slate guarantees before and after a run.

use crate::bail;
use crate::packager::error::{Error, Result};
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// Deletes every prior release output directory under the build root.
///
/// Matches the release naming pattern (`installer-*`), so re-running the
/// pipeline never mixes artifacts from different prior versions or partial
/// failures. Returns the directories that were removed. A missing build
/// root means there is nothing to clean.
pub async fn clear_previous_releases(build_root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !build_root.exists() {
        return Ok(Vec::new());
    }

    let Some(base) = build_root.to_str() else {
        bail!("build root {} is not valid UTF-8", build_root.display());
    };
    let full_pattern = format!("{}/{}", glob::Pattern::escape(base), pattern);
    let matches = glob::glob(&full_pattern)
        .map_err(|e| Error::GenericError(format!("invalid release pattern `{}`: {}", pattern, e)))?;

    let mut removed = Vec::new();
    for entry in matches {
        let path = entry.map_err(|e| Error::GenericError(format!("reading release match: {}", e)))?;
        if !path.is_dir() {
            log::debug!("leaving non-directory {} in place", path.display());
            continue;
        }
        fs::remove_dir_if_exists(&path).await?;
        removed.push(path);
    }

    Ok(removed)
}

/// Removes the scratch tree after archiving.
///
/// Takes the promoted per-version subfolder inside it along with the
/// scratch area itself, leaving only the finalized release tree on disk.
/// Idempotent: an already-absent scratch tree is fine.
pub async fn remove_scratch(scratch_dir: &Path) -> Result<()> {
    log::info!("Removing scratch tree {}", scratch_dir.display());
    fs::remove_dir_if_exists(scratch_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_every_matching_release_directory() {
        let build = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(build.path().join("installer-1.0.0/acme-1.0.0")).unwrap();
        std::fs::create_dir_all(build.path().join("installer-2.0.0")).unwrap();
        std::fs::create_dir_all(build.path().join("tmp")).unwrap();

        let removed = clear_previous_releases(build.path(), "installer-*")
            .await
            .unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!build.path().join("installer-1.0.0").exists());
        assert!(!build.path().join("installer-2.0.0").exists());
        // The scratch tree is not the finalizer's to remove here.
        assert!(build.path().join("tmp").exists());
    }

    #[tokio::test]
    async fn missing_build_root_is_a_clean_slate_already() {
        let dir = tempfile::tempdir().unwrap();
        let removed = clear_previous_releases(&dir.path().join("build"), "installer-*")
            .await
            .unwrap();
        assert!(removed.is_empty());
    }

    #[tokio::test]
    async fn remove_scratch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("tmp");
        std::fs::create_dir_all(scratch.join("pkg-1.0.0")).unwrap();

        remove_scratch(&scratch).await.unwrap();
        assert!(!scratch.exists());

        // Second removal of an absent tree succeeds.
        remove_scratch(&scratch).await.unwrap();
    }
}
