//! File system utilities for the packaging pipeline.
//!
//! Provides the clean-slate and copy primitives the pipeline steps are
//! built on: idempotent removal, scratch-tree recreation, and mode- and
//! symlink-preserving copies.

use crate::packager::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Removes the directory and its contents if it exists.
///
/// Missing directories are not an error, so re-runs of the cleanup steps
/// stay idempotent.
pub async fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Recreates `path` as an empty directory, removing any previous contents.
///
/// A failed earlier run may have left a partial tree behind; the caller
/// gets an empty directory either way.
pub async fn ensure_clean_dir(path: &Path) -> Result<()> {
    remove_dir_if_exists(path).await?;
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Copies a regular file, creating any parent directories of the
/// destination as necessary. Permission bits travel with the copy.
///
/// Fails with [`Error::FileNotFound`] if the source is absent and with
/// [`Error::CopyError`] if the source is not a regular file or the copy
/// itself fails.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::FileNotFound(from.to_path_buf()));
    }
    if !from.is_file() {
        return Err(Error::CopyError {
            reason: format!("{} is not a regular file", from.display()),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.map_err(|e| Error::CopyError {
        reason: format!("{} -> {}: {}", from.display(), to.display(), e),
    })?;
    Ok(())
}

/// Recursively copies a directory tree, creating any parent directories of
/// the destination as necessary.
///
/// Preserves structure, permission bits and symlinks. The traversal is
/// blocking I/O, so it runs on the blocking pool and is awaited to
/// completion before the caller continues.
pub async fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || copy_tree_blocking(&from, &to))
        .await
        .map_err(|e| Error::GenericError(format!("tree copy task panicked: {}", e)))?
}

fn copy_tree_blocking(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::FileNotFound(from.to_path_buf()));
    }
    if !from.is_dir() {
        return Err(Error::CopyError {
            reason: format!("{} is not a directory", from.display()),
        });
    }

    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).fs_context("creating destination parent", parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry.map_err(|e| Error::CopyError {
            reason: format!("walking {}: {}", from.display(), e),
        })?;
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::GenericError(format!("stripping copy prefix: {}", e)))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path())
                .fs_context("reading symlink", entry.path())?;
            if entry.path().is_dir() {
                symlink_dir(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
            } else {
                symlink_file(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
            }
        } else if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            std::fs::copy(entry.path(), &dest_path).map_err(|e| Error::CopyError {
                reason: format!(
                    "{} -> {}: {}",
                    entry.path().display(),
                    dest_path.display(),
                    e
                ),
            })?;
        }
    }

    Ok(())
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Collects the relative paths of all regular files under `root`, sorted.
///
/// Useful for comparing two trees (release output across runs, archive
/// contents after extraction) without caring about traversal order.
pub fn relative_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::GenericError(format!("walking {}: {}", root.display(), e)))?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| Error::GenericError(format!("stripping prefix: {}", e)))?;
            files.push(rel.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
