//! Archiver - walks a directory tree into a single zip artifact.

use crate::packager::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archives `source_dir` into `output_zip`.
///
/// Every regular file and directory under `source_dir` is written into the
/// zip with its entry name prefixed by `root_name`, so extracting the
/// archive anywhere reproduces a single top-level folder named `root_name`
/// containing the tree. Unix permission bits are recorded per entry. Any
/// pre-existing file at `output_zip` is removed first; archive creation is
/// not append-based, so re-runs replace the artifact wholesale.
///
/// The blocking zip write runs on the blocking pool; this function resolves
/// only after the writer has been finished and flushed, so the caller can
/// rely on the artifact being complete on disk.
///
/// # Errors
///
/// [`Error::ArchiveError`] on any I/O failure while reading a source file
/// or writing the archive.
pub async fn archive_directory(
    source_dir: &Path,
    root_name: &str,
    output_zip: &Path,
) -> Result<()> {
    match tokio::fs::remove_file(output_zip).await {
        Ok(()) => log::debug!("removed stale archive {}", output_zip.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(archive_err("removing stale archive", output_zip, e));
        }
    }

    let source_dir = source_dir.to_path_buf();
    let root_name = root_name.to_string();
    let output_zip_buf = output_zip.to_path_buf();

    tokio::task::spawn_blocking(move || write_archive(&source_dir, &root_name, &output_zip_buf))
        .await
        .map_err(|e| Error::ArchiveError {
            reason: format!("archive task panicked: {}", e),
        })??;

    log::info!("✓ Created archive: {}", output_zip.display());
    Ok(())
}

fn write_archive(source_dir: &Path, root_name: &str, output_zip: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(Error::FileNotFound(source_dir.to_path_buf()));
    }

    let file = File::create(output_zip)
        .map_err(|e| archive_err("creating archive", output_zip, e))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));

    for entry in walkdir::WalkDir::new(source_dir) {
        let entry = entry.map_err(|e| Error::ArchiveError {
            reason: format!("walking {}: {}", source_dir.display(), e),
        })?;
        let rel_path = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| Error::ArchiveError {
                reason: format!("stripping archive prefix: {}", e),
            })?;

        let entry_name = if rel_path.as_os_str().is_empty() {
            root_name.to_string()
        } else {
            format!("{}/{}", root_name, slash_path(rel_path))
        };

        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = entry
                .metadata()
                .map_err(|e| archive_err("reading entry metadata", entry.path(), e))?;
            options = options.unix_permissions(metadata.permissions().mode() & 0o777);
        }

        if entry.file_type().is_dir() {
            writer
                .add_directory(entry_name, options)
                .map_err(|e| archive_err("adding directory entry", entry.path(), e))?;
        } else if entry.file_type().is_file() {
            writer
                .start_file(entry_name, options)
                .map_err(|e| archive_err("starting file entry", entry.path(), e))?;
            let mut source = File::open(entry.path())
                .map_err(|e| archive_err("opening source file", entry.path(), e))?;
            io::copy(&mut source, &mut writer)
                .map_err(|e| archive_err("writing file entry", entry.path(), e))?;
        } else {
            log::debug!("skipping non-regular entry {}", entry.path().display());
        }
    }

    // Central directory write and flush; the pipeline must not advance
    // until the artifact is complete on disk.
    writer
        .finish()
        .map_err(|e| archive_err("finishing archive", output_zip, e))?
        .flush()
        .map_err(|e| archive_err("flushing archive", output_zip, e))?;

    Ok(())
}

/// Zip entry names use forward slashes regardless of host separator.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn archive_err(action: &str, path: &Path, cause: impl std::fmt::Display) -> Error {
    Error::ArchiveError {
        reason: format!("{} {}: {}", action, path.display(), cause),
    }
}

/// Convenience used by tests and callers that inspect an artifact: lists
/// the entry names of a zip file in archive order.
pub fn entry_names(archive_path: &Path) -> Result<Vec<String>> {
    let file = File::open(archive_path)
        .map_err(|e| archive_err("opening archive", archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| archive_err("reading archive", archive_path, e))?;

    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| archive_err("reading archive entry", archive_path, e))?;
        names.push(entry.name().to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn entries_share_a_single_root_folder() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("acme-2.3.0");
        write(&source.join("LICENSE"), "license text\n");
        write(&source.join("commands/command.sh"), "#!/bin/bash\n");

        let zip_path = dir.path().join("acme-2.3.0.zip");
        archive_directory(&source, "acme-2.3.0", &zip_path)
            .await
            .unwrap();

        let names = entry_names(&zip_path).unwrap();
        assert!(!names.is_empty());
        for name in &names {
            assert!(
                name == "acme-2.3.0/" || name.starts_with("acme-2.3.0/"),
                "entry {} escapes the root folder",
                name
            );
        }
        assert!(names.iter().any(|n| n == "acme-2.3.0/commands/command.sh"));
    }

    #[tokio::test]
    async fn replaces_a_pre_existing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("pkg");
        write(&source.join("file.txt"), "contents\n");

        let zip_path = dir.path().join("pkg.zip");
        std::fs::write(&zip_path, b"not a zip").unwrap();

        archive_directory(&source, "pkg", &zip_path).await.unwrap();

        // The stale bytes are gone and the artifact reads as a zip.
        let names = entry_names(&zip_path).unwrap();
        assert!(names.iter().any(|n| n == "pkg/file.txt"));
    }

    #[tokio::test]
    async fn missing_source_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = archive_directory(&dir.path().join("absent"), "pkg", &dir.path().join("pkg.zip"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::FileNotFound(_) | Error::ArchiveError { .. }
        ));
    }
}
