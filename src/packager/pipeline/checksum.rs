//! Artifact checksum calculation.

use crate::packager::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Returns the size in bytes and the hex-encoded SHA-256 of an artifact.
///
/// Reads the file in 8KB chunks so large archives hash without loading
/// into memory.
pub async fn artifact_digest(path: &Path) -> Result<(u64, String)> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening artifact for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading artifact for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok((metadata.len(), format!("{:x}", hasher.finalize())))
}
