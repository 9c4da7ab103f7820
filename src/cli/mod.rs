//! Command line interface for the release packager.
//!
//! One default invocation runs the full pipeline end to end; the exit code
//! is 0 on success and non-zero on any step failure, with the failing
//! step's diagnostic surfaced to the caller.

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::manifest;
use crate::packager::{Packager, SettingsBuilder};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with_args(args).await
}

/// Runs the pipeline for already-parsed arguments.
pub async fn run_with_args(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    // Resolve the project directory once; every later step works with the
    // same absolute base.
    let project_dir =
        std::fs::canonicalize(&args.project_dir).map_err(|e| CliError::ProjectDirectory {
            path: args.project_dir.clone(),
            reason: e.to_string(),
        })?;

    let manifest_path = if args.manifest.is_absolute() {
        args.manifest.clone()
    } else {
        project_dir.join(&args.manifest)
    };
    let descriptor = manifest::load(&manifest_path)?;

    let settings = SettingsBuilder::new()
        .descriptor(descriptor)
        .project_dir(&project_dir)
        .build_dir(&args.build_dir)
        .build()?;

    let release = Packager::new(settings).run().await?;

    println!("Package has been built.");
    println!("  Archive:  {}", release.archive_path.display());
    println!("  Size:     {} bytes", release.size);
    println!("  SHA-256:  {}", release.checksum);

    Ok(0)
}
