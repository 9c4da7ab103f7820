//! Main pipeline orchestration and coordination.
//!
//! This module provides the [`Packager`] orchestrator that sequences the
//! packaging steps - cleanup, staging, templating, promotion, archiving and
//! final cleanup - into one deterministic run.

use super::{checksum, state::PipelineState};
use crate::packager::error::{Error, Result};
use crate::packager::settings::Settings;
use crate::packager::steps::{archive, assemble, cleanup, substitute};
use crate::packager::utils::fs;
use std::path::PathBuf;

/// A finished release, as reported by a successful run.
///
/// The release tree and archive survive on disk; the scratch tree is gone.
#[derive(Debug, Clone)]
pub struct PackagedRelease {
    /// The versioned release directory (`build/installer-<version>`)
    pub release_dir: PathBuf,
    /// The promoted package folder inside the release directory
    pub package_dir: PathBuf,
    /// The zip artifact inside the release directory
    pub archive_path: PathBuf,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
}

/// Main pipeline orchestrator.
///
/// Drives one packaging run through its states:
/// `Idle → Cleaning → Staging → Templating → Promoting → Archiving →
/// FinalCleanup → Done`. Steps are strictly sequential - each consumes the
/// filesystem state the previous one produced - and a step failure halts
/// the run with no retries, surfacing as [`Error::StepError`] naming the
/// failing state. Partial output stays on disk for inspection; the next
/// run's Cleaning step removes it, so failures are self-healing on retry.
///
/// # Examples
///
/// ```no_run
/// use release_packager::manifest::ProjectDescriptor;
/// use release_packager::packager::{Packager, SettingsBuilder};
///
/// # async fn example() -> release_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .descriptor(ProjectDescriptor::new("acme", "2.3.0"))
///     .project_dir("/srv/acme-installer")
///     .build()?;
///
/// let release = Packager::new(settings).run().await?;
/// println!("archive at {}", release.archive_path.display());
/// # Ok(())
/// # }
/// ```
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a new packager over the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the packager settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Executes one full packaging run.
    ///
    /// # Process
    ///
    /// 1. Clear prior `installer-*` output and rebuild an empty scratch tree
    /// 2. Stage the configured file sets into the scratch tree
    /// 3. Rewrite release metadata in the substitution targets, in place
    /// 4. Promote the scratch tree into the release directory
    /// 5. Archive the versioned package folder into the release directory
    /// 6. Remove the scratch tree
    ///
    /// # Returns
    ///
    /// A [`PackagedRelease`] describing the surviving artifacts.
    pub async fn run(&self) -> Result<PackagedRelease> {
        let settings = &self.settings;
        let descriptor = settings.descriptor();
        log::info!("Packaging {} v{}", descriptor.name, descriptor.version);

        let mut state = PipelineState::Idle;
        let scratch_dir = settings.scratch_dir();

        advance(&mut state, PipelineState::Cleaning);
        log::info!("Clearing previous release output");
        let removed = cleanup::clear_previous_releases(settings.build_root(), settings.release_pattern())
            .await
            .map_err(|e| fail(state, e))?;
        for dir in &removed {
            log::debug!("removed stale release output {}", dir.display());
        }
        fs::ensure_clean_dir(&scratch_dir)
            .await
            .map_err(|e| fail(state, e))?;

        advance(&mut state, PipelineState::Staging);
        assemble::stage(&settings.file_sets(), settings.project_dir(), &scratch_dir)
            .await
            .map_err(|e| fail(state, e))?;

        advance(&mut state, PipelineState::Templating);
        let rules = substitute::release_rules(descriptor).map_err(|e| fail(state, e))?;
        for target in settings.substitution_targets() {
            log::debug!("rewriting release metadata in {}", target.display());
            substitute::rewrite_in_place(&target, &rules)
                .await
                .map_err(|e| fail(state, e))?;
        }

        advance(&mut state, PipelineState::Promoting);
        assemble::promote(&scratch_dir, &settings.release_dir())
            .await
            .map_err(|e| fail(state, e))?;

        advance(&mut state, PipelineState::Archiving);
        let archive_path = settings.archive_path();
        archive::archive_directory(
            &settings.packaged_dir(),
            &descriptor.package_dir_name(),
            &archive_path,
        )
        .await
        .map_err(|e| fail(state, e))?;
        let (size, checksum) = checksum::artifact_digest(&archive_path)
            .await
            .map_err(|e| fail(state, e))?;

        advance(&mut state, PipelineState::FinalCleanup);
        cleanup::remove_scratch(&scratch_dir)
            .await
            .map_err(|e| fail(state, e))?;

        advance(&mut state, PipelineState::Done);
        log::info!("✓ Package has been built: {}", archive_path.display());

        Ok(PackagedRelease {
            release_dir: settings.release_dir(),
            package_dir: settings.packaged_dir(),
            archive_path,
            size,
            checksum,
        })
    }
}

/// Moves the run to its next state.
fn advance(state: &mut PipelineState, next: PipelineState) {
    log::debug!("pipeline state: {} -> {}", state, next);
    *state = next;
}

/// Wraps a step's error with the state the run aborted in.
fn fail(state: PipelineState, source: Error) -> Error {
    log::debug!("pipeline state: {} -> {}", state, PipelineState::Failed);
    Error::StepError {
        state,
        source: Box::new(source),
    }
}
