//! Core Settings struct and implementations.

use super::FileSet;
use crate::manifest::ProjectDescriptor;
use std::path::{Path, PathBuf};

/// Source patterns staged under the versioned package folder.
const PAYLOAD_PATTERNS: [&str; 4] = [
    "commands/**",
    "installation-modes/**",
    "system-configuration/**",
    "LICENSE",
];

/// Source pattern for the bootstrap install script.
const BOOTSTRAP_PATTERNS: [&str; 1] = ["install.sh"];

/// Main settings for a packaging run.
///
/// Central configuration for the pipeline, constructed via
/// [`SettingsBuilder`]. Holds the project descriptor, the canonical project
/// directory (resolved once at startup and threaded explicitly from here),
/// and the build root, and derives every versioned path name from them.
///
/// # Examples
///
/// ```no_run
/// use release_packager::manifest::ProjectDescriptor;
/// use release_packager::packager::SettingsBuilder;
///
/// # fn example() -> release_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .descriptor(ProjectDescriptor::new("acme", "2.3.0"))
///     .project_dir("/srv/acme-installer")
///     .build()?;
///
/// assert!(settings.archive_path().ends_with("acme-2.3.0.zip"));
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Project descriptor driving all versioned names.
    descriptor: ProjectDescriptor,

    /// Canonical project directory the source patterns resolve against.
    project_dir: PathBuf,

    /// Build root; scratch and release trees live under it.
    build_root: PathBuf,
}

impl Settings {
    /// Returns the project descriptor.
    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    /// Returns the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the build root.
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Scratch tree for the run: `<build>/tmp`.
    ///
    /// Exists only for the duration of one run and is removed during final
    /// cleanup.
    pub fn scratch_dir(&self) -> PathBuf {
        self.build_root.join("tmp")
    }

    /// The versioned package folder inside the scratch tree:
    /// `<build>/tmp/<name>-<version>`.
    pub fn staged_package_dir(&self) -> PathBuf {
        self.scratch_dir().join(self.descriptor.package_dir_name())
    }

    /// The finalized release directory: `<build>/installer-<version>`.
    pub fn release_dir(&self) -> PathBuf {
        self.build_root.join(self.descriptor.release_dir_name())
    }

    /// The promoted package folder inside the release directory:
    /// `<build>/installer-<version>/<name>-<version>`.
    ///
    /// Its name and the archive's internal root folder are derived from the
    /// same descriptor and match byte-for-byte.
    pub fn packaged_dir(&self) -> PathBuf {
        self.release_dir().join(self.descriptor.package_dir_name())
    }

    /// The archive artifact path:
    /// `<build>/installer-<version>/<name>-<version>.zip`.
    pub fn archive_path(&self) -> PathBuf {
        self.release_dir().join(self.descriptor.archive_file_name())
    }

    /// Glob pattern matching every release output directory under the
    /// build root, current or stale. Cleared at the start of each run.
    pub fn release_pattern(&self) -> &'static str {
        "installer-*"
    }

    /// The file sets staged into the scratch tree, in copy order.
    pub fn file_sets(&self) -> Vec<FileSet> {
        let package_dir = self.descriptor.package_dir_name();
        vec![
            FileSet::new("commands and configuration", PAYLOAD_PATTERNS, &package_dir),
            FileSet::new("bootstrap script", BOOTSTRAP_PATTERNS, &package_dir),
        ]
    }

    /// The closed list of files rewritten during templating.
    ///
    /// No other staged file is scanned or rewritten.
    pub fn substitution_targets(&self) -> Vec<PathBuf> {
        let staged = self.staged_package_dir();
        vec![
            staged.join("install.sh"),
            staged.join("commands").join("command.sh"),
        ]
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        descriptor: ProjectDescriptor,
        project_dir: PathBuf,
        build_root: PathBuf,
    ) -> Self {
        Self {
            descriptor,
            project_dir,
            build_root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::SettingsBuilder;

    fn settings() -> Settings {
        SettingsBuilder::new()
            .descriptor(ProjectDescriptor::new("acme", "2.3.0"))
            .project_dir("/work/acme")
            .build()
            .unwrap()
    }

    #[test]
    fn derives_versioned_paths_from_one_descriptor() {
        let s = settings();
        assert_eq!(s.scratch_dir(), PathBuf::from("/work/acme/build/tmp"));
        assert_eq!(
            s.packaged_dir(),
            PathBuf::from("/work/acme/build/installer-2.3.0/acme-2.3.0")
        );
        assert_eq!(
            s.archive_path(),
            PathBuf::from("/work/acme/build/installer-2.3.0/acme-2.3.0.zip")
        );

        // The release subfolder and the archive's root entry must agree.
        let package_dir = s.packaged_dir();
        let dir_name = package_dir.file_name().unwrap().to_str().unwrap();
        assert_eq!(dir_name, s.descriptor().package_dir_name());
    }

    #[test]
    fn substitution_targets_are_a_closed_list() {
        let s = settings();
        let targets = s.substitution_targets();
        assert_eq!(targets.len(), 2);
        assert!(targets[0].ends_with("acme-2.3.0/install.sh"));
        assert!(targets[1].ends_with("acme-2.3.0/commands/command.sh"));
    }

    #[test]
    fn both_file_sets_stage_under_the_versioned_folder() {
        let s = settings();
        for set in s.file_sets() {
            assert_eq!(set.dest(), Path::new("acme-2.3.0"));
        }
    }
}
