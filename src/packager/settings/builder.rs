//! Builder for constructing Settings.

use super::Settings;
use crate::manifest::ProjectDescriptor;
use crate::packager::error::Context;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
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
///     .build_dir("build")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    descriptor: Option<ProjectDescriptor>,
    project_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project descriptor driving all versioned names.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn descriptor(mut self, descriptor: ProjectDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Sets the project directory the source patterns resolve against.
    ///
    /// Callers resolve this once at startup (canonicalized working
    /// directory) so every later step works with the same absolute base.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build directory. Relative paths resolve under the project
    /// directory.
    ///
    /// Default: `build`
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `descriptor`
    /// - `project_dir`
    pub fn build(self) -> crate::packager::Result<Settings> {
        let descriptor = self.descriptor.context("descriptor is required")?;
        let project_dir = self.project_dir.context("project_dir is required")?;

        let build_dir = self.build_dir.unwrap_or_else(|| PathBuf::from("build"));
        let build_root = if build_dir.is_absolute() {
            build_dir
        } else {
            project_dir.join(build_dir)
        };

        Ok(Settings::new(descriptor, project_dir, build_root))
    }
}
