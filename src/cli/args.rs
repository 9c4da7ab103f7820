//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Installer release packager
#[derive(Parser, Debug)]
#[command(
    name = "release_packager",
    version,
    about = "Builds the versioned installer release bundle",
    long_about = "Assembles a versioned installer release from the project sources.

Stages the shell commands, installation modes, system configuration, license
and bootstrap install script into a scratch tree, rewrites version- and
date-dependent text inside the packaged scripts, promotes the tree into
build/installer-<version>/ and archives it as <name>-<version>.zip.

Usage:
  release_packager
  release_packager --manifest package.json --build-dir build
  release_packager -C /srv/acme-installer

Exit code 0 = release tree and archive guaranteed to exist under the build
directory. Any step failure exits non-zero and leaves partial output in
place for inspection; the next run cleans it up."
)]
pub struct Args {
    /// Manifest file supplying the project name and version
    ///
    /// JSON with top-level `name`/`version` fields, or a TOML file with a
    /// `[package]` table. Relative paths resolve under the project
    /// directory.
    #[arg(short, long, value_name = "PATH", default_value = "package.json")]
    pub manifest: PathBuf,

    /// Project directory containing the installer sources
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Build output directory; relative paths resolve under the project
    /// directory
    #[arg(short, long, value_name = "DIR", default_value = "build")]
    pub build_dir: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.manifest.as_os_str().is_empty() {
            return Err("Manifest path cannot be empty".to_string());
        }
        if self.build_dir.as_os_str().is_empty() {
            return Err("Build directory cannot be empty".to_string());
        }
        // The cleaning step deletes release output under the build root;
        // refuse a filesystem root outright.
        if self.build_dir.is_absolute() && self.build_dir.parent().is_none() {
            return Err(format!(
                "Build directory cannot be a filesystem root: {}",
                self.build_dir.display()
            ));
        }
        Ok(())
    }
}
