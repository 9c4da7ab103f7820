//! Release packaging pipeline for installer bundles.
//!
//! This library assembles a versioned installer release from source assets:
//! - stages shell commands, installation modes, system configuration, the
//!   license file and the bootstrap install script into a scratch tree,
//! - rewrites version- and date-dependent text inside the packaged scripts,
//! - promotes the staged tree into the versioned release directory,
//! - archives it into a single distributable zip.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
pub use manifest::ProjectDescriptor;
pub use packager::{PackagedRelease, Packager, Settings, SettingsBuilder};
