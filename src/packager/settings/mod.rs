//! Configuration structures for packaging runs.
//!
//! [`Settings`] is the single source of truth for every path a run touches:
//! the scratch tree, the release tree, the archive artifact, the staged
//! file sets and the substitution targets are all derived here from the
//! project descriptor and the build root.

mod builder;
mod core;
mod fileset;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use fileset::FileSet;
