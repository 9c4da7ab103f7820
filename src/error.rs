//! Crate-level error types.
//!
//! Wraps everything that can go wrong between argument parsing and pipeline
//! completion so the binary has a single error surface to report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for the release packager
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be read
    #[error("cannot read manifest {path}: {source}")]
    ManifestRead {
        /// Manifest path that was attempted
        path: PathBuf,
        /// Underlying IO cause
        source: std::io::Error,
    },

    /// JSON manifest parse errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML manifest parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Manifest is readable but the descriptor is unusable
    #[error("invalid manifest {path}: {reason}")]
    InvalidManifest {
        /// Manifest path
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// Pipeline errors
    #[error("{0}")]
    Pipeline(#[from] crate::packager::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Working directory could not be resolved
    #[error("cannot resolve project directory {path}: {reason}")]
    ProjectDirectory {
        /// Directory that was given
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}
