//! Error types for pipeline operations.
//!
//! Every failure mode of a run maps onto a small taxonomy: `FileNotFound`,
//! `CopyError`, `WriteError` and `ArchiveError` are the step-level causes,
//! and `StepError` wraps whichever of them aborted the pipeline together
//! with the state it aborted in. All of them are fatal to the run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::pipeline::PipelineState;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error type
#[derive(Error, Debug)]
pub enum Error {
    /// A substitution target or copy source is absent
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Staging or promoting could not complete
    #[error("copy failed: {reason}")]
    CopyError {
        /// What could not be copied and why
        reason: String,
    },

    /// A substitution destination could not be written
    #[error("cannot write {path}: {source}")]
    WriteError {
        /// Destination path
        path: PathBuf,
        /// Underlying IO cause
        source: io::Error,
    },

    /// Archive creation failed
    #[error("archive failed: {reason}")]
    ArchiveError {
        /// What failed while reading sources or writing the archive
        reason: String,
    },

    /// Contextual filesystem error
    #[error("{context} ({path}): {source}")]
    FsError {
        /// What was being attempted
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO cause
        source: io::Error,
    },

    /// IO errors without further context
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),

    /// A pipeline step failed; identifies the state the run aborted in
    #[error("packaging failed during {state}: {source}")]
    StepError {
        /// State the pipeline was in when the step failed
        state: PipelineState,
        /// The step's underlying error
        source: Box<Error>,
    },
}

/// Attach a plain-text context message, turning `None` or a foreign error
/// into a [`Error::GenericError`].
pub trait Context<T> {
    /// Wrap the absent/failed value with `msg`
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", msg, e)))
    }
}

/// Attach filesystem context (the action attempted and the path involved)
/// to a raw IO result.
pub trait ErrorExt<T> {
    /// Wrap an IO error as [`Error::FsError`]
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::FsError {
            context: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}
