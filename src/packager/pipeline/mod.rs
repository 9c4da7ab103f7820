//! Pipeline orchestration.
//!
//! [`Packager`] sequences the steps into one deterministic run with
//! pre/post cleanup; [`PipelineState`] names where in that sequence a run
//! currently is (and, on failure, where it stopped).

mod checksum;
mod orchestrator;
mod state;

// Re-export all public types
pub use orchestrator::{PackagedRelease, Packager};
pub use state::PipelineState;
