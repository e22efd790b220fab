//! File loaders for planner inputs.
//!
//! Every loader has a `load(path)` entry point and a `parse(text)` twin used
//! by tests and by hosts that already hold the text in memory.

pub mod config;
pub mod maze;
pub mod puzzle;
pub mod scenario;

pub use config::ConfigLoader;
pub use maze::MazeLoader;
pub use puzzle::PuzzleLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

use planner_core::PlannerError;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Wraps a planner-core validation error with its stable error code.
pub(crate) fn rejected<E: PlannerError>(what: &str, error: E) -> anyhow::Error {
    tracing::debug!(
        code = error.error_code(),
        severity = error.severity().as_str(),
        "{} rejected",
        what
    );
    anyhow::anyhow!("Invalid {} [{}]: {}", what, error.error_code(), error)
}
