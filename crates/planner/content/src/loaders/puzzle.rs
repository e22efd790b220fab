//! Password lock loader.

use std::path::Path;

use planner_core::{PuzzleSpec, Strategy};

use crate::loaders::{LoadResult, read_file, rejected};

/// Loader for password lock definitions from JSON files.
///
/// ```json
/// { "clues": [[-1, -1], [1, 1]], "digest": "<sha256 hex>", "length": 3, "salt": "lock" }
/// ```
pub struct PuzzleLoader;

impl PuzzleLoader {
    pub fn load(path: &Path) -> LoadResult<PuzzleSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a definition; clue, digest and length errors are
    /// reported here rather than when solving.
    pub fn parse(content: &str) -> LoadResult<PuzzleSpec> {
        let spec: PuzzleSpec = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse puzzle JSON: {}", e))?;
        spec.solver(Strategy::default())
            .map_err(|e| rejected("puzzle", e))?;
        Ok(spec)
    }
}
