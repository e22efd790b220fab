//! Maze snapshot loader.
//!
//! Accepts either a plain text grid (one row per line, cell codes as in
//! [`planner_core::CellType::from_code`]) or a JSON document
//! `{"maze": ["#####", "#S.E#", "#####"]}`.

use std::path::Path;

use planner_core::Maze;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file, rejected};

/// JSON snapshot as written by the game.
#[derive(Debug, Clone, Deserialize)]
struct MazeJson {
    #[serde(alias = "rows", alias = "grid")]
    maze: Vec<String>,
}

/// Loader for maze snapshots.
pub struct MazeLoader;

impl MazeLoader {
    /// Load a maze, picking the format from the file extension.
    pub fn load(path: &Path) -> LoadResult<Maze> {
        let content = read_file(path)?;
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let maze = if is_json {
            Self::parse_json(&content)?
        } else {
            Self::parse_text(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            width = maze.width(),
            height = maze.height(),
            "loaded maze"
        );
        Ok(maze)
    }

    pub fn parse_text(content: &str) -> LoadResult<Maze> {
        Maze::parse(content).map_err(|e| rejected("maze grid", e))
    }

    pub fn parse_json(content: &str) -> LoadResult<Maze> {
        let data: MazeJson = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse maze JSON: {}", e))?;
        Maze::from_rows(&data.maze).map_err(|e| rejected("maze grid", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{CellType, Position};

    #[test]
    fn text_and_json_agree() {
        let text = MazeLoader::parse_text("#####\n#SGE#\n#####\n").unwrap();
        let json = MazeLoader::parse_json(r######"{"maze": ["#####", "#SGE#", "#####"]}"######).unwrap();
        assert_eq!(text, json);
        assert_eq!(text.cell(Position::new(2, 1)), Some(CellType::Gold));
    }

    #[test]
    fn grid_errors_are_reported() {
        let error = MazeLoader::parse_text("#####\n#S.#\n").unwrap_err();
        assert!(error.to_string().contains("Invalid maze grid"));
    }

    #[test]
    fn extension_selects_the_format() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("level.json");
        std::fs::write(&json_path, r######"{"rows": ["#####", "#S.E#", "#####"]}"######).unwrap();
        let text_path = dir.path().join("level.txt");
        std::fs::write(&text_path, "#####\n#S.E#\n#####\n").unwrap();

        assert_eq!(
            MazeLoader::load(&json_path).unwrap(),
            MazeLoader::load(&text_path).unwrap()
        );
    }
}
