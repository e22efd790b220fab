//! On-disk formats consumed by the planners.
//!
//! This crate turns files into validated `planner-core` inputs:
//! - Battle scenarios (JSON)
//! - Maze snapshots (plain text grids or JSON row lists)
//! - Password lock definitions (JSON)
//! - Planner configuration (TOML)
//!
//! Malformed files surface once, at load time. Planners assume well-formed input.

pub mod loaders;

pub use loaders::{ConfigLoader, LoadResult, MazeLoader, PuzzleLoader, ScenarioLoader};
