//! Maze snapshots consumed by the planners.
//!
//! The maze is produced by the host (generation is not part of this crate)
//! and handed to planners as an immutable [`Maze`]. Cell kinds form the
//! closed [`CellType`] set, so every consumer dispatches with a `match`.

pub mod analysis;
mod cell;
mod grid;

pub use cell::{CellType, Position};
pub use grid::Maze;

use crate::error::{ErrorSeverity, PlannerError};

/// Errors raised while building a [`Maze`] snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell code {code:?} at {position}")]
    UnknownCode { code: char, position: Position },

    #[error("maze has no START cell")]
    MissingStart,

    #[error("maze has no END cell")]
    MissingEnd,

    #[error("second START cell at {0}")]
    DuplicateStart(Position),

    #[error("second END cell at {0}")]
    DuplicateEnd(Position),
}

impl PlannerError for MazeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use MazeError::*;
        match self {
            Empty => "MAZE_EMPTY",
            RaggedRow { .. } => "MAZE_RAGGED_ROW",
            UnknownCode { .. } => "MAZE_UNKNOWN_CODE",
            MissingStart => "MAZE_MISSING_START",
            MissingEnd => "MAZE_MISSING_END",
            DuplicateStart(_) => "MAZE_DUPLICATE_START",
            DuplicateEnd(_) => "MAZE_DUPLICATE_END",
        }
    }
}
