//! Forward simulation of a finished [`PathPlan`].
//!
//! Walks the returned path against the raw maze, applying every resource the
//! first time it is entered and the boss fight when the checkpoint is first
//! reached. Nothing from the search (candidate sets, masks) is reused, so a
//! score that only holds under the planner's bookkeeping is caught here.

use std::collections::HashSet;

use super::{PathPlan, Resources, Reward};
use crate::config::PathConfig;
use crate::error::{ErrorSeverity, PlannerError};
use crate::maze::{CellType, Maze, Position};

/// Budget and consumed resources after walking a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replay {
    pub resources: Resources,
    /// Tracked resources in the order they were consumed.
    pub collected: Vec<Position>,
}

/// Inconsistencies between a plan and the maze it was computed for.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("plan has no path")]
    EmptyPath,

    #[error("path starts at {found}, expected {expected}")]
    WrongStart { expected: Position, found: Position },

    #[error("path ends at {found}, expected {expected}")]
    WrongEnd { expected: Position, found: Position },

    #[error("step {index} at {position} is not walkable")]
    NotWalkable { index: usize, position: Position },

    #[error("step {index} jumps from {from} to {to}")]
    NotAdjacent {
        index: usize,
        from: Position,
        to: Position,
    },

    #[error("step {index} at {position} is impassable or fatal")]
    Blocked { index: usize, position: Position },

    #[error("phase {phase} does not end at {expected}")]
    PhaseBoundary { phase: usize, expected: Position },
}

impl PlannerError for ReplayError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use ReplayError::*;
        match self {
            EmptyPath => "REPLAY_EMPTY_PATH",
            WrongStart { .. } => "REPLAY_WRONG_START",
            WrongEnd { .. } => "REPLAY_WRONG_END",
            NotWalkable { .. } => "REPLAY_NOT_WALKABLE",
            NotAdjacent { .. } => "REPLAY_NOT_ADJACENT",
            Blocked { .. } => "REPLAY_BLOCKED",
            PhaseBoundary { .. } => "REPLAY_PHASE_BOUNDARY",
        }
    }
}

/// Re-walks `plan.path` against `maze`, checking the recorded phase boundaries.
pub fn replay(maze: &Maze, plan: &PathPlan, config: &PathConfig) -> Result<Replay, ReplayError> {
    let path = &plan.path;
    let (&first, &last) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ReplayError::EmptyPath),
    };
    if first != maze.start() {
        return Err(ReplayError::WrongStart {
            expected: maze.start(),
            found: first,
        });
    }
    if last != maze.end() {
        return Err(ReplayError::WrongEnd {
            expected: maze.end(),
            found: last,
        });
    }

    let checkpoint = maze.boss();
    let mut resources = Resources::initial(config);
    let mut consumed = HashSet::new();
    let mut collected = Vec::new();
    let mut cursor = 0usize;

    for (phase_index, report) in plan.phases.iter().enumerate() {
        if path.get(report.end_index) != Some(&report.to) || report.end_index < cursor {
            return Err(ReplayError::PhaseBoundary {
                phase: phase_index,
                expected: report.to,
            });
        }
        cursor = report.end_index;
    }

    for index in 1..path.len() {
        let (from, to) = (path[index - 1], path[index]);
        let Some(cell) = maze.cell(to).filter(|cell| cell.is_walkable()) else {
            return Err(ReplayError::NotWalkable {
                index,
                position: to,
            });
        };
        if !from.is_adjacent(to) {
            return Err(ReplayError::NotAdjacent { index, from, to });
        }

        let reward = match cell {
            CellType::Boss if Some(to) != checkpoint => Reward::Impassable,
            _ if (cell.is_resource() || cell == CellType::Boss) && consumed.insert(to) => {
                if cell.is_resource() {
                    collected.push(to);
                }
                Reward::evaluate(cell, &resources, config)
            }
            _ => Reward::Neutral,
        };
        resources = resources
            .apply(reward)
            .filter(|next| next.health > 0)
            .ok_or(ReplayError::Blocked {
                index,
                position: to,
            })?;
    }

    if cursor + 1 != path.len() {
        return Err(ReplayError::WrongEnd {
            expected: maze.end(),
            found: path[cursor],
        });
    }

    Ok(Replay {
        resources,
        collected,
    })
}
