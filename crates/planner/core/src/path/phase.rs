use std::collections::HashSet;

use super::{CandidateSet, Resources, Reward};
use crate::config::PathConfig;
use crate::maze::{CellType, Maze, Position};

/// Leg of a planned route.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// START to the boss checkpoint.
    ToBoss,
    /// START (or the checkpoint) to END.
    ToEnd,
}

/// Movement rules for one phase search.
///
/// A resource is either tracked in the mask (applied once), consumed in an
/// earlier phase (plain floor), or avoided. Walking over an untracked resource
/// would change the budget without the mask recording it.
pub(crate) struct PhaseRules<'a> {
    pub maze: &'a Maze,
    pub config: &'a PathConfig,
    pub candidates: &'a CandidateSet,
    pub consumed: &'a HashSet<Position>,
    pub checkpoint: Option<Position>,
    pub phase: Phase,
}

impl PhaseRules<'_> {
    /// Mask and budget after stepping onto `to`, or `None` when the move is
    /// blocked or fatal.
    pub fn step(&self, to: Position, mask: u64, resources: Resources) -> Option<(u64, Resources)> {
        let cell = self.maze.cell(to).filter(|cell| cell.is_walkable())?;

        let (reward, mask) = match cell {
            CellType::Boss if Some(to) == self.checkpoint => match self.phase {
                Phase::ToBoss => (Reward::evaluate(cell, &resources, self.config), mask),
                Phase::ToEnd => (Reward::Neutral, mask),
            },
            CellType::Boss => (Reward::Impassable, mask),
            _ if !cell.is_resource() || self.consumed.contains(&to) => (Reward::Neutral, mask),
            _ => match self.candidates.bit(to) {
                Some(bit) if mask & bit == 0 => {
                    (Reward::evaluate(cell, &resources, self.config), mask | bit)
                }
                Some(_) => (Reward::Neutral, mask),
                None => (Reward::Impassable, mask),
            },
        };

        let next = resources.apply(reward)?;
        (next.health > 0).then_some((mask, next))
    }
}
