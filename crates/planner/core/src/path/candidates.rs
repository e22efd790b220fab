use std::collections::{HashMap, HashSet};

use crate::config::ResourceQuota;
use crate::maze::{CellType, Maze, Position};

/// Resources tracked in the collected mask for one phase.
///
/// Bit `i` of the mask corresponds to `positions()[i]`. Unconsumed resources
/// outside the set are impassable for the phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSet {
    positions: Vec<Position>,
    bits: HashMap<Position, u64>,
}

impl CandidateSet {
    /// Picks, per resource kind, the `quota` resources with the smallest
    /// detour `dist(from, r) + dist(r, to)`, skipping `consumed` ones.
    /// Ties break on position.
    pub fn select(
        maze: &Maze,
        from: Position,
        to: Position,
        consumed: &HashSet<Position>,
        quota: &ResourceQuota,
    ) -> Self {
        let kinds = [
            (CellType::Gold, quota.gold),
            (CellType::HealthPotion, quota.potions),
            (CellType::Trap, quota.traps),
        ];

        let mut positions = Vec::new();
        for (kind, limit) in kinds {
            let mut ranked: Vec<(u32, Position)> = maze
                .positions_of(kind)
                .filter(|position| !consumed.contains(position))
                .map(|position| (from.manhattan(position) + position.manhattan(to), position))
                .collect();
            ranked.sort_unstable();
            positions.extend(ranked.into_iter().take(limit).map(|(_, position)| position));
        }
        positions.truncate(ResourceQuota::MAX_TRACKED);

        Self::from_positions(positions)
    }

    /// Rebuilds a set from an explicit ordered list, as recorded in a plan.
    pub fn from_positions(positions: Vec<Position>) -> Self {
        let bits = positions
            .iter()
            .enumerate()
            .map(|(index, position)| (*position, 1u64 << index))
            .collect();
        Self { positions, bits }
    }

    /// Mask bit of `position`, if tracked.
    pub fn bit(&self, position: Position) -> Option<u64> {
        self.bits.get(&position).copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Tracked positions whose bit is set in `mask`.
    pub fn collected(&self, mask: u64) -> Vec<Position> {
        self.positions
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1u64 << index) != 0)
            .map(|(_, position)| *position)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
