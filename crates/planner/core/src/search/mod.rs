//! State-space search primitives shared by the planners.
//!
//! - [`Frontier`]: min-priority open list with deterministic FIFO tie-breaking
//! - [`BestCosts`]: visited map that only keeps the dominant cost per state
//! - [`SearchStats`]: counters every planner reports for diagnostics

pub mod costs;
pub mod frontier;

pub use costs::BestCosts;
pub use frontier::Frontier;

/// Counters collected during a single planning call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded.
    pub expanded: usize,
    /// Nodes pushed onto the frontier.
    pub pushed: usize,
    /// Nodes discarded by bound or dominance checks.
    pub pruned: usize,
}

impl SearchStats {
    pub(crate) fn merge(&mut self, other: SearchStats) {
        self.expanded += other.expanded;
        self.pushed += other.pushed;
        self.pruned += other.pruned;
    }
}
