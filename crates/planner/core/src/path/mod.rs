//! Resource-aware path planner.
//!
//! Computes a score-maximising route from START to END, forced through the
//! boss checkpoint when the maze has one. Each phase is a weighted A* over
//! `(position, collected_mask)`, where the mask only covers a bounded set of
//! candidate resources chosen per phase.
//!
//! The search state keeps the best score per `(position, mask)`. With a
//! heuristic weight above 1 the result is heuristically strong, not provably
//! optimal.

mod candidates;
mod phase;
mod planner;
mod replay;
mod reward;

pub use candidates::CandidateSet;
pub use phase::Phase;
pub use planner::{PathPlan, PathPlanner, PhaseReport};
pub use replay::{Replay, ReplayError, replay};
pub use reward::{Resources, Reward};
