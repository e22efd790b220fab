//! Search engines behind the maze game's AI agent.
//!
//! `planner-core` holds three independent planners that read a snapshot of
//! the game and return a result the host applies to its own world state:
//! [`battle::BattlePlanner`] (minimum-turn skill rotations),
//! [`path::PathPlanner`] (score-maximising routes through the maze) and
//! [`puzzle::PasswordSolver`] (steppable digest-guided backtracking).
//! Every call is synchronous and single-threaded, and "no solution" is
//! reported as a normal result rather than an error.
pub mod battle;
pub mod config;
pub mod error;
pub mod maze;
pub mod path;
pub mod puzzle;
pub mod rng;
pub mod search;

pub use battle::{
    BattleAction, BattleError, BattlePlan, BattlePlanner, BattleScenario, BossPhase, Combatant, Hp,
    Skill, SkillEffect, Trade, TurnRecord, estimate_turns,
};
pub use config::{BattleConfig, ConfigError, PathConfig, PlannerConfig, ResourceQuota};
pub use error::{ErrorSeverity, PlannerError};
pub use maze::{CellType, Maze, MazeError, Position};
pub use path::{PathPlan, PathPlanner, Phase, PhaseReport, Replay, ReplayError, replay};
pub use puzzle::{
    Clue, Outcome, PasswordSolver, PuzzleError, PuzzleSpec, Strategy, Trace, TraceKind, solve,
};
pub use rng::PcgRng;
pub use search::SearchStats;
