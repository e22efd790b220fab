//! Planner configuration constants and tunable parameters.
//!
//! Configuration is read-only during a search. Hosts build a [`PlannerConfig`]
//! once (defaults or a TOML file), call [`PlannerConfig::validate`] at the
//! boundary, and hand the relevant section to each planner.

use crate::error::{ErrorSeverity, PlannerError};

/// Top-level configuration for every planner in the crate.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub path: PathConfig,
    pub battle: BattleConfig,
}

impl PlannerConfig {
    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.path.validate()?;
        self.battle.validate()
    }
}

// ============================================================================
// Path planner
// ============================================================================

/// Reward constants, thresholds and quotas for the resource path planner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Health the agent starts the first phase with.
    pub initial_health: i64,
    /// Health cap applied when drinking potions.
    pub max_health: i64,
    /// Gold the agent starts the first phase with.
    pub initial_gold: i64,

    /// Score and gold granted by a gold pile.
    pub gold_value: i64,
    /// Health restored by a potion (capped at `max_health`).
    pub potion_heal: i64,
    /// Score of a potion drunk at zero health; scaled by the missing fraction.
    pub potion_score: i64,

    /// Score lost when stepping on a trap.
    pub trap_penalty: i64,
    /// Gold paid to disarm a trap when affordable.
    pub trap_gold_cost: i64,
    /// Health lost to a trap that could not be paid off.
    pub trap_damage: i64,

    /// The boss can only be engaged with strictly more health than this.
    pub boss_health_threshold: i64,
    /// Score for defeating the boss checkpoint.
    pub boss_reward: i64,
    /// Health spent in the boss fight.
    pub boss_health_cost: i64,

    /// Multiplier on the Manhattan heuristic. Values above 1 trade optimality
    /// for speed on large mazes.
    pub heuristic_weight: f64,
    /// Per-kind candidate quotas that bound the collected-resource mask.
    pub quota: ResourceQuota,
    /// Expansion budget per phase; exceeding it fails the phase.
    pub max_expansions: usize,
}

impl PathConfig {
    pub const DEFAULT_INITIAL_HEALTH: i64 = 100;
    pub const DEFAULT_INITIAL_GOLD: i64 = 20;
    pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 2.0;
    pub const DEFAULT_MAX_EXPANSIONS: usize = 200_000;

    /// Validates tunables that would otherwise break the search invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_health <= 0 || self.max_health <= 0 {
            return Err(ConfigError::NonPositiveHealth);
        }
        if self.initial_health > self.max_health {
            return Err(ConfigError::HealthAboveMaximum {
                initial: self.initial_health,
                maximum: self.max_health,
            });
        }
        if !self.heuristic_weight.is_finite() || self.heuristic_weight < 0.0 {
            return Err(ConfigError::InvalidHeuristicWeight(self.heuristic_weight));
        }
        let total = self.quota.total();
        if total > ResourceQuota::MAX_TRACKED {
            return Err(ConfigError::QuotaTooLarge {
                requested: total,
                limit: ResourceQuota::MAX_TRACKED,
            });
        }
        if self.max_expansions == 0 {
            return Err(ConfigError::ZeroExpansionLimit);
        }
        Ok(())
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            initial_health: Self::DEFAULT_INITIAL_HEALTH,
            max_health: Self::DEFAULT_INITIAL_HEALTH,
            initial_gold: Self::DEFAULT_INITIAL_GOLD,
            gold_value: 50,
            potion_heal: 30,
            potion_score: 40,
            trap_penalty: 30,
            trap_gold_cost: 30,
            trap_damage: 30,
            boss_health_threshold: 50,
            boss_reward: 100,
            boss_health_cost: 30,
            heuristic_weight: Self::DEFAULT_HEURISTIC_WEIGHT,
            quota: ResourceQuota::default(),
            max_expansions: Self::DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// How many resources of each kind are tracked per phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceQuota {
    pub gold: usize,
    pub potions: usize,
    pub traps: usize,
}

impl ResourceQuota {
    /// Width of the collected mask.
    pub const MAX_TRACKED: usize = 64;

    pub const fn total(&self) -> usize {
        self.gold + self.potions + self.traps
    }
}

impl Default for ResourceQuota {
    fn default() -> Self {
        Self {
            gold: 8,
            potions: 4,
            traps: 8,
        }
    }
}

// ============================================================================
// Battle planner
// ============================================================================

/// Search options for the battle sequence planner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Track player health, gold and freeze turns inside the search state so
    /// only surviving sequences are accepted.
    pub track_survival: bool,
    /// Expansion budget; the best plan found so far is returned when exceeded.
    pub max_expansions: usize,
}

impl BattleConfig {
    pub const DEFAULT_MAX_EXPANSIONS: usize = 500_000;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == 0 {
            return Err(ConfigError::ZeroExpansionLimit);
        }
        Ok(())
    }

    pub fn with_survival(mut self, track_survival: bool) -> Self {
        self.track_survival = track_survival;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            track_survival: false,
            max_expansions: Self::DEFAULT_MAX_EXPANSIONS,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration values rejected at the boundary.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("health values must be positive")]
    NonPositiveHealth,

    #[error("initial health {initial} exceeds maximum {maximum}")]
    HealthAboveMaximum { initial: i64, maximum: i64 },

    #[error("heuristic weight must be finite and non-negative, got {0}")]
    InvalidHeuristicWeight(f64),

    #[error("resource quota {requested} exceeds the {limit}-bit collected mask")]
    QuotaTooLarge { requested: usize, limit: usize },

    #[error("expansion limit must be non-zero")]
    ZeroExpansionLimit,
}

impl PlannerError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            NonPositiveHealth => "CONFIG_NON_POSITIVE_HEALTH",
            HealthAboveMaximum { .. } => "CONFIG_HEALTH_ABOVE_MAXIMUM",
            InvalidHeuristicWeight(_) => "CONFIG_INVALID_HEURISTIC_WEIGHT",
            QuotaTooLarge { .. } => "CONFIG_QUOTA_TOO_LARGE",
            ZeroExpansionLimit => "CONFIG_ZERO_EXPANSION_LIMIT",
        }
    }
}
