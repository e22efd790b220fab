//! Battle sequence planner.
//!
//! Finds the minimum-turn rotation of attacks, skills and resource trades that
//! defeats one or more sequential boss phases.
//!
//! # Search
//!
//! Best-first branch-and-bound over [`BattleState`]:
//!
//! 1. **Ordering**: nodes pop by `f = g + h`, where `h` divides the remaining
//!    boss HP by the average damage of the available options
//! 2. **Cutoff**: a node is dropped once `g` plus an admissible bound (the
//!    strongest single-turn option) cannot beat the best plan found so far
//! 3. **Dominance**: a state already reached in the same or fewer turns is
//!    not expanded again
//!
//! No winning sequence is a normal outcome: [`BattlePlan::turns`] is `None`
//! and the sequence is empty.

mod hp;
mod planner;
mod skill;
mod state;

pub use hp::Hp;
pub use planner::{BattlePlan, BattlePlanner, TurnRecord};
pub use skill::{BattleAction, Skill, SkillEffect, Trade};
pub use state::BattleState;

use crate::error::{ErrorSeverity, PlannerError};

/// Upper bound on skills per scenario (cooldowns are stored inline).
pub const MAX_SKILLS: usize = 16;

/// Largest accepted stat, cost, damage or total boss health.
pub const MAX_STAT: i64 = 1_000_000_000_000;

/// The planning agent's combat stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub attack: i64,
    pub health: i64,
    pub gold: i64,
}

impl Combatant {
    pub const fn new(attack: i64, health: i64, gold: i64) -> Self {
        Self {
            attack,
            health,
            gold,
        }
    }
}

/// One boss phase. Phases are fought in order; each starts at full health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhase {
    pub health: i64,
    /// Damage dealt to the combatant after every turn the boss survives.
    pub attack: i64,
}

impl BossPhase {
    pub const fn new(health: i64, attack: i64) -> Self {
        Self { health, attack }
    }
}

/// Complete input of a battle planning call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleScenario {
    pub combatant: Combatant,
    pub bosses: Vec<BossPhase>,
    pub skills: Vec<Skill>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trades: Vec<Trade>,
}

impl BattleScenario {
    pub fn new(combatant: Combatant, bosses: Vec<BossPhase>, skills: Vec<Skill>) -> Self {
        Self {
            combatant,
            bosses,
            skills,
            trades: Vec::new(),
        }
    }

    pub fn with_trades(mut self, trades: Vec<Trade>) -> Self {
        self.trades = trades;
        self
    }

    /// Rejects structurally invalid scenarios before any search starts.
    pub fn validate(&self) -> Result<(), BattleError> {
        if self.bosses.is_empty() {
            return Err(BattleError::NoBosses);
        }
        if self.skills.is_empty() {
            return Err(BattleError::NoSkills);
        }
        if self.skills.len() > MAX_SKILLS {
            return Err(BattleError::TooManySkills {
                count: self.skills.len(),
                limit: MAX_SKILLS,
            });
        }
        if self.combatant.attack <= 0 {
            return Err(BattleError::NonPositiveAttack(self.combatant.attack));
        }
        if self.combatant.health <= 0 {
            return Err(BattleError::NonPositiveHealth(self.combatant.health));
        }
        check_stat("combatant attack", self.combatant.attack)?;
        check_stat("combatant health", self.combatant.health)?;
        check_stat("combatant gold", self.combatant.gold.abs())?;
        for (index, boss) in self.bosses.iter().enumerate() {
            if boss.health <= 0 {
                return Err(BattleError::NonPositiveBossHealth { index });
            }
            if boss.attack < 0 {
                return Err(BattleError::NegativeBossAttack { index });
            }
            check_stat("boss attack", boss.attack)?;
        }
        let total = self
            .bosses
            .iter()
            .try_fold(0i64, |total, boss| total.checked_add(boss.health))
            .unwrap_or(i64::MAX);
        check_stat("total boss health", total)?;

        let attack = self.combatant.attack;
        for skill in &self.skills {
            let invalid = match skill.effect {
                SkillEffect::Multiplier(factor) => !factor.is_finite() || factor < 0.0,
                SkillEffect::Damage(amount) => amount < 0,
                SkillEffect::Freeze(_) => false,
            };
            if invalid || skill.damage_with(attack) > Hp::whole(MAX_STAT) {
                return Err(BattleError::InvalidSkill(skill.id.clone()));
            }
        }
        for trade in &self.trades {
            let costs = [trade.gold_cost, trade.health_cost, trade.bonus_damage];
            if costs.iter().any(|value| !(0..=MAX_STAT).contains(value)) {
                return Err(BattleError::InvalidTrade(trade.id.clone()));
            }
        }
        Ok(())
    }

    /// Total boss HP across every phase.
    pub fn total_boss_health(&self) -> Hp {
        self.bosses.iter().map(|boss| Hp::whole(boss.health)).sum()
    }
}

fn check_stat(field: &'static str, value: i64) -> Result<(), BattleError> {
    if value > MAX_STAT {
        return Err(BattleError::StatOutOfRange { field, value });
    }
    Ok(())
}

/// Threat estimate for a host deciding whether to engage: turns needed to
/// clear every phase at the average damage of the base attack and each
/// damage-dealing skill.
pub fn estimate_turns(scenario: &BattleScenario) -> f64 {
    let attack = scenario.combatant.attack;
    let damages: Vec<Hp> = std::iter::once(Hp::whole(attack))
        .chain(
            scenario
                .skills
                .iter()
                .filter(|skill| skill.deals_damage())
                .map(|skill| skill.damage_with(attack)),
        )
        .collect();
    let average = damages.iter().copied().sum::<Hp>().as_f64() / damages.len() as f64;
    if average > 0.0 {
        scenario.total_boss_health().as_f64() / average
    } else {
        f64::INFINITY
    }
}

/// Battle scenarios rejected at the boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("scenario has no boss phases")]
    NoBosses,

    #[error("scenario has a boss but no skills")]
    NoSkills,

    #[error("{count} skills exceed the limit of {limit}")]
    TooManySkills { count: usize, limit: usize },

    #[error("combatant attack must be positive, got {0}")]
    NonPositiveAttack(i64),

    #[error("combatant health must be positive, got {0}")]
    NonPositiveHealth(i64),

    #[error("boss phase {index} has non-positive health")]
    NonPositiveBossHealth { index: usize },

    #[error("boss phase {index} has negative attack")]
    NegativeBossAttack { index: usize },

    #[error("skill '{0}' has an invalid effect")]
    InvalidSkill(String),

    #[error("trade '{0}' has a negative or oversized cost or bonus")]
    InvalidTrade(String),

    #[error("{field} {value} exceeds the stat limit")]
    StatOutOfRange { field: &'static str, value: i64 },
}

impl PlannerError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            NoBosses => "BATTLE_NO_BOSSES",
            NoSkills => "BATTLE_NO_SKILLS",
            TooManySkills { .. } => "BATTLE_TOO_MANY_SKILLS",
            NonPositiveAttack(_) => "BATTLE_NON_POSITIVE_ATTACK",
            NonPositiveHealth(_) => "BATTLE_NON_POSITIVE_HEALTH",
            NonPositiveBossHealth { .. } => "BATTLE_NON_POSITIVE_BOSS_HEALTH",
            NegativeBossAttack { .. } => "BATTLE_NEGATIVE_BOSS_ATTACK",
            InvalidSkill(_) => "BATTLE_INVALID_SKILL",
            InvalidTrade(_) => "BATTLE_INVALID_TRADE",
            StatOutOfRange { .. } => "BATTLE_STAT_OUT_OF_RANGE",
        }
    }
}
