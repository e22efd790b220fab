use crate::config::PathConfig;
use crate::maze::CellType;

/// Simulated agent budget carried along a search path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub score: i64,
    pub health: i64,
    pub gold: i64,
}

impl Resources {
    /// Starting budget from the configuration, with zero score.
    pub fn initial(config: &PathConfig) -> Self {
        Self {
            score: 0,
            health: config.initial_health,
            gold: config.initial_gold,
        }
    }

    /// Applies `reward`; `None` when the move is impassable.
    pub fn apply(self, reward: Reward) -> Option<Self> {
        match reward {
            Reward::Neutral => Some(self),
            Reward::Impassable => None,
            Reward::Gain {
                score,
                health,
                gold,
            } => Some(Self {
                score: self.score + score,
                health: self.health + health,
                gold: self.gold + gold,
            }),
        }
    }
}

/// Effect of stepping onto a cell for the first time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reward {
    Neutral,
    /// Signed deltas applied to the budget.
    Gain { score: i64, health: i64, gold: i64 },
    Impassable,
}

impl Reward {
    /// Reward table keyed by cell kind, evaluated against the budget at the
    /// moment of contact.
    pub fn evaluate(cell: CellType, resources: &Resources, config: &PathConfig) -> Self {
        match cell {
            CellType::Gold => Reward::Gain {
                score: config.gold_value,
                health: 0,
                gold: config.gold_value,
            },
            CellType::HealthPotion => {
                let missing = (config.max_health - resources.health).max(0);
                let score = (config.potion_score * missing + config.max_health - 1) / config.max_health;
                Reward::Gain {
                    score,
                    health: config.potion_heal.min(missing),
                    gold: 0,
                }
            }
            CellType::Trap if resources.gold >= config.trap_gold_cost => Reward::Gain {
                score: -config.trap_penalty,
                health: 0,
                gold: -config.trap_gold_cost,
            },
            CellType::Trap => Reward::Gain {
                score: -config.trap_penalty,
                health: -config.trap_damage,
                gold: 0,
            },
            CellType::Boss if resources.health > config.boss_health_threshold => Reward::Gain {
                score: config.boss_reward,
                health: -config.boss_health_cost,
                gold: 0,
            },
            CellType::Boss => Reward::Impassable,
            CellType::Wall => Reward::Impassable,
            CellType::Path
            | CellType::Locker
            | CellType::Shop
            | CellType::Start
            | CellType::End => Reward::Neutral,
        }
    }
}
