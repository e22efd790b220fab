use std::fmt;

use super::Hp;

/// What a skill does when it is used.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillEffect {
    /// Flat damage, independent of the combatant's attack.
    Damage(i64),
    /// Damage equal to `attack * factor`, kept to the hundredth.
    Multiplier(f64),
    /// No damage; the boss skips its next `n` retaliations.
    Freeze(u32),
}

/// A combat skill with a cooldown.
///
/// After use the skill is unavailable for `cooldown` turns. Single-use
/// skills leave the available set entirely once used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub cooldown: u32,
    pub effect: SkillEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub single_use: bool,
}

impl Skill {
    pub fn new(id: impl Into<String>, cooldown: u32, effect: SkillEffect) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            cooldown,
            effect,
            single_use: false,
        }
    }

    /// Flat-damage skill, the shape used by scenario files.
    pub fn damage(id: impl Into<String>, damage: i64, cooldown: u32) -> Self {
        Self::new(id, cooldown, SkillEffect::Damage(damage))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn single_use(mut self) -> Self {
        self.single_use = true;
        self
    }

    /// Damage dealt when used by a combatant with `attack`.
    pub fn damage_with(&self, attack: i64) -> Hp {
        match self.effect {
            SkillEffect::Damage(amount) => Hp::whole(amount),
            SkillEffect::Multiplier(factor) => Hp::from_f64(attack as f64 * factor),
            SkillEffect::Freeze(_) => Hp::ZERO,
        }
    }

    pub fn freeze_turns(&self) -> u32 {
        match self.effect {
            SkillEffect::Freeze(turns) => turns,
            _ => 0,
        }
    }

    pub fn deals_damage(&self) -> bool {
        !matches!(self.effect, SkillEffect::Freeze(_))
    }
}

/// Spend gold or health for one boosted attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold_cost: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub health_cost: i64,
    pub bonus_damage: i64,
}

impl Trade {
    pub fn for_gold(id: impl Into<String>, gold_cost: i64, bonus_damage: i64) -> Self {
        Self {
            id: id.into(),
            gold_cost,
            health_cost: 0,
            bonus_damage,
        }
    }

    pub fn for_health(id: impl Into<String>, health_cost: i64, bonus_damage: i64) -> Self {
        Self {
            id: id.into(),
            gold_cost: 0,
            health_cost,
            bonus_damage,
        }
    }
}

/// One turn's choice. Skill and trade variants index into the slices the
/// plan was computed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BattleAction {
    Attack,
    Skill(usize),
    Trade(usize),
}

impl BattleAction {
    /// Identifier shown in logs: `attack`, the skill id, or the trade id.
    pub fn label<'a>(&self, skills: &'a [Skill], trades: &'a [Trade]) -> &'a str {
        match *self {
            BattleAction::Attack => "attack",
            BattleAction::Skill(index) => skills.get(index).map_or("?", |s| s.id.as_str()),
            BattleAction::Trade(index) => trades.get(index).map_or("?", |t| t.id.as_str()),
        }
    }
}

impl fmt::Display for BattleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleAction::Attack => f.write_str("attack"),
            BattleAction::Skill(index) => write!(f, "skill#{index}"),
            BattleAction::Trade(index) => write!(f, "trade#{index}"),
        }
    }
}
