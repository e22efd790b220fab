//! Battle scenario loader.
//!
//! The minimal document lists boss-phase hit points and flat-damage skills:
//!
//! ```json
//! { "boss_hp": [30, 20], "skills": [{ "damage": 40, "cooldown": 2 }] }
//! ```
//!
//! Optional fields extend it with combatant stats, per-phase boss attack,
//! multiplier/freeze skills, and gold or health trades.

use std::path::Path;

use planner_core::{BattleScenario, BossPhase, Combatant, Skill, SkillEffect, Trade};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file, rejected};

const DEFAULT_ATTACK: i64 = 10;
const DEFAULT_HEALTH: i64 = 100;
const DEFAULT_GOLD: i64 = 20;
const DEFAULT_BOSS_ATTACK: i64 = 10;

/// A scalar or a per-phase list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(i64),
    Many(Vec<i64>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<i64> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SkillJson {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    cooldown: u32,
    damage: Option<i64>,
    damage_multiplier: Option<f64>,
    freeze_turns: Option<u32>,
    #[serde(default)]
    single_use: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct TradeJson {
    id: String,
    #[serde(default)]
    gold_cost: i64,
    #[serde(default)]
    health_cost: i64,
    bonus_damage: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct ScenarioJson {
    boss_hp: OneOrMany,
    #[serde(default)]
    skills: Vec<SkillJson>,
    attack: Option<i64>,
    health: Option<i64>,
    gold: Option<i64>,
    boss_attack: Option<OneOrMany>,
    #[serde(default)]
    trades: Vec<TradeJson>,
}

impl SkillJson {
    fn into_skill(self, index: usize) -> LoadResult<Skill> {
        let effect = match (self.damage, self.damage_multiplier, self.freeze_turns) {
            (Some(damage), None, None) => SkillEffect::Damage(damage),
            (None, Some(factor), None) => SkillEffect::Multiplier(factor),
            (None, None, Some(turns)) => SkillEffect::Freeze(turns),
            _ => anyhow::bail!(
                "Skill {} must set exactly one of damage, damage_multiplier, freeze_turns",
                index
            ),
        };

        let id = self.id.unwrap_or_else(|| format!("skill{}", index + 1));
        let mut skill = Skill::new(id, self.cooldown, effect);
        if let Some(name) = self.name {
            skill = skill.with_name(name);
        }
        if self.single_use {
            skill = skill.single_use();
        }
        Ok(skill)
    }
}

/// Loader for battle scenarios from JSON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<BattleScenario> {
        let content = read_file(path)?;
        let scenario = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            phases = scenario.bosses.len(),
            skills = scenario.skills.len(),
            trades = scenario.trades.len(),
            "loaded battle scenario"
        );
        Ok(scenario)
    }

    /// Parses and validates a scenario document.
    pub fn parse(content: &str) -> LoadResult<BattleScenario> {
        let data: ScenarioJson = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario JSON: {}", e))?;

        let health = data.boss_hp.into_vec();
        let attacks = match data.boss_attack {
            None => vec![DEFAULT_BOSS_ATTACK; health.len()],
            Some(OneOrMany::One(attack)) => vec![attack; health.len()],
            Some(OneOrMany::Many(attacks)) if attacks.len() == health.len() => attacks,
            Some(OneOrMany::Many(attacks)) => anyhow::bail!(
                "boss_attack lists {} phases but boss_hp lists {}",
                attacks.len(),
                health.len()
            ),
        };
        let bosses = health
            .into_iter()
            .zip(attacks)
            .map(|(health, attack)| BossPhase::new(health, attack))
            .collect();

        let skills = data
            .skills
            .into_iter()
            .enumerate()
            .map(|(index, skill)| skill.into_skill(index))
            .collect::<LoadResult<Vec<_>>>()?;

        let trades = data
            .trades
            .into_iter()
            .map(|trade| Trade {
                id: trade.id,
                gold_cost: trade.gold_cost,
                health_cost: trade.health_cost,
                bonus_damage: trade.bonus_damage,
            })
            .collect();

        let combatant = Combatant::new(
            data.attack.unwrap_or(DEFAULT_ATTACK),
            data.health.unwrap_or(DEFAULT_HEALTH),
            data.gold.unwrap_or(DEFAULT_GOLD),
        );
        let scenario = BattleScenario::new(combatant, bosses, skills).with_trades(trades);
        scenario
            .validate()
            .map_err(|e| rejected("battle scenario", e))?;
        Ok(scenario)
    }
}
