//! Cross-checks the battle planner against exhaustive enumeration on small
//! fixtures.

use std::collections::HashSet;

use planner_core::{
    BattleAction, BattleConfig, BattlePlanner, BattleScenario, BossPhase, Combatant, Skill,
    SkillEffect, Trade, estimate_turns,
};

/// Exhaustive search state. HP is kept in hundredths, like the planner.
#[derive(Clone, PartialEq, Eq, Hash)]
struct Node {
    phase: usize,
    hp: i64,
    cooldowns: Vec<u32>,
    spent: Vec<bool>,
    player_hp: i64,
    gold: i64,
    frozen: u32,
}

/// Shortest winning sequence length by breadth-first enumeration of every
/// legal action sequence (states deduplicated per layer).
fn brute_force_turns(scenario: &BattleScenario, survival: bool) -> Option<u32> {
    let attack = scenario.combatant.attack;
    let skills = &scenario.skills;
    let trades = &scenario.trades;
    let bosses = &scenario.bosses;

    let mut layer = HashSet::from([Node {
        phase: 0,
        hp: bosses[0].health * 100,
        cooldowns: vec![0; skills.len()],
        spent: vec![false; skills.len()],
        player_hp: scenario.combatant.health,
        gold: scenario.combatant.gold,
        frozen: 0,
    }]);

    for depth in 1..=40u32 {
        let mut next_layer = HashSet::new();
        for node in &layer {
            let mut options = vec![BattleAction::Attack];
            for (index, _) in skills.iter().enumerate() {
                if node.cooldowns[index] == 0 && !node.spent[index] {
                    options.push(BattleAction::Skill(index));
                }
            }
            for (index, trade) in trades.iter().enumerate() {
                if node.gold >= trade.gold_cost && node.player_hp > trade.health_cost {
                    options.push(BattleAction::Trade(index));
                }
            }

            for action in options {
                let mut child = node.clone();
                for cooldown in child.cooldowns.iter_mut() {
                    *cooldown = cooldown.saturating_sub(1);
                }
                let damage = match action {
                    BattleAction::Attack => attack * 100,
                    BattleAction::Skill(index) => {
                        let skill = &skills[index];
                        child.cooldowns[index] = skill.cooldown;
                        if skill.single_use {
                            child.spent[index] = true;
                        }
                        match skill.effect {
                            SkillEffect::Damage(amount) => amount * 100,
                            SkillEffect::Multiplier(factor) => {
                                (attack as f64 * factor * 100.0).round() as i64
                            }
                            SkillEffect::Freeze(turns) => {
                                if survival {
                                    child.frozen = child.frozen.max(turns);
                                }
                                0
                            }
                        }
                    }
                    BattleAction::Trade(index) => {
                        let trade = &trades[index];
                        child.gold -= trade.gold_cost;
                        child.player_hp -= trade.health_cost;
                        (attack + trade.bonus_damage) * 100
                    }
                };

                child.hp -= damage;
                if child.hp <= 0 {
                    child.phase += 1;
                    if child.phase == bosses.len() {
                        return Some(depth);
                    }
                    child.hp = bosses[child.phase].health * 100;
                    child.frozen = 0;
                } else if survival {
                    if child.frozen > 0 {
                        child.frozen -= 1;
                    } else {
                        child.player_hp -= bosses[child.phase].attack;
                    }
                }
                if survival && child.player_hp <= 0 {
                    continue;
                }
                next_layer.insert(child);
            }
        }
        if next_layer.is_empty() {
            return None;
        }
        layer = next_layer;
    }
    None
}

fn flat_scenario(attack: i64, bosses: &[i64], skills: &[(i64, u32)]) -> BattleScenario {
    BattleScenario::new(
        Combatant::new(attack, 100, 0),
        bosses.iter().map(|hp| BossPhase::new(*hp, 0)).collect(),
        skills
            .iter()
            .enumerate()
            .map(|(index, (damage, cooldown))| Skill::damage(format!("s{index}"), *damage, *cooldown))
            .collect(),
    )
}

fn check(scenario: &BattleScenario, survival: bool) {
    let planner = BattlePlanner::new(BattleConfig::default().with_survival(survival)).unwrap();
    let plan = planner.plan(scenario).unwrap();
    let expected = brute_force_turns(scenario, survival);

    assert!(!plan.truncated);
    assert_eq!(
        plan.turns, expected,
        "survival {survival}, scenario {scenario:?}"
    );
    assert_eq!(plan.sequence.len() as u32, plan.turns.unwrap_or(0));
    if survival && plan.is_win() {
        assert!(plan.survives);
    }
}

#[test]
fn planner_matches_exhaustive_search() {
    let skill_sets: [&[(i64, u32)]; 4] = [
        &[(7, 1), (12, 3)],
        &[(4, 0), (9, 2)],
        &[(6, 2), (6, 2)],
        &[(15, 4), (2, 0)],
    ];
    let boss_sets: [&[i64]; 5] = [&[8], &[13], &[20], &[6, 9], &[11, 4]];

    for attack in [3, 5] {
        for skills in skill_sets {
            for bosses in boss_sets {
                check(&flat_scenario(attack, bosses, skills), false);
            }
        }
    }
}

/// Skill kits mixing every effect and a single-use finisher.
fn rich_skill_sets() -> Vec<Vec<Skill>> {
    vec![
        vec![
            Skill::new("surge", 1, SkillEffect::Multiplier(1.5)),
            Skill::new("frost", 3, SkillEffect::Freeze(2)),
        ],
        vec![
            Skill::damage("ultimate", 20, 0).single_use(),
            Skill::new("surge", 0, SkillEffect::Multiplier(1.25)),
        ],
        vec![
            Skill::new("frost", 2, SkillEffect::Freeze(1)),
            Skill::damage("slash", 9, 2),
            Skill::new("overdrive", 0, SkillEffect::Multiplier(2.5)).single_use(),
        ],
    ]
}

fn rich_scenario(attack: i64, health: i64, bosses: &[(i64, i64)], skills: Vec<Skill>) -> BattleScenario {
    BattleScenario::new(
        Combatant::new(attack, health, 20),
        bosses
            .iter()
            .map(|(hp, boss_attack)| BossPhase::new(*hp, *boss_attack))
            .collect(),
        skills,
    )
    .with_trades(vec![
        Trade::for_gold("bribe", 10, 8),
        Trade::for_health("blood", 15, 12),
    ])
}

#[test]
fn rich_kits_match_exhaustive_search() {
    let boss_sets: [&[(i64, i64)]; 4] = [&[(21, 10)], &[(30, 8), (12, 12)], &[(45, 6)], &[(17, 20)]];

    for attack in [4, 7] {
        for health in [25, 60] {
            for skills in rich_skill_sets() {
                for bosses in boss_sets {
                    let scenario = rich_scenario(attack, health, bosses, skills.clone());
                    check(&scenario, false);
                    check(&scenario, true);
                }
            }
        }
    }
}

#[test]
fn survival_can_cost_extra_turns() {
    // Two health trades end the fight fastest, but the retaliation in between
    // leaves too little health for the second one.
    let scenario = BattleScenario::new(
        Combatant::new(5, 20, 0),
        vec![BossPhase::new(34, 2)],
        vec![Skill::damage("poke", 1, 0)],
    )
    .with_trades(vec![Trade::for_health("blood", 9, 12)]);

    let fast = BattlePlanner::default().plan(&scenario).unwrap();
    let careful = BattlePlanner::new(BattleConfig::default().with_survival(true))
        .unwrap()
        .plan(&scenario)
        .unwrap();

    assert_eq!(fast.turns, Some(2));
    assert_eq!(careful.turns, Some(5));
    assert_eq!(fast.turns, brute_force_turns(&scenario, false));
    assert_eq!(careful.turns, brute_force_turns(&scenario, true));
}

#[test]
fn reported_sequence_actually_wins() {
    let plan = BattlePlanner::default()
        .plan(&flat_scenario(5, &[20, 20], &[(12, 2), (8, 1)]))
        .unwrap();
    let last = plan.log.last().unwrap();
    assert_eq!(last.boss_index, 2);
    assert_eq!(plan.log.len(), plan.sequence.len());
    assert!(plan.sequence.iter().all(|action| *action != BattleAction::Trade(0)));
}

#[test]
fn estimate_tracks_average_damage() {
    let estimate = estimate_turns(&flat_scenario(10, &[30], &[(40, 2)]));
    assert!((estimate - 30.0 / 25.0).abs() < 1e-9);
}

#[test]
fn single_phase_scenario_from_the_game() {
    let plan = BattlePlanner::default()
        .plan(&flat_scenario(10, &[30], &[(40, 2)]))
        .unwrap();
    assert_eq!(plan.turns, Some(1));
    assert_eq!(plan.sequence, vec![BattleAction::Skill(0)]);
}
