use tracing::{debug, trace, warn};

use super::state::{BattleRules, BattleState};
use super::{BattleAction, BattleError, BattleScenario, Hp};
use crate::config::{BattleConfig, ConfigError};
use crate::search::{BestCosts, Frontier, SearchStats};

/// One resolved turn of a plan, replayed with boss retaliation applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    /// 1-based turn number.
    pub turn: u32,
    pub action: BattleAction,
    /// `attack`, the skill id, or the trade id.
    pub label: String,
    pub damage: Hp,
    /// Phase being fought after the turn (equals the phase count once won).
    pub boss_index: usize,
    pub boss_hp: Hp,
    pub retaliation: i64,
    pub player_hp: i64,
    pub gold: i64,
}

/// Result of a battle planning call.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlePlan {
    /// Minimum number of turns, or `None` when no winning sequence exists.
    pub turns: Option<u32>,
    pub sequence: Vec<BattleAction>,
    /// Whether the combatant is still standing after the replayed sequence.
    pub survives: bool,
    /// Combatant health lost over the replayed sequence.
    pub health_lost: i64,
    pub log: Vec<TurnRecord>,
    /// Set when the expansion budget ran out; `turns` may then be sub-optimal.
    pub truncated: bool,
    pub stats: SearchStats,
}

impl BattlePlan {
    pub fn is_win(&self) -> bool {
        self.turns.is_some()
    }

    /// First action of the plan, falling back to the baseline attack.
    pub fn first_action(&self) -> BattleAction {
        self.sequence.first().copied().unwrap_or(BattleAction::Attack)
    }
}

struct Node {
    state: BattleState,
    turns: u32,
    parent: Option<usize>,
    action: BattleAction,
}

/// Branch-and-bound battle planner.
///
/// Stateless between calls; every [`BattlePlanner::plan`] starts a fresh search.
#[derive(Clone, Debug, Default)]
pub struct BattlePlanner {
    config: BattleConfig,
}

impl BattlePlanner {
    pub fn new(config: BattleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Searches for the minimum-turn winning sequence.
    ///
    /// Returns an error only for structurally invalid scenarios. A scenario
    /// that cannot be won yields a plan with `turns == None`.
    pub fn plan(&self, scenario: &BattleScenario) -> Result<BattlePlan, BattleError> {
        scenario.validate()?;

        let rules = BattleRules::new(scenario, self.config.track_survival);
        let (winner, nodes, stats, truncated) = self.search(&rules);

        let Some(winner) = winner else {
            debug!(
                expanded = stats.expanded,
                truncated, "battle search found no winning sequence"
            );
            return Ok(BattlePlan {
                truncated,
                stats,
                ..BattlePlan::default()
            });
        };

        let sequence = reconstruct(&nodes, winner);
        let turns = nodes[winner].turns;
        let (log, survives, health_lost) = replay(scenario, &sequence);

        debug!(
            turns,
            survives,
            health_lost,
            expanded = stats.expanded,
            pruned = stats.pruned,
            "battle plan found"
        );

        Ok(BattlePlan {
            turns: Some(turns),
            sequence,
            survives,
            health_lost,
            log,
            truncated,
            stats,
        })
    }

    /// The action to take this turn: the first step of the optimal plan, or
    /// the baseline attack when none exists.
    pub fn next_action(&self, scenario: &BattleScenario) -> Result<BattleAction, BattleError> {
        Ok(self.plan(scenario)?.first_action())
    }

    fn search(&self, rules: &BattleRules<'_>) -> (Option<usize>, Vec<Node>, SearchStats, bool) {
        let mut stats = SearchStats::default();
        let mut nodes = Vec::new();
        let mut visited = BestCosts::new();
        let mut frontier = Frontier::new();
        let mut best: Option<(u32, usize)> = None;
        let mut truncated = false;

        let root = rules.initial_state();
        let root_priority = rules.heuristic(&root);
        visited.offer_lower(root.clone(), 0u32);
        nodes.push(Node {
            state: root,
            turns: 0,
            parent: None,
            action: BattleAction::Attack,
        });
        frontier.push(root_priority, 0usize);
        stats.pushed += 1;

        // Cannot beat the incumbent when the admissible bound reaches it.
        let cut = |best: Option<(u32, usize)>, bound: u32| {
            best.is_some_and(|(min_turns, _)| bound >= min_turns)
        };

        while let Some((_, index)) = frontier.pop() {
            let turns = nodes[index].turns;
            if visited
                .get(&nodes[index].state)
                .is_some_and(|stored| stored < turns)
            {
                continue;
            }
            let bound = turns.saturating_add(rules.lower_bound(&nodes[index].state));
            if cut(best, bound) {
                stats.pruned += 1;
                continue;
            }

            if stats.expanded >= self.config.max_expansions {
                warn!(
                    limit = self.config.max_expansions,
                    best = best.map(|(t, _)| t),
                    "battle search hit its expansion limit"
                );
                truncated = true;
                break;
            }
            stats.expanded += 1;

            let state = nodes[index].state.clone();
            let actions: Vec<BattleAction> = rules.legal_actions(&state).collect();
            for action in actions {
                let Some(next) = rules.apply(&state, action) else {
                    stats.pruned += 1;
                    continue;
                };
                let next_turns = turns + 1;

                if rules.is_won(&next) {
                    if !cut(best, next_turns) {
                        nodes.push(Node {
                            state: next,
                            turns: next_turns,
                            parent: Some(index),
                            action,
                        });
                        best = Some((next_turns, nodes.len() - 1));
                        trace!(turns = next_turns, "new best battle sequence");
                    }
                    continue;
                }

                let bound = next_turns.saturating_add(rules.lower_bound(&next));
                if cut(best, bound) || !visited.offer_lower(next.clone(), next_turns) {
                    stats.pruned += 1;
                    continue;
                }

                let priority = f64::from(next_turns) + rules.heuristic(&next);
                nodes.push(Node {
                    state: next,
                    turns: next_turns,
                    parent: Some(index),
                    action,
                });
                frontier.push(priority, nodes.len() - 1);
                stats.pushed += 1;
            }
        }

        (best.map(|(_, index)| index), nodes, stats, truncated)
    }
}

fn reconstruct(nodes: &[Node], winner: usize) -> Vec<BattleAction> {
    let mut sequence = Vec::new();
    let mut cursor = Some(winner);
    while let Some(index) = cursor {
        let node = &nodes[index];
        if node.parent.is_some() {
            sequence.push(node.action);
        }
        cursor = node.parent;
    }
    sequence.reverse();
    sequence
}

/// Replays `sequence` with retaliation and freezes applied, stopping at the
/// combatant's death.
fn replay(scenario: &BattleScenario, sequence: &[BattleAction]) -> (Vec<TurnRecord>, bool, i64) {
    let rules = BattleRules::new(scenario, true);
    let mut state = rules.initial_state();
    let mut log = Vec::with_capacity(sequence.len());

    for (turn, action) in (1u32..).zip(sequence) {
        let resolved = rules.resolve(&state, *action);
        state = resolved.next;
        log.push(TurnRecord {
            turn,
            action: *action,
            label: action
                .label(&scenario.skills, &scenario.trades)
                .to_string(),
            damage: resolved.damage,
            boss_index: state.boss_index,
            boss_hp: state.boss_hp,
            retaliation: resolved.retaliation,
            player_hp: state.player_hp,
            gold: state.gold,
        });
        if state.player_hp <= 0 {
            break;
        }
    }

    let survives = state.player_hp > 0 && rules.is_won(&state);
    let health_lost = scenario.combatant.health - state.player_hp.max(0);
    (log, survives, health_lost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BossPhase, Combatant, Skill, SkillEffect, Trade};

    fn single_boss(attack: i64, boss_hp: i64, skills: Vec<Skill>) -> BattleScenario {
        BattleScenario::new(
            Combatant::new(attack, 100, 0),
            vec![BossPhase::new(boss_hp, 10)],
            skills,
        )
    }

    #[test]
    fn strong_skill_wins_in_one_turn() {
        let scenario = single_boss(10, 30, vec![Skill::damage("slash", 40, 2)]);
        let plan = BattlePlanner::default().plan(&scenario).unwrap();

        assert_eq!(plan.turns, Some(1));
        assert_eq!(plan.sequence, vec![BattleAction::Skill(0)]);
        assert!(plan.survives);
        assert_eq!(plan.health_lost, 0);
    }

    #[test]
    fn cooldowns_force_attacks_between_skill_uses() {
        // slash(25, cd 1) + attack(10): slash, attack, slash = 60 >= 55.
        let scenario = single_boss(10, 55, vec![Skill::damage("slash", 25, 1)]);
        let plan = BattlePlanner::default().plan(&scenario).unwrap();

        assert_eq!(plan.turns, Some(3));
        assert_eq!(
            plan.sequence,
            vec![
                BattleAction::Skill(0),
                BattleAction::Attack,
                BattleAction::Skill(0)
            ]
        );
    }

    #[test]
    fn phases_do_not_carry_excess_damage() {
        let scenario = BattleScenario::new(
            Combatant::new(10, 100, 0),
            vec![BossPhase::new(5, 0), BossPhase::new(5, 0)],
            vec![Skill::damage("nuke", 100, 5)],
        );
        let plan = BattlePlanner::default().plan(&scenario).unwrap();
        assert_eq!(plan.turns, Some(2));
        assert_eq!(plan.log.last().map(|record| record.boss_index), Some(2));
    }

    #[test]
    fn log_applies_retaliation_until_the_boss_falls() {
        let scenario = single_boss(10, 30, vec![Skill::damage("poke", 1, 0)]);
        let plan = BattlePlanner::default().plan(&scenario).unwrap();

        assert_eq!(plan.turns, Some(3));
        let retaliation: Vec<i64> = plan.log.iter().map(|r| r.retaliation).collect();
        assert_eq!(retaliation, vec![10, 10, 0]);
        assert_eq!(plan.health_lost, 20);
        assert!(plan.survives);
    }

    #[test]
    fn survival_mode_rejects_fatal_sequences() {
        // Three attacks are needed; the boss kills a 15 HP combatant after two.
        let scenario = BattleScenario::new(
            Combatant::new(10, 15, 0),
            vec![BossPhase::new(30, 10)],
            vec![Skill::damage("poke", 1, 0)],
        );
        let fast = BattlePlanner::default().plan(&scenario).unwrap();
        assert_eq!(fast.turns, Some(3));
        assert!(!fast.survives);

        let careful = BattlePlanner::new(BattleConfig::default().with_survival(true))
            .unwrap()
            .plan(&scenario)
            .unwrap();
        assert_eq!(careful.turns, None);
        assert!(careful.sequence.is_empty());
    }

    #[test]
    fn freeze_keeps_the_combatant_alive() {
        let scenario = BattleScenario::new(
            Combatant::new(10, 15, 0),
            vec![BossPhase::new(30, 10)],
            vec![Skill::new("frost", 5, SkillEffect::Freeze(3))],
        );
        let plan = BattlePlanner::new(BattleConfig::default().with_survival(true))
            .unwrap()
            .plan(&scenario)
            .unwrap();

        assert_eq!(plan.turns, Some(4));
        assert!(plan.sequence.contains(&BattleAction::Skill(0)));
        assert!(plan.survives);
    }

    #[test]
    fn multiplier_damage_keeps_fractions() {
        // 1.5 * 7 = 10.5 per use; two uses clear 21 HP exactly.
        let surge = Skill::new("surge", 0, SkillEffect::Multiplier(1.5));
        let scenario = single_boss(7, 21, vec![surge]);
        let plan = BattlePlanner::default().plan(&scenario).unwrap();

        assert_eq!(plan.turns, Some(2));
        assert_eq!(plan.sequence, vec![BattleAction::Skill(0); 2]);
        assert_eq!(plan.log[0].damage, Hp::from_hundredths(1050));
        assert_eq!(plan.log[0].boss_hp, Hp::from_hundredths(1050));
    }

    #[test]
    fn zero_expansion_budget_is_a_config_error() {
        let config = BattleConfig {
            max_expansions: 0,
            ..BattleConfig::default()
        };
        assert_eq!(
            BattlePlanner::new(config).unwrap_err(),
            ConfigError::ZeroExpansionLimit
        );
    }

    #[test]
    fn gold_trade_shortens_the_fight() {
        let scenario = BattleScenario::new(
            Combatant::new(10, 100, 20),
            vec![BossPhase::new(40, 0)],
            vec![Skill::damage("poke", 1, 0)],
        )
        .with_trades(vec![Trade::for_gold("bribe", 20, 20)]);
        let plan = BattlePlanner::default().plan(&scenario).unwrap();

        // bribe (30) + attack (10) instead of four attacks.
        assert_eq!(plan.turns, Some(2));
        assert!(plan.sequence.contains(&BattleAction::Trade(0)));
        assert_eq!(plan.log.last().map(|r| r.gold), Some(0));
    }

    #[test]
    fn single_use_skill_is_spent() {
        let scenario = single_boss(
            10,
            80,
            vec![Skill::damage("ultimate", 40, 0).single_use()],
        );
        let plan = BattlePlanner::default().plan(&scenario).unwrap();
        // 40 + 10 * 4
        assert_eq!(plan.turns, Some(5));
        let uses = plan
            .sequence
            .iter()
            .filter(|action| **action == BattleAction::Skill(0))
            .count();
        assert_eq!(uses, 1);
    }

    #[test]
    fn next_action_matches_plan_head() {
        let scenario = single_boss(10, 30, vec![Skill::damage("slash", 40, 2)]);
        let action = BattlePlanner::default().next_action(&scenario).unwrap();
        assert_eq!(action, BattleAction::Skill(0));
    }

    #[test]
    fn unwinnable_plan_falls_back_to_attack() {
        let plan = BattlePlan::default();
        assert_eq!(plan.first_action(), BattleAction::Attack);
        assert!(!plan.is_win());
    }

    #[test]
    fn invalid_scenario_is_rejected_before_search() {
        let scenario = single_boss(0, 30, vec![Skill::damage("slash", 40, 2)]);
        assert_eq!(
            BattlePlanner::default().plan(&scenario),
            Err(BattleError::NonPositiveAttack(0))
        );
    }
}
