use arrayvec::ArrayVec;

use super::{BattleAction, BattleScenario, Hp, MAX_SKILLS};

/// A node in the battle state graph.
///
/// `player_hp`, `gold` and `frozen` only change through trades and, when
/// survival is tracked, boss retaliation. Cooldowns are kept per skill so two
/// states that differ only in cooldowns are never merged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BattleState {
    /// Index of the boss phase being fought; equals the phase count once won.
    pub boss_index: usize,
    pub boss_hp: Hp,
    pub cooldowns: ArrayVec<u32, MAX_SKILLS>,
    /// Bit `i` set once single-use skill `i` has been spent.
    pub spent: u32,
    pub player_hp: i64,
    pub gold: i64,
    /// Remaining retaliations the boss will skip.
    pub frozen: u32,
}

/// Outcome of resolving a single turn.
#[derive(Clone, Debug)]
pub(crate) struct Turn {
    pub next: BattleState,
    /// Damage dealt to the boss.
    pub damage: Hp,
    /// Damage the boss dealt back; zero while frozen or once the phase falls.
    pub retaliation: i64,
}

/// Transition rules for one planning call. Borrowed, never mutated.
pub(crate) struct BattleRules<'a> {
    pub scenario: &'a BattleScenario,
    pub track_survival: bool,
}

impl<'a> BattleRules<'a> {
    pub fn new(scenario: &'a BattleScenario, track_survival: bool) -> Self {
        Self {
            scenario,
            track_survival,
        }
    }

    pub fn initial_state(&self) -> BattleState {
        let scenario = self.scenario;
        BattleState {
            boss_index: 0,
            boss_hp: Hp::whole(scenario.bosses[0].health),
            cooldowns: scenario.skills.iter().map(|_| 0).collect(),
            spent: 0,
            player_hp: scenario.combatant.health,
            gold: scenario.combatant.gold,
            frozen: 0,
        }
    }

    pub fn is_won(&self, state: &BattleState) -> bool {
        state.boss_index >= self.scenario.bosses.len()
    }

    fn is_spent(state: &BattleState, index: usize) -> bool {
        state.spent & (1 << index) != 0
    }

    /// Actions legal in `state`: the baseline attack, every ready skill, and
    /// every affordable trade.
    pub fn legal_actions<'s>(
        &'s self,
        state: &'s BattleState,
    ) -> impl Iterator<Item = BattleAction> + 's {
        let skills = self
            .scenario
            .skills
            .iter()
            .enumerate()
            .filter(move |(index, _)| {
                state.cooldowns[*index] == 0 && !Self::is_spent(state, *index)
            })
            .map(|(index, _)| BattleAction::Skill(index));

        let trades = self
            .scenario
            .trades
            .iter()
            .enumerate()
            .filter(move |(_, trade)| {
                state.gold >= trade.gold_cost && state.player_hp > trade.health_cost
            })
            .map(|(index, _)| BattleAction::Trade(index));

        std::iter::once(BattleAction::Attack)
            .chain(skills)
            .chain(trades)
    }

    /// Damage `action` deals this turn.
    pub fn damage_of(&self, action: BattleAction) -> Hp {
        let attack = self.scenario.combatant.attack;
        match action {
            BattleAction::Attack => Hp::whole(attack),
            BattleAction::Skill(index) => self.scenario.skills[index].damage_with(attack),
            BattleAction::Trade(index) => self.trade_damage(index),
        }
    }

    fn trade_damage(&self, index: usize) -> Hp {
        let attack = self.scenario.combatant.attack;
        Hp::whole(attack.saturating_add(self.scenario.trades[index].bonus_damage))
    }

    /// Successor of `state` under `action`, or `None` if the player would not
    /// survive the turn (survival tracking only).
    pub fn apply(&self, state: &BattleState, action: BattleAction) -> Option<BattleState> {
        let turn = self.resolve(state, action);
        (!self.track_survival || turn.next.player_hp > 0).then_some(turn.next)
    }

    /// Resolves one turn without rejecting fatal outcomes.
    pub(crate) fn resolve(&self, state: &BattleState, action: BattleAction) -> Turn {
        let scenario = self.scenario;
        let mut next = state.clone();

        for cooldown in next.cooldowns.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }

        match action {
            BattleAction::Attack => {}
            BattleAction::Skill(index) => {
                let skill = &scenario.skills[index];
                next.cooldowns[index] = skill.cooldown;
                if skill.single_use {
                    next.spent |= 1 << index;
                }
                if self.track_survival {
                    next.frozen = next.frozen.max(skill.freeze_turns());
                }
            }
            BattleAction::Trade(index) => {
                let trade = &scenario.trades[index];
                next.gold -= trade.gold_cost;
                next.player_hp -= trade.health_cost;
            }
        }

        let damage = self.damage_of(action);
        next.boss_hp = next.boss_hp.saturating_sub(damage);
        if !next.boss_hp.is_positive() {
            // Excess damage does not carry into the next phase.
            next.boss_index += 1;
            next.boss_hp = scenario
                .bosses
                .get(next.boss_index)
                .map_or(Hp::ZERO, |boss| Hp::whole(boss.health));
            next.frozen = 0;
            return Turn {
                next,
                damage,
                retaliation: 0,
            };
        }

        let mut retaliation = 0;
        if self.track_survival {
            if next.frozen > 0 {
                next.frozen -= 1;
            } else {
                retaliation = scenario.bosses[next.boss_index].attack;
                next.player_hp -= retaliation;
            }
        }

        Turn {
            next,
            damage,
            retaliation,
        }
    }

    /// Boss HP left in the current phase plus every later phase.
    pub fn remaining_hp(&self, state: &BattleState) -> Hp {
        if self.is_won(state) {
            return Hp::ZERO;
        }
        let later: Hp = self.scenario.bosses[state.boss_index + 1..]
            .iter()
            .map(|boss| Hp::whole(boss.health))
            .sum();
        state.boss_hp.max(Hp::ZERO).saturating_add(later)
    }

    /// Estimated turns left: remaining HP over the average damage of the base
    /// attack and every unspent damage-dealing skill. Cooldown contention is
    /// ignored.
    pub fn heuristic(&self, state: &BattleState) -> f64 {
        let remaining = self.remaining_hp(state);
        if remaining == Hp::ZERO {
            return 0.0;
        }
        let attack = self.scenario.combatant.attack;
        let (total, count) = self
            .scenario
            .skills
            .iter()
            .enumerate()
            .filter(|(index, skill)| skill.deals_damage() && !Self::is_spent(state, *index))
            .fold((Hp::whole(attack), 1u32), |(total, count), (_, skill)| {
                (total.saturating_add(skill.damage_with(attack)), count + 1)
            });
        let average = total.as_f64() / f64::from(count);
        if average > 0.0 {
            remaining.as_f64() / average
        } else {
            f64::INFINITY
        }
    }

    /// Admissible lower bound on turns left: no turn can deal more than the
    /// strongest single option still available.
    pub fn lower_bound(&self, state: &BattleState) -> u32 {
        self.remaining_hp(state)
            .turns_at(self.best_single_turn(state))
            .and_then(|turns| u32::try_from(turns).ok())
            .unwrap_or(u32::MAX)
    }

    fn best_single_turn(&self, state: &BattleState) -> Hp {
        let scenario = self.scenario;
        let attack = scenario.combatant.attack;
        let skills = scenario
            .skills
            .iter()
            .enumerate()
            .filter(|(index, _)| !Self::is_spent(state, *index))
            .map(|(_, skill)| skill.damage_with(attack));
        let trades = (0..scenario.trades.len()).map(|index| self.trade_damage(index));
        std::iter::once(Hp::whole(attack))
            .chain(skills)
            .chain(trades)
            .max()
            .unwrap_or(Hp::whole(attack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BossPhase, Combatant, Skill, SkillEffect, Trade};

    fn scenario() -> BattleScenario {
        BattleScenario::new(
            Combatant::new(10, 100, 20),
            vec![BossPhase::new(30, 10), BossPhase::new(20, 5)],
            vec![
                Skill::damage("slash", 40, 2),
                Skill::new("frost", 3, SkillEffect::Freeze(1)),
            ],
        )
        .with_trades(vec![Trade::for_gold("bribe", 15, 10)])
    }

    #[test]
    fn cooldown_resets_for_used_skill_and_ticks_for_others() {
        let scenario = scenario();
        let rules = BattleRules::new(&scenario, false);
        let after_slash = rules
            .apply(&rules.initial_state(), BattleAction::Skill(0))
            .unwrap();
        assert_eq!(after_slash.cooldowns.as_slice(), &[2, 0]);

        let after_attack = rules.apply(&after_slash, BattleAction::Attack).unwrap();
        assert_eq!(after_attack.cooldowns.as_slice(), &[1, 0]);
        assert!(
            !rules
                .legal_actions(&after_attack)
                .any(|action| action == BattleAction::Skill(0))
        );
    }

    #[test]
    fn defeating_a_phase_advances_without_carry_over() {
        let scenario = scenario();
        let rules = BattleRules::new(&scenario, false);
        let next = rules
            .apply(&rules.initial_state(), BattleAction::Skill(0))
            .unwrap();
        assert_eq!(next.boss_index, 1);
        assert_eq!(next.boss_hp, Hp::whole(20));
        assert_eq!(rules.remaining_hp(&next), Hp::whole(20));
    }

    #[test]
    fn survival_applies_retaliation_unless_frozen() {
        let scenario = scenario();
        let rules = BattleRules::new(&scenario, true);
        let root = rules.initial_state();

        let attacked = rules.apply(&root, BattleAction::Attack).unwrap();
        assert_eq!(attacked.player_hp, 90);

        let frozen = rules.apply(&root, BattleAction::Skill(1)).unwrap();
        assert_eq!(frozen.player_hp, 100);
        assert_eq!(frozen.frozen, 0);
    }

    #[test]
    fn trades_require_gold() {
        let scenario = scenario();
        let rules = BattleRules::new(&scenario, false);
        let root = rules.initial_state();
        assert!(rules.legal_actions(&root).any(|a| a == BattleAction::Trade(0)));

        let traded = rules.apply(&root, BattleAction::Trade(0)).unwrap();
        assert_eq!(traded.gold, 5);
        assert_eq!(traded.boss_hp, Hp::whole(10));
        assert!(!rules.legal_actions(&traded).any(|a| a == BattleAction::Trade(0)));
    }

    #[test]
    fn lower_bound_never_exceeds_heuristic_inputs() {
        let scenario = scenario();
        let rules = BattleRules::new(&scenario, false);
        let root = rules.initial_state();
        // 50 HP total, strongest option deals 40.
        assert_eq!(rules.lower_bound(&root), 2);
        // Average of attack (10) and slash (40); frost deals no damage.
        assert!((rules.heuristic(&root) - 2.0).abs() < f64::EPSILON);
    }
}
