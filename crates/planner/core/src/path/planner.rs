use std::collections::HashSet;

use tracing::{debug, warn};

use super::phase::{Phase, PhaseRules};
use super::{CandidateSet, Resources};
use crate::config::{ConfigError, PathConfig};
use crate::maze::{Maze, Position};
use crate::search::{BestCosts, Frontier, SearchStats};

/// Summary of one leg of a planned route.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseReport {
    pub phase: Phase,
    pub from: Position,
    pub to: Position,
    /// Resources tracked in this phase's mask, in bit order.
    pub tracked: Vec<Position>,
    /// Tracked resources consumed along the chosen leg.
    pub collected: Vec<Position>,
    /// Index of `to` within [`PathPlan::path`].
    pub end_index: usize,
    pub reached: bool,
    pub stats: SearchStats,
}

/// Result of a path planning call. An empty `path` means some phase failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPlan {
    pub path: Vec<Position>,
    pub score: i64,
    pub health: i64,
    pub gold: i64,
    pub phases: Vec<PhaseReport>,
    pub stats: SearchStats,
}

impl PathPlan {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The phase that failed, if any.
    pub fn failed_phase(&self) -> Option<Phase> {
        self.phases
            .iter()
            .find(|report| !report.reached)
            .map(|report| report.phase)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TrailNode {
    position: Position,
    prev: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    position: Position,
    mask: u64,
    resources: Resources,
    trail: usize,
}

/// Terminal node of a successful phase.
struct PhaseEnd {
    node: SearchNode,
    collected: Vec<Position>,
}

/// Weighted A* route planner over `(position, collected_mask)`.
#[derive(Clone, Debug)]
pub struct PathPlanner {
    config: PathConfig,
}

impl PathPlanner {
    pub fn new(config: PathConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Plans START → [boss] → END. The maze is never mutated.
    pub fn plan(&self, maze: &Maze) -> PathPlan {
        let legs: Vec<(Phase, Position, Position)> = match maze.boss() {
            Some(boss) => vec![
                (Phase::ToBoss, maze.start(), boss),
                (Phase::ToEnd, boss, maze.end()),
            ],
            None => vec![(Phase::ToEnd, maze.start(), maze.end())],
        };
        let checkpoint = maze.boss();

        let mut trail = vec![TrailNode {
            position: maze.start(),
            prev: None,
        }];
        let mut current = SearchNode {
            position: maze.start(),
            mask: 0,
            resources: Resources::initial(&self.config),
            trail: 0,
        };
        let mut consumed = HashSet::new();
        let mut phases = Vec::with_capacity(legs.len());
        let mut stats = SearchStats::default();
        let mut steps = 0usize;

        for (phase, from, to) in legs {
            let candidates =
                CandidateSet::select(maze, from, to, &consumed, &self.config.quota);
            let rules = PhaseRules {
                maze,
                config: &self.config,
                candidates: &candidates,
                consumed: &consumed,
                checkpoint,
                phase,
            };
            let mut phase_stats = SearchStats::default();
            let outcome = self.search_phase(&rules, current, to, &mut trail, &mut phase_stats);
            stats.merge(phase_stats);

            let Some(end) = outcome else {
                warn!(
                    %phase,
                    from = %from,
                    to = %to,
                    expanded = phase_stats.expanded,
                    "path planning phase failed"
                );
                phases.push(PhaseReport {
                    phase,
                    from,
                    to,
                    tracked: candidates.positions().to_vec(),
                    collected: Vec::new(),
                    end_index: 0,
                    reached: false,
                    stats: phase_stats,
                });
                return PathPlan {
                    phases,
                    stats,
                    ..PathPlan::default()
                };
            };

            steps += leg_len(&trail, end.node.trail, current.trail);
            consumed.extend(end.collected.iter().copied());
            debug!(
                %phase,
                score = end.node.resources.score,
                collected = end.collected.len(),
                expanded = phase_stats.expanded,
                "path phase reached"
            );
            phases.push(PhaseReport {
                phase,
                from,
                to,
                tracked: candidates.positions().to_vec(),
                collected: end.collected,
                end_index: steps,
                reached: true,
                stats: phase_stats,
            });
            // The next phase starts with a fresh mask over its own candidates.
            current = SearchNode {
                mask: 0,
                ..end.node
            };
        }

        let path = walk(&trail, current.trail);
        PathPlan {
            path,
            score: current.resources.score,
            health: current.resources.health,
            gold: current.resources.gold,
            phases,
            stats,
        }
    }

    fn search_phase(
        &self,
        rules: &PhaseRules<'_>,
        start: SearchNode,
        goal: Position,
        trail: &mut Vec<TrailNode>,
        stats: &mut SearchStats,
    ) -> Option<PhaseEnd> {
        let weight = self.config.heuristic_weight;
        let priority = |node: &SearchNode| {
            -(node.resources.score as f64) + weight * f64::from(node.position.manhattan(goal))
        };

        let mut nodes = vec![start];
        let mut best = BestCosts::new();
        let mut frontier = Frontier::new();
        best.offer_higher((start.position, start.mask), start.resources.score);
        frontier.push(priority(&start), 0usize);
        stats.pushed += 1;

        while let Some((_, index)) = frontier.pop() {
            let node = nodes[index];
            if node.position == goal {
                return Some(PhaseEnd {
                    node,
                    collected: rules.candidates.collected(node.mask),
                });
            }
            if best
                .get(&(node.position, node.mask))
                .is_some_and(|score| score > node.resources.score)
            {
                continue;
            }
            if stats.expanded >= self.config.max_expansions {
                warn!(
                    limit = self.config.max_expansions,
                    "path phase hit its expansion limit"
                );
                return None;
            }
            stats.expanded += 1;

            for next in node.position.neighbors() {
                let Some((mask, resources)) = rules.step(next, node.mask, node.resources) else {
                    stats.pruned += 1;
                    continue;
                };
                if !best.offer_higher((next, mask), resources.score) {
                    stats.pruned += 1;
                    continue;
                }
                trail.push(TrailNode {
                    position: next,
                    prev: Some(node.trail),
                });
                let child = SearchNode {
                    position: next,
                    mask,
                    resources,
                    trail: trail.len() - 1,
                };
                frontier.push(priority(&child), nodes.len());
                nodes.push(child);
                stats.pushed += 1;
            }
        }

        None
    }
}

/// Positions from the trail root to `tail`, in walking order.
fn walk(trail: &[TrailNode], tail: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cursor = Some(tail);
    while let Some(index) = cursor {
        path.push(trail[index].position);
        cursor = trail[index].prev;
    }
    path.reverse();
    path
}

/// Number of moves from trail node `head` back to `anchor`.
fn leg_len(trail: &[TrailNode], head: usize, anchor: usize) -> usize {
    let mut moves = 0;
    let mut cursor = head;
    while cursor != anchor {
        match trail[cursor].prev {
            Some(prev) => {
                moves += 1;
                cursor = prev;
            }
            None => break,
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceQuota;
    use crate::maze::CellType;

    fn planner() -> PathPlanner {
        PathPlanner::new(PathConfig::default()).unwrap()
    }

    #[test]
    fn adjacent_gold_is_collected_before_the_trap() {
        let maze = Maze::from_rows(&["#######", "#GS.TE#", "#######"]).unwrap();
        let config = PathConfig {
            trap_gold_cost: 100,
            ..PathConfig::default()
        };
        let plan = PathPlanner::new(config).unwrap().plan(&maze);

        assert_eq!(plan.score, 20);
        assert_eq!(plan.health, 70);
        assert_eq!(
            plan.path,
            vec![
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(3, 1),
                Position::new(4, 1),
                Position::new(5, 1),
            ]
        );
    }

    #[test]
    fn route_passes_through_the_boss() {
        let maze = Maze::from_rows(&["#####", "#S.B#", "#.#.#", "#..E#", "#####"]).unwrap();
        let plan = planner().plan(&maze);

        let boss = Position::new(3, 1);
        assert!(plan.path.contains(&boss));
        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.phases[0].phase, Phase::ToBoss);
        assert_eq!(plan.path[plan.phases[0].end_index], boss);
        assert_eq!(plan.path.last(), Some(&maze.end()));
        assert_eq!(plan.score, 100);
        assert_eq!(plan.health, 70);
    }

    #[test]
    fn weak_agent_cannot_engage_the_boss() {
        let maze = Maze::from_rows(&["#####", "#SBE#", "#####"]).unwrap();
        let config = PathConfig {
            initial_health: 40,
            ..PathConfig::default()
        };
        let plan = PathPlanner::new(config).unwrap().plan(&maze);

        assert!(plan.is_empty());
        assert_eq!(plan.score, 0);
        assert_eq!(plan.failed_phase(), Some(Phase::ToBoss));
    }

    #[test]
    fn unreachable_end_yields_empty_plan() {
        let maze = Maze::from_rows(&["#####", "#S#E#", "#####"]).unwrap();
        let plan = planner().plan(&maze);
        assert!(plan.is_empty());
        assert_eq!(plan.failed_phase(), Some(Phase::ToEnd));
    }

    #[test]
    fn path_never_touches_walls() {
        let maze = Maze::from_rows(&[
            "#########",
            "#S..G..##",
            "#.##.#..#",
            "#.H#T#.E#",
            "#########",
        ])
        .unwrap();
        let plan = planner().plan(&maze);
        assert!(!plan.is_empty());
        assert!(
            plan.path
                .iter()
                .all(|position| maze.cell(*position) != Some(CellType::Wall))
        );
        assert!(plan.path.windows(2).all(|pair| pair[0].is_adjacent(pair[1])));
    }

    #[test]
    fn traps_beyond_the_quota_are_never_crossed() {
        let maze = Maze::from_rows(&["#######", "#ST.TE#", "#######"]).unwrap();
        let config = PathConfig {
            initial_health: 40,
            initial_gold: 0,
            quota: ResourceQuota {
                gold: 0,
                potions: 0,
                traps: 1,
            },
            ..PathConfig::default()
        };
        let plan = PathPlanner::new(config).unwrap().plan(&maze);

        assert!(plan.is_empty());
        assert_eq!(plan.failed_phase(), Some(Phase::ToEnd));
    }

    #[test]
    fn untracked_resources_are_detoured_around() {
        let maze = Maze::from_rows(&["#######", "#S.T.E#", "#.....#", "#######"]).unwrap();
        let config = PathConfig {
            quota: ResourceQuota {
                gold: 0,
                potions: 0,
                traps: 0,
            },
            ..PathConfig::default()
        };
        let plan = PathPlanner::new(config).unwrap().plan(&maze);

        assert!(!plan.path.contains(&Position::new(3, 1)));
        assert_eq!(plan.score, 0);
        assert_eq!(plan.health, 100);
    }

    #[test]
    fn expansion_limit_fails_the_phase() {
        let maze = Maze::from_rows(&["#######", "#S...E#", "#######"]).unwrap();
        let config = PathConfig {
            max_expansions: 1,
            ..PathConfig::default()
        };
        let plan = PathPlanner::new(config).unwrap().plan(&maze);
        assert!(plan.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PathConfig {
            max_expansions: 0,
            ..PathConfig::default()
        };
        assert_eq!(
            PathPlanner::new(config).unwrap_err(),
            ConfigError::ZeroExpansionLimit
        );
    }
}
