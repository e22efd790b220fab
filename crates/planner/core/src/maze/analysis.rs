//! Structural checks over a maze snapshot.
//!
//! Hosts use these before offering planner-guided movement: an END that
//! cannot be reached makes every path plan fail, and isolated resources are
//! dead weight in candidate quotas.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{Maze, Position};

/// Every walkable cell reachable from `from` (breadth-first).
pub fn reachable_from(maze: &Maze, from: Position) -> HashSet<Position> {
    let mut visited = HashSet::new();
    if !maze.is_walkable(from) {
        return visited;
    }

    let mut queue = VecDeque::from([from]);
    visited.insert(from);
    while let Some(current) = queue.pop_front() {
        for next in maze.walkable_neighbors(current) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Shortest walkable route from `from` to `to`, if any.
pub fn shortest_path(maze: &Maze, from: Position, to: Position) -> Option<Vec<Position>> {
    if !maze.is_walkable(from) || !maze.is_walkable(to) {
        return None;
    }

    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    parents.insert(from, from);
    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut path = vec![current];
            let mut cursor = current;
            while cursor != from {
                cursor = parents[&cursor];
                path.push(cursor);
            }
            path.reverse();
            return Some(path);
        }
        for next in maze.walkable_neighbors(current) {
            if let std::collections::hash_map::Entry::Vacant(slot) = parents.entry(next) {
                slot.insert(current);
                queue.push_back(next);
            }
        }
    }
    None
}

pub fn is_end_reachable(maze: &Maze) -> bool {
    reachable_from(maze, maze.start()).contains(&maze.end())
}

/// Walkable cells that cannot be reached from START, in row-major order.
pub fn isolated_cells(maze: &Maze) -> Vec<Position> {
    let reachable = reachable_from(maze, maze.start());
    maze.walkable_positions()
        .filter(|position| !reachable.contains(position))
        .collect()
}

/// True when the walkable cells contain a loop, i.e. some pair of cells is
/// joined by more than one simple route.
pub fn has_cycle(maze: &Maze) -> bool {
    let mut visited: HashSet<Position> = HashSet::new();

    for root in maze.walkable_positions() {
        if visited.contains(&root) {
            continue;
        }
        // Iterative DFS carrying the parent so the edge we arrived by is not
        // mistaken for a back edge.
        let mut stack = vec![(root, None::<Position>)];
        visited.insert(root);
        while let Some((current, parent)) = stack.pop() {
            for next in maze.walkable_neighbors(current) {
                if Some(next) == parent {
                    continue;
                }
                if !visited.insert(next) {
                    return true;
                }
                stack.push((next, Some(current)));
            }
        }
    }
    false
}

/// Summary of the structural checks, as printed by the CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeReport {
    pub end_reachable: bool,
    pub shortest_route: Option<usize>,
    pub isolated: Vec<Position>,
    pub has_cycle: bool,
}

impl MazeReport {
    pub fn inspect(maze: &Maze) -> Self {
        Self {
            end_reachable: is_end_reachable(maze),
            shortest_route: shortest_path(maze, maze.start(), maze.end())
                .map(|path| path.len() - 1),
            isolated: isolated_cells(maze),
            has_cycle: has_cycle(maze),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_maze_has_no_cycle() {
        let maze = Maze::from_rows(&["#####", "#S..#", "#.#E#", "#####"]).unwrap();
        assert!(!has_cycle(&maze));
        assert!(is_end_reachable(&maze));
    }

    #[test]
    fn open_room_has_cycle() {
        let maze = Maze::from_rows(&["####", "#S.#", "#.E#", "####"]).unwrap();
        assert!(has_cycle(&maze));
    }

    #[test]
    fn walled_off_end_is_unreachable() {
        let maze = Maze::from_rows(&["#####", "#S#E#", "#####"]).unwrap();
        assert!(!is_end_reachable(&maze));
        assert_eq!(isolated_cells(&maze), vec![Position::new(3, 1)]);
        assert_eq!(shortest_path(&maze, maze.start(), maze.end()), None);
    }

    #[test]
    fn shortest_path_walks_the_corridor() {
        let maze = Maze::from_rows(&["######", "#S..E#", "######"]).unwrap();
        let path = shortest_path(&maze, maze.start(), maze.end()).unwrap();
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.end()));
        assert_eq!(path.len(), 4);

        let report = MazeReport::inspect(&maze);
        assert_eq!(report.shortest_route, Some(3));
        assert!(report.isolated.is_empty());
    }
}
