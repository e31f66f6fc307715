use std::collections::VecDeque;

use crate::maze::{CellId, Maze};

/// Pending-set discipline for the shared traversal loop: one deque used as
/// a FIFO (breadth-first) or a LIFO (depth-first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "Breadth-First Search (BFS)"),
            Strategy::DepthFirst => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

/// Result of one traversal.
///
/// `settled` is the node-expansion record in expansion order, used to
/// animate exploration; the target itself is never appended. The solution
/// path is not in here: it is reconstructed by walking each expanded cell's
/// `prev` back-pointer, which the search sets as a side effect.
pub struct SearchOutcome {
    pub settled: Vec<CellId>,
    pub found: bool,
}

/// Traverses the maze's passage graph from `source` toward `target`.
///
/// Both strategies share one loop; only where the pending deque grows
/// differs. When a cell is expanded, both endpoints of every incident
/// passage are pushed, and if an endpoint is already settled it becomes the
/// expanded cell's back-pointer, so settled cells chain back to the
/// source. Terminates the moment `target` is removed from the pending set
/// (so `source == target` settles nothing), or when the pending set is
/// exhausted, which callers must treat as "no path".
pub fn search(
    maze: &mut Maze,
    strategy: Strategy,
    source: CellId,
    target: CellId,
) -> SearchOutcome {
    maze.clear_back_pointers();

    let mut settled = Vec::new();
    let mut settled_mark = vec![false; maze.cell_count()];
    let mut pending = VecDeque::from([source]);

    while let Some(id) = pending.pop_front() {
        if id == target {
            tracing::debug!(
                "[search] {} reached target after settling {} cells",
                strategy,
                settled.len()
            );
            return SearchOutcome {
                settled,
                found: true,
            };
        }
        if settled_mark[id.index()] {
            continue;
        }

        let mut prev = None;
        for index in 0..maze[id].passages.len() {
            let edge_id = maze[id].passages[index];
            let edge = *maze.edge(edge_id);
            match strategy {
                Strategy::BreadthFirst => {
                    pending.push_back(edge.a);
                    pending.push_back(edge.b);
                }
                Strategy::DepthFirst => {
                    pending.push_front(edge.a);
                    pending.push_front(edge.b);
                }
            }
            if settled_mark[edge.a.index()] {
                prev = Some(edge.a);
            } else if settled_mark[edge.b.index()] {
                prev = Some(edge.b);
            }
        }
        maze.cell_mut(id).prev = prev;

        settled_mark[id.index()] = true;
        settled.push(id);
    }

    tracing::debug!(
        "[search] {} exhausted the pending set without reaching the target",
        strategy
    );
    SearchOutcome {
        settled,
        found: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks `prev` pointers from `from` and returns the chain, `from`
    /// excluded.
    fn back_chain(maze: &Maze, from: CellId) -> Vec<CellId> {
        let mut chain = Vec::new();
        let mut cursor = maze[from].prev;
        while let Some(id) = cursor {
            chain.push(id);
            assert!(chain.len() <= maze.cell_count(), "back-pointer cycle");
            cursor = maze[id].prev;
        }
        chain
    }

    #[test]
    fn both_strategies_find_a_path() {
        for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
            let mut maze = Maze::generate(5, 5, Some(17));
            let source = maze.entry().unwrap();
            let target = maze.goal().unwrap();

            let outcome = search(&mut maze, strategy, source, target);
            assert!(outcome.found, "{strategy}");
            assert!(outcome.settled.len() <= maze.cell_count());
            assert!(!outcome.settled.contains(&target));

            // Every settled cell's back-chain ends at the source, and each
            // hop crosses a passage.
            for &id in &outcome.settled {
                let chain = back_chain(&maze, id);
                if id != source {
                    assert_eq!(chain.last(), Some(&source));
                }
                let mut at = id;
                for &step in &chain {
                    assert!(maze.passage_neighbors(at).any(|n| n == step));
                    at = step;
                }
            }
        }
    }

    #[test]
    fn source_equals_target_settles_nothing() {
        let mut maze = Maze::generate(4, 4, Some(2));
        let source = maze.entry().unwrap();
        let outcome = search(&mut maze, Strategy::BreadthFirst, source, source);
        assert!(outcome.found);
        assert!(outcome.settled.is_empty());
    }

    #[test]
    fn unreachable_target_reports_no_path() {
        // All walls up: the passage graph has no edges at all.
        let mut maze = Maze::walled(2, 2);
        let source = maze.id_at(0, 0).unwrap();
        let target = maze.id_at(1, 1).unwrap();
        for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
            let outcome = search(&mut maze, strategy, source, target);
            assert!(!outcome.found);
            assert_eq!(outcome.settled, vec![source]);
        }
    }

    #[test]
    fn two_by_two_scenario() {
        let mut maze = Maze::generate(2, 2, Some(5));
        assert_eq!(maze.tree().len(), 3);

        let source = maze.entry().unwrap();
        let target = maze.goal().unwrap();
        let outcome = search(&mut maze, Strategy::BreadthFirst, source, target);
        assert!(outcome.found);
        assert!(!outcome.settled.is_empty());
        assert!(outcome.settled.len() <= 4);

        // The settled neighbor of the target chains back to the source in
        // at most 3 hops.
        let beside_target = maze
            .passage_neighbors(target)
            .find(|&id| outcome.settled.contains(&id))
            .unwrap();
        let mut hops = 1;
        let mut cursor = beside_target;
        while cursor != source {
            cursor = maze[cursor].prev.unwrap();
            hops += 1;
            assert!(hops <= 3);
        }
    }

    #[test]
    fn a_new_search_overwrites_back_pointers() {
        let mut maze = Maze::walled(3, 1);
        let left = maze.id_at(0, 0).unwrap();
        let middle = maze.id_at(1, 0).unwrap();
        let right = maze.id_at(2, 0).unwrap();
        maze.carve(left, middle);
        maze.carve(middle, right);

        search(&mut maze, Strategy::BreadthFirst, left, right);
        assert_eq!(maze[middle].prev, Some(left));

        // Search the other way; the stale chain toward `left` must be gone.
        search(&mut maze, Strategy::BreadthFirst, right, left);
        assert_eq!(maze[middle].prev, Some(right));
        assert_eq!(maze[right].prev, None);
    }

    #[test]
    fn depth_first_expands_the_most_recent_frontier() {
        // A corridor forces DFS and BFS to the same settled order; check a
        // branching maze instead: DFS settles a full branch before backing
        // up, so the second settled cell is adjacent to the first.
        let mut maze = Maze::generate(6, 6, Some(33));
        let source = maze.entry().unwrap();
        let target = maze.goal().unwrap();
        let outcome = search(&mut maze, Strategy::DepthFirst, source, target);
        assert!(outcome.found);
        for pair in outcome.settled.windows(2).take(1) {
            assert!(maze.passage_neighbors(pair[0]).any(|n| n == pair[1]));
        }
    }
}
