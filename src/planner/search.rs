//! Path search strategies
//!
//! Every strategy takes the same inputs and returns the moves leading from
//! `start` to `goal`, or `None` when its bound is hit. Move generation goes
//! through the shared [`SearchContext`], so rotation commitments made by one
//! strategy constrain the ones tried after it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::occupancy::Matrix;

use super::canonical::via_canonical;
use super::config::PlannerConfig;
use super::context::SearchContext;
use super::moves::{valid_moves, Move};

/// A path-finding strategy, in the order the planner may try them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Greedy descent on cell distance, finished by a short BFS
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "bfs")]
    Bfs,
    /// A* to the canonical state nearest the goal, then A* to the goal
    #[serde(rename = "via_canonical")]
    ViaCanonical,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::AStar => "astar",
            Self::Bfs => "bfs",
            Self::ViaCanonical => "via_canonical",
        }
    }

    /// Run this strategy with the bounds from `config`
    pub fn run(
        &self,
        start: &Matrix,
        goal: &Matrix,
        config: &PlannerConfig,
        ctx: &mut SearchContext,
    ) -> Option<Vec<Move>> {
        match self {
            Self::Direct => direct(start, goal, config, ctx),
            Self::AStar => astar(start, goal, config.astar_max_depth, ctx),
            Self::Bfs => bfs(start, goal, config.bfs_max_depth, ctx),
            Self::ViaCanonical => via_canonical(start, goal, config, ctx),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// Search tree
// ============================================

/// Explored states, each remembering the move that reached it
struct SearchTree {
    nodes: Vec<Node>,
}

struct Node {
    matrix: Matrix,
    depth: usize,
    parent: Option<usize>,
    via: Option<Move>,
}

impl SearchTree {
    fn new(root: Matrix) -> Self {
        Self {
            nodes: vec![Node {
                matrix: root,
                depth: 0,
                parent: None,
                via: None,
            }],
        }
    }

    fn push(&mut self, parent: usize, mv: Move) -> usize {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            matrix: mv.matrix,
            depth,
            parent: Some(parent),
            via: Some(mv),
        });
        self.nodes.len() - 1
    }

    /// Moves from the root to `index`
    fn path_to(mut self, mut index: usize) -> Vec<Move> {
        let mut path = Vec::new();
        while let Some(parent) = self.nodes[index].parent {
            if let Some(mv) = self.nodes[index].via.take() {
                path.push(mv);
            }
            index = parent;
        }
        path.reverse();
        path
    }
}

// ============================================
// Strategies
// ============================================

/// Breadth-first search up to `max_depth` moves
pub fn bfs(
    start: &Matrix,
    goal: &Matrix,
    max_depth: usize,
    ctx: &mut SearchContext,
) -> Option<Vec<Move>> {
    if start == goal {
        return Some(Vec::new());
    }

    let mut tree = SearchTree::new(*start);
    let mut seen = HashSet::from([*start]);
    let mut queue = VecDeque::from([0]);

    while let Some(index) = queue.pop_front() {
        if tree.nodes[index].depth >= max_depth {
            continue;
        }
        let current = tree.nodes[index].matrix;
        for mv in valid_moves(&current, ctx) {
            if !seen.insert(mv.matrix) {
                continue;
            }
            let reached_goal = mv.matrix == *goal;
            let child = tree.push(index, mv);
            if reached_goal {
                return Some(tree.path_to(child));
            }
            queue.push_back(child);
        }
    }
    None
}

/// A* on cell distance, up to `max_depth` moves
///
/// Equal priorities pop in insertion order.
pub fn astar(
    start: &Matrix,
    goal: &Matrix,
    max_depth: usize,
    ctx: &mut SearchContext,
) -> Option<Vec<Move>> {
    let mut tree = SearchTree::new(*start);
    let mut closed = HashSet::new();
    let mut open = BinaryHeap::from([Reverse((start.distance(goal), 0usize))]);

    while let Some(Reverse((_, index))) = open.pop() {
        let current = tree.nodes[index].matrix;
        if current == *goal {
            return Some(tree.path_to(index));
        }
        if !closed.insert(current) {
            continue;
        }
        let depth = tree.nodes[index].depth;
        if depth >= max_depth {
            continue;
        }
        for mv in valid_moves(&current, ctx) {
            if closed.contains(&mv.matrix) {
                continue;
            }
            let priority = depth + 1 + mv.matrix.distance(goal);
            let child = tree.push(index, mv);
            open.push(Reverse((priority, child)));
        }
    }
    None
}

/// Greedy descent on cell distance, finished by a short BFS once close
///
/// Each step takes the first unvisited move with the smallest distance to the
/// goal. Once within `finish_distance` cells, the rest of the path comes from
/// a BFS of depth `finish_depth`; if that fails the descent fails.
pub fn direct(
    start: &Matrix,
    goal: &Matrix,
    config: &PlannerConfig,
    ctx: &mut SearchContext,
) -> Option<Vec<Move>> {
    let mut current = *start;
    let mut path: Vec<Move> = Vec::new();
    let mut visited = HashSet::from([*start]);
    let mut steps = 0;

    loop {
        if current == *goal {
            return Some(path);
        }
        // Also reached after the last greedy step
        if current.distance(goal) <= config.finish_distance {
            let tail = bfs(&current, goal, config.finish_depth, ctx)?;
            path.extend(tail);
            return Some(path);
        }
        if steps == config.greedy_max_steps {
            return None;
        }
        steps += 1;

        let mut best: Option<(usize, Move)> = None;
        for mv in valid_moves(&current, ctx) {
            if visited.contains(&mv.matrix) {
                continue;
            }
            let distance = mv.matrix.distance(goal);
            if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((distance, mv));
            }
        }

        let (_, mv) = best?;
        tracing::trace!(description = %mv.description, "greedy step");
        current = mv.matrix;
        visited.insert(current);
        path.push(mv);
    }
}
