//! Canonical waypoints for the detour strategy
//!
//! Canonical states are well-connected configurations: one full diagonal
//! each, plus the full outer ring. A path that cannot be found directly is
//! often found by passing through the canonical state nearest the goal.

use serde::{Deserialize, Serialize};

use crate::occupancy::{Matrix, DIAGONAL_COUNT, OUTER_RING_STATE, PAIR, RING_COUNT};

use super::config::PlannerConfig;
use super::context::SearchContext;
use super::moves::Move;
use super::search::astar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalState {
    /// Every ring occupied on the given diagonal
    Diagonal(u8),
    OuterRing,
}

impl CanonicalState {
    pub const ALL: [CanonicalState; 4] = [
        Self::Diagonal(0),
        Self::Diagonal(1),
        Self::Diagonal(2),
        Self::OuterRing,
    ];

    pub fn matrix(&self) -> Matrix {
        match self {
            Self::Diagonal(diagonal) => {
                Matrix::empty().with_diagonal(usize::from(*diagonal), [PAIR; RING_COUNT])
            }
            Self::OuterRing => OUTER_RING_STATE,
        }
    }

    /// The waypoint chosen for `goal`
    ///
    /// An exact match wins. Otherwise a full outer ring maps to
    /// [`CanonicalState::OuterRing`], and anything else to the diagonal holding
    /// the most pairs (lowest index on ties).
    pub fn nearest(goal: &Matrix) -> Self {
        if let Some(exact) = Self::ALL.into_iter().find(|c| c.matrix() == *goal) {
            return exact;
        }
        if goal.ring(RING_COUNT - 1).iter().all(|&c| c != 0) {
            return Self::OuterRing;
        }

        let mut best = 0;
        let mut best_count = 0;
        for diagonal in 0..DIAGONAL_COUNT {
            let count = goal.diagonal(diagonal).iter().filter(|&&c| c != 0).count();
            if count > best_count {
                best = diagonal;
                best_count = count;
            }
        }
        Self::Diagonal(best as u8)
    }
}

/// A* from `start` to the goal's canonical waypoint, then A* on to the goal
pub fn via_canonical(
    start: &Matrix,
    goal: &Matrix,
    config: &PlannerConfig,
    ctx: &mut SearchContext,
) -> Option<Vec<Move>> {
    let waypoint = CanonicalState::nearest(goal);
    tracing::debug!(?waypoint, "routing through canonical state");

    let mut path = astar(start, &waypoint.matrix(), config.astar_max_depth, ctx)?;
    let rest = astar(&waypoint.matrix(), goal, config.astar_max_depth, ctx)?;
    path.extend(rest);
    Some(path)
}
