//! Transition planning between valid matrices
//!
//! The planner validates both endpoints, then tries its strategies in order
//! and keeps the first path found. All strategies of one call share a single
//! [`SearchContext`], so ring rotation directions stay consistent across the
//! whole computation and never leak into the next call.

pub mod canonical;
pub mod config;
pub mod context;
pub mod moves;
pub mod search;

pub use canonical::CanonicalState;
pub use config::{ConfigError, PlannerConfig};
pub use context::{RotationDirection, SearchContext};
pub use moves::{
    all_moves, is_single_move, valid_moves, Animation, Move, MoveDirection, MoveKind, PewMotion,
};
pub use search::Strategy;

use serde::{Deserialize, Serialize};

use crate::occupancy::Matrix;

/// One entry of a transition, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub matrix: Matrix,
    pub description: String,
    /// Absent for the initial state and for error or failure reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl Step {
    fn report(matrix: Matrix, description: impl Into<String>) -> Self {
        Self {
            matrix,
            description: description.into(),
            animation: None,
        }
    }
}

impl From<Move> for Step {
    fn from(mv: Move) -> Self {
        Self {
            matrix: mv.matrix,
            description: mv.description,
            animation: Some(mv.animation),
        }
    }
}

/// How a planning call ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Start and end were the same matrix
    Identical,
    Found { strategy: Strategy },
    Invalid { reason: String },
    /// Every strategy hit its bound
    Exhausted,
}

/// Result of a planning call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub outcome: Outcome,
    /// Starts with the initial arrangement when a path was found; a single
    /// report step for invalid input or exhaustion; empty for identical input
    pub steps: Vec<Step>,
}

impl Transition {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Identical | Outcome::Found { .. })
    }

    /// Number of moves, not counting the initial step
    pub fn move_count(&self) -> usize {
        match self.outcome {
            Outcome::Found { .. } => self.steps.len().saturating_sub(1),
            _ => 0,
        }
    }
}

/// Finds move sequences between matrices
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, start: &Matrix, end: &Matrix) -> Transition {
        self.plan_with_context(start, end, &mut SearchContext::new())
    }

    /// Like [`Planner::plan`], leaving the search state in `ctx` afterwards
    ///
    /// `ctx` is reset once before the first strategy and never between
    /// strategies, so a failed strategy's rotation commitments bind the next.
    pub fn plan_with_context(
        &self,
        start: &Matrix,
        end: &Matrix,
        ctx: &mut SearchContext,
    ) -> Transition {
        ctx.reset();
        if let Err(err) = start.check() {
            return invalid(start, format!("Invalid start arrangement: {}", err));
        }
        if let Err(err) = end.check() {
            return invalid(start, format!("Invalid end arrangement: {}", err));
        }
        if start == end {
            return Transition {
                outcome: Outcome::Identical,
                steps: Vec::new(),
            };
        }

        for strategy in &self.config.strategies {
            tracing::debug!(%strategy, %start, %end, "trying strategy");
            match strategy.run(start, end, &self.config, ctx) {
                Some(path) => {
                    tracing::debug!(
                        %strategy,
                        steps = path.len(),
                        expanded = ctx.expanded(),
                        "transition found"
                    );
                    let steps = std::iter::once(Step::report(*start, "Initial arrangement"))
                        .chain(path.into_iter().map(Step::from))
                        .collect();
                    return Transition {
                        outcome: Outcome::Found {
                            strategy: *strategy,
                        },
                        steps,
                    };
                }
                None => tracing::debug!(%strategy, "strategy exhausted"),
            }
        }

        tracing::warn!(%start, %end, "no transition found within search bounds");
        Transition {
            outcome: Outcome::Exhausted,
            steps: vec![Step::report(
                *start,
                "Could not find a path between these arrangements",
            )],
        }
    }
}

fn invalid(start: &Matrix, reason: String) -> Transition {
    Transition {
        steps: vec![Step::report(*start, reason.clone())],
        outcome: Outcome::Invalid { reason },
    }
}

/// Steps from `start` to `end` using the default planner
pub fn calculate_transition(start: &Matrix, end: &Matrix) -> Vec<Step> {
    Planner::default().plan(start, end).steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::OUTER_RING_STATE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_is_empty() {
        let transition = Planner::default().plan(&OUTER_RING_STATE, &OUTER_RING_STATE);
        assert_eq!(transition.outcome, Outcome::Identical);
        assert!(transition.steps.is_empty());
        assert!(transition.is_success());
    }

    #[test]
    fn test_invalid_end_is_single_step() {
        let end = Matrix::new([[2, 2, 0], [0, 0, 0], [2, 0, 0]]);
        let steps = calculate_transition(&OUTER_RING_STATE, &end);
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].description,
            "Invalid end arrangement: unrealizable occupancy: maximum 1 pair on inner ring"
        );
        assert!(steps[0].animation.is_none());
    }

    #[test]
    fn test_invalid_start_reported_first() {
        let transition = Planner::default().plan(&Matrix::empty(), &Matrix::empty());
        assert!(matches!(transition.outcome, Outcome::Invalid { .. }));
        assert!(transition.steps[0].description.starts_with("Invalid start"));
    }

    #[test]
    fn test_found_path_starts_with_initial() {
        let end = Matrix::new([[2, 0, 0], [2, 0, 0], [2, 0, 0]]);
        let transition = Planner::default().plan(&OUTER_RING_STATE, &end);
        assert_eq!(
            transition.outcome,
            Outcome::Found {
                strategy: Strategy::Direct
            }
        );
        assert_eq!(transition.move_count(), 4);
        assert_eq!(transition.steps[0].description, "Initial arrangement");
        assert_eq!(transition.steps[0].matrix, OUTER_RING_STATE);
        assert_eq!(transition.steps[4].matrix, end);
    }

    #[test]
    fn test_empty_strategy_list_is_exhausted() {
        let planner = Planner::new(PlannerConfig::default().with_strategies(Vec::new()));
        let end = Matrix::new([[2, 0, 0], [2, 0, 0], [2, 0, 0]]);
        let transition = planner.plan(&OUTER_RING_STATE, &end);
        assert_eq!(transition.outcome, Outcome::Exhausted);
        assert_eq!(transition.steps.len(), 1);
        assert!(!transition.is_success());
    }

    #[test]
    fn test_failed_strategy_commitments_carry_over() {
        let end = Matrix::new([[2, 0, 0], [2, 0, 0], [2, 0, 0]]);
        let planner = Planner::new(
            PlannerConfig::default()
                .with_bfs_max_depth(3)
                .with_strategies(vec![Strategy::Bfs, Strategy::AStar]),
        );

        let mut alone = SearchContext::new();
        assert!(search::bfs(&OUTER_RING_STATE, &end, 3, &mut alone).is_none());
        assert_eq!(alone.direction(2), Some(RotationDirection::Clockwise));
        let bfs_expanded = alone.expanded();

        let mut ctx = SearchContext::new().with_direction(2, RotationDirection::Counterclockwise);
        let transition = planner.plan_with_context(&OUTER_RING_STATE, &end, &mut ctx);
        assert_eq!(
            transition.outcome,
            Outcome::Found {
                strategy: Strategy::AStar
            }
        );
        // The stale commitment was dropped; the one made by BFS was kept
        assert_eq!(ctx.direction(2), Some(RotationDirection::Clockwise));
        assert!(ctx.expanded() > bfs_expanded);
        assert!(transition
            .steps
            .iter()
            .all(|s| !s.description.ends_with("counterclockwise")));
    }

    #[test]
    fn test_later_strategy_used_when_earlier_fail() {
        let planner = Planner::new(
            PlannerConfig::default()
                .with_greedy_max_steps(0)
                .with_finish(0, 0)
                .with_strategies(vec![Strategy::Direct, Strategy::Bfs]),
        );
        let end = Matrix::new([[0, 0, 0], [2, 0, 0], [0, 2, 2]]);
        let transition = planner.plan(&OUTER_RING_STATE, &end);
        assert_eq!(
            transition.outcome,
            Outcome::Found {
                strategy: Strategy::Bfs
            }
        );
        assert_eq!(transition.move_count(), 1);
    }
}
