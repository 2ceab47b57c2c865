// Static evaluators for maze states
//
// The search takes its evaluator by injection. Binaries build one of these
// from the `[evaluation]` section and hand it to `SearchAgent::new`.

use crate::config::{EvaluationConfig, EvaluatorKind};
use crate::environment::{Evaluator, GameState, ScoreEvaluator};
use crate::grid::GridState;
use crate::types::SearchValue;

/// Game score adjusted by food, capsule and ghost features
#[derive(Debug, Clone)]
pub struct FeatureEvaluator {
    weights: EvaluationConfig,
}

impl FeatureEvaluator {
    pub fn new(weights: EvaluationConfig) -> Self {
        FeatureEvaluator { weights }
    }
}

impl Evaluator<GridState> for FeatureEvaluator {
    fn evaluate(&self, state: &GridState) -> SearchValue {
        let w = &self.weights;
        let mut value = state.score();

        // Won and lost positions are already decided by the score
        if state.is_terminal() {
            return value;
        }

        let position = state.player_position();

        if let Some(nearest) = state.food().iter().map(|f| position.manhattan(f)).min() {
            value += w.food_distance_weight / (nearest as f64 + 1.0);
        }
        value -= w.food_remaining_weight * state.food().len() as f64;
        value -= w.capsule_remaining_weight * state.capsules().len() as f64;

        for ghost in state.ghosts() {
            let distance = position.manhattan(&ghost.position);
            if ghost.is_scared() {
                // Only worth chasing if it is still scared on arrival
                if (distance as u32) < ghost.scared_timer {
                    value += w.scared_ghost_weight / (distance as f64 + 1.0);
                }
            } else if distance <= w.ghost_danger_distance {
                value -= w.ghost_danger_weight / (distance as f64 + 1.0);
            }
        }

        value
    }
}

/// Evaluator chosen by configuration
#[derive(Debug, Clone)]
pub enum MazeEvaluator {
    Score(ScoreEvaluator),
    Features(FeatureEvaluator),
}

impl MazeEvaluator {
    pub fn from_config(config: &EvaluationConfig) -> Self {
        match config.kind {
            EvaluatorKind::Score => MazeEvaluator::Score(ScoreEvaluator),
            EvaluatorKind::Features => MazeEvaluator::Features(FeatureEvaluator::new(config.clone())),
        }
    }
}

impl Evaluator<GridState> for MazeEvaluator {
    fn evaluate(&self, state: &GridState) -> SearchValue {
        match self {
            MazeEvaluator::Score(e) => e.evaluate(state),
            MazeEvaluator::Features(e) => e.evaluate(state),
        }
    }
}
