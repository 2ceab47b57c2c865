// Top-level action selection
//
// The agent owns immutable configuration only (ply limit, strategy and
// evaluator). Each call to `search` builds fresh per-call state, so one agent
// can serve any number of independent decisions.

use log::{debug, warn};
use std::time::Instant;

use crate::environment::{Evaluator, GameState};
use crate::rotation::Turn;
use crate::search::{Search, Window};
use crate::stats::SearchStats;
use crate::types::{SearchOutcome, SearchValue, Strategy, MAXIMIZER};

/// Chooses the maximizer's action by depth-limited game-tree search
#[derive(Debug, Clone)]
pub struct SearchAgent<E> {
    evaluator: E,
    depth_limit: u32,
    strategy: Strategy,
}

impl<E> SearchAgent<E> {
    /// Creates an agent with the given evaluator injected
    ///
    /// # Arguments
    /// * `evaluator` - Static evaluator used at every leaf
    /// * `depth_limit` - Full plies to explore below the root. A limit of 0
    ///   degenerates to one-ply lookahead: every root successor is scored
    ///   directly.
    /// * `strategy` - How adversary nodes combine their children
    pub fn new(evaluator: E, depth_limit: u32, strategy: Strategy) -> Self {
        if depth_limit == 0 {
            warn!("Depth limit 0: search degenerates to one-ply lookahead");
        }

        SearchAgent {
            evaluator,
            depth_limit,
            strategy,
        }
    }

    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the chosen action only
    pub fn select_action<S>(&self, root: &S) -> S::Action
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.search(root).action
    }

    /// Searches every legal root action and returns the best one with its value.
    ///
    /// Ties keep the action enumerated first. With no legal root action the
    /// state's no-op action is returned, valued by the evaluator.
    pub fn search<S>(&self, root: &S) -> SearchOutcome<S::Action>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let start_time = Instant::now();
        let mut search = Search::new(&self.evaluator, self.depth_limit, self.strategy);

        let actions = root.legal_actions(MAXIMIZER);
        if actions.is_empty() {
            debug!("No legal root actions, returning no-op");
            let mut stats = SearchStats {
                nodes_visited: 1,
                leaf_evaluations: 1,
                stalled_leaves: 1,
                ..Default::default()
            };
            stats.elapsed = start_time.elapsed();
            return SearchOutcome {
                action: root.no_op_action(),
                value: self.evaluator.evaluate(root),
                stats,
            };
        }

        let reply = Turn::ROOT.advance(root.num_agents());
        let mut window = Window::OPEN;
        let mut best: Option<(S::Action, SearchValue)> = None;

        for action in actions {
            let child = root.successor(MAXIMIZER, &action);
            let value = search.value(&child, reply, window);
            debug!("Root action {:?}: {}", action, value);

            let improves = match &best {
                Some((_, best_value)) => value > *best_value,
                None => true,
            };
            if improves {
                best = Some((action, value));
            }

            // The root behaves like a max node: alpha tightens across its actions
            if self.strategy.prunes() && value > window.alpha {
                window.alpha = value;
            }
        }

        let mut stats = search.into_stats();
        stats.nodes_visited += 1;
        stats.elapsed = start_time.elapsed();

        // `actions` was non-empty, so `best` is always set here
        let (action, value) = match best {
            Some(found) => found,
            None => (root.no_op_action(), f64::NEG_INFINITY),
        };

        debug!(
            "{} chose {:?} (value: {}, nodes: {}, leaves: {}, pruned: {})",
            self.strategy,
            action,
            value,
            stats.nodes_visited,
            stats.leaf_evaluations,
            stats.pruned_branches
        );

        SearchOutcome {
            action,
            value,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::ScoreEvaluator;
    use crate::tree::{TreeNode, TreeState, NO_OP};

    /// Agent 0 picks A or B; agent 1 answers. A guarantees 3, B only 1.
    fn two_choice_tree() -> TreeState {
        TreeState::new(
            TreeNode::branch(vec![
                (
                    "A",
                    TreeNode::branch(vec![("x", TreeNode::leaf(3.0)), ("y", TreeNode::leaf(5.0))]),
                ),
                (
                    "B",
                    TreeNode::branch(vec![("x", TreeNode::leaf(10.0)), ("y", TreeNode::leaf(1.0))]),
                ),
            ]),
            2,
        )
    }

    #[test]
    fn test_minimax_prefers_safe_branch() {
        let agent = SearchAgent::new(ScoreEvaluator, 2, Strategy::Minimax);
        let outcome = agent.search(&two_choice_tree());
        assert_eq!(outcome.action, "A");
        assert_eq!(outcome.value, 3.0);
    }

    #[test]
    fn test_expectimax_prefers_high_average() {
        let agent = SearchAgent::new(ScoreEvaluator, 2, Strategy::Expectimax);
        let outcome = agent.search(&two_choice_tree());
        assert_eq!(outcome.action, "B");
        assert_eq!(outcome.value, 5.5);
    }

    #[test]
    fn test_empty_root_returns_no_op_scored_by_evaluator() {
        let root = TreeState::new(TreeNode::leaf(12.0), 2);
        for strategy in Strategy::all() {
            let outcome = SearchAgent::new(ScoreEvaluator, 2, strategy).search(&root);
            assert_eq!(outcome.action, NO_OP);
            assert_eq!(outcome.value, 12.0);
            assert_eq!(outcome.stats.nodes_visited, 1);
            assert_eq!(outcome.stats.leaf_evaluations, 1);
            assert_eq!(outcome.stats.stalled_leaves, 1);
        }
    }

    #[test]
    fn test_alpha_beta_root_alpha_prunes_later_branch() {
        let root = TreeState::new(
            TreeNode::branch(vec![
                (
                    "A",
                    TreeNode::branch(vec![("x", TreeNode::leaf(3.0)), ("y", TreeNode::leaf(5.0))]),
                ),
                (
                    "B",
                    TreeNode::branch(vec![("x", TreeNode::leaf(1.0)), ("y", TreeNode::leaf(10.0))]),
                ),
            ]),
            2,
        );

        let pruned = SearchAgent::new(ScoreEvaluator, 2, Strategy::AlphaBeta).search(&root);
        let exact = SearchAgent::new(ScoreEvaluator, 2, Strategy::Minimax).search(&root);

        assert_eq!(pruned.action, "A");
        assert_eq!(pruned.value, 3.0);
        assert_eq!(pruned.stats.leaf_evaluations, 3);
        assert_eq!(pruned.stats.pruned_branches, 1);
        assert_eq!(exact.stats.leaf_evaluations, 4);
    }

    #[test]
    fn test_zero_depth_limit_scores_root_successors() {
        let agent = SearchAgent::new(ScoreEvaluator, 0, Strategy::Minimax);
        let root = TreeState::new(
            TreeNode::branch(vec![
                ("low", TreeNode::leaf(1.0)),
                ("high", TreeNode::branch(vec![("x", TreeNode::leaf(-100.0))]).with_value(2.0)),
            ]),
            2,
        );
        let outcome = agent.search(&root);
        assert_eq!(outcome.action, "high");
        assert_eq!(outcome.value, 2.0);
        assert_eq!(outcome.stats.depth_cutoffs, 2);
    }
}
