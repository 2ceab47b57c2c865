//! Depth-limited recursive search shared by all three strategies
//!
//! One routine walks the tree. The cutoff test and agent rotation are common;
//! only the rule that combines child values differs per [`NodeRole`]:
//!
//! - **Maximize**: best child value, with a beta cutoff under alpha-beta
//! - **Minimize**: worst child value, with an alpha cutoff under alpha-beta
//! - **Chance**: arithmetic mean over every legal action
//!
//! The alpha/beta window is passed by value. A node tightens its own copy
//! after each child returns, so later siblings see the tighter bound but
//! nothing leaks back to the parent.

use crate::environment::{Evaluator, GameState};
use crate::rotation::Turn;
use crate::stats::SearchStats;
use crate::types::{NodeRole, SearchValue, Strategy};

/// Pruning bounds seen from the node being resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Best value the maximizer can already guarantee on the path to the root
    pub alpha: SearchValue,
    /// Best value an adversary can already guarantee on the path to the root
    pub beta: SearchValue,
}

impl Window {
    pub const OPEN: Window = Window {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };
}

/// State for a single top-level search call
pub struct Search<'a, E> {
    evaluator: &'a E,
    depth_limit: u32,
    strategy: Strategy,
    stats: SearchStats,
}

impl<'a, E> Search<'a, E> {
    pub fn new(evaluator: &'a E, depth_limit: u32, strategy: Strategy) -> Self {
        Search {
            evaluator,
            depth_limit,
            strategy,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_stats(self) -> SearchStats {
        self.stats
    }

    /// Value of `state` with `turn.agent` to move.
    ///
    /// Terminal states are scored before the depth test, so a won or lost
    /// position is never treated as a heuristic cutoff.
    pub fn value<S>(&mut self, state: &S, turn: Turn, window: Window) -> SearchValue
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.nodes_visited += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(turn.depth);

        if state.is_terminal() {
            self.stats.terminal_leaves += 1;
            return self.leaf(state);
        }

        if turn.depth >= self.depth_limit {
            self.stats.depth_cutoffs += 1;
            return self.leaf(state);
        }

        let actions = state.legal_actions(turn.agent);
        if actions.is_empty() {
            self.stats.stalled_leaves += 1;
            return self.leaf(state);
        }

        let next = turn.advance(state.num_agents());

        match NodeRole::for_agent(turn.agent, self.strategy) {
            NodeRole::Maximize => self.maximize(state, turn.agent, &actions, next, window),
            NodeRole::Minimize => self.minimize(state, turn.agent, &actions, next, window),
            NodeRole::Chance => self.average(state, turn.agent, &actions, next),
        }
    }

    fn leaf<S>(&mut self, state: &S) -> SearchValue
    where
        E: Evaluator<S>,
    {
        self.stats.leaf_evaluations += 1;
        self.evaluator.evaluate(state)
    }

    fn maximize<S>(
        &mut self,
        state: &S,
        agent: usize,
        actions: &[S::Action],
        next: Turn,
        mut window: Window,
    ) -> SearchValue
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let mut best = f64::NEG_INFINITY;

        for (i, action) in actions.iter().enumerate() {
            let child = state.successor(agent, action);
            let v = self.value(&child, next, window);
            if v > best {
                best = v;
            }

            if self.strategy.prunes() {
                // Strict: a value equal to beta keeps the remaining siblings alive
                if best > window.beta {
                    if i + 1 < actions.len() {
                        self.stats.pruned_branches += 1;
                    }
                    return best;
                }
                if best > window.alpha {
                    window.alpha = best;
                }
            }
        }

        best
    }

    fn minimize<S>(
        &mut self,
        state: &S,
        agent: usize,
        actions: &[S::Action],
        next: Turn,
        mut window: Window,
    ) -> SearchValue
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let mut worst = f64::INFINITY;

        for (i, action) in actions.iter().enumerate() {
            let child = state.successor(agent, action);
            let v = self.value(&child, next, window);
            if v < worst {
                worst = v;
            }

            if self.strategy.prunes() {
                if worst < window.alpha {
                    if i + 1 < actions.len() {
                        self.stats.pruned_branches += 1;
                    }
                    return worst;
                }
                if worst < window.beta {
                    window.beta = worst;
                }
            }
        }

        worst
    }

    // Callers guarantee `actions` is non-empty.
    fn average<S>(
        &mut self,
        state: &S,
        agent: usize,
        actions: &[S::Action],
        next: Turn,
    ) -> SearchValue
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let mut total = 0.0;
        for action in actions {
            let child = state.successor(agent, action);
            total += self.value(&child, next, Window::OPEN);
        }
        total / actions.len() as SearchValue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::ScoreEvaluator;
    use crate::tree::{TreeNode, TreeState};

    fn chance_node() -> TreeState {
        let node = TreeNode::branch(vec![
            ("a", TreeNode::leaf(2.0)),
            ("b", TreeNode::leaf(4.0)),
            ("c", TreeNode::leaf(6.0)),
        ]);
        TreeState::new(node, 2)
    }

    #[test]
    fn test_chance_node_averages_uniformly() {
        let state = chance_node();
        let mut search = Search::new(&ScoreEvaluator, 3, Strategy::Expectimax);
        let turn = Turn { agent: 1, depth: 0 };
        assert_eq!(search.value(&state, turn, Window::OPEN), 4.0);
        assert_eq!(search.stats().leaf_evaluations, 3);
    }

    #[test]
    fn test_min_node_takes_worst_child() {
        let state = chance_node();
        let mut search = Search::new(&ScoreEvaluator, 3, Strategy::Minimax);
        let turn = Turn { agent: 1, depth: 0 };
        assert_eq!(search.value(&state, turn, Window::OPEN), 2.0);
    }

    #[test]
    fn test_max_node_takes_best_child() {
        let state = chance_node();
        for strategy in Strategy::all() {
            let mut search = Search::new(&ScoreEvaluator, 3, strategy);
            assert_eq!(search.value(&state, Turn::ROOT, Window::OPEN), 6.0);
        }
    }

    #[test]
    fn test_terminal_state_scored_even_at_depth_zero() {
        let mut node = TreeNode::branch(vec![("a", TreeNode::leaf(100.0))]);
        node.value = -7.0;
        node.terminal = true;
        let state = TreeState::new(node, 2);

        let mut search = Search::new(&ScoreEvaluator, 5, Strategy::Minimax);
        assert_eq!(search.value(&state, Turn::ROOT, Window::OPEN), -7.0);
        assert_eq!(search.stats().terminal_leaves, 1);
        assert_eq!(search.stats().nodes_visited, 1);
    }

    #[test]
    fn test_node_without_actions_falls_back_to_evaluator() {
        let state = TreeState::new(TreeNode::leaf(3.5), 2);
        let mut search = Search::new(&ScoreEvaluator, 5, Strategy::Expectimax);
        let turn = Turn { agent: 1, depth: 0 };
        assert_eq!(search.value(&state, turn, Window::OPEN), 3.5);
        assert_eq!(search.stats().stalled_leaves, 1);
    }

    #[test]
    fn test_min_node_prunes_below_alpha() {
        // With alpha already at 3, the first child (1) proves this node is worse
        let state = TreeState::new(
            TreeNode::branch(vec![
                ("a", TreeNode::leaf(1.0)),
                ("b", TreeNode::leaf(10.0)),
            ]),
            2,
        );
        let mut search = Search::new(&ScoreEvaluator, 3, Strategy::AlphaBeta);
        let window = Window {
            alpha: 3.0,
            beta: f64::INFINITY,
        };
        let turn = Turn { agent: 1, depth: 0 };

        assert_eq!(search.value(&state, turn, window), 1.0);
        assert_eq!(search.stats().leaf_evaluations, 1);
        assert_eq!(search.stats().pruned_branches, 1);
    }

    #[test]
    fn test_max_node_equal_to_beta_is_not_pruned() {
        let state = TreeState::new(
            TreeNode::branch(vec![
                ("a", TreeNode::leaf(5.0)),
                ("b", TreeNode::leaf(9.0)),
            ]),
            2,
        );
        let mut search = Search::new(&ScoreEvaluator, 3, Strategy::AlphaBeta);
        let window = Window {
            alpha: f64::NEG_INFINITY,
            beta: 5.0,
        };

        assert_eq!(search.value(&state, Turn::ROOT, window), 9.0);
        assert_eq!(search.stats().leaf_evaluations, 2);
        assert_eq!(search.stats().pruned_branches, 0);
    }

    #[test]
    fn test_min_node_equal_to_alpha_is_not_pruned() {
        let state = TreeState::new(
            TreeNode::branch(vec![
                ("a", TreeNode::leaf(5.0)),
                ("b", TreeNode::leaf(1.0)),
            ]),
            2,
        );
        let mut search = Search::new(&ScoreEvaluator, 3, Strategy::AlphaBeta);
        let window = Window {
            alpha: 5.0,
            beta: f64::INFINITY,
        };
        let turn = Turn { agent: 1, depth: 0 };

        assert_eq!(search.value(&state, turn, window), 1.0);
        assert_eq!(search.stats().leaf_evaluations, 2);
        assert_eq!(search.stats().pruned_branches, 0);
    }
}
