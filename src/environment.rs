// Contract between the search core and the game it searches
//
// The search never mutates a state: every transition goes through
// `successor`, which returns a fresh value.

use std::fmt::Debug;

use crate::types::SearchValue;

/// A snapshot of a turn-based, multi-agent game
///
/// Agent 0 is the maximizer; agents `1..num_agents()` are adversaries.
pub trait GameState: Sized {
    /// Opaque move label. The search only threads it through.
    type Action: Clone + Debug + PartialEq;

    /// True when the game is won or lost
    fn is_terminal(&self) -> bool;

    /// Legal actions for `agent`, in the order the search should try them.
    /// May be empty.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// State after `agent` plays `action`
    fn successor(&self, agent: usize, action: &Self::Action) -> Self;

    /// Number of agents taking turns, at least 1
    fn num_agents(&self) -> usize;

    /// Raw game score, used by the default evaluator
    fn score(&self) -> SearchValue;

    /// Action returned when the maximizer has nothing legal to play
    fn no_op_action(&self) -> Self::Action;
}

/// Static position evaluator
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> SearchValue;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> SearchValue,
{
    fn evaluate(&self, state: &S) -> SearchValue {
        self(state)
    }
}

/// Default evaluator: the state's own score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl<S: GameState> Evaluator<S> for ScoreEvaluator {
    fn evaluate(&self, state: &S) -> SearchValue {
        state.score()
    }
}
