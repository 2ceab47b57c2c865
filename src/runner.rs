// Plays whole games: the search agent moves for agent 0, ghost policies for
// the rest, until the game ends or the turn cap is hit

use log::{debug, info};
use rand::Rng;

use crate::agent::SearchAgent;
use crate::debug_logger::DebugLogger;
use crate::environment::{Evaluator, GameState};
use crate::grid::{Direction, GridState, Outcome};
use crate::opponents::GhostPolicy;
use crate::stats::SearchStats;
use crate::types::{SearchValue, MAXIMIZER};

/// One maximizer decision inside a played game
#[derive(Debug, Clone)]
pub struct TurnRecord {
    pub turn: u32,
    pub action: Direction,
    pub value: SearchValue,
    pub score_after: SearchValue,
    pub stats: SearchStats,
}

/// Summary of a finished (or capped) game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub final_score: SearchValue,
    pub turns: Vec<TurnRecord>,
    pub stats: SearchStats,
    pub final_state: GridState,
}

impl GameRecord {
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

pub struct GameRunner<'a, E> {
    agent: &'a SearchAgent<E>,
    ghosts: GhostPolicy,
    max_turns: u32,
    logger: DebugLogger,
}

impl<'a, E> GameRunner<'a, E>
where
    E: Evaluator<GridState>,
{
    pub fn new(agent: &'a SearchAgent<E>, ghosts: GhostPolicy, max_turns: u32) -> Self {
        GameRunner {
            agent,
            ghosts,
            max_turns,
            logger: DebugLogger::disabled(),
        }
    }

    pub fn with_logger(mut self, logger: DebugLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Plays from `initial` until a terminal state or `max_turns` decisions
    pub fn play<R: Rng + ?Sized>(&self, initial: GridState, rng: &mut R) -> GameRecord {
        let mut state = initial;
        let mut turns = Vec::new();
        let mut total = SearchStats::default();

        for turn in 0..self.max_turns {
            if state.is_terminal() {
                break;
            }

            let outcome = self.agent.search(&state);
            self.logger.log_decision(
                turn,
                &state,
                outcome.action,
                outcome.value,
                self.agent.strategy(),
                self.agent.depth_limit(),
            );

            state = state.successor(MAXIMIZER, &outcome.action);

            for ghost in 1..state.num_agents() {
                if state.is_terminal() {
                    break;
                }
                if let Some(action) = self.ghosts.choose(&state, ghost, rng) {
                    state = state.successor(ghost, &action);
                }
            }

            debug!(
                "Turn {}: {} (value: {:.2}, score: {})",
                turn,
                outcome.action,
                outcome.value,
                state.score()
            );

            total.absorb(&outcome.stats);
            turns.push(TurnRecord {
                turn,
                action: outcome.action,
                value: outcome.value,
                score_after: state.score(),
                stats: outcome.stats,
            });
        }

        info!(
            "Game over: {:?} after {} turns (score: {})",
            state.outcome(),
            turns.len(),
            state.score()
        );

        GameRecord {
            outcome: state.outcome(),
            final_score: state.score(),
            turns,
            stats: total,
            final_state: state,
        }
    }
}
