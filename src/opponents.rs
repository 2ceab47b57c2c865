// Ghost behaviour used when a game is actually played out
//
// The search models ghosts as minimizers or as uniform chance nodes; these
// policies are what the ghosts really do, so strategies can be compared
// against both kinds of opponent.

use rand::Rng;

use crate::config::{GameConfig, GhostPolicyKind};
use crate::environment::GameState;
use crate::grid::{Direction, GridState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostPolicy {
    /// Uniform over legal moves
    Random,
    /// Chase the player (or flee while scared) with probability `attack_prob`,
    /// otherwise move uniformly
    Directional { attack_prob: f64 },
}

impl GhostPolicy {
    /// Builds the policy named in `[game]`
    ///
    /// `directional_attack_prob` must be a probability in [0, 1] when the
    /// directional policy is selected.
    pub fn from_config(config: &GameConfig) -> Result<Self, String> {
        match config.ghost_policy {
            GhostPolicyKind::Random => Ok(GhostPolicy::Random),
            GhostPolicyKind::Directional => {
                let attack_prob = config.directional_attack_prob;
                if !attack_prob.is_finite() || !(0.0..=1.0).contains(&attack_prob) {
                    return Err(format!(
                        "Invalid directional_attack_prob {}: expected a value in [0, 1]",
                        attack_prob
                    ));
                }
                Ok(GhostPolicy::Directional { attack_prob })
            }
        }
    }

    /// Picks a move for `agent`, or `None` when it has no legal move
    pub fn choose<R: Rng + ?Sized>(
        &self,
        state: &GridState,
        agent: usize,
        rng: &mut R,
    ) -> Option<Direction> {
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return None;
        }

        match *self {
            GhostPolicy::Random => Some(actions[rng.random_range(0..actions.len())]),
            GhostPolicy::Directional { attack_prob } => {
                if rng.random_bool(attack_prob.clamp(0.0, 1.0)) {
                    let preferred = Self::preferred_moves(state, agent, &actions);
                    Some(preferred[rng.random_range(0..preferred.len())])
                } else {
                    Some(actions[rng.random_range(0..actions.len())])
                }
            }
        }
    }

    /// Moves that bring the ghost closest to the player, or farthest while scared
    fn preferred_moves(state: &GridState, agent: usize, actions: &[Direction]) -> Vec<Direction> {
        let ghost = &state.agents()[agent];
        let target = state.player_position();
        let distances: Vec<i32> = actions
            .iter()
            .map(|a| a.apply(&ghost.position).manhattan(&target))
            .collect();

        let best = if ghost.is_scared() {
            distances.iter().max()
        } else {
            distances.iter().min()
        };

        match best {
            Some(&best) => actions
                .iter()
                .zip(distances.iter())
                .filter(|(_, d)| **d == best)
                .map(|(a, _)| *a)
                .collect(),
            None => actions.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GameRulesConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(text: &str) -> GridState {
        GridState::from_layout(text, GameRulesConfig::default()).unwrap()
    }

    #[test]
    fn test_random_ghost_only_picks_legal_moves() {
        let s = state("%%%%%%%\n%P. G %\n%%%%%%%");
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let choice = GhostPolicy::Random.choose(&s, 1, &mut rng).unwrap();
            assert!(s.legal_actions(1).contains(&choice));
        }
    }

    #[test]
    fn test_fully_directional_ghost_chases() {
        let s = state("%%%%%%%\n%P. G %\n%%%%%%%");
        let policy = GhostPolicy::Directional { attack_prob: 1.0 };
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(policy.choose(&s, 1, &mut rng), Some(Direction::West));
        }
    }

    #[test]
    fn test_scared_directional_ghost_flees() {
        let s = state("%%%%%%%%\n%Po G  %\n%%%%%%%%").successor(0, &Direction::East);
        let policy = GhostPolicy::Directional { attack_prob: 1.0 };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(policy.choose(&s, 1, &mut rng), Some(Direction::East));
    }

    #[test]
    fn test_directional_config_rejects_bad_probability() {
        let mut game = Config::default_hardcoded().game;
        game.ghost_policy = GhostPolicyKind::Directional;

        for bad in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
            game.directional_attack_prob = bad;
            assert!(GhostPolicy::from_config(&game).is_err(), "{} accepted", bad);
        }

        game.directional_attack_prob = 0.8;
        assert_eq!(
            GhostPolicy::from_config(&game),
            Ok(GhostPolicy::Directional { attack_prob: 0.8 })
        );
    }

    #[test]
    fn test_random_config_ignores_attack_probability() {
        let mut game = Config::default_hardcoded().game;
        game.ghost_policy = GhostPolicyKind::Random;
        game.directional_attack_prob = f64::NAN;
        assert_eq!(GhostPolicy::from_config(&game), Ok(GhostPolicy::Random));
    }

    #[test]
    fn test_missing_agent_has_no_move() {
        let s = state("%%%%\n%P.%\n%%%%");
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(GhostPolicy::Random.choose(&s, 1, &mut rng), None);
    }
}
