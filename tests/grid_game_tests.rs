// Integration tests for searching and playing maze games
//
// Tests the search agent on real maze states: pruning agreement on the
// built-in layouts, obvious tactical choices, and whole games driven by
// the runner with seeded ghosts.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use multiagent_search::agent::SearchAgent;
use multiagent_search::config::{Config, GameRulesConfig};
use multiagent_search::environment::{GameState, ScoreEvaluator};
use multiagent_search::evaluation::MazeEvaluator;
use multiagent_search::grid::{Direction, GridState, Outcome};
use multiagent_search::opponents::GhostPolicy;
use multiagent_search::runner::GameRunner;
use multiagent_search::types::Strategy;

fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Search.toml")
}

fn layout(text: &str) -> GridState {
    GridState::from_layout(text, GameRulesConfig::default()).expect("Layout should parse")
}

#[test]
fn test_alpha_beta_agrees_with_minimax_on_builtin_layouts() {
    let config = Config::from_file(config_path()).expect("Failed to load Search.toml");

    for name in &["test_classic", "minimax_classic", "trapped_classic"] {
        let state = GridState::from_named_layout(name, config.game_rules.clone()).unwrap();

        for depth in 1..=2 {
            let minimax = SearchAgent::new(
                MazeEvaluator::from_config(&config.evaluation),
                depth,
                Strategy::Minimax,
            )
            .search(&state);
            let alpha_beta = SearchAgent::new(
                MazeEvaluator::from_config(&config.evaluation),
                depth,
                Strategy::AlphaBeta,
            )
            .search(&state);

            assert_eq!(minimax.action, alpha_beta.action, "{} at depth {}", name, depth);
            assert_eq!(minimax.value, alpha_beta.value, "{} at depth {}", name, depth);
            assert!(
                alpha_beta.stats.nodes_visited <= minimax.stats.nodes_visited,
                "{} at depth {}: alpha-beta visited more nodes",
                name,
                depth
            );
        }
    }
}

#[test]
fn test_player_steps_away_from_adjacent_ghost() {
    let state = layout("%%%%%%%\n%. PG %\n%%%%%%%");

    for strategy in Strategy::all() {
        let outcome = SearchAgent::new(ScoreEvaluator, 1, strategy).search(&state);
        assert_eq!(outcome.action, Direction::West, "{}", strategy);
        assert_eq!(outcome.value, -1.0, "{}", strategy);
    }
}

#[test]
fn test_decided_game_returns_no_op() {
    let won = layout("%%%%\n%P.%\n%%%%").successor(0, &Direction::East);
    assert_eq!(won.outcome(), Outcome::Win);

    let outcome = SearchAgent::new(ScoreEvaluator, 2, Strategy::AlphaBeta).search(&won);
    assert_eq!(outcome.action, Direction::Stop);
    assert_eq!(outcome.value, won.score());
}

#[test]
fn test_seeded_games_are_reproducible() {
    let config = Config::default_hardcoded();
    let initial = GridState::from_named_layout("test_classic", config.game_rules.clone()).unwrap();
    let agent = SearchAgent::new(
        MazeEvaluator::from_config(&config.evaluation),
        2,
        Strategy::Expectimax,
    );
    let runner = GameRunner::new(&agent, GhostPolicy::Random, 60);

    let first = runner.play(initial.clone(), &mut StdRng::seed_from_u64(11));
    let second = runner.play(initial, &mut StdRng::seed_from_u64(11));

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.final_score, second.final_score);
    assert_eq!(first.final_state, second.final_state);
    let first_moves: Vec<Direction> = first.turns.iter().map(|t| t.action).collect();
    let second_moves: Vec<Direction> = second.turns.iter().map(|t| t.action).collect();
    assert_eq!(first_moves, second_moves);
}

#[test]
fn test_games_end_or_hit_turn_cap() {
    let config = Config::default_hardcoded();
    let initial = GridState::from_named_layout("minimax_classic", config.game_rules.clone()).unwrap();

    for strategy in Strategy::all() {
        let agent = SearchAgent::new(ScoreEvaluator, 1, strategy);
        let runner = GameRunner::new(
            &agent,
            GhostPolicy::Directional { attack_prob: 0.8 },
            25,
        );

        for seed in 0..5u64 {
            let record = runner.play(initial.clone(), &mut StdRng::seed_from_u64(seed));
            assert!(record.turns.len() <= 25);
            if record.outcome == Outcome::Running {
                assert_eq!(record.turns.len(), 25);
            } else {
                assert!(record.final_state.is_terminal());
            }
            assert_eq!(record.final_score, record.final_state.score());
        }
    }
}

#[test]
fn test_search_does_not_mutate_state() {
    let state = GridState::from_named_layout("small_classic", GameRulesConfig::default()).unwrap();
    let before = state.clone();

    let _ = SearchAgent::new(ScoreEvaluator, 1, Strategy::AlphaBeta).search(&state);
    assert_eq!(state, before);
}
