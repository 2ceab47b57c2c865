// Integration tests for the decision log and replay engine
//
// A game is played with logging on, then every logged state is searched
// again and the choices compared.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use multiagent_search::agent::SearchAgent;
use multiagent_search::config::Config;
use multiagent_search::debug_logger::DebugLogger;
use multiagent_search::evaluation::MazeEvaluator;
use multiagent_search::grid::GridState;
use multiagent_search::opponents::GhostPolicy;
use multiagent_search::replay::ReplayEngine;
use multiagent_search::types::Strategy;

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.jsonl", name, std::process::id()))
}

fn play_logged_game(config: &Config, path: &Path) -> usize {
    let initial = GridState::from_named_layout("test_classic", config.game_rules.clone()).unwrap();
    let agent = SearchAgent::new(
        MazeEvaluator::from_config(&config.evaluation),
        config.search.depth,
        config.search.strategy,
    );
    let logger = DebugLogger::new(true, &path.to_string_lossy());
    let runner = multiagent_search::runner::GameRunner::new(&agent, GhostPolicy::Random, 15)
        .with_logger(logger);

    runner.play(initial, &mut StdRng::seed_from_u64(3)).turns.len()
}

#[test]
fn test_replay_with_same_config_matches_every_turn() {
    let path = temp_log("replay_same_config");
    let config = Config::default_hardcoded();
    let played = play_logged_game(&config, &path);

    let engine = ReplayEngine::new(config, false);
    let entries = engine.load_log_file(&path).expect("Failed to load log");
    assert_eq!(entries.len(), played);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.turn, i as u32, "Turn number should match index");
    }

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), played);

    let stats = engine.generate_stats(&results);
    assert_eq!(stats.mismatches, 0, "Replay diverged: {:?}", results);
    if played > 0 {
        assert_eq!(stats.match_rate, 100.0);
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_replay_selected_turns() {
    let path = temp_log("replay_selected_turns");
    let config = Config::default_hardcoded();
    let played = play_logged_game(&config, &path);
    assert!(played >= 2, "Game ended too early for this test");

    let engine = ReplayEngine::new(config, false);
    let entries = engine.load_log_file(&path).unwrap();
    let results = engine.replay_turns(&entries, &[1, 0]).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].turn, 1);
    assert_eq!(results[1].turn, 0);
    assert!(results.iter().all(|r| r.matches));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_replay_under_other_strategy_keeps_logged_metadata() {
    let path = temp_log("replay_other_strategy");
    let config = Config::default_hardcoded();
    let played = play_logged_game(&config, &path);

    let mut other = config.clone();
    other.search.strategy = Strategy::Expectimax;
    let engine = ReplayEngine::new(other, false);
    let entries = engine.load_log_file(&path).unwrap();

    assert!(entries.iter().all(|e| e.strategy == config.search.strategy));
    assert!(entries.iter().all(|e| e.depth == config.search.depth));
    assert_eq!(engine.replay_all(&entries).len(), played);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    assert!(engine.load_log_file("does/not/exist.jsonl").is_err());
}
