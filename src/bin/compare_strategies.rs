// Compares the three search strategies on one layout
//
// Plays the same seeded games for every strategy, one game per rayon task,
// and prints win rate, average score and search effort per strategy.
//
// Usage:
//   cargo run --release --bin compare_strategies -- [--games <n>] [--depth <n>]
//       [--layout <name>] [--config <path>]

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::env;
use std::process;

use multiagent_search::agent::SearchAgent;
use multiagent_search::config::Config;
use multiagent_search::evaluation::MazeEvaluator;
use multiagent_search::grid::GridState;
use multiagent_search::opponents::GhostPolicy;
use multiagent_search::runner::{GameRecord, GameRunner};
use multiagent_search::stats::SearchStats;
use multiagent_search::types::Strategy;

struct StrategySummary {
    strategy: Strategy,
    games: usize,
    wins: usize,
    average_score: f64,
    stats: SearchStats,
    decisions: usize,
}

fn summarize(strategy: Strategy, records: &[GameRecord]) -> StrategySummary {
    let mut stats = SearchStats::default();
    for record in records {
        stats.absorb(&record.stats);
    }

    let games = records.len();
    let total_score: f64 = records.iter().map(|r| r.final_score).sum();

    StrategySummary {
        strategy,
        games,
        wins: records.iter().filter(|r| r.is_win()).count(),
        average_score: if games > 0 {
            total_score / games as f64
        } else {
            0.0
        },
        decisions: records.iter().map(|r| r.turns.len()).sum(),
        stats,
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let pos = args.iter().position(|a| a == flag)?;
    let value = args.get(pos + 1).unwrap_or_else(|| {
        eprintln!("Error: {} requires an argument", flag);
        process::exit(1);
    });
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("Error: invalid value '{}' for {}", value, flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path: Option<String> = parse_flag(&args, "--config");
    let mut config = Config::load_from(config_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let games: u64 = parse_flag(&args, "--games").unwrap_or(20);
    if let Some(depth) = parse_flag(&args, "--depth") {
        config.search.depth = depth;
    }
    if let Some(layout) = parse_flag(&args, "--layout") {
        config.game.layout = layout;
    }

    let initial = GridState::from_named_layout(&config.game.layout, config.game_rules.clone())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
    let ghosts = GhostPolicy::from_config(&config.game).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!(
        "Layout {} | depth {} | {} games per strategy | ghosts {:?}\n",
        config.game.layout, config.search.depth, games, config.game.ghost_policy
    );

    let summaries: Vec<StrategySummary> = Strategy::all()
        .iter()
        .map(|&strategy| {
            let agent = SearchAgent::new(
                MazeEvaluator::from_config(&config.evaluation),
                config.search.depth,
                strategy,
            );

            let records: Vec<GameRecord> = (0..games)
                .into_par_iter()
                .map(|game| {
                    let runner = GameRunner::new(&agent, ghosts, config.game.max_turns);
                    let mut rng = StdRng::seed_from_u64(config.game.seed.wrapping_add(game));
                    runner.play(initial.clone(), &mut rng)
                })
                .collect();

            summarize(strategy, &records)
        })
        .collect();

    println!(
        "{:<12} {:>8} {:>10} {:>14} {:>12}",
        "strategy", "win %", "avg score", "nodes/move", "pruned %"
    );
    for s in &summaries {
        let nodes_per_move = if s.decisions > 0 {
            s.stats.nodes_visited as f64 / s.decisions as f64
        } else {
            0.0
        };
        let win_rate = if s.games > 0 {
            100.0 * s.wins as f64 / s.games as f64
        } else {
            0.0
        };
        println!(
            "{:<12} {:>8.1} {:>10.1} {:>14.1} {:>12.1}",
            s.strategy.as_str(),
            win_rate,
            s.average_score,
            nodes_per_move,
            100.0 * s.stats.prune_rate()
        );
    }
}
