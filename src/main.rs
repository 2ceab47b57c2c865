// Plays maze games with the configured search agent
//
// Usage:
//   cargo run -- [--config <path>] [--layout <name>] [--strategy <name>]
//                [--depth <n>] [--games <n>] [--seed <n>] [--show]

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;

use multiagent_search::agent::SearchAgent;
use multiagent_search::config::Config;
use multiagent_search::debug_logger::DebugLogger;
use multiagent_search::evaluation::MazeEvaluator;
use multiagent_search::grid::{GridState, LAYOUT_NAMES};
use multiagent_search::opponents::GhostPolicy;
use multiagent_search::runner::GameRunner;
use multiagent_search::stats::{self, SearchStats};
use multiagent_search::types::Strategy;

struct Options {
    config_path: Option<String>,
    layout: Option<String>,
    strategy: Option<Strategy>,
    depth: Option<u32>,
    games: u32,
    seed: Option<u64>,
    show: bool,
}

fn print_usage() {
    eprintln!("Adversarial Search Game Runner");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  multiagent-search [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>      Path to Search.toml (default: Search.toml)");
    eprintln!("  --layout <name>      One of: {}", LAYOUT_NAMES.join(", "));
    eprintln!("  --strategy <name>    minimax | alpha_beta | expectimax");
    eprintln!("  --depth <n>          Full plies searched below the root");
    eprintln!("  --games <n>          Number of games to play (default: 1)");
    eprintln!("  --seed <n>           Seed for ghost behaviour");
    eprintln!("  --show               Print the final board of each game");
    eprintln!("  --help               Show this help message");
}

fn next_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} requires an argument", flag))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        layout: None,
        strategy: None,
        depth: None,
        games: 1,
        seed: None,
        show: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                options.config_path = Some(next_value(args, i, "--config")?.to_string());
                i += 1;
            }
            "--layout" => {
                options.layout = Some(next_value(args, i, "--layout")?.to_string());
                i += 1;
            }
            "--strategy" => {
                options.strategy = Some(next_value(args, i, "--strategy")?.parse()?);
                i += 1;
            }
            "--depth" => {
                let value = next_value(args, i, "--depth")?;
                options.depth = Some(
                    value
                        .parse()
                        .map_err(|e| format!("Invalid depth '{}': {}", value, e))?,
                );
                i += 1;
            }
            "--games" => {
                let value = next_value(args, i, "--games")?;
                options.games = value
                    .parse()
                    .map_err(|e| format!("Invalid game count '{}': {}", value, e))?;
                i += 1;
            }
            "--seed" => {
                let value = next_value(args, i, "--seed")?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|e| format!("Invalid seed '{}': {}", value, e))?,
                );
                i += 1;
            }
            "--show" => options.show = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn main() {
    // Default to 'info' unless RUST_LOG says otherwise
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage();
        process::exit(1);
    });

    let mut config = Config::load_from(options.config_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    if let Some(layout) = options.layout {
        config.game.layout = layout;
    }
    if let Some(strategy) = options.strategy {
        config.search.strategy = strategy;
    }
    if let Some(depth) = options.depth {
        config.search.depth = depth;
    }
    if let Some(seed) = options.seed {
        config.game.seed = seed;
    }

    let initial = GridState::from_named_layout(&config.game.layout, config.game_rules.clone())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    info!(
        "Playing {} game(s) on {} with {} at depth {} ({:?} evaluator, {:?} ghosts)",
        options.games,
        config.game.layout,
        config.search.strategy,
        config.search.depth,
        config.evaluation.kind,
        config.game.ghost_policy
    );

    let agent = SearchAgent::new(
        MazeEvaluator::from_config(&config.evaluation),
        config.search.depth,
        config.search.strategy,
    );
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let ghosts = GhostPolicy::from_config(&config.game).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let runner = GameRunner::new(&agent, ghosts, config.game.max_turns).with_logger(logger);

    let mut rng = StdRng::seed_from_u64(config.game.seed);
    let mut wins = 0;
    let mut total_score = 0.0;
    let mut total_stats = SearchStats::default();

    for game in 0..options.games {
        let record = runner.play(initial.clone(), &mut rng);
        println!(
            "Game {}: {:?} with score {} in {} turns",
            game + 1,
            record.outcome,
            record.final_score,
            record.turns.len()
        );

        if options.show {
            println!("{}", record.final_state.render());
        }

        if record.is_win() {
            wins += 1;
        }
        total_score += record.final_score;
        total_stats.absorb(&record.stats);
    }

    if options.games > 0 {
        println!(
            "Win rate: {}/{} ({:.1}%), average score: {:.1}",
            wins,
            options.games,
            100.0 * wins as f64 / options.games as f64,
            total_score / options.games as f64
        );
    }

    if config.profiling.enabled || stats::is_profiling_enabled() {
        total_stats.print_report(config.search.strategy.as_str());
    }
}
