// Replay tool for decision logs written by the game runner
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Search.toml (default: Search.toml)

use std::env;
use std::process;

use multiagent_search::config::Config;
use multiagent_search::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Decision Log Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Search.toml (default: Search.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay search_debug.jsonl --all");
    eprintln!("  replay search_debug.jsonl --turns 5,10,15 --verbose");
}

fn parse_turns(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Search.toml".to_string();
    let mut verbose = false;
    let mut replay_all = false;
    let mut turns: Option<Vec<u32>> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => replay_all = true,
            "--turns" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --turns requires an argument");
                    process::exit(1);
                };
                turns = Some(parse_turns(value).unwrap_or_else(|e| {
                    eprintln!("Error parsing turns: {}", e);
                    process::exit(1);
                }));
                i += 1;
            }
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                };
                config_path = value.clone();
                i += 1;
            }
            "--verbose" => verbose = true,
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !replay_all && turns.is_none() {
        eprintln!("Error: Must specify --all or --turns");
        print_usage();
        process::exit(1);
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    let results = match turns {
        Some(turns) => {
            println!("Replaying {} specific turn(s)...\n", turns.len());
            engine.replay_turns(&entries, &turns).unwrap_or_else(|e| {
                eprintln!("Error during replay: {}", e);
                process::exit(1);
            })
        }
        None => {
            println!("Replaying all {} turns...\n", entries.len());
            engine.replay_all(&entries)
        }
    };

    engine.print_report(&results);
}
