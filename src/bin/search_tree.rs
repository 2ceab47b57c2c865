// Runs every search strategy on an explicit game tree
//
// Usage:
//   cargo run --bin search_tree -- <tree.json> [--agents <n>] [--depth <n>]
//   cargo run --bin search_tree -- --random <seed> [--branching <n>] [--height <n>]
//       [--agents <n>] [--depth <n>]
//
// The tree is read in turn order: root children belong to agent 0, the next
// level to agent 1, and so on.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;

use multiagent_search::agent::SearchAgent;
use multiagent_search::environment::ScoreEvaluator;
use multiagent_search::stats;
use multiagent_search::tree::{TreeNode, TreeState};
use multiagent_search::types::Strategy;

fn flag_value<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match args.iter().position(|a| a == flag) {
        Some(pos) => match args.get(pos + 1).and_then(|v| v.parse().ok()) {
            Some(v) => v,
            None => {
                eprintln!("Error: {} requires a valid argument", flag);
                process::exit(1);
            }
        },
        None => default,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.contains(&"--help".to_string()) {
        eprintln!("USAGE:");
        eprintln!("  search_tree <tree.json> [--agents <n>] [--depth <n>]");
        eprintln!("  search_tree --random <seed> [--branching <n>] [--height <n>] [--agents <n>] [--depth <n>]");
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let agents: usize = flag_value(&args, "--agents", 2);
    let depth: u32 = flag_value(&args, "--depth", 2);

    let root = if args.iter().any(|a| a == "--random") {
        let seed: u64 = flag_value(&args, "--random", 0);
        let branching: usize = flag_value(&args, "--branching", 3);
        let height: u32 = flag_value(&args, "--height", depth * agents as u32);
        let mut rng = StdRng::seed_from_u64(seed);
        TreeNode::random(&mut rng, branching, height)
    } else {
        TreeNode::from_json_file(&args[1]).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        })
    };

    if agents == 0 {
        eprintln!("Error: --agents must be at least 1");
        process::exit(1);
    }

    let state = TreeState::new(root, agents);
    println!(
        "{} leaves, {} agents, depth limit {}\n",
        state.node().count_leaves(),
        agents,
        depth
    );
    println!(
        "{:<12} {:>8} {:>10} {:>8} {:>8} {:>8}",
        "strategy", "action", "value", "nodes", "leaves", "pruned"
    );

    for strategy in Strategy::all() {
        let outcome = SearchAgent::new(ScoreEvaluator, depth, strategy).search(&state);
        println!(
            "{:<12} {:>8} {:>10.3} {:>8} {:>8} {:>8}",
            strategy.as_str(),
            outcome.action,
            outcome.value,
            outcome.stats.nodes_visited,
            outcome.stats.leaf_evaluations,
            outcome.stats.pruned_branches
        );

        if stats::is_profiling_enabled() {
            outcome.stats.print_report(strategy.as_str());
        }
    }
}
