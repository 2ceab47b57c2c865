// Replay module for re-running the search on logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Rerun the configured agent on every logged state
// 3. Compare logged vs replayed actions
// 4. Print a summary report

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::agent::SearchAgent;
use crate::config::Config;
use crate::debug_logger::DecisionEntry;
use crate::evaluation::MazeEvaluator;
use crate::grid::Direction;
use crate::types::SearchValue;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub original_action: Direction,
    pub replayed_action: Direction,
    pub matches: bool,
    pub original_value: SearchValue,
    pub replayed_value: SearchValue,
    pub nodes_visited: usize,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    agent: SearchAgent<MazeEvaluator>,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine whose agent is built from `config`
    pub fn new(config: Config, verbose: bool) -> Self {
        let agent = SearchAgent::new(
            MazeEvaluator::from_config(&config.evaluation),
            config.search.depth,
            config.search.strategy,
        );
        ReplayEngine { agent, verbose }
    }

    /// Loads all decision entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DecisionEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DecisionEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_action: Direction = entry.chosen_action.parse()?;
        let outcome = self.agent.search(&entry.state);
        let matches = original_action == outcome.action;

        let result = ReplayResult {
            turn: entry.turn,
            original_action,
            replayed_action: outcome.action,
            matches,
            original_value: entry.value,
            replayed_value: outcome.value,
            nodes_visited: outcome.stats.nodes_visited,
            computation_time_us: outcome.stats.elapsed.as_micros(),
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (value: {}, nodes: {})",
                    entry.turn, outcome.action, outcome.value, result.nodes_visited
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} ({} at depth {}), Replayed: {} (value: {})",
                    entry.turn,
                    original_action,
                    entry.strategy,
                    entry.depth,
                    outcome.action,
                    outcome.value
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DecisionEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DecisionEntry],
        turn_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!(
            "Agent:          {} at depth {}",
            self.agent.strategy(),
            self.agent.depth_limit()
        );
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 = results.iter().map(|r| r.nodes_visited as f64).sum::<f64>()
                / results.len() as f64;

            println!("Average Nodes Visited:      {:.1}", avg_nodes);
            println!("Average Computation Time:   {:.1}µs\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (value: {} → {})",
                    result.turn,
                    result.original_action,
                    result.replayed_action,
                    result.original_value,
                    result.replayed_value
                );
            }
            println!();
        }
    }
}
