//! Per-search counters and the profiling report
//!
//! Counters live in the value returned from each search call, so two searches
//! never share them. Enable the stderr report with `[profiling] enabled = true`
//! or the environment variable SEARCH_PROFILE=1.

use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Every call into the recursive value routine
    pub nodes_visited: usize,
    /// Calls to the evaluator (all leaf kinds)
    pub leaf_evaluations: usize,
    /// Leaves resolved because the state was won or lost
    pub terminal_leaves: usize,
    /// Leaves resolved because the ply limit was reached
    pub depth_cutoffs: usize,
    /// Non-terminal leaves whose agent had no legal action
    pub stalled_leaves: usize,
    /// Times a node returned before visiting all of its children
    pub pruned_branches: usize,
    /// Deepest ply counter seen at any node
    pub max_depth_reached: u32,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Folds another search's counters into this one
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.leaf_evaluations += other.leaf_evaluations;
        self.terminal_leaves += other.terminal_leaves;
        self.depth_cutoffs += other.depth_cutoffs;
        self.stalled_leaves += other.stalled_leaves;
        self.pruned_branches += other.pruned_branches;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
        self.elapsed += other.elapsed;
    }

    /// Fraction of interior nodes that stopped early
    pub fn prune_rate(&self) -> f64 {
        let interior = self.nodes_visited.saturating_sub(self.leaf_evaluations);
        if interior == 0 {
            0.0
        } else {
            self.pruned_branches as f64 / interior as f64
        }
    }

    pub fn print_report(&self, label: &str) {
        let elapsed_ms = self.elapsed.as_secs_f64() * 1000.0;
        let nodes_per_ms = if elapsed_ms > 0.0 {
            self.nodes_visited as f64 / elapsed_ms
        } else {
            0.0
        };

        eprintln!("\n═══════════════════════════════════════════════════════════");
        eprintln!("                 SEARCH PROFILE: {}", label);
        eprintln!("═══════════════════════════════════════════════════════════");
        eprintln!("Total Time:        {:.2}ms", elapsed_ms);
        eprintln!("Nodes Visited:     {} ({:.0}/ms)", self.nodes_visited, nodes_per_ms);
        eprintln!("Leaf Evaluations:  {}", self.leaf_evaluations);
        eprintln!("  Terminal:        {}", self.terminal_leaves);
        eprintln!("  Depth Cutoff:    {}", self.depth_cutoffs);
        eprintln!("  No Legal Move:   {}", self.stalled_leaves);
        eprintln!(
            "Pruned Branches:   {} ({:.1}% of interior nodes)",
            self.pruned_branches,
            100.0 * self.prune_rate()
        );
        eprintln!("Max Ply Reached:   {}", self.max_depth_reached);
        eprintln!("═══════════════════════════════════════════════════════════\n");
    }
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    std::env::var("SEARCH_PROFILE").is_ok()
}
