// Search vocabulary shared by the search core, the agent and the tooling

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::stats::SearchStats;

/// Value assigned to a state by the evaluator or by the search
pub type SearchValue = f64;

/// Index of the agent that the search controls (the maximizer)
pub const MAXIMIZER: usize = 0;

/// Which node-value combination rule the search applies to adversaries
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exact max/min recursion
    Minimax,
    /// Minimax with window pruning
    AlphaBeta,
    /// Max for the maximizer, uniform expectation for adversaries
    Expectimax,
}

impl Strategy {
    /// Returns every strategy in a stable order
    pub fn all() -> [Strategy; 3] {
        [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax]
    }

    /// Converts strategy to its configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha_beta",
            Strategy::Expectimax => "expectimax",
        }
    }

    /// Whether this strategy carries an alpha/beta window
    pub fn prunes(&self) -> bool {
        matches!(self, Strategy::AlphaBeta)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alpha_beta" | "alphabeta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(format!("Invalid strategy: {}", s)),
        }
    }
}

/// Role a node plays in the recursion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Maximize,
    Minimize,
    Chance,
}

impl NodeRole {
    /// Derives the role purely from the agent to move and the active strategy
    pub fn for_agent(agent: usize, strategy: Strategy) -> NodeRole {
        if agent == MAXIMIZER {
            return NodeRole::Maximize;
        }

        match strategy {
            Strategy::Minimax | Strategy::AlphaBeta => NodeRole::Minimize,
            Strategy::Expectimax => NodeRole::Chance,
        }
    }
}

/// Result of one top-level action selection
#[derive(Debug, Clone)]
pub struct SearchOutcome<A> {
    pub action: A,
    pub value: SearchValue,
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_follow_agent_index_and_strategy() {
        for strategy in Strategy::all() {
            assert_eq!(NodeRole::for_agent(0, strategy), NodeRole::Maximize);
        }
        assert_eq!(NodeRole::for_agent(1, Strategy::Minimax), NodeRole::Minimize);
        assert_eq!(NodeRole::for_agent(3, Strategy::AlphaBeta), NodeRole::Minimize);
        assert_eq!(NodeRole::for_agent(2, Strategy::Expectimax), NodeRole::Chance);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("minimax".parse::<Strategy>(), Ok(Strategy::Minimax));
        assert_eq!("alpha-beta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!("AlphaBeta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!("Expectimax".parse::<Strategy>(), Ok(Strategy::Expectimax));
        assert!("negamax".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_names_round_trip_through_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: Strategy,
        }

        for strategy in Strategy::all() {
            let text = format!("strategy = \"{}\"", strategy.as_str());
            let parsed: Wrapper = toml::from_str(&text).unwrap();
            assert_eq!(parsed.strategy, strategy);
        }
    }

    #[test]
    fn test_only_alpha_beta_prunes() {
        assert!(Strategy::AlphaBeta.prunes());
        assert!(!Strategy::Minimax.prunes());
        assert!(!Strategy::Expectimax.prunes());
    }
}
