// Configuration module for reading Search.toml
// Every section maps to one struct; Config::default_hardcoded() mirrors the file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::Strategy;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub evaluation: EvaluationConfig,
    pub game: GameConfig,
    pub game_rules: GameRulesConfig,
    pub debug: DebugConfig,
    pub profiling: ProfilingConfig,
}

/// Search agent parameters, fixed for the agent's lifetime
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Full plies explored below the root
    pub depth: u32,
    pub strategy: Strategy,
}

/// Which evaluator the binaries inject into the agent
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Raw game score
    Score,
    /// Score plus maze features (food, ghosts, capsules)
    Features,
}

/// Feature weights used by the maze evaluator
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluationConfig {
    pub kind: EvaluatorKind,
    pub food_distance_weight: f64,
    pub food_remaining_weight: f64,
    pub capsule_remaining_weight: f64,
    pub ghost_danger_weight: f64,
    pub ghost_danger_distance: i32,
    pub scared_ghost_weight: f64,
}

/// How opponents are simulated during a played game
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GhostPolicyKind {
    Random,
    Directional,
}

/// Game session settings for the runner binaries
#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub layout: String,
    pub ghost_policy: GhostPolicyKind,
    pub directional_attack_prob: f64,
    pub max_turns: u32,
    pub seed: u64,
}

/// Scoring and timing rules of the maze game
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GameRulesConfig {
    pub time_penalty: f64,
    pub food_reward: f64,
    pub win_bonus: f64,
    pub lose_penalty: f64,
    pub ghost_eat_reward: f64,
    pub scared_time: u32,
}

impl Default for GameRulesConfig {
    fn default() -> Self {
        GameRulesConfig {
            time_penalty: 1.0,
            food_reward: 10.0,
            win_bonus: 500.0,
            lose_penalty: 500.0,
            ghost_eat_reward: 200.0,
            scared_time: 40,
        }
    }
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

/// Search profiling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProfilingConfig {
    pub enabled: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Search.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Search.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Search.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Search.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 2,
                strategy: Strategy::AlphaBeta,
            },
            evaluation: EvaluationConfig {
                kind: EvaluatorKind::Score,
                food_distance_weight: 10.0,
                food_remaining_weight: 4.0,
                capsule_remaining_weight: 20.0,
                ghost_danger_weight: 200.0,
                ghost_danger_distance: 2,
                scared_ghost_weight: 50.0,
            },
            game: GameConfig {
                layout: "minimax_classic".to_string(),
                ghost_policy: GhostPolicyKind::Random,
                directional_attack_prob: 0.8,
                max_turns: 500,
                seed: 42,
            },
            game_rules: GameRulesConfig::default(),
            debug: DebugConfig {
                enabled: false,
                log_file_path: "search_debug.jsonl".to_string(),
            },
            profiling: ProfilingConfig { enabled: false },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Search.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }

    /// Loads `path` when given, otherwise falls back like `load_or_default`
    pub fn load_from(path: Option<&str>) -> Result<Self, String> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::load_or_default()),
        }
    }
}
