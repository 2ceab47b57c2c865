// Decision log: one JSON line per maximizer decision
//
// Each line holds the full state the decision was made from, so the replay
// tool can rerun the search on it later. Writes are serialized behind a mutex;
// a disabled logger is a no-op.

use log::error;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;

use crate::grid::{Direction, GridState};
use crate::types::{SearchValue, Strategy};

/// Represents a single decision log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecisionEntry {
    pub turn: u32,
    pub chosen_action: String,
    pub value: SearchValue,
    pub strategy: Strategy,
    pub depth: u32,
    pub state: GridState,
    pub timestamp: String,
}

/// Shared decision logger
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<BufWriter<File>>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Decision logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one decision; failures are logged and otherwise ignored
    pub fn log_decision(
        &self,
        turn: u32,
        state: &GridState,
        chosen_action: Direction,
        value: SearchValue,
        strategy: Strategy,
        depth: u32,
    ) {
        if !self.enabled {
            return;
        }

        let entry = DecisionEntry {
            turn,
            chosen_action: chosen_action.as_str().to_string(),
            value,
            strategy,
            depth,
            state: state.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let json_line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
                return;
            }
        };

        let mut guard = self.file.lock();
        if let Some(file) = guard.as_mut() {
            if let Err(e) = writeln!(file, "{}", json_line) {
                error!("Failed to write debug log entry: {}", e);
            } else if let Err(e) = file.flush() {
                error!("Failed to flush debug log: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameRulesConfig;
    use std::io::{BufRead, BufReader};

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let logger = DebugLogger::disabled();
        assert!(!logger.is_enabled());
        let state = GridState::from_named_layout("test_classic", GameRulesConfig::default()).unwrap();
        logger.log_decision(0, &state, Direction::North, 0.0, Strategy::Minimax, 2);
    }

    #[test]
    fn test_entries_are_jsonl() {
        let path = std::env::temp_dir().join(format!(
            "multiagent_search_logger_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();
        let logger = DebugLogger::new(true, &path_str);
        assert!(logger.is_enabled());

        let state = GridState::from_named_layout("test_classic", GameRulesConfig::default()).unwrap();
        logger.log_decision(0, &state, Direction::North, 1.5, Strategy::AlphaBeta, 2);
        logger.log_decision(1, &state, Direction::East, -3.0, Strategy::AlphaBeta, 2);

        let reader = BufReader::new(File::open(&path).unwrap());
        let entries: Vec<DecisionEntry> = reader
            .lines()
            .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].chosen_action, "north");
        assert_eq!(entries[1].turn, 1);
        assert_eq!(entries[1].value, -3.0);
        assert_eq!(entries[1].strategy, Strategy::AlphaBeta);
        assert_eq!(entries[0].state, state);

        let _ = std::fs::remove_file(&path);
    }
}
