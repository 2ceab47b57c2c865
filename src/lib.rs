// Library exports for the adversarial search engine
// The binaries (game runner, replay, strategy comparison, tree search) all build on these

pub mod agent;
pub mod config;
pub mod debug_logger;
pub mod environment;
pub mod evaluation;
pub mod grid;
pub mod opponents;
pub mod replay;
pub mod rotation;
pub mod runner;
pub mod search;
pub mod stats;
pub mod tree;
pub mod types;

pub use agent::SearchAgent;
pub use environment::{Evaluator, GameState, ScoreEvaluator};
pub use types::{SearchOutcome, SearchValue, Strategy};
