// Agent rotation and ply accounting

use crate::types::MAXIMIZER;

/// Whose move it is and how many full plies lie above this node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub agent: usize,
    pub depth: u32,
}

impl Turn {
    /// The root: the maximizer to move, no plies completed
    pub const ROOT: Turn = Turn {
        agent: MAXIMIZER,
        depth: 0,
    };

    /// Turn after the current agent has moved
    pub fn advance(self, num_agents: usize) -> Turn {
        let (agent, depth) = next_turn(self.agent, self.depth, num_agents);
        Turn { agent, depth }
    }
}

/// Returns `(next_agent, next_depth)`.
///
/// The depth grows by one exactly when control wraps back to the maximizer.
/// `num_agents >= 1` is a precondition.
pub fn next_turn(agent: usize, depth: u32, num_agents: usize) -> (usize, u32) {
    let next_agent = (agent + 1) % num_agents;
    if next_agent == MAXIMIZER {
        (next_agent, depth + 1)
    } else {
        (next_agent, depth)
    }
}
