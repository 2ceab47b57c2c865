// Explicit game trees
//
// A tree is written in turn order: the root's children are the maximizer's
// moves, the next level belongs to agent 1, and so on, wrapping back to the
// maximizer after the last agent. Every node carries the value the evaluator
// reports when the search stops on it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::environment::GameState;
use crate::types::SearchValue;

/// Label returned as the no-op action when the root has no children
pub const NO_OP: &str = "stop";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct TreeNode {
    #[serde(default)]
    pub value: SearchValue,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Branch>,
}

/// One labelled edge to a child node
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Branch {
    pub action: String,
    pub node: Arc<TreeNode>,
}

impl TreeNode {
    pub fn leaf(value: SearchValue) -> Self {
        TreeNode {
            value,
            terminal: false,
            children: Vec::new(),
        }
    }

    /// A won or lost position
    pub fn terminal(value: SearchValue) -> Self {
        TreeNode {
            value,
            terminal: true,
            children: Vec::new(),
        }
    }

    /// Interior node with value 0, children in the given order
    pub fn branch(children: Vec<(&str, TreeNode)>) -> Self {
        TreeNode {
            value: 0.0,
            terminal: false,
            children: children
                .into_iter()
                .map(|(action, node)| Branch {
                    action: action.to_string(),
                    node: Arc::new(node),
                })
                .collect(),
        }
    }

    /// Sets the heuristic value reported when the search is cut off here
    pub fn with_value(mut self, value: SearchValue) -> Self {
        self.value = value;
        self
    }

    /// Builds a random tree of exactly `height` levels below this node.
    ///
    /// Every interior node has between 1 and `max_branching` children; values
    /// are small integers so ties are common.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, max_branching: usize, height: u32) -> Self {
        let value = rng.random_range(-20..=20) as SearchValue;
        if height == 0 {
            return TreeNode::leaf(value);
        }

        let width = rng.random_range(1..=max_branching.max(1));
        let children = (0..width)
            .map(|i| Branch {
                action: format!("a{}", i),
                node: Arc::new(TreeNode::random(rng, max_branching, height - 1)),
            })
            .collect();

        TreeNode {
            value,
            terminal: false,
            children,
        }
    }

    /// Loads a tree from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read tree file: {}", e))?;

        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse tree file: {}", e))
    }

    /// Number of nodes without children
    pub fn count_leaves(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(|b| b.node.count_leaves()).sum()
        }
    }
}

/// A position inside a [`TreeNode`] tree
#[derive(Debug, Clone)]
pub struct TreeState {
    node: Arc<TreeNode>,
    num_agents: usize,
}

impl TreeState {
    pub fn new(root: TreeNode, num_agents: usize) -> Self {
        TreeState {
            node: Arc::new(root),
            num_agents,
        }
    }

    pub fn node(&self) -> &TreeNode {
        &self.node
    }
}

impl GameState for TreeState {
    type Action = String;

    fn is_terminal(&self) -> bool {
        self.node.terminal
    }

    // The tree already encodes whose turn each level is.
    fn legal_actions(&self, _agent: usize) -> Vec<String> {
        self.node.children.iter().map(|b| b.action.clone()).collect()
    }

    /// Follows the first edge labelled `action`; an unknown label leaves the
    /// state where it is.
    fn successor(&self, _agent: usize, action: &String) -> Self {
        match self.node.children.iter().find(|b| &b.action == action) {
            Some(branch) => TreeState {
                node: Arc::clone(&branch.node),
                num_agents: self.num_agents,
            },
            None => self.clone(),
        }
    }

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn score(&self) -> SearchValue {
        self.node.value
    }

    fn no_op_action(&self) -> String {
        NO_OP.to_string()
    }
}
