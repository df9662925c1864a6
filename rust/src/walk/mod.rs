//! Path queries over weighted directed graphs.
//!
//! - [`LowestCostWalks`]: all-pairs lowest-cost walks, rejecting negative cycles
//! - [`lowest_length_forward`] / [`lowest_length_backward`]: BFS edge counts
//! - [`highest_cost_path`]: longest path in a DAG

mod bfs;
mod dag;
mod matrix;

use crate::graph::Weight;

pub use bfs::{lowest_length_backward, lowest_length_forward};
pub use dag::highest_cost_path;
pub use matrix::{lowest_cost_walk, LowestCostWalks};

/// Cost reported for a walk that does not exist. Half of `i64::MAX` so that
/// adding two finite costs cannot overflow.
pub const INFINITE_COST: Weight = Weight::MAX / 2;

/// A walk through the graph and its total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Vertex ids from start to end. Empty when no walk exists.
    pub path: Vec<String>,
    pub cost: Weight,
}

impl Walk {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            cost: INFINITE_COST,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges walked.
    pub fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
