//! Error types for graph mutation, queries and algorithms.

use thiserror::Error;

use super::edge::Weight;
use super::GraphKind;

/// Result alias used throughout the crate.
pub type GraphResult<T> = Result<T, GraphError>;

/// Everything that can go wrong on a graph.
///
/// The first four variants are precondition violations on mutation or lookup.
/// `CycleDetected` is an expected outcome on non-DAG input; callers decide
/// whether it is an error. `NegativeCycleDetected` aborts the lowest-cost walk
/// computation before any distance is handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),
    #[error("Vertex already exists: {0}")]
    DuplicateVertex(String),
    #[error("Edge not found: {0} -> {1}")]
    EdgeNotFound(String, String),
    #[error("Edge already exists: {0} -> {1}")]
    DuplicateEdge(String, String),
    #[error("Cycle detected in graph")]
    CycleDetected,
    #[error("Negative cost cycle detected")]
    NegativeCycleDetected,
    #[error("{operation} is only defined for directed graphs, not {kind} graphs")]
    InvalidOperationOnGraphType {
        operation: &'static str,
        kind: GraphKind,
    },
    #[error("Edge weight {weight} on {from} -> {to} is outside the range cost queries accept")]
    WeightOutOfRange {
        from: String,
        to: String,
        weight: Weight,
    },
    #[error("Unknown topological sort strategy: {0}")]
    UnknownStrategy(String),
}

impl GraphError {
    pub(crate) fn vertex_not_found(id: &str) -> Self {
        Self::VertexNotFound(id.to_string())
    }

    pub(crate) fn edge_not_found(from: &str, to: &str) -> Self {
        Self::EdgeNotFound(from.to_string(), to.to_string())
    }

    pub(crate) fn duplicate_edge(from: &str, to: &str) -> Self {
        Self::DuplicateEdge(from.to_string(), to.to_string())
    }

    /// True for the two cycle outcomes.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected | Self::NegativeCycleDetected)
    }
}
