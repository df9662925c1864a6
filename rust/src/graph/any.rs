//! A graph of any supported kind behind one tag.
//!
//! Direction-dependent operations are refused on undirected graphs with
//! `InvalidOperationOnGraphType`.

use std::fmt;

use crate::critical_path::ActivityGraph;
use crate::topological::topological_order;
use crate::walk::{lowest_cost_walk, Walk};

use super::directed::DirectedGraph;
use super::edge::Weight;
use super::error::{GraphError, GraphResult};
use super::undirected::UndirectedGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Directed,
    Undirected,
    Activity,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directed => write!(f, "directed"),
            Self::Undirected => write!(f, "undirected"),
            Self::Activity => write!(f, "activity"),
        }
    }
}

/// Owned edge as returned by [`AnyGraph`] queries.
pub type OwnedEdge = (String, String, Weight);

#[derive(Debug, Clone)]
pub enum AnyGraph {
    Directed(DirectedGraph),
    Undirected(UndirectedGraph),
    Activity(ActivityGraph),
}

impl From<DirectedGraph> for AnyGraph {
    fn from(graph: DirectedGraph) -> Self {
        Self::Directed(graph)
    }
}

impl From<UndirectedGraph> for AnyGraph {
    fn from(graph: UndirectedGraph) -> Self {
        Self::Undirected(graph)
    }
}

impl From<ActivityGraph> for AnyGraph {
    fn from(graph: ActivityGraph) -> Self {
        Self::Activity(graph)
    }
}

impl AnyGraph {
    pub fn kind(&self) -> GraphKind {
        match self {
            Self::Directed(_) => GraphKind::Directed,
            Self::Undirected(_) => GraphKind::Undirected,
            Self::Activity(_) => GraphKind::Activity,
        }
    }

    fn unsupported(&self, operation: &'static str) -> GraphError {
        GraphError::InvalidOperationOnGraphType {
            operation,
            kind: self.kind(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Directed(g) => g.vertex_count(),
            Self::Undirected(g) => g.vertex_count(),
            Self::Activity(g) => g.graph().vertex_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            Self::Directed(g) => g.edge_count(),
            Self::Undirected(g) => g.edge_count(),
            Self::Activity(g) => g.graph().edge_count(),
        }
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        match self {
            Self::Directed(g) => g.contains_vertex(id),
            Self::Undirected(g) => g.contains_vertex(id),
            Self::Activity(g) => g.contains_activity(id),
        }
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match self {
            Self::Directed(g) => g.contains_edge(from, to),
            Self::Undirected(g) => g.contains_edge(from, to),
            Self::Activity(g) => g.contains_edge(from, to),
        }
    }

    /// Every edge touching `id`. Directed kinds list outbound edges first.
    pub fn adjacent_edges(&self, id: &str) -> GraphResult<Vec<OwnedEdge>> {
        match self {
            Self::Directed(g) => collect_owned(g.adjacent_edges(id)?),
            Self::Undirected(g) => collect_owned(g.adjacent_edges(id)?),
            Self::Activity(g) => collect_owned(g.graph().adjacent_edges(id)?),
        }
    }

    pub fn outbound_edges(&self, id: &str) -> GraphResult<Vec<OwnedEdge>> {
        match self {
            Self::Directed(g) => collect_owned(g.outbound_edges(id)?),
            Self::Activity(g) => collect_owned(g.graph().outbound_edges(id)?),
            Self::Undirected(_) => Err(self.unsupported("outbound_edges")),
        }
    }

    pub fn inbound_edges(&self, id: &str) -> GraphResult<Vec<OwnedEdge>> {
        match self {
            Self::Directed(g) => collect_owned(g.inbound_edges(id)?),
            Self::Activity(g) => collect_owned(g.graph().inbound_edges(id)?),
            Self::Undirected(_) => Err(self.unsupported("inbound_edges")),
        }
    }

    pub fn topological_order(&self) -> GraphResult<Vec<String>> {
        match self {
            Self::Directed(g) => topological_order(g),
            Self::Activity(g) => topological_order(g.graph()),
            Self::Undirected(_) => Err(self.unsupported("topological_order")),
        }
    }

    pub fn lowest_cost_walk(&self, start: &str, end: &str) -> GraphResult<Walk> {
        match self {
            Self::Directed(g) => lowest_cost_walk(g, start, end),
            Self::Activity(g) => lowest_cost_walk(g.graph(), start, end),
            Self::Undirected(_) => Err(self.unsupported("lowest_cost_walk")),
        }
    }

    pub fn as_directed(&self) -> GraphResult<&DirectedGraph> {
        match self {
            Self::Directed(g) => Ok(g),
            _ => Err(self.unsupported("as_directed")),
        }
    }

    pub fn as_directed_mut(&mut self) -> GraphResult<&mut DirectedGraph> {
        let kind = self.kind();
        match self {
            Self::Directed(g) => Ok(g),
            _ => Err(GraphError::InvalidOperationOnGraphType {
                operation: "as_directed_mut",
                kind,
            }),
        }
    }

    pub fn as_undirected(&self) -> Option<&UndirectedGraph> {
        match self {
            Self::Undirected(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_undirected_mut(&mut self) -> Option<&mut UndirectedGraph> {
        match self {
            Self::Undirected(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_activity(&self) -> Option<&ActivityGraph> {
        match self {
            Self::Activity(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_activity_mut(&mut self) -> Option<&mut ActivityGraph> {
        match self {
            Self::Activity(g) => Some(g),
            _ => None,
        }
    }
}

fn collect_owned<'g, I>(edges: I) -> GraphResult<Vec<OwnedEdge>>
where
    I: IntoIterator<Item = super::edge::Edge<'g>>,
{
    Ok(edges.into_iter().map(|e| e.to_owned_parts()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directed() -> AnyGraph {
        let mut g: DirectedGraph = DirectedGraph::new();
        g.add_vertex("a").unwrap();
        g.add_vertex("b").unwrap();
        g.add_weighted_edge("a", "b", 3).unwrap();
        g.into()
    }

    fn undirected() -> AnyGraph {
        let mut g = UndirectedGraph::new();
        g.add_vertex("a").unwrap();
        g.add_vertex("b").unwrap();
        g.add_weighted_edge("a", "b", 3).unwrap();
        g.into()
    }

    #[test]
    fn test_common_operations_on_every_kind() {
        for g in [directed(), undirected()] {
            assert_eq!(g.vertex_count(), 2);
            assert_eq!(g.edge_count(), 1);
            assert!(g.contains_vertex("a"));
            assert!(g.contains_edge("a", "b"));
            assert_eq!(
                g.adjacent_edges("a").unwrap(),
                vec![("a".to_string(), "b".to_string(), 3)]
            );
        }
        assert!(!directed().contains_edge("b", "a"));
        assert!(undirected().contains_edge("b", "a"));
    }

    #[test]
    fn test_direction_dependent_operations_refused_on_undirected() {
        let g = undirected();
        let err = g.outbound_edges("a").unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidOperationOnGraphType {
                operation: "outbound_edges",
                kind: GraphKind::Undirected,
            }
        );
        assert_eq!(
            err.to_string(),
            "outbound_edges is only defined for directed graphs, not undirected graphs"
        );
        assert!(g.inbound_edges("a").is_err());
        assert!(g.topological_order().is_err());
        assert!(g.lowest_cost_walk("a", "b").is_err());
        assert!(g.as_directed().is_err());
    }

    #[test]
    fn test_directed_operations() {
        let g = directed();
        assert_eq!(g.kind(), GraphKind::Directed);
        assert_eq!(g.inbound_edges("b").unwrap().len(), 1);
        assert_eq!(g.topological_order().unwrap(), vec!["a", "b"]);
        assert_eq!(g.lowest_cost_walk("a", "b").unwrap().cost, 3);
        assert!(g.as_directed().is_ok());
        assert!(g.as_undirected().is_none());
    }

    #[test]
    fn test_activity_graph_is_directed() {
        let mut activities = ActivityGraph::new();
        activities.add_activity("x", 2).unwrap();
        activities.add_activity("y", 1).unwrap();
        activities.add_dependency("x", "y").unwrap();

        let mut g = AnyGraph::from(activities);
        assert_eq!(g.kind(), GraphKind::Activity);
        assert_eq!(g.outbound_edges("x").unwrap().len(), 1);
        assert_eq!(g.topological_order().unwrap(), vec!["x", "y"]);

        let activities = g.as_activity_mut().unwrap();
        assert!(activities.compute_schedule());
        assert_eq!(activities.total_project_time(), 3);
    }

    #[test]
    fn test_mutation_through_tag() {
        let mut g = directed();
        g.as_directed_mut().unwrap().add_vertex("c").unwrap();
        assert_eq!(g.vertex_count(), 3);

        let mut u = undirected();
        assert!(u.as_directed_mut().is_err());
        u.as_undirected_mut().unwrap().add_vertex("c").unwrap();
        assert_eq!(u.vertex_count(), 3);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(GraphKind::Directed.to_string(), "directed");
        assert_eq!(GraphKind::Activity.to_string(), "activity");
    }
}
