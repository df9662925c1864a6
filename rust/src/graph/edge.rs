//! Edge records and lazy edge views over a directed graph.

use std::collections::hash_set;
use std::fmt;

use crate::interner::VertexIdInt;

use super::DirectedGraph;

/// Signed edge weight.
///
/// Any `i64` can be stored, but the lowest-cost walk engine only accepts
/// weights strictly between `-INFINITE_COST` and `INFINITE_COST`
/// (`i64::MAX / 2`), since it uses that value to mean "no edge".
pub type Weight = i64;

/// Weight given to edges added without an explicit one.
pub const DEFAULT_WEIGHT: Weight = 1;

/// A weighted edge, borrowed from the graph that owns the vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'g> {
    pub from: &'g str,
    pub to: &'g str,
    pub weight: Weight,
}

impl<'g> Edge<'g> {
    /// Detach the edge from the graph's lifetime.
    pub fn to_owned_parts(&self) -> (String, String, Weight) {
        (self.from.to_string(), self.to.to_string(), self.weight)
    }
}

impl fmt::Display for Edge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}

/// Which edges of a vertex an [`EdgeView`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outbound,
    Inbound,
    /// Outbound edges first, then inbound ones. A self-loop is reported once.
    Both,
}

/// Lazy, restartable view of the edges touching one vertex.
///
/// The view holds no edges itself; every call to [`EdgeView::iter`] starts a
/// fresh walk over the vertex's adjacency sets.
pub struct EdgeView<'g, P> {
    graph: &'g DirectedGraph<P>,
    vertex: VertexIdInt,
    direction: Direction,
}

impl<P> Clone for EdgeView<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for EdgeView<'_, P> {}

impl<'g, P> EdgeView<'g, P> {
    pub(crate) fn new(graph: &'g DirectedGraph<P>, vertex: VertexIdInt, direction: Direction) -> Self {
        Self {
            graph,
            vertex,
            direction,
        }
    }

    /// Id of the vertex this view is anchored at.
    pub fn vertex(&self) -> &'g str {
        self.graph.name_of(self.vertex)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn iter(&self) -> EdgeIter<'g, P> {
        let slot = self.graph.slot(self.vertex);
        let outbound = match self.direction {
            Direction::Outbound | Direction::Both => slot.map(|s| s.outbound.iter()),
            Direction::Inbound => None,
        };
        let inbound = match self.direction {
            Direction::Inbound | Direction::Both => slot.map(|s| s.inbound.iter()),
            Direction::Outbound => None,
        };
        EdgeIter {
            graph: self.graph,
            vertex: self.vertex,
            skip_self_loop: self.direction == Direction::Both,
            outbound,
            inbound,
        }
    }

    /// Number of edges the view yields.
    pub fn len(&self) -> usize {
        let Some(slot) = self.graph.slot(self.vertex) else {
            return 0;
        };
        match self.direction {
            Direction::Outbound => slot.outbound.len(),
            Direction::Inbound => slot.inbound.len(),
            Direction::Both => {
                let self_loop = usize::from(slot.outbound.contains(&self.vertex));
                slot.outbound.len() + slot.inbound.len() - self_loop
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'g, P> IntoIterator for EdgeView<'g, P> {
    type Item = Edge<'g>;
    type IntoIter = EdgeIter<'g, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, P> IntoIterator for &EdgeView<'g, P> {
    type Item = Edge<'g>;
    type IntoIter = EdgeIter<'g, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator produced by [`EdgeView::iter`].
pub struct EdgeIter<'g, P> {
    graph: &'g DirectedGraph<P>,
    vertex: VertexIdInt,
    skip_self_loop: bool,
    outbound: Option<hash_set::Iter<'g, VertexIdInt>>,
    inbound: Option<hash_set::Iter<'g, VertexIdInt>>,
}

impl<'g, P> Iterator for EdgeIter<'g, P> {
    type Item = Edge<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        if let Some(it) = self.outbound.as_mut() {
            if let Some(&to) = it.next() {
                return Some(graph.edge_at(self.vertex, to));
            }
            self.outbound = None;
        }
        if let Some(it) = self.inbound.as_mut() {
            for &from in it.by_ref() {
                if self.skip_self_loop && from == self.vertex {
                    continue;
                }
                return Some(graph.edge_at(from, self.vertex));
            }
            self.inbound = None;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectedGraph {
        let mut g = DirectedGraph::new();
        for id in ["a", "b", "c"] {
            g.add_vertex(id).unwrap();
        }
        g.add_weighted_edge("a", "b", 4).unwrap();
        g.add_weighted_edge("c", "a", -2).unwrap();
        g
    }

    #[test]
    fn test_outbound_view() {
        let g = sample();
        let view = g.outbound_edges("a").unwrap();
        let edges: Vec<Edge> = view.iter().collect();
        assert_eq!(
            edges,
            vec![Edge {
                from: "a",
                to: "b",
                weight: 4
            }]
        );
        assert_eq!(view.len(), 1);
        assert_eq!(view.vertex(), "a");
    }

    #[test]
    fn test_view_is_restartable() {
        let g = sample();
        let view = g.adjacent_edges("a").unwrap();
        let first: Vec<Edge> = view.iter().collect();
        let second: Vec<Edge> = view.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_adjacent_lists_outbound_before_inbound() {
        let g = sample();
        let edges: Vec<Edge> = g.adjacent_edges("a").unwrap().iter().collect();
        assert_eq!(edges[0].from, "a");
        assert_eq!(edges[1].to, "a");
        assert_eq!(edges[1].weight, -2);
    }

    #[test]
    fn test_self_loop_reported_once_in_both() {
        let mut g: DirectedGraph = DirectedGraph::new();
        g.add_vertex("a").unwrap();
        g.add_edge("a", "a").unwrap();

        assert_eq!(g.adjacent_edges("a").unwrap().iter().count(), 1);
        assert_eq!(g.adjacent_edges("a").unwrap().len(), 1);
        assert_eq!(g.outbound_edges("a").unwrap().len(), 1);
        assert_eq!(g.inbound_edges("a").unwrap().len(), 1);
    }

    #[test]
    fn test_edge_display() {
        let e = Edge {
            from: "x",
            to: "y",
            weight: 3,
        };
        assert_eq!(e.to_string(), "x -> y (3)");
        assert_eq!(e.to_owned_parts(), ("x".to_string(), "y".to_string(), 3));
    }
}
