//! Breadth-first lowest-length (edge count) queries.

use std::collections::VecDeque;

use crate::graph::{DirectedGraph, GraphResult};
use crate::interner::VertexIdInt;

fn bfs_length<P, I>(
    graph: &DirectedGraph<P>,
    from: VertexIdInt,
    to: VertexIdInt,
    next: impl Fn(VertexIdInt) -> I,
) -> Option<usize>
where
    I: Iterator<Item = VertexIdInt>,
{
    if from == to {
        return Some(0);
    }
    let mut distance: Vec<Option<usize>> = vec![None; graph.handle_bound()];
    distance[from as usize] = Some(0);
    let mut queue = VecDeque::from([from]);

    while let Some(u) = queue.pop_front() {
        let d = distance[u as usize].unwrap_or_default();
        for v in next(u) {
            if v == to {
                return Some(d + 1);
            }
            if distance[v as usize].is_none() {
                distance[v as usize] = Some(d + 1);
                queue.push_back(v);
            }
        }
    }
    None
}

/// Fewest edges on a path from `start` to `end`, searching forward along
/// outbound edges. `None` if `end` is unreachable.
pub fn lowest_length_forward<P>(
    graph: &DirectedGraph<P>,
    start: &str,
    end: &str,
) -> GraphResult<Option<usize>> {
    let (s, t) = (graph.handle(start)?, graph.handle(end)?);
    Ok(bfs_length(graph, s, t, |u| graph.successor_handles(u)))
}

/// Same as [`lowest_length_forward`], but searching backward from `end`
/// along inbound edges.
pub fn lowest_length_backward<P>(
    graph: &DirectedGraph<P>,
    start: &str,
    end: &str,
) -> GraphResult<Option<usize>> {
    let (s, t) = (graph.handle(start)?, graph.handle(end)?);
    Ok(bfs_length(graph, t, s, |u| graph.predecessor_handles(u)))
}
