//! Highest-cost path in a DAG, in one pass over a topological order.

use crate::graph::{DirectedGraph, GraphError, GraphResult, Weight, DEFAULT_WEIGHT};
use crate::interner::VertexIdInt;
use crate::topological::predecessor_counter_traversal;

use super::Walk;

/// The path from `start` to `end` with the largest total weight.
///
/// Runs in O(n + m). Returns `Ok(None)` if `end` is unreachable from `start`
/// and `Err(CycleDetected)` if the graph is not a DAG. Path costs saturate at
/// the bounds of [`Weight`].
pub fn highest_cost_path<P>(
    graph: &DirectedGraph<P>,
    start: &str,
    end: &str,
) -> GraphResult<Option<Walk>> {
    let (s, t) = (graph.handle(start)?, graph.handle(end)?);

    let traversal = predecessor_counter_traversal(graph, |_, _| {});
    if !traversal.complete {
        return Err(GraphError::CycleDetected);
    }

    let bound = graph.handle_bound();
    let mut best: Vec<Option<Weight>> = vec![None; bound];
    let mut parent: Vec<Option<VertexIdInt>> = vec![None; bound];
    best[s as usize] = Some(0);

    // Vertices before `start` in the order cannot be reached from it.
    for &u in traversal.order.iter().skip_while(|&&u| u != s) {
        let Some(base) = best[u as usize] else {
            continue;
        };
        for v in graph.successor_handles(u) {
            let weight = graph.weight_of(u, v).unwrap_or(DEFAULT_WEIGHT);
            let candidate = base.saturating_add(weight);
            if best[v as usize].map_or(true, |current| candidate > current) {
                best[v as usize] = Some(candidate);
                parent[v as usize] = Some(u);
            }
        }
    }

    let Some(cost) = best[t as usize] else {
        return Ok(None);
    };
    let mut path = vec![graph.name_of(t).to_string()];
    let mut at = t;
    while let Some(p) = parent[at as usize] {
        path.push(graph.name_of(p).to_string());
        at = p;
    }
    path.reverse();
    Ok(Some(Walk { path, cost }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(vertices: &[&str], edges: &[(&str, &str, Weight)]) -> DirectedGraph {
        let mut g = DirectedGraph::new();
        for v in vertices {
            g.add_vertex(*v).unwrap();
        }
        for (from, to, w) in edges {
            g.add_weighted_edge(from, to, *w).unwrap();
        }
        g
    }

    #[test]
    fn test_picks_expensive_branch() {
        let g = make_graph(
            &["s", "a", "b", "t"],
            &[("s", "a", 1), ("a", "t", 1), ("s", "b", 5), ("b", "t", -1), ("s", "t", 3)],
        );
        let walk = highest_cost_path(&g, "s", "t").unwrap().unwrap();
        assert_eq!(walk.path, vec!["s", "b", "t"]);
        assert_eq!(walk.cost, 4);
    }

    #[test]
    fn test_ignores_vertices_not_reachable_from_start() {
        let g = make_graph(
            &["x", "s", "t"],
            &[("x", "t", 100), ("s", "t", 2)],
        );
        let walk = highest_cost_path(&g, "s", "t").unwrap().unwrap();
        assert_eq!(walk.path, vec!["s", "t"]);
        assert_eq!(walk.cost, 2);
    }

    #[test]
    fn test_unreachable_end() {
        let g = make_graph(&["a", "b"], &[("b", "a", 1)]);
        assert_eq!(highest_cost_path(&g, "a", "b"), Ok(None));
    }

    #[test]
    fn test_start_equals_end() {
        let g = make_graph(&["a", "b"], &[("a", "b", 1)]);
        let walk = highest_cost_path(&g, "a", "a").unwrap().unwrap();
        assert_eq!(walk.path, vec!["a"]);
        assert_eq!(walk.cost, 0);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let g = make_graph(
            &["a", "b", "c"],
            &[("a", "b", Weight::MAX - 1), ("b", "c", 5)],
        );
        let walk = highest_cost_path(&g, "a", "c").unwrap().unwrap();
        assert_eq!(walk.path, vec!["a", "b", "c"]);
        assert_eq!(walk.cost, Weight::MAX);

        let g = make_graph(
            &["a", "b", "c"],
            &[("a", "b", Weight::MIN + 1), ("b", "c", -5)],
        );
        let walk = highest_cost_path(&g, "a", "c").unwrap().unwrap();
        assert_eq!(walk.cost, Weight::MIN);
    }

    #[test]
    fn test_cycle_rejected() {
        let g = make_graph(&["a", "b"], &[("a", "b", 1), ("b", "a", 1)]);
        assert_eq!(highest_cost_path(&g, "a", "b"), Err(GraphError::CycleDetected));
    }
}
