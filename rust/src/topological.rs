//! Topological ordering of directed graphs.
//!
//! Implements two strategies:
//! - `kahn`: predecessor counters, vertices released once every predecessor is placed
//! - `dfs`: depth-first traversal, reverse post-order
//!
//! Both report `CycleDetected` instead of a partial order. The empty graph has
//! the empty order, which is a success.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::config::AlgorithmConfig;
use crate::graph::{DirectedGraph, GraphError, GraphResult};
use crate::interner::VertexIdInt;
use crate::log_results;

/// Which algorithm produces the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopoStrategy {
    /// Kahn's algorithm.
    #[default]
    PredecessorCounter,
    /// Depth-first traversal (Tarjan).
    DepthFirst,
}

impl FromStr for TopoStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kahn" | "predecessor_counter" => Ok(Self::PredecessorCounter),
            "dfs" | "tarjan" => Ok(Self::DepthFirst),
            other => Err(GraphError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for TopoStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PredecessorCounter => write!(f, "kahn"),
            Self::DepthFirst => write!(f, "dfs"),
        }
    }
}

/// Outcome of a predecessor-counter traversal.
#[derive(Debug, Clone)]
pub(crate) struct Traversal {
    /// Vertices in the order they were released.
    pub(crate) order: Vec<VertexIdInt>,
    /// False when some vertex was never released, i.e. the graph has a cycle.
    pub(crate) complete: bool,
}

/// Kahn's algorithm over handles.
///
/// `relax(u, v)` is called for every edge `u -> v` when `u` is released, before
/// `v`'s counter is decremented. By the time `v` itself is released every one
/// of its predecessors has been relaxed into it.
pub(crate) fn predecessor_counter_traversal<P>(
    graph: &DirectedGraph<P>,
    mut relax: impl FnMut(VertexIdInt, VertexIdInt),
) -> Traversal {
    let mut in_degree = vec![0usize; graph.handle_bound()];
    for h in graph.handles() {
        in_degree[h as usize] = graph.in_degree_of(h);
    }

    let mut queue: VecDeque<VertexIdInt> = graph
        .handles()
        .filter(|&h| in_degree[h as usize] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.vertex_count());
    while let Some(u) = queue.pop_front() {
        order.push(u);
        for v in graph.successor_handles(u) {
            relax(u, v);
            let degree = &mut in_degree[v as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(v);
            }
        }
    }

    let complete = order.len() == graph.vertex_count();
    Traversal { order, complete }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Depth-first topological order over handles.
pub(crate) fn depth_first_handles<P>(graph: &DirectedGraph<P>) -> GraphResult<Vec<VertexIdInt>> {
    let mut marks = vec![Mark::Unvisited; graph.handle_bound()];
    let mut post_order = Vec::with_capacity(graph.vertex_count());

    for root in graph.handles() {
        if marks[root as usize] != Mark::Unvisited {
            continue;
        }
        marks[root as usize] = Mark::OnPath;
        let mut stack = vec![(root, graph.successor_handles(root))];

        loop {
            let Some((v, successors)) = stack.last_mut() else {
                break;
            };
            let v = *v;
            match successors.next() {
                Some(w) => match marks[w as usize] {
                    Mark::Unvisited => {
                        marks[w as usize] = Mark::OnPath;
                        stack.push((w, graph.successor_handles(w)));
                    }
                    // Back edge
                    Mark::OnPath => return Err(GraphError::CycleDetected),
                    Mark::Done => {}
                },
                None => {
                    marks[v as usize] = Mark::Done;
                    post_order.push(v);
                    stack.pop();
                }
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}

fn names<P>(graph: &DirectedGraph<P>, order: &[VertexIdInt]) -> Vec<String> {
    order
        .iter()
        .map(|&h| graph.name_of(h).to_string())
        .collect()
}

/// Topological order by predecessor counters (Kahn's algorithm).
///
/// # Returns
/// * `Ok(order)` - every edge `(u, v)` has `u` before `v`; empty for the empty graph
/// * `Err(GraphError::CycleDetected)` - the graph is not a DAG
pub fn topological_order<P>(graph: &DirectedGraph<P>) -> GraphResult<Vec<String>> {
    let traversal = predecessor_counter_traversal(graph, |_, _| {});
    if !traversal.complete {
        return Err(GraphError::CycleDetected);
    }
    Ok(names(graph, &traversal.order))
}

/// Topological order by depth-first traversal. Same contract as
/// [`topological_order`].
pub fn topological_order_dfs<P>(graph: &DirectedGraph<P>) -> GraphResult<Vec<String>> {
    let order = depth_first_handles(graph)?;
    Ok(names(graph, &order))
}

pub fn topological_order_with<P>(
    graph: &DirectedGraph<P>,
    strategy: TopoStrategy,
) -> GraphResult<Vec<String>> {
    match strategy {
        TopoStrategy::PredecessorCounter => topological_order(graph),
        TopoStrategy::DepthFirst => topological_order_dfs(graph),
    }
}

/// Topological order using the strategy and verbosity from `config`.
pub fn topological_order_configured<P>(
    graph: &DirectedGraph<P>,
    config: &AlgorithmConfig,
) -> GraphResult<Vec<String>> {
    let strategy = config.strategy()?;
    let result = topological_order_with(graph, strategy);
    match &result {
        Ok(order) => {
            log_results!(
                config.verbosity,
                "Topological order ({}): {} vertices",
                strategy,
                order.len()
            );
        }
        Err(e) => {
            log_results!(config.verbosity, "Topological sort ({}) failed: {}", strategy, e);
        }
    }
    result
}

/// True when the graph has no directed cycle.
pub fn is_acyclic<P>(graph: &DirectedGraph<P>) -> bool {
    depth_first_handles(graph).is_ok()
}

/// Check that `order` lists every vertex exactly once with every edge pointing
/// forward.
pub fn is_topological_order<P, S: AsRef<str>>(graph: &DirectedGraph<P>, order: &[S]) -> bool {
    if order.len() != graph.vertex_count() {
        return false;
    }
    let mut position = vec![usize::MAX; graph.handle_bound()];
    for (i, id) in order.iter().enumerate() {
        match graph.handle(id.as_ref()) {
            Ok(h) if position[h as usize] == usize::MAX => position[h as usize] = i,
            _ => return false,
        }
    }
    graph.handles().all(|u| {
        graph
            .successor_handles(u)
            .all(|v| position[u as usize] < position[v as usize])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(vertices: &[&str], edges: &[(&str, &str)]) -> DirectedGraph {
        let mut g = DirectedGraph::new();
        for v in vertices {
            g.add_vertex(*v).unwrap();
        }
        for (from, to) in edges {
            g.add_edge(from, to).unwrap();
        }
        g
    }

    fn diamond() -> DirectedGraph {
        make_graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")],
        )
    }

    #[test]
    fn test_kahn_order_is_valid() {
        let g = diamond();
        let order = topological_order(&g).unwrap();
        assert!(is_topological_order(&g, &order));
        assert_eq!(order.first().map(String::as_str), Some("a"));
        assert_eq!(order.last().map(String::as_str), Some("e"));
    }

    #[test]
    fn test_dfs_order_is_valid() {
        let g = diamond();
        let order = topological_order_dfs(&g).unwrap();
        assert!(is_topological_order(&g, &order));
    }

    #[test]
    fn test_three_cycle_rejected() {
        let g = make_graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(topological_order(&g), Err(GraphError::CycleDetected));
        assert_eq!(topological_order_dfs(&g), Err(GraphError::CycleDetected));
        assert!(!is_acyclic(&g));
    }

    #[test]
    fn test_cycle_downstream_of_dag_part() {
        let g = make_graph(
            &["s", "a", "b", "c"],
            &[("s", "a"), ("a", "b"), ("b", "c"), ("c", "a")],
        );
        assert_eq!(topological_order(&g), Err(GraphError::CycleDetected));
        assert!(!is_acyclic(&g));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let g = make_graph(&["a"], &[("a", "a")]);
        assert_eq!(topological_order(&g), Err(GraphError::CycleDetected));
        assert_eq!(topological_order_dfs(&g), Err(GraphError::CycleDetected));
    }

    #[test]
    fn test_empty_graph_is_not_a_cycle() {
        let g: DirectedGraph = DirectedGraph::new();
        assert_eq!(topological_order(&g), Ok(vec![]));
        assert_eq!(topological_order_dfs(&g), Ok(vec![]));
        assert!(is_acyclic(&g));
    }

    #[test]
    fn test_isolated_vertices_all_listed() {
        let g = make_graph(&["x", "y", "z"], &[]);
        let mut order = topological_order(&g).unwrap();
        order.sort();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_traversal_relaxes_every_edge_once() {
        let g = diamond();
        let mut relaxed = 0;
        let traversal = predecessor_counter_traversal(&g, |_, _| relaxed += 1);
        assert!(traversal.complete);
        assert_eq!(relaxed, g.edge_count());
    }

    #[test]
    fn test_is_topological_order_rejects_bad_orders() {
        let g = make_graph(&["a", "b"], &[("a", "b")]);
        assert!(is_topological_order(&g, &["a", "b"]));
        assert!(!is_topological_order(&g, &["b", "a"]));
        assert!(!is_topological_order(&g, &["a"]));
        assert!(!is_topological_order(&g, &["a", "a"]));
        assert!(!is_topological_order(&g, &["a", "q"]));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("kahn".parse::<TopoStrategy>(), Ok(TopoStrategy::PredecessorCounter));
        assert_eq!("tarjan".parse::<TopoStrategy>(), Ok(TopoStrategy::DepthFirst));
        assert_eq!(
            "bfs".parse::<TopoStrategy>(),
            Err(GraphError::UnknownStrategy("bfs".to_string()))
        );
        assert_eq!(TopoStrategy::DepthFirst.to_string(), "dfs");
    }

    #[test]
    fn test_configured_uses_strategy() {
        let g = diamond();
        let config = AlgorithmConfig {
            topo_strategy: "dfs".to_string(),
            ..Default::default()
        };
        let order = topological_order_configured(&g, &config).unwrap();
        assert!(is_topological_order(&g, &order));

        let bad = AlgorithmConfig {
            topo_strategy: "nope".to_string(),
            ..Default::default()
        };
        assert!(topological_order_configured(&g, &bad).is_err());
    }
}
