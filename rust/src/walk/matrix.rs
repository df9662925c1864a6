//! All-pairs lowest-cost walks with negative-cycle detection.

use rustc_hash::FxHashMap;

use crate::config::AlgorithmConfig;
use crate::graph::{DirectedGraph, GraphError, GraphResult, Weight, DEFAULT_WEIGHT};
use crate::{log_debug, log_results, log_steps};

use super::{Walk, INFINITE_COST};

/// Distance and predecessor matrices for every ordered pair of vertices.
///
/// Built once from a snapshot of the graph; later graph mutations are not
/// reflected. Construction fails with `NegativeCycleDetected` if any vertex
/// can reach itself at negative cost, and with `WeightOutOfRange` if an edge
/// weight reaches `INFINITE_COST` in magnitude, so a successfully built value
/// only ever answers well-defined queries.
#[derive(Debug, Clone)]
pub struct LowestCostWalks {
    ids: Vec<String>,
    index: FxHashMap<String, usize>,
    /// Row-major `n * n` distances. `INFINITE_COST` = no walk.
    dist: Vec<Weight>,
    /// `pred[i * n + j]`: vertex before `j` on the best known walk from `i`.
    pred: Vec<Option<usize>>,
}

impl LowestCostWalks {
    pub fn compute<P>(graph: &DirectedGraph<P>) -> GraphResult<Self> {
        Self::compute_verbose(graph, 0)
    }

    pub fn compute_with_config<P>(
        graph: &DirectedGraph<P>,
        config: &AlgorithmConfig,
    ) -> GraphResult<Self> {
        Self::compute_verbose(graph, config.verbosity)
    }

    fn compute_verbose<P>(graph: &DirectedGraph<P>, verbosity: u8) -> GraphResult<Self> {
        // Dense index over live vertices.
        let mut dense = vec![usize::MAX; graph.handle_bound()];
        let mut ids = Vec::with_capacity(graph.vertex_count());
        for h in graph.handles() {
            dense[h as usize] = ids.len();
            ids.push(graph.name_of(h).to_string());
        }
        let n = ids.len();

        let mut dist = vec![INFINITE_COST; n * n];
        let mut pred: Vec<Option<usize>> = vec![None; n * n];
        for i in 0..n {
            dist[i * n + i] = 0;
        }
        for u in graph.handles() {
            let i = dense[u as usize];
            for v in graph.successor_handles(u) {
                let j = dense[v as usize];
                let weight = graph.weight_of(u, v).unwrap_or(DEFAULT_WEIGHT);
                if weight >= INFINITE_COST || weight <= -INFINITE_COST {
                    log_results!(verbosity, "Edge weight out of range: {}", graph.edge_at(u, v));
                    return Err(GraphError::WeightOutOfRange {
                        from: graph.name_of(u).to_string(),
                        to: graph.name_of(v).to_string(),
                        weight,
                    });
                }
                if i == j {
                    // A self-loop only matters when it makes the diagonal negative.
                    dist[i * n + i] = dist[i * n + i].min(weight);
                } else {
                    dist[i * n + j] = weight;
                    pred[i * n + j] = Some(i);
                }
            }
        }

        log_steps!(verbosity, "Lowest-cost walks: {} vertices, {} edges", n, graph.edge_count());
        if verbosity >= crate::logging::VERBOSITY_DEBUG {
            for (i, id) in ids.iter().enumerate() {
                let row: Vec<String> = dist[i * n..(i + 1) * n]
                    .iter()
                    .map(|&d| if d >= INFINITE_COST { "inf".to_string() } else { d.to_string() })
                    .collect();
                log_debug!(verbosity, "  {}: [{}]", id, row.join(", "));
            }
        }

        for k in 0..n {
            for i in 0..n {
                let via = dist[i * n + k];
                if via >= INFINITE_COST {
                    continue;
                }
                for j in 0..n {
                    let tail = dist[k * n + j];
                    if tail >= INFINITE_COST {
                        continue;
                    }
                    let candidate = via.saturating_add(tail);
                    if candidate < dist[i * n + j] {
                        dist[i * n + j] = candidate;
                        pred[i * n + j] = pred[k * n + j];
                    }
                }
            }
        }

        if let Some(i) = (0..n).find(|&i| dist[i * n + i] < 0) {
            log_results!(verbosity, "Negative cost cycle through {}", ids[i]);
            return Err(GraphError::NegativeCycleDetected);
        }

        let index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        log_results!(verbosity, "Lowest-cost walks computed for {} vertices", n);
        Ok(Self {
            ids,
            index,
            dist,
            pred,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    fn position(&self, id: &str) -> GraphResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Lowest cost from `start` to `end`, `None` if no walk exists.
    pub fn cost(&self, start: &str, end: &str) -> GraphResult<Option<Weight>> {
        let (s, t) = (self.position(start)?, self.position(end)?);
        let n = self.ids.len();
        let d = self.dist[s * n + t];
        Ok((d < INFINITE_COST).then_some(d))
    }

    /// The lowest-cost walk from `start` to `end`.
    ///
    /// An unreachable `end` gives an empty path with cost `INFINITE_COST`.
    pub fn walk(&self, start: &str, end: &str) -> GraphResult<Walk> {
        let (s, t) = (self.position(start)?, self.position(end)?);
        let n = self.ids.len();
        let cost = self.dist[s * n + t];
        if cost >= INFINITE_COST {
            return Ok(Walk::unreachable());
        }

        let mut reversed = vec![t];
        let mut at = t;
        while at != s {
            // Without negative cycles a lowest-cost walk never repeats a vertex.
            if reversed.len() > n {
                return Ok(Walk::unreachable());
            }
            match self.pred[s * n + at] {
                Some(p) => {
                    reversed.push(p);
                    at = p;
                }
                None => return Ok(Walk::unreachable()),
            }
        }

        let path = reversed
            .into_iter()
            .rev()
            .map(|i| self.ids[i].clone())
            .collect();
        Ok(Walk { path, cost })
    }
}

/// Lowest-cost walk between two vertices of `graph`.
///
/// Builds the full all-pairs table; use [`LowestCostWalks`] directly to answer
/// several queries on the same graph.
pub fn lowest_cost_walk<P>(graph: &DirectedGraph<P>, start: &str, end: &str) -> GraphResult<Walk> {
    // Unknown endpoints are reported even when the graph has a negative cycle.
    graph.handle(start)?;
    graph.handle(end)?;
    LowestCostWalks::compute(graph)?.walk(start, end)
}
