//! Graph containers and scheduling algorithms: topological ordering, critical
//! path scheduling of activity networks, and lowest-cost walks.
//!
//! The Rust API lives in the submodules; this file also exposes Python
//! bindings for the directed and activity graphs.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod config;
pub mod critical_path;
pub mod graph;
mod interner;
pub mod logging;
pub mod topological;
pub mod walk;

pub use config::AlgorithmConfig;
pub use critical_path::{Activity, ActivityGraph, ActivityTiming, Time};
pub use graph::{
    AnyGraph, Direction, DirectedGraph, Edge, EdgeView, GraphError, GraphKind, GraphResult,
    UndirectedGraph, Weight, DEFAULT_WEIGHT,
};
pub use topological::{
    is_acyclic, topological_order, topological_order_configured, topological_order_dfs,
    topological_order_with, TopoStrategy,
};
pub use walk::{
    highest_cost_path, lowest_cost_walk, lowest_length_backward, lowest_length_forward,
    LowestCostWalks, Walk, INFINITE_COST,
};

fn value_error(e: GraphError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

type PyEdge = (String, String, Weight);

fn owned_edges<'g>(edges: impl IntoIterator<Item = Edge<'g>>) -> Vec<PyEdge> {
    edges.into_iter().map(|e| e.to_owned_parts()).collect()
}

/// Weighted directed graph (PyO3 wrapper).
#[pyclass(name = "DirectedGraph")]
#[derive(Clone, Debug, Default)]
pub struct PyDirectedGraph {
    inner: DirectedGraph,
}

#[pymethods]
impl PyDirectedGraph {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn add_vertex(&mut self, id: String) -> PyResult<()> {
        self.inner.add_vertex(id).map_err(value_error)
    }

    /// Add the vertex unless present. Returns True if it was added.
    fn ensure_vertex(&mut self, id: &str) -> bool {
        self.inner.ensure_vertex(id)
    }

    fn remove_vertex(&mut self, id: &str) -> PyResult<()> {
        self.inner.remove_vertex(id).map(|_| ()).map_err(value_error)
    }

    fn contains_vertex(&self, id: &str) -> bool {
        self.inner.contains_vertex(id)
    }

    fn __contains__(&self, id: &str) -> bool {
        self.inner.contains_vertex(id)
    }

    fn __len__(&self) -> usize {
        self.inner.vertex_count()
    }

    fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[pyo3(signature = (from_id, to_id, weight=1))]
    fn add_edge(&mut self, from_id: &str, to_id: &str, weight: Weight) -> PyResult<()> {
        self.inner
            .add_weighted_edge(from_id, to_id, weight)
            .map_err(value_error)
    }

    /// Add the edge unless present. Returns True if it was added.
    #[pyo3(signature = (from_id, to_id, weight=1))]
    fn ensure_edge(&mut self, from_id: &str, to_id: &str, weight: Weight) -> PyResult<bool> {
        self.inner
            .ensure_edge(from_id, to_id, weight)
            .map_err(value_error)
    }

    /// Remove the edge and return its weight.
    fn remove_edge(&mut self, from_id: &str, to_id: &str) -> PyResult<Weight> {
        self.inner.remove_edge(from_id, to_id).map_err(value_error)
    }

    fn contains_edge(&self, from_id: &str, to_id: &str) -> bool {
        self.inner.contains_edge(from_id, to_id)
    }

    fn edge_weight(&self, from_id: &str, to_id: &str) -> PyResult<Weight> {
        self.inner.edge_weight(from_id, to_id).map_err(value_error)
    }

    /// Replace the weight of an existing edge and return the old one.
    fn set_edge_weight(&mut self, from_id: &str, to_id: &str, weight: Weight) -> PyResult<Weight> {
        self.inner
            .set_edge_weight(from_id, to_id, weight)
            .map_err(value_error)
    }

    fn vertices(&self) -> Vec<String> {
        self.inner.vertices().map(str::to_string).collect()
    }

    fn edges(&self) -> Vec<PyEdge> {
        owned_edges(self.inner.edges())
    }

    fn outbound_edges(&self, id: &str) -> PyResult<Vec<PyEdge>> {
        Ok(owned_edges(self.inner.outbound_edges(id).map_err(value_error)?))
    }

    fn inbound_edges(&self, id: &str) -> PyResult<Vec<PyEdge>> {
        Ok(owned_edges(self.inner.inbound_edges(id).map_err(value_error)?))
    }

    fn adjacent_edges(&self, id: &str) -> PyResult<Vec<PyEdge>> {
        Ok(owned_edges(self.inner.adjacent_edges(id).map_err(value_error)?))
    }

    fn in_degree(&self, id: &str) -> PyResult<usize> {
        self.inner.in_degree(id).map_err(value_error)
    }

    fn out_degree(&self, id: &str) -> PyResult<usize> {
        self.inner.out_degree(id).map_err(value_error)
    }

    /// Topological order of the vertices.
    ///
    /// # Raises
    /// * ValueError if the graph has a cycle or the strategy is unknown
    #[pyo3(signature = (config=None))]
    fn topological_order(&self, config: Option<AlgorithmConfig>) -> PyResult<Vec<String>> {
        let config = config.unwrap_or_default();
        topological_order_configured(&self.inner, &config).map_err(value_error)
    }

    fn is_acyclic(&self) -> bool {
        is_acyclic(&self.inner)
    }

    /// Lowest-cost walk as `(path, cost)`. An unreachable end gives an empty
    /// path.
    ///
    /// # Raises
    /// * ValueError on a negative cost cycle or an unknown vertex
    #[pyo3(signature = (start, end, config=None))]
    fn lowest_cost_walk(
        &self,
        start: &str,
        end: &str,
        config: Option<AlgorithmConfig>,
    ) -> PyResult<(Vec<String>, Weight)> {
        let config = config.unwrap_or_default();
        let walks = LowestCostWalks::compute_with_config(&self.inner, &config).map_err(value_error)?;
        let walk = walks.walk(start, end).map_err(value_error)?;
        Ok((walk.path, walk.cost))
    }

    /// Fewest edges from `start` to `end`, or None if unreachable.
    fn lowest_length_forward(&self, start: &str, end: &str) -> PyResult<Option<usize>> {
        lowest_length_forward(&self.inner, start, end).map_err(value_error)
    }

    fn lowest_length_backward(&self, start: &str, end: &str) -> PyResult<Option<usize>> {
        lowest_length_backward(&self.inner, start, end).map_err(value_error)
    }

    /// Highest-cost path in a DAG as `(path, cost)`, or None if unreachable.
    fn highest_cost_path(&self, start: &str, end: &str) -> PyResult<Option<(Vec<String>, Weight)>> {
        let walk = highest_cost_path(&self.inner, start, end).map_err(value_error)?;
        Ok(walk.map(|w| (w.path, w.cost)))
    }

    fn __repr__(&self) -> String {
        format!(
            "DirectedGraph(vertices={}, edges={})",
            self.inner.vertex_count(),
            self.inner.edge_count()
        )
    }
}

/// Activity network with critical path scheduling (PyO3 wrapper).
#[pyclass(name = "ActivityGraph")]
#[derive(Clone, Debug, Default)]
pub struct PyActivityGraph {
    inner: ActivityGraph,
}

#[pymethods]
impl PyActivityGraph {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<AlgorithmConfig>) -> Self {
        Self {
            inner: ActivityGraph::with_config(config.unwrap_or_default()),
        }
    }

    #[pyo3(signature = (id, duration, name=None))]
    fn add_activity(&mut self, id: String, duration: u32, name: Option<String>) -> PyResult<()> {
        match name {
            Some(name) => self.inner.add_named_activity(id, name, duration),
            None => self.inner.add_activity(id, duration),
        }
        .map_err(value_error)
    }

    fn remove_activity(&mut self, id: &str) -> PyResult<()> {
        self.inner.remove_activity(id).map(|_| ()).map_err(value_error)
    }

    fn set_duration(&mut self, id: &str, duration: u32) -> PyResult<()> {
        self.inner.set_duration(id, duration).map_err(value_error)
    }

    /// `from_id` must finish before `to_id` starts.
    fn add_edge(&mut self, from_id: &str, to_id: &str) -> PyResult<()> {
        self.inner.add_dependency(from_id, to_id).map_err(value_error)
    }

    fn remove_edge(&mut self, from_id: &str, to_id: &str) -> PyResult<()> {
        self.inner
            .remove_edge(from_id, to_id)
            .map(|_| ())
            .map_err(value_error)
    }

    fn contains_activity(&self, id: &str) -> bool {
        self.inner.contains_activity(id)
    }

    fn contains_edge(&self, from_id: &str, to_id: &str) -> bool {
        self.inner.contains_edge(from_id, to_id)
    }

    fn __len__(&self) -> usize {
        self.inner.activity_count()
    }

    fn add_bracketing_activities(&mut self, start: &str, end: &str) -> PyResult<()> {
        self.inner
            .add_bracketing_activities(start, end)
            .map_err(value_error)
    }

    /// Run the forward and backward passes. Returns False if the graph has a
    /// cycle, leaving the previous schedule in place.
    fn compute_schedule(&mut self) -> bool {
        self.inner.compute_schedule()
    }

    fn total_project_time(&self) -> Time {
        self.inner.total_project_time()
    }

    fn critical_activities(&self) -> Vec<String> {
        self.inner.critical_activities()
    }

    fn sorted_order(&self) -> Vec<String> {
        self.inner.sorted_order()
    }

    fn duration(&self, id: &str) -> PyResult<Time> {
        Ok(self.inner.activity(id).map_err(value_error)?.duration())
    }

    fn name(&self, id: &str) -> PyResult<String> {
        Ok(self.inner.activity(id).map_err(value_error)?.name().to_string())
    }

    fn earliest_start(&self, id: &str) -> PyResult<Time> {
        self.inner.earliest_start(id).map_err(value_error)
    }

    fn earliest_end(&self, id: &str) -> PyResult<Time> {
        self.inner.earliest_end(id).map_err(value_error)
    }

    fn latest_start(&self, id: &str) -> PyResult<Time> {
        self.inner.latest_start(id).map_err(value_error)
    }

    fn latest_end(&self, id: &str) -> PyResult<Time> {
        self.inner.latest_end(id).map_err(value_error)
    }

    fn slack(&self, id: &str) -> PyResult<Time> {
        self.inner.slack(id).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "ActivityGraph(activities={}, total_project_time={})",
            self.inner.activity_count(),
            self.inner.total_project_time()
        )
    }
}

/// The cpmgraph.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Graphs
    m.add_class::<PyDirectedGraph>()?;
    m.add_class::<PyActivityGraph>()?;

    // Config types
    m.add_class::<AlgorithmConfig>()?;

    Ok(())
}
