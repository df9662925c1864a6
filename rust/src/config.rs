//! Configuration types for the graph algorithms.

use pyo3::prelude::*;

use crate::graph::GraphResult;
use crate::topological::TopoStrategy;

/// Configuration shared by the scheduler and the path algorithms.
#[pyclass]
#[derive(Clone, Debug)]
pub struct AlgorithmConfig {
    /// Verbosity level: 0=silent, 1=results, 2=steps, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Topological sort strategy: "kahn" (predecessor counters) or "dfs"
    #[pyo3(get, set)]
    pub topo_strategy: String,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            topo_strategy: "kahn".to_string(),
        }
    }
}

impl AlgorithmConfig {
    /// Parse `topo_strategy` into a [`TopoStrategy`].
    pub fn strategy(&self) -> GraphResult<TopoStrategy> {
        self.topo_strategy.parse()
    }
}

#[pymethods]
impl AlgorithmConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, topo_strategy=None))]
    fn new(verbosity: Option<u8>, topo_strategy: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            topo_strategy: topo_strategy.unwrap_or(defaults.topo_strategy),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AlgorithmConfig(verbosity={}, topo_strategy={:?})",
            self.verbosity, self.topo_strategy
        )
    }
}
