//! Undirected graph container.
//!
//! Vertices carry identity only. Each unordered pair holds at most one
//! edge; its weight is stored under the pair's smaller handle first.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::interner::{VertexIdInt, VertexInterner};

use super::edge::{Edge, Weight, DEFAULT_WEIGHT};
use super::error::{GraphError, GraphResult};

fn pair(a: VertexIdInt, b: VertexIdInt) -> (VertexIdInt, VertexIdInt) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UndirectedGraph {
    ids: VertexInterner,
    adjacency: Vec<Option<FxHashSet<VertexIdInt>>>,
    weights: FxHashMap<(VertexIdInt, VertexIdInt), Weight>,
}

impl UndirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: impl Into<String>) -> GraphResult<()> {
        let id = id.into();
        if self.ids.get(&id).is_some() {
            return Err(GraphError::DuplicateVertex(id));
        }
        let handle = self.ids.intern(&id) as usize;
        if handle == self.adjacency.len() {
            self.adjacency.push(Some(FxHashSet::default()));
        } else {
            self.adjacency[handle] = Some(FxHashSet::default());
        }
        Ok(())
    }

    /// Add the vertex unless it already exists. Returns whether it was added.
    pub fn ensure_vertex(&mut self, id: &str) -> bool {
        !self.contains_vertex(id) && self.add_vertex(id).is_ok()
    }

    pub fn remove_vertex(&mut self, id: &str) -> GraphResult<()> {
        let handle = self.handle(id)?;
        let neighbors = self.adjacency[handle as usize].take().unwrap_or_default();
        for other in neighbors {
            self.weights.remove(&pair(handle, other));
            if let Some(Some(set)) = self.adjacency.get_mut(other as usize) {
                set.remove(&handle);
            }
        }
        self.ids.release(id);
        Ok(())
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.ids.get(id).is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Vertex ids, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(|(_, id)| id)
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> GraphResult<()> {
        self.add_weighted_edge(a, b, DEFAULT_WEIGHT)
    }

    pub fn add_weighted_edge(&mut self, a: &str, b: &str, weight: Weight) -> GraphResult<()> {
        if !self.ensure_edge(a, b, weight)? {
            return Err(GraphError::duplicate_edge(a, b));
        }
        Ok(())
    }

    /// Add the edge unless it already exists (in either orientation).
    pub fn ensure_edge(&mut self, a: &str, b: &str, weight: Weight) -> GraphResult<bool> {
        let (u, v) = (self.handle(a)?, self.handle(b)?);
        let key = pair(u, v);
        if self.weights.contains_key(&key) {
            return Ok(false);
        }
        for (x, y) in [(u, v), (v, u)] {
            if let Some(Some(set)) = self.adjacency.get_mut(x as usize) {
                set.insert(y);
            }
        }
        self.weights.insert(key, weight);
        Ok(true)
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) -> GraphResult<Weight> {
        let key = self.edge_key(a, b)?;
        let weight = self
            .weights
            .remove(&key)
            .ok_or_else(|| GraphError::edge_not_found(a, b))?;
        let (u, v) = key;
        for (x, y) in [(u, v), (v, u)] {
            if let Some(Some(set)) = self.adjacency.get_mut(x as usize) {
                set.remove(&y);
            }
        }
        Ok(weight)
    }

    /// Order-insensitive edge test.
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.edge_key(a, b).is_ok()
    }

    pub fn edge_weight(&self, a: &str, b: &str) -> GraphResult<Weight> {
        let key = self.edge_key(a, b)?;
        self.weights
            .get(&key)
            .copied()
            .ok_or_else(|| GraphError::edge_not_found(a, b))
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Every edge once, in no particular order and orientation.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.weights.iter().map(move |(&(u, v), &weight)| Edge {
            from: self.name_of(u),
            to: self.name_of(v),
            weight,
        })
    }

    pub fn neighbors(&self, id: &str) -> GraphResult<impl Iterator<Item = &str> + '_> {
        let handle = self.handle(id)?;
        Ok(self
            .adjacency
            .get(handle as usize)
            .and_then(|s| s.as_ref())
            .into_iter()
            .flatten()
            .map(move |&other| self.name_of(other)))
    }

    /// Edges touching `id`, each reported with `id` as its `from` end.
    pub fn adjacent_edges(&self, id: &str) -> GraphResult<Vec<Edge<'_>>> {
        let handle = self.handle(id)?;
        let from = self.name_of(handle);
        Ok(self
            .adjacency
            .get(handle as usize)
            .and_then(|s| s.as_ref())
            .into_iter()
            .flatten()
            .map(|&other| Edge {
                from,
                to: self.name_of(other),
                weight: self
                    .weights
                    .get(&pair(handle, other))
                    .copied()
                    .unwrap_or(DEFAULT_WEIGHT),
            })
            .collect())
    }

    pub fn degree(&self, id: &str) -> GraphResult<usize> {
        let handle = self.handle(id)?;
        Ok(self
            .adjacency
            .get(handle as usize)
            .and_then(|s| s.as_ref())
            .map_or(0, |s| s.len()))
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.adjacency.clear();
        self.weights.clear();
    }

    fn handle(&self, id: &str) -> GraphResult<VertexIdInt> {
        self.ids
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    fn name_of(&self, handle: VertexIdInt) -> &str {
        self.ids.resolve(handle).unwrap_or_default()
    }

    fn edge_key(&self, a: &str, b: &str) -> GraphResult<(VertexIdInt, VertexIdInt)> {
        match (self.ids.get(a), self.ids.get(b)) {
            (Some(u), Some(v)) if self.weights.contains_key(&pair(u, v)) => Ok(pair(u, v)),
            _ => Err(GraphError::edge_not_found(a, b)),
        }
    }
}
