//! Directed graph with per-vertex payloads.
//!
//! Vertices live in a handle-indexed arena; each slot keeps both its
//! successor and predecessor sets so in/out degree and both edge directions
//! are O(1) to reach. Edge weights are stored once, keyed by handle pair.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::interner::{VertexIdInt, VertexInterner};

use super::edge::{Direction, Edge, EdgeView, Weight, DEFAULT_WEIGHT};
use super::error::{GraphError, GraphResult};

#[derive(Debug, Clone)]
pub(crate) struct VertexSlot<P> {
    pub(crate) payload: P,
    pub(crate) outbound: FxHashSet<VertexIdInt>,
    pub(crate) inbound: FxHashSet<VertexIdInt>,
}

impl<P> VertexSlot<P> {
    fn new(payload: P) -> Self {
        Self {
            payload,
            outbound: FxHashSet::default(),
            inbound: FxHashSet::default(),
        }
    }
}

/// A directed graph keyed by string vertex ids.
///
/// At most one edge exists per ordered pair. Iteration order over vertices
/// and edges is unspecified.
///
/// # Example
///
/// ```
/// use cpmgraph_rust::DirectedGraph;
///
/// let mut graph: DirectedGraph = DirectedGraph::new();
/// graph.add_vertex("a").unwrap();
/// graph.add_vertex("b").unwrap();
/// graph.add_weighted_edge("a", "b", 7).unwrap();
///
/// assert_eq!(graph.edge_weight("a", "b"), Ok(7));
/// assert_eq!(graph.out_degree("a"), Ok(1));
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph<P = ()> {
    ids: VertexInterner,
    slots: Vec<Option<VertexSlot<P>>>,
    weights: FxHashMap<(VertexIdInt, VertexIdInt), Weight>,
}

impl<P> Default for DirectedGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DirectedGraph<P> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            ids: VertexInterner::with_capacity(vertices),
            slots: Vec::with_capacity(vertices),
            weights: FxHashMap::default(),
        }
    }

    // ---- vertices ----

    /// Add a vertex carrying `payload`.
    ///
    /// Fails with `DuplicateVertex` if the id is taken.
    pub fn add_vertex_with(&mut self, id: impl Into<String>, payload: P) -> GraphResult<()> {
        let id = id.into();
        if self.ids.get(&id).is_some() {
            return Err(GraphError::DuplicateVertex(id));
        }
        let handle = self.ids.intern(&id) as usize;
        let slot = Some(VertexSlot::new(payload));
        if handle == self.slots.len() {
            self.slots.push(slot);
        } else {
            self.slots[handle] = slot;
        }
        Ok(())
    }

    /// Remove a vertex and every edge touching it. Returns its payload.
    pub fn remove_vertex(&mut self, id: &str) -> GraphResult<P> {
        let handle = self.handle(id)?;
        let Some(slot) = self.slots[handle as usize].take() else {
            return Err(GraphError::vertex_not_found(id));
        };
        for to in &slot.outbound {
            self.weights.remove(&(handle, *to));
            if let Some(Some(other)) = self.slots.get_mut(*to as usize) {
                other.inbound.remove(&handle);
            }
        }
        for from in &slot.inbound {
            self.weights.remove(&(*from, handle));
            if let Some(Some(other)) = self.slots.get_mut(*from as usize) {
                other.outbound.remove(&handle);
            }
        }
        self.ids.release(id);
        Ok(slot.payload)
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.ids.get(id).is_some()
    }

    /// Payload of a vertex.
    pub fn vertex(&self, id: &str) -> GraphResult<&P> {
        let handle = self.handle(id)?;
        self.payload_of(handle)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    pub fn vertex_mut(&mut self, id: &str) -> GraphResult<&mut P> {
        let handle = self.handle(id)?;
        self.payload_of_mut(handle)
            .ok_or_else(|| GraphError::vertex_not_found(id))
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

    /// Vertex ids with their payloads, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &P)> + '_ {
        self.ids.iter().filter_map(|(handle, id)| {
            self.payload_of(handle).map(|payload| (id, payload))
        })
    }

    pub fn in_degree(&self, id: &str) -> GraphResult<usize> {
        let handle = self.handle(id)?;
        Ok(self.slot(handle).map_or(0, |s| s.inbound.len()))
    }

    pub fn out_degree(&self, id: &str) -> GraphResult<usize> {
        let handle = self.handle(id)?;
        Ok(self.slot(handle).map_or(0, |s| s.outbound.len()))
    }

    /// Ids of the direct successors of `id`.
    pub fn successors(&self, id: &str) -> GraphResult<impl Iterator<Item = &str> + '_> {
        let handle = self.handle(id)?;
        Ok(self
            .successor_handles(handle)
            .map(move |h| self.name_of(h)))
    }

    /// Ids of the direct predecessors of `id`.
    pub fn predecessors(&self, id: &str) -> GraphResult<impl Iterator<Item = &str> + '_> {
        let handle = self.handle(id)?;
        Ok(self
            .predecessor_handles(handle)
            .map(move |h| self.name_of(h)))
    }

    // ---- edges ----

    /// Add an edge with the default weight of 1.
    pub fn add_edge(&mut self, from: &str, to: &str) -> GraphResult<()> {
        self.add_weighted_edge(from, to, DEFAULT_WEIGHT)
    }

    /// Add an edge `from -> to`.
    ///
    /// Fails with `VertexNotFound` if either endpoint is missing and with
    /// `DuplicateEdge` if the ordered pair is already connected. See [`Weight`]
    /// for the range lowest-cost walks accept.
    pub fn add_weighted_edge(&mut self, from: &str, to: &str, weight: Weight) -> GraphResult<()> {
        let (u, v) = self.endpoints(from, to)?;
        if self.weights.contains_key(&(u, v)) {
            return Err(GraphError::duplicate_edge(from, to));
        }
        self.link(u, v, weight);
        Ok(())
    }

    /// Add the edge unless it already exists. An existing edge keeps its
    /// weight. Returns whether an edge was created.
    pub fn ensure_edge(&mut self, from: &str, to: &str, weight: Weight) -> GraphResult<bool> {
        let (u, v) = self.endpoints(from, to)?;
        if self.weights.contains_key(&(u, v)) {
            return Ok(false);
        }
        self.link(u, v, weight);
        Ok(true)
    }

    /// Remove the edge `from -> to`, returning its weight.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> GraphResult<Weight> {
        let (u, v) = self.edge_handles(from, to)?;
        let weight = self
            .weights
            .remove(&(u, v))
            .ok_or_else(|| GraphError::edge_not_found(from, to))?;
        if let Some(Some(slot)) = self.slots.get_mut(u as usize) {
            slot.outbound.remove(&v);
        }
        if let Some(Some(slot)) = self.slots.get_mut(v as usize) {
            slot.inbound.remove(&u);
        }
        Ok(weight)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edge_handles(from, to).is_ok()
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> GraphResult<Weight> {
        let (u, v) = self.edge_handles(from, to)?;
        self.weight_of(u, v)
            .ok_or_else(|| GraphError::edge_not_found(from, to))
    }

    /// Overwrite the weight of an existing edge, returning the old one.
    pub fn set_edge_weight(&mut self, from: &str, to: &str, weight: Weight) -> GraphResult<Weight> {
        let (u, v) = self.edge_handles(from, to)?;
        self.weights
            .insert((u, v), weight)
            .ok_or_else(|| GraphError::edge_not_found(from, to))
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Every edge in the graph, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.weights.iter().map(move |(&(u, v), &weight)| Edge {
            from: self.name_of(u),
            to: self.name_of(v),
            weight,
        })
    }

    pub fn outbound_edges(&self, id: &str) -> GraphResult<EdgeView<'_, P>> {
        self.edge_view(id, Direction::Outbound)
    }

    pub fn inbound_edges(&self, id: &str) -> GraphResult<EdgeView<'_, P>> {
        self.edge_view(id, Direction::Inbound)
    }

    /// Outbound then inbound edges of `id`.
    pub fn adjacent_edges(&self, id: &str) -> GraphResult<EdgeView<'_, P>> {
        self.edge_view(id, Direction::Both)
    }

    pub fn edge_view(&self, id: &str, direction: Direction) -> GraphResult<EdgeView<'_, P>> {
        let handle = self.handle(id)?;
        Ok(EdgeView::new(self, handle, direction))
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.slots.clear();
        self.weights.clear();
    }

    /// Map every payload to a new type, keeping the structure.
    pub fn map_payloads<Q>(&self, mut f: impl FnMut(&str, &P) -> Q) -> DirectedGraph<Q> {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(handle, slot)| {
                slot.as_ref().map(|s| VertexSlot {
                    payload: f(self.name_of(handle as VertexIdInt), &s.payload),
                    outbound: s.outbound.clone(),
                    inbound: s.inbound.clone(),
                })
            })
            .collect();
        DirectedGraph {
            ids: self.ids.clone(),
            slots,
            weights: self.weights.clone(),
        }
    }

    // ---- handle-level access for the algorithms ----

    /// Handle of a vertex id.
    pub(crate) fn handle(&self, id: &str) -> GraphResult<VertexIdInt> {
        self.ids
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Live handles, in arena order.
    pub(crate) fn handles(&self) -> impl Iterator<Item = VertexIdInt> + '_ {
        self.ids.iter().map(|(handle, _)| handle)
    }

    /// Exclusive upper bound of live handles, for sizing handle-indexed vectors.
    pub(crate) fn handle_bound(&self) -> usize {
        self.ids.bound()
    }

    pub(crate) fn name_of(&self, handle: VertexIdInt) -> &str {
        self.ids.resolve(handle).unwrap_or_default()
    }

    pub(crate) fn slot(&self, handle: VertexIdInt) -> Option<&VertexSlot<P>> {
        self.slots.get(handle as usize).and_then(|s| s.as_ref())
    }

    pub(crate) fn payload_of(&self, handle: VertexIdInt) -> Option<&P> {
        self.slot(handle).map(|s| &s.payload)
    }

    pub(crate) fn payload_of_mut(&mut self, handle: VertexIdInt) -> Option<&mut P> {
        self.slots
            .get_mut(handle as usize)
            .and_then(|s| s.as_mut())
            .map(|s| &mut s.payload)
    }

    pub(crate) fn successor_handles(
        &self,
        handle: VertexIdInt,
    ) -> impl Iterator<Item = VertexIdInt> + '_ {
        self.slot(handle)
            .into_iter()
            .flat_map(|s| s.outbound.iter().copied())
    }

    pub(crate) fn predecessor_handles(
        &self,
        handle: VertexIdInt,
    ) -> impl Iterator<Item = VertexIdInt> + '_ {
        self.slot(handle)
            .into_iter()
            .flat_map(|s| s.inbound.iter().copied())
    }

    pub(crate) fn in_degree_of(&self, handle: VertexIdInt) -> usize {
        self.slot(handle).map_or(0, |s| s.inbound.len())
    }

    pub(crate) fn out_degree_of(&self, handle: VertexIdInt) -> usize {
        self.slot(handle).map_or(0, |s| s.outbound.len())
    }

    pub(crate) fn weight_of(&self, from: VertexIdInt, to: VertexIdInt) -> Option<Weight> {
        self.weights.get(&(from, to)).copied()
    }

    pub(crate) fn edge_at(&self, from: VertexIdInt, to: VertexIdInt) -> Edge<'_> {
        Edge {
            from: self.name_of(from),
            to: self.name_of(to),
            weight: self.weight_of(from, to).unwrap_or(DEFAULT_WEIGHT),
        }
    }

    fn endpoints(&self, from: &str, to: &str) -> GraphResult<(VertexIdInt, VertexIdInt)> {
        Ok((self.handle(from)?, self.handle(to)?))
    }

    /// Handles of an existing edge, `EdgeNotFound` if either end or the edge is absent.
    fn edge_handles(&self, from: &str, to: &str) -> GraphResult<(VertexIdInt, VertexIdInt)> {
        match (self.ids.get(from), self.ids.get(to)) {
            (Some(u), Some(v)) if self.weights.contains_key(&(u, v)) => Ok((u, v)),
            _ => Err(GraphError::edge_not_found(from, to)),
        }
    }

    fn link(&mut self, u: VertexIdInt, v: VertexIdInt, weight: Weight) {
        if let Some(Some(slot)) = self.slots.get_mut(u as usize) {
            slot.outbound.insert(v);
        }
        if let Some(Some(slot)) = self.slots.get_mut(v as usize) {
            slot.inbound.insert(u);
        }
        self.weights.insert((u, v), weight);
    }
}

impl<P: Default> DirectedGraph<P> {
    /// Add a vertex with a default payload.
    pub fn add_vertex(&mut self, id: impl Into<String>) -> GraphResult<()> {
        self.add_vertex_with(id, P::default())
    }

    /// Add the vertex unless it already exists. Returns whether it was added.
    pub fn ensure_vertex(&mut self, id: &str) -> bool {
        if self.contains_vertex(id) {
            return false;
        }
        self.add_vertex_with(id, P::default()).is_ok()
    }
}
