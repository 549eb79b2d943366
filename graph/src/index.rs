//! Adjacency index for efficient incidence lookups.

use indexmap::IndexSet;
use sift_core::{Edge, EdgeId, VertexId};
use std::collections::HashMap;

/// Adjacency index: VertexId -> { outbound, inbound, all } edge sets.
///
/// Each set keeps edges in insertion order, so lookups report edges in the
/// order they were added to the graph.
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Edges where the vertex is the source
    outbound: HashMap<VertexId, IndexSet<EdgeId>>,
    /// Edges where the vertex is the target
    inbound: HashMap<VertexId, IndexSet<EdgeId>>,
    /// All edges touching the vertex, loops once
    all: HashMap<VertexId, IndexSet<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: &Edge) {
        self.outbound
            .entry(edge.source)
            .or_default()
            .insert(edge.id);
        self.inbound.entry(edge.target).or_default().insert(edge.id);
        self.all.entry(edge.source).or_default().insert(edge.id);
        self.all.entry(edge.target).or_default().insert(edge.id);
    }

    pub fn remove(&mut self, edge: &Edge) {
        Self::remove_from(&mut self.outbound, edge.source, edge.id);
        Self::remove_from(&mut self.inbound, edge.target, edge.id);
        Self::remove_from(&mut self.all, edge.source, edge.id);
        Self::remove_from(&mut self.all, edge.target, edge.id);
    }

    fn remove_from(index: &mut HashMap<VertexId, IndexSet<EdgeId>>, vertex: VertexId, edge: EdgeId) {
        if let Some(set) = index.get_mut(&vertex) {
            set.shift_remove(&edge);
            if set.is_empty() {
                index.remove(&vertex);
            }
        }
    }

    /// Get edges leaving a vertex.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.outbound
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get edges entering a vertex.
    pub fn edges_to(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.inbound
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get all edges involving a vertex.
    pub fn edges_involving(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.all
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outbound.get(&vertex).map_or(0, IndexSet::len)
    }

    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.inbound.get(&vertex).map_or(0, IndexSet::len)
    }
}
