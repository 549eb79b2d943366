//! Membership sets of a subgraph.

use indexmap::IndexSet;
use sift_core::{Edge, EdgeId, VertexId};
use sift_graph::GraphRead;
use std::collections::{HashMap, HashSet};

/// The vertices and edges a subgraph holds.
///
/// Shared between the subgraph and the listener registered on its base.
/// Each held edge keeps its endpoints, so removing a vertex never needs the
/// base to find the edges touching it.
#[derive(Debug, Default)]
pub(crate) struct SubgraphState {
    pub vertices: IndexSet<VertexId>,
    pub edges: IndexSet<EdgeId>,
    endpoints: HashMap<EdgeId, (VertexId, VertexId)>,
}

impl SubgraphState {
    /// Include every base vertex the filter admits (all when unfiltered).
    pub fn include_vertices(&mut self, base: &dyn GraphRead, filter: Option<&HashSet<VertexId>>) {
        for vertex in base.vertex_set() {
            if filter.map_or(true, |f| f.contains(&vertex)) {
                self.vertices.insert(vertex);
            }
        }
    }

    /// Include every base edge whose endpoints are already included and which
    /// the filter admits. An edge listed in the filter is still dropped when
    /// one of its endpoints is missing.
    pub fn include_edges(&mut self, base: &dyn GraphRead, filter: Option<&HashSet<EdgeId>>) {
        for id in base.edge_set() {
            let Some(edge) = base.edge(id) else {
                continue;
            };
            let has_endpoints =
                self.vertices.contains(&edge.source) && self.vertices.contains(&edge.target);
            if has_endpoints && filter.map_or(true, |f| f.contains(&id)) {
                self.insert_edge(&edge);
            }
        }
    }

    /// Hold `edge`. Returns false if it was already held.
    pub fn insert_edge(&mut self, edge: &Edge) -> bool {
        if !self.edges.insert(edge.id) {
            return false;
        }
        self.endpoints.insert(edge.id, (edge.source, edge.target));
        true
    }

    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        self.endpoints.remove(&edge);
        self.edges.shift_remove(&edge)
    }

    /// Remove a vertex together with every held edge touching it.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        let endpoints = &mut self.endpoints;
        self.edges.retain(|edge| {
            let touches = endpoints
                .get(edge)
                .is_some_and(|&(source, target)| source == vertex || target == vertex);
            if touches {
                endpoints.remove(edge);
            }
            !touches
        });
        self.vertices.shift_remove(&vertex)
    }
}
