//! Entity structures for SIFT.
//!
//! Vertices carry no data beyond their handle. Edges are records owned by
//! the base graph; views only ever hold their handles.

use crate::{EdgeId, VertexId};

/// Weight assigned to edges created without an explicit weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// An edge between two vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Handle of this edge.
    pub id: EdgeId,
    /// Source vertex (the first endpoint for undirected graphs).
    pub source: VertexId,
    /// Target vertex (the second endpoint for undirected graphs).
    pub target: VertexId,
    /// Edge weight.
    pub weight: f64,
}

impl Edge {
    /// Create a new edge with the default weight.
    pub fn new(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Self::with_weight(id, source, target, DEFAULT_EDGE_WEIGHT)
    }

    /// Create a new edge with the given weight.
    pub fn with_weight(id: EdgeId, source: VertexId, target: VertexId, weight: f64) -> Self {
        Self {
            id,
            source,
            target,
            weight,
        }
    }

    /// Returns true if the edge starts and ends at the same vertex.
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// Returns true if `vertex` is one of the endpoints.
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.source == vertex || self.target == vertex
    }

    /// Get the endpoint opposite to `vertex`, if `vertex` is an endpoint.
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if self.source == vertex {
            Some(self.target)
        } else if self.target == vertex {
            Some(self.source)
        } else {
            None
        }
    }
}
