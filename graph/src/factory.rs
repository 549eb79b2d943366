//! Edge factories.

use sift_core::{Edge, EdgeId, VertexId, DEFAULT_EDGE_WEIGHT};
use std::fmt;

/// Builds the record for a newly allocated edge.
pub trait EdgeFactory: fmt::Debug {
    fn create_edge(&self, id: EdgeId, source: VertexId, target: VertexId) -> Edge;
}

/// Creates edges carrying a fixed initial weight.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultEdgeFactory {
    weight: f64,
}

impl Default for DefaultEdgeFactory {
    fn default() -> Self {
        Self {
            weight: DEFAULT_EDGE_WEIGHT,
        }
    }
}

impl DefaultEdgeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(weight: f64) -> Self {
        Self { weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl EdgeFactory for DefaultEdgeFactory {
    fn create_edge(&self, id: EdgeId, source: VertexId, target: VertexId) -> Edge {
        Edge::with_weight(id, source, target, self.weight)
    }
}
