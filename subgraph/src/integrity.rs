//! Identity checks for elements inserted into a subgraph.
//!
//! Base membership is decided by value: a handle minted by another graph for
//! the same slot is "contained". The checker catches that case by finding
//! the base's value-equal element and comparing identities.

use sift_core::{EdgeId, EntityId, GraphError, GraphResult, VertexId};
use sift_graph::GraphRead;

/// Verifies that handles are the base graph's own instances.
pub struct IntegrityChecker<'g> {
    base: &'g dyn GraphRead,
}

impl<'g> IntegrityChecker<'g> {
    pub fn new(base: &'g dyn GraphRead) -> Self {
        Self { base }
    }

    /// Scan the base vertices for one equal to `vertex`. Fails if that
    /// element is not the same instance. Succeeds when nothing equal exists;
    /// membership is the caller's concern.
    pub fn check_vertex(&self, vertex: VertexId) -> GraphResult<()> {
        match self.base.vertex_set().into_iter().find(|v| *v == vertex) {
            Some(found) if !found.same_instance(&vertex) => {
                Err(GraphError::IdentityMismatch(EntityId::Vertex(vertex)))
            }
            _ => Ok(()),
        }
    }

    /// Scan the base edges between `source` and `target` for one equal to
    /// `edge`, with the same contract as [`IntegrityChecker::check_vertex`].
    pub fn check_edge(&self, edge: EdgeId, source: VertexId, target: VertexId) -> GraphResult<()> {
        let candidates = self.base.get_all_edges(source, target).unwrap_or_default();
        match candidates.into_iter().find(|e| *e == edge) {
            Some(found) if !found.same_instance(&edge) => {
                Err(GraphError::IdentityMismatch(EntityId::Edge(edge)))
            }
            _ => Ok(()),
        }
    }
}
