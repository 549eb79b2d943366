//! Common error types for SIFT.

use crate::{EdgeId, EntityId, VertexId};
use std::fmt;
use thiserror::Error;

/// A graph capability that an implementation may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Directed,
    Undirected,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Directed => write!(f, "directed"),
            Capability::Undirected => write!(f, "undirected"),
        }
    }
}

/// How a missing edge was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRef {
    /// A specific edge handle.
    Id(EdgeId),
    /// Any edge connecting two vertices.
    Between(VertexId, VertexId),
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeRef::Id(id) => write!(f, "{}", id),
            EdgeRef::Between(source, target) => write!(f, "({},{})", source, target),
        }
    }
}

/// Errors that can occur during graph and subgraph operations.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// Vertex not found in the graph being operated on.
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// Edge not found in the graph being operated on.
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// Self-loops are disabled for this graph.
    #[error("Loops not allowed: {0}")]
    LoopNotAllowed(VertexId),

    /// Vertex insertion into a subgraph whose base lacks the vertex.
    #[error("No such vertex in base graph: {0}")]
    InvalidElement(VertexId),

    /// Edge insertion into a subgraph whose base lacks the edge.
    #[error("No such edge in base graph: {0}")]
    EdgeNotInBase(EdgeRef),

    /// Edge insertion into a subgraph that lacks one of the endpoints.
    #[error("No such vertex in subgraph: {0}")]
    MissingEndpoint(VertexId),

    /// The element is value-equal but not identical to the base's element.
    #[error("Value-equal but not the same instance as in base graph: {0}")]
    IdentityMismatch(EntityId),

    /// The operation needs a capability the graph does not provide.
    #[error("Unsupported capability: graph is not {0}")]
    UnsupportedCapability(Capability),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
