//! Identity types for SIFT graph elements.
//!
//! Vertices and edges are handles issued by the graph that owns them:
//! - Value equality (`==`, `Hash`, `Ord`) compares the slot index only
//! - Identity (`same_instance`) also compares the owning graph
//!
//! Two graphs can therefore mint handles that are equal by value but refer
//! to different elements. Subgraph integrity checking relies on telling
//! those apart.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocate a fresh, never before issued graph id.
    pub fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Handle to a vertex owned by some graph.
#[derive(Debug, Clone, Copy)]
pub struct VertexId {
    graph: GraphId,
    index: u64,
}

impl VertexId {
    /// Create a handle for slot `index` of `graph`.
    pub fn new(graph: GraphId, index: u64) -> Self {
        Self { graph, index }
    }

    /// The graph that issued this handle.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Get the raw slot index.
    pub fn raw(&self) -> u64 {
        self.index
    }

    /// Returns true if both handles denote the very same vertex, not merely
    /// an equal slot in some other graph.
    pub fn same_instance(&self, other: &VertexId) -> bool {
        self.graph == other.graph && self.index == other.index
    }
}

impl PartialEq for VertexId {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for VertexId {}

impl Hash for VertexId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl PartialOrd for VertexId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.index)
    }
}

/// Handle to an edge owned by some graph.
#[derive(Debug, Clone, Copy)]
pub struct EdgeId {
    graph: GraphId,
    index: u64,
}

impl EdgeId {
    /// Create a handle for slot `index` of `graph`.
    pub fn new(graph: GraphId, index: u64) -> Self {
        Self { graph, index }
    }

    /// The graph that issued this handle.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Get the raw slot index.
    pub fn raw(&self) -> u64 {
        self.index
    }

    /// Returns true if both handles denote the very same edge.
    pub fn same_instance(&self, other: &EdgeId) -> bool {
        self.graph == other.graph && self.index == other.index
    }
}

impl PartialEq for EdgeId {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for EdgeId {}

impl Hash for EdgeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl PartialOrd for EdgeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.index)
    }
}

/// Unified identifier that can refer to either a vertex or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl EntityId {
    /// Returns true if this is a vertex handle.
    pub fn is_vertex(&self) -> bool {
        matches!(self, EntityId::Vertex(_))
    }

    /// Returns true if this is an edge handle.
    pub fn is_edge(&self) -> bool {
        matches!(self, EntityId::Edge(_))
    }

    /// Get as a VertexId if this is a vertex reference.
    pub fn as_vertex(&self) -> Option<VertexId> {
        match self {
            EntityId::Vertex(id) => Some(*id),
            EntityId::Edge(_) => None,
        }
    }

    /// Get as an EdgeId if this is an edge reference.
    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            EntityId::Vertex(_) => None,
            EntityId::Edge(id) => Some(*id),
        }
    }
}

impl From<VertexId> for EntityId {
    fn from(id: VertexId) -> Self {
        EntityId::Vertex(id)
    }
}

impl From<EdgeId> for EntityId {
    fn from(id: EdgeId) -> Self {
        EntityId::Edge(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Vertex(id) => write!(f, "{}", id),
            EntityId::Edge(id) => write!(f, "{}", id),
        }
    }
}
