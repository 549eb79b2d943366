//! Configuration for base graphs

/// Whether edges have a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Directed,
    Undirected,
}

/// Structural rules a graph enforces on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Edge direction
    pub kind: GraphKind,
    /// Allow edges whose source equals their target
    pub allow_loops: bool,
    /// Allow several edges between the same pair of vertices
    pub allow_multiple_edges: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            kind: GraphKind::Directed,
            allow_loops: true,
            allow_multiple_edges: true,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        Self::default()
    }

    pub fn undirected() -> Self {
        Self {
            kind: GraphKind::Undirected,
            ..Self::default()
        }
    }

    pub fn with_loops(mut self, allow: bool) -> Self {
        self.allow_loops = allow;
        self
    }

    pub fn with_multiple_edges(mut self, allow: bool) -> Self {
        self.allow_multiple_edges = allow;
        self
    }

    /// A simple graph: no loops, at most one edge per vertex pair.
    pub fn simple(kind: GraphKind) -> Self {
        Self {
            kind,
            allow_loops: false,
            allow_multiple_edges: false,
        }
    }
}
