//! Capability traits shared by base graphs and subgraph views.
//!
//! Insertion is deliberately absent: a base graph creates new elements while
//! a view includes elements that already exist, so each exposes its own
//! inherent `add_*` methods.

use crate::{EdgeFactory, GraphListener, ListenerId};
use sift_core::{Edge, EdgeId, GraphResult, VertexId};
use std::cell::RefCell;
use std::rc::Rc;

/// Read access to a graph.
pub trait GraphRead {
    /// Returns true if the graph contains a vertex equal to `vertex`.
    fn contains_vertex(&self, vertex: VertexId) -> bool;

    /// Returns true if the graph contains an edge equal to `edge`.
    fn contains_edge(&self, edge: EdgeId) -> bool;

    /// Returns true if at least one edge connects `source` to `target`.
    fn contains_edge_between(&self, source: VertexId, target: VertexId) -> bool {
        self.get_edge(source, target).is_some()
    }

    /// All vertices, in iteration order.
    fn vertex_set(&self) -> Vec<VertexId>;

    /// All edges, in iteration order.
    fn edge_set(&self) -> Vec<EdgeId>;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Look up the record of an edge.
    fn edge(&self, edge: EdgeId) -> Option<Edge>;

    fn edge_source(&self, edge: EdgeId) -> Option<VertexId> {
        self.edge(edge).map(|e| e.source)
    }

    fn edge_target(&self, edge: EdgeId) -> Option<VertexId> {
        self.edge(edge).map(|e| e.target)
    }

    /// All edges touching `vertex`, loops included once.
    fn edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>>;

    /// All edges connecting `source` to `target`, or `None` if either vertex
    /// is absent. For undirected graphs the endpoints are interchangeable.
    fn get_all_edges(&self, source: VertexId, target: VertexId) -> Option<Vec<EdgeId>>;

    /// The first edge connecting `source` to `target`.
    fn get_edge(&self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        self.get_all_edges(source, target)
            .and_then(|edges| edges.into_iter().next())
    }

    /// The factory used to create new edges.
    fn edge_factory(&self) -> Rc<dyn EdgeFactory>;

    /// Directed capability, if supported.
    fn as_directed(&self) -> Option<&dyn DirectedGraph> {
        None
    }

    /// Undirected capability, if supported.
    fn as_undirected(&self) -> Option<&dyn UndirectedGraph> {
        None
    }
}

/// Removal of vertices and edges.
pub trait GraphMut: GraphRead {
    /// Remove a vertex together with every edge touching it.
    fn remove_vertex(&mut self, vertex: VertexId) -> bool;

    fn remove_edge(&mut self, edge: EdgeId) -> bool;

    /// Remove the first edge connecting `source` to `target`.
    fn remove_edge_between(&mut self, source: VertexId, target: VertexId) -> Option<EdgeId>;

    /// Remove every listed edge. Returns true if anything was removed.
    fn remove_all_edges(&mut self, edges: &[EdgeId]) -> bool {
        let mut modified = false;
        for &edge in edges {
            modified |= self.remove_edge(edge);
        }
        modified
    }

    /// Remove every edge connecting `source` to `target` and return them.
    fn remove_all_edges_between(
        &mut self,
        source: VertexId,
        target: VertexId,
    ) -> Option<Vec<EdgeId>> {
        let edges = self.get_all_edges(source, target)?;
        self.remove_all_edges(&edges);
        Some(edges)
    }

    /// Remove every listed vertex. Returns true if anything was removed.
    fn remove_all_vertices(&mut self, vertices: &[VertexId]) -> bool {
        let mut modified = false;
        for &vertex in vertices {
            modified |= self.remove_vertex(vertex);
        }
        modified
    }
}

/// Degree and adjacency queries that respect edge direction.
pub trait DirectedGraph {
    fn in_degree_of(&self, vertex: VertexId) -> GraphResult<usize>;

    fn out_degree_of(&self, vertex: VertexId) -> GraphResult<usize>;

    fn incoming_edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>>;

    fn outgoing_edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>>;
}

/// Degree queries for graphs without edge direction.
pub trait UndirectedGraph {
    /// Number of edge ends at `vertex`; a loop counts twice.
    fn degree_of(&self, vertex: VertexId) -> GraphResult<usize>;
}

/// Edge weights.
pub trait WeightedGraph {
    fn edge_weight(&self, edge: EdgeId) -> GraphResult<f64>;

    fn set_edge_weight(&mut self, edge: EdgeId, weight: f64) -> GraphResult<()>;
}

/// A graph that publishes its mutations to registered listeners.
///
/// Listeners are invoked synchronously, after the mutation took effect and
/// in the order mutations happen. Removing a vertex publishes the removal of
/// each incident edge before the removal of the vertex itself.
pub trait ListenableGraph: GraphRead + WeightedGraph {
    fn add_listener(&mut self, listener: Rc<RefCell<dyn GraphListener>>) -> ListenerId;

    /// Unregister a listener. Returns false if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    fn listener_count(&self) -> usize;
}
