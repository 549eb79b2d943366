//! Observable in-memory graph storage.

use crate::event::ListenerRegistry;
use crate::index::AdjacencyIndex;
use crate::{
    DefaultEdgeFactory, DirectedGraph, EdgeFactory, GraphConfig, GraphEvent, GraphKind,
    GraphListener, GraphMut, GraphRead, ListenableGraph, ListenerId, UndirectedGraph,
    WeightedGraph,
};
use indexmap::{IndexMap, IndexSet};
use sift_core::{Capability, Edge, EdgeId, GraphError, GraphId, GraphResult, VertexId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// ID allocator for vertices and edges.
#[derive(Debug)]
struct IdAllocator {
    graph: GraphId,
    next_vertex_id: u64,
    next_edge_id: u64,
}

impl IdAllocator {
    fn new(graph: GraphId) -> Self {
        Self {
            graph,
            next_vertex_id: 1,
            next_edge_id: 1,
        }
    }

    fn alloc_vertex_id(&mut self) -> VertexId {
        let id = VertexId::new(self.graph, self.next_vertex_id);
        self.next_vertex_id += 1;
        id
    }

    fn alloc_edge_id(&mut self) -> EdgeId {
        let id = EdgeId::new(self.graph, self.next_edge_id);
        self.next_edge_id += 1;
        id
    }
}

/// The observable in-memory graph.
///
/// Owns every vertex and edge record and hands out handles. All mutations
/// are published to registered listeners once they took effect.
#[derive(Debug)]
pub struct Graph {
    /// Identity of this graph, stamped into every handle it issues
    id: GraphId,
    config: GraphConfig,
    /// Vertex storage
    vertices: IndexSet<VertexId>,
    /// Edge storage
    edges: IndexMap<EdgeId, Edge>,
    id_alloc: IdAllocator,
    adjacency: AdjacencyIndex,
    factory: Rc<dyn EdgeFactory>,
    listeners: ListenerRegistry,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new(config: GraphConfig) -> Self {
        Self::with_factory(config, Rc::new(DefaultEdgeFactory::new()))
    }

    /// Create a new empty graph whose edges are built by `factory`.
    pub fn with_factory(config: GraphConfig, factory: Rc<dyn EdgeFactory>) -> Self {
        let id = GraphId::next();
        Self {
            id,
            config,
            vertices: IndexSet::new(),
            edges: IndexMap::new(),
            id_alloc: IdAllocator::new(id),
            adjacency: AdjacencyIndex::new(),
            factory,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphConfig::directed())
    }

    pub fn undirected() -> Self {
        Self::new(GraphConfig::undirected())
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn kind(&self) -> GraphKind {
        self.config.kind
    }

    // ==================== Vertex Operations ====================

    /// Create a new vertex.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.id_alloc.alloc_vertex_id();
        self.vertices.insert(id);
        trace!(graph = %self.id, vertex = %id, "vertex added");
        self.fire(GraphEvent::VertexAdded(id));
        id
    }

    /// Resolve a value-equal handle to the instance stored in this graph.
    fn vertex_instance(&self, vertex: VertexId) -> GraphResult<VertexId> {
        self.vertices
            .get(&vertex)
            .copied()
            .ok_or(GraphError::VertexNotFound(vertex))
    }

    // ==================== Edge Operations ====================

    /// Create a new edge from `source` to `target`.
    ///
    /// Returns `Ok(None)` if multiple edges are disabled and the vertices
    /// are already connected.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> GraphResult<Option<EdgeId>> {
        self.insert_edge(source, target, None)
    }

    /// Create a new edge with an explicit weight.
    pub fn add_weighted_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: f64,
    ) -> GraphResult<Option<EdgeId>> {
        self.insert_edge(source, target, Some(weight))
    }

    fn insert_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: Option<f64>,
    ) -> GraphResult<Option<EdgeId>> {
        let source = self.vertex_instance(source)?;
        let target = self.vertex_instance(target)?;

        if source == target && !self.config.allow_loops {
            return Err(GraphError::LoopNotAllowed(source));
        }
        if !self.config.allow_multiple_edges && self.contains_edge_between(source, target) {
            return Ok(None);
        }

        let id = self.id_alloc.alloc_edge_id();
        let mut edge = self.factory.create_edge(id, source, target);
        if let Some(weight) = weight {
            edge.weight = weight;
        }

        self.adjacency.insert(&edge);
        self.edges.insert(id, edge.clone());
        trace!(graph = %self.id, edge = %id, %source, %target, "edge added");
        self.fire(GraphEvent::EdgeAdded(edge));
        Ok(Some(id))
    }

    /// Does `edge` connect `source` to `target`, honouring direction?
    fn connects(&self, edge: &Edge, source: VertexId, target: VertexId) -> bool {
        match self.config.kind {
            GraphKind::Directed => edge.source == source && edge.target == target,
            GraphKind::Undirected => edge.opposite(source) == Some(target),
        }
    }

    fn require_vertex(&self, vertex: VertexId) -> GraphResult<()> {
        if self.vertices.contains(&vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(vertex))
        }
    }

    fn require_kind(&self, kind: GraphKind) -> GraphResult<()> {
        if self.config.kind == kind {
            return Ok(());
        }
        Err(GraphError::UnsupportedCapability(match kind {
            GraphKind::Directed => Capability::Directed,
            GraphKind::Undirected => Capability::Undirected,
        }))
    }

    /// Publish `event`, dropping listeners that went inactive first.
    fn fire(&mut self, event: GraphEvent) {
        self.prune_listeners();
        if self.listeners.is_empty() {
            return;
        }
        trace!(graph = %self.id, listeners = self.listeners.len(), ?event, "dispatching graph event");
        let this: &Self = self;
        this.listeners.dispatch(this, &event);
    }

    fn prune_listeners(&mut self) {
        let pruned = self.listeners.retain_active();
        if pruned > 0 {
            debug!(graph = %self.id, pruned, "inactive listeners unregistered");
        }
    }
}

impl GraphRead for Graph {
    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    fn vertex_set(&self) -> Vec<VertexId> {
        self.vertices.iter().copied().collect()
    }

    fn edge_set(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge(&self, edge: EdgeId) -> Option<Edge> {
        self.edges.get(&edge).cloned()
    }

    fn edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.require_vertex(vertex)?;
        Ok(self.adjacency.edges_involving(vertex).collect())
    }

    fn get_all_edges(&self, source: VertexId, target: VertexId) -> Option<Vec<EdgeId>> {
        if !self.contains_vertex(source) || !self.contains_vertex(target) {
            return None;
        }
        let edges = self
            .adjacency
            .edges_involving(source)
            .filter(|id| {
                self.edges
                    .get(id)
                    .is_some_and(|edge| self.connects(edge, source, target))
            })
            .collect();
        Some(edges)
    }

    fn edge_factory(&self) -> Rc<dyn EdgeFactory> {
        Rc::clone(&self.factory)
    }

    fn as_directed(&self) -> Option<&dyn DirectedGraph> {
        match self.config.kind {
            GraphKind::Directed => Some(self),
            GraphKind::Undirected => None,
        }
    }

    fn as_undirected(&self) -> Option<&dyn UndirectedGraph> {
        match self.config.kind {
            GraphKind::Directed => None,
            GraphKind::Undirected => Some(self),
        }
    }
}

impl GraphMut for Graph {
    /// Remove a vertex. Incident edges go first, each publishing its own
    /// removal, then the vertex removal is published.
    fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        if !self.vertices.contains(&vertex) {
            return false;
        }

        let incident: Vec<EdgeId> = self.adjacency.edges_involving(vertex).collect();
        for edge in incident {
            self.remove_edge(edge);
        }

        let Some(removed) = self.vertices.shift_take(&vertex) else {
            return false;
        };
        trace!(graph = %self.id, vertex = %removed, "vertex removed");
        self.fire(GraphEvent::VertexRemoved(removed));
        true
    }

    fn remove_edge(&mut self, edge: EdgeId) -> bool {
        let Some(removed) = self.edges.shift_remove(&edge) else {
            return false;
        };
        self.adjacency.remove(&removed);
        trace!(graph = %self.id, edge = %removed.id, "edge removed");
        self.fire(GraphEvent::EdgeRemoved(removed));
        true
    }

    fn remove_edge_between(&mut self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        let edge = self.get_edge(source, target)?;
        self.remove_edge(edge).then_some(edge)
    }
}

impl DirectedGraph for Graph {
    fn in_degree_of(&self, vertex: VertexId) -> GraphResult<usize> {
        self.require_kind(GraphKind::Directed)?;
        self.require_vertex(vertex)?;
        Ok(self.adjacency.in_degree(vertex))
    }

    fn out_degree_of(&self, vertex: VertexId) -> GraphResult<usize> {
        self.require_kind(GraphKind::Directed)?;
        self.require_vertex(vertex)?;
        Ok(self.adjacency.out_degree(vertex))
    }

    fn incoming_edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.require_kind(GraphKind::Directed)?;
        self.require_vertex(vertex)?;
        Ok(self.adjacency.edges_to(vertex).collect())
    }

    fn outgoing_edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.require_kind(GraphKind::Directed)?;
        self.require_vertex(vertex)?;
        Ok(self.adjacency.edges_from(vertex).collect())
    }
}

impl UndirectedGraph for Graph {
    fn degree_of(&self, vertex: VertexId) -> GraphResult<usize> {
        self.require_kind(GraphKind::Undirected)?;
        self.require_vertex(vertex)?;
        let degree = self
            .adjacency
            .edges_involving(vertex)
            .filter_map(|id| self.edges.get(&id))
            .map(|edge| if edge.is_loop() { 2 } else { 1 })
            .sum();
        Ok(degree)
    }
}

impl WeightedGraph for Graph {
    fn edge_weight(&self, edge: EdgeId) -> GraphResult<f64> {
        self.edges
            .get(&edge)
            .map(|e| e.weight)
            .ok_or(GraphError::EdgeNotFound(edge))
    }

    fn set_edge_weight(&mut self, edge: EdgeId, weight: f64) -> GraphResult<()> {
        let record = self
            .edges
            .get_mut(&edge)
            .ok_or(GraphError::EdgeNotFound(edge))?;
        record.weight = weight;
        Ok(())
    }
}

impl ListenableGraph for Graph {
    fn add_listener(&mut self, listener: Rc<RefCell<dyn GraphListener>>) -> ListenerId {
        self.prune_listeners();
        let id = self.listeners.register(listener);
        trace!(graph = %self.id, listener = %id, "listener registered");
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_graph(f, self.config.kind, self.vertices.iter().copied(), self.edges.values())
    }
}

/// Write a graph as `([v1, v2], [(v1,v2)])`. Undirected edges are written
/// as `{v1,v2}`.
pub fn write_graph<'a>(
    f: &mut fmt::Formatter<'_>,
    kind: GraphKind,
    vertices: impl IntoIterator<Item = VertexId>,
    edges: impl IntoIterator<Item = &'a Edge>,
) -> fmt::Result {
    write!(f, "([")?;
    for (i, vertex) in vertices.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", vertex)?;
    }
    write!(f, "], [")?;
    for (i, edge) in edges.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        match kind {
            GraphKind::Directed => write!(f, "({},{})", edge.source, edge.target)?,
            GraphKind::Undirected => write!(f, "{{{},{}}}", edge.source, edge.target)?,
        }
    }
    write!(f, "])")
}
