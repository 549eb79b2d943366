//! The subgraph view.

use crate::integrity::IntegrityChecker;
use crate::listener::BaseGraphListener;
use crate::state::SubgraphState;
use crate::SubgraphConfig;
use indexmap::IndexSet;
use sift_core::{Capability, Edge, EdgeId, EdgeRef, GraphError, GraphResult, VertexId};
use sift_graph::{
    write_graph, DirectedGraph, EdgeFactory, GraphKind, GraphListener, GraphMut, GraphRead,
    ListenableGraph, ListenerId, UndirectedGraph, WeightedGraph,
};
use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// A live window on a base graph.
///
/// A subgraph holds a subset of the base's vertices and a subset of its
/// edges, and every held edge has both endpoints held as well. The base is
/// never modified through the view apart from edge weights, which live on
/// the shared edge records.
///
/// Removing a vertex or an edge from the base removes it from every live
/// subgraph that holds it, synchronously. Additions to the base leave
/// subgraphs untouched. Elements can be added to the view as long as the
/// base contains them.
///
/// The base and its views are single-threaded: one logical mutator at a time.
/// Holding the borrow returned by [`Subgraph::vertices`] or
/// [`Subgraph::edges`] across a base mutation panics.
pub struct Subgraph<G: ListenableGraph> {
    base: Rc<RefCell<G>>,
    state: Rc<RefCell<SubgraphState>>,
    /// Registration on the base, taken on drop
    listener: Option<ListenerId>,
    config: SubgraphConfig,
}

impl<G: ListenableGraph> Subgraph<G> {
    /// Create a subgraph of `base`.
    ///
    /// `vertex_filter` selects the vertices to include; `None` includes all.
    /// `edge_filter` selects among the edges whose endpoints were both
    /// included; `None` includes all of them.
    pub fn new(
        base: Rc<RefCell<G>>,
        vertex_filter: Option<&HashSet<VertexId>>,
        edge_filter: Option<&HashSet<EdgeId>>,
    ) -> Self {
        Self::with_config(base, vertex_filter, edge_filter, SubgraphConfig::default())
    }

    /// Create a subgraph with explicit settings.
    pub fn with_config(
        base: Rc<RefCell<G>>,
        vertex_filter: Option<&HashSet<VertexId>>,
        edge_filter: Option<&HashSet<EdgeId>>,
        config: SubgraphConfig,
    ) -> Self {
        let state = Rc::new(RefCell::new(SubgraphState::default()));

        // Subscribe before reading the base so no removal is missed.
        let listener: Rc<RefCell<dyn GraphListener>> =
            Rc::new(RefCell::new(BaseGraphListener::new(&state)));
        let listener_id = base.borrow_mut().add_listener(listener);

        {
            let graph = base.borrow();
            let mut members = state.borrow_mut();
            members.include_vertices(&*graph, vertex_filter);
            members.include_edges(&*graph, edge_filter);
            debug!(
                listener = %listener_id,
                vertices = members.vertices.len(),
                edges = members.edges.len(),
                "subgraph created"
            );
        }

        Self {
            base,
            state,
            listener: Some(listener_id),
            config,
        }
    }

    /// The graph this view is based on.
    pub fn base(&self) -> &Rc<RefCell<G>> {
        &self.base
    }

    pub fn config(&self) -> &SubgraphConfig {
        &self.config
    }

    /// Whether insertions are checked for identity with the base's elements.
    pub fn verify_integrity(&self) -> bool {
        self.config.verify_integrity
    }

    /// Toggle identity checking. When off, callers must only pass the base's
    /// own handles, otherwise the view may hold elements the base does not.
    pub fn set_verify_integrity(&mut self, verify: bool) {
        self.config.verify_integrity = verify;
    }

    /// Close the view and unregister it from the base.
    ///
    /// Unlike dropping, this panics if the base is borrowed. Returns whether
    /// the registration was still present.
    pub fn detach(mut self) -> bool {
        let Some(id) = self.listener.take() else {
            return false;
        };
        let removed = self.base.borrow_mut().remove_listener(id);
        debug!(listener = %id, "subgraph detached");
        removed
    }

    /// Read-only view of the vertex set.
    pub fn vertices(&self) -> Ref<'_, IndexSet<VertexId>> {
        Ref::map(self.state.borrow(), |state| &state.vertices)
    }

    /// Read-only view of the edge set.
    pub fn edges(&self) -> Ref<'_, IndexSet<EdgeId>> {
        Ref::map(self.state.borrow(), |state| &state.edges)
    }

    // ==================== Insertion ====================

    /// Add a vertex of the base to this view.
    ///
    /// Returns `Ok(false)` if the view already holds it.
    pub fn add_vertex(&mut self, vertex: VertexId) -> GraphResult<bool> {
        let base = self.base.borrow();
        if !base.contains_vertex(vertex) {
            return Err(GraphError::InvalidElement(vertex));
        }
        if self.config.verify_integrity {
            IntegrityChecker::new(&*base).check_vertex(vertex)?;
        }
        Ok(self.state.borrow_mut().vertices.insert(vertex))
    }

    /// Add the first base edge between `source` and `target` that the view
    /// does not hold yet. Returns `Ok(None)` if the view holds all of them.
    pub fn add_edge_between(
        &mut self,
        source: VertexId,
        target: VertexId,
    ) -> GraphResult<Option<EdgeId>> {
        self.require_endpoint(source)?;
        self.require_endpoint(target)?;

        let base = self.base.borrow();
        let candidates = base
            .get_all_edges(source, target)
            .filter(|edges| !edges.is_empty())
            .ok_or(GraphError::EdgeNotInBase(EdgeRef::Between(source, target)))?;

        let mut state = self.state.borrow_mut();
        for edge in candidates {
            if state.edges.contains(&edge) {
                continue;
            }
            if let Some(record) = base.edge(edge) {
                state.insert_edge(&record);
                return Ok(Some(edge));
            }
        }
        Ok(None)
    }

    /// Add an edge of the base to this view.
    ///
    /// Both endpoints must already be in the view. Returns `Ok(false)` if the
    /// view already holds the edge.
    pub fn add_edge(&mut self, edge: EdgeId) -> GraphResult<bool> {
        let base = self.base.borrow();
        let record = base
            .edge(edge)
            .ok_or(GraphError::EdgeNotInBase(EdgeRef::Id(edge)))?;

        self.require_endpoint(record.source)?;
        self.require_endpoint(record.target)?;
        if self.config.verify_integrity {
            IntegrityChecker::new(&*base).check_edge(edge, record.source, record.target)?;
        }
        Ok(self.state.borrow_mut().insert_edge(&record))
    }

    /// Like [`Subgraph::add_edge_between`], then set the weight of the added
    /// edge. Nothing is written when no edge was added.
    pub fn add_weighted_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: f64,
    ) -> GraphResult<Option<EdgeId>> {
        let added = self.add_edge_between(source, target)?;
        if let Some(edge) = added {
            self.base.borrow_mut().set_edge_weight(edge, weight)?;
        }
        Ok(added)
    }

    // ==================== Helpers ====================

    fn require_endpoint(&self, vertex: VertexId) -> GraphResult<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::MissingEndpoint(vertex))
        }
    }

    fn require_vertex(&self, vertex: VertexId) -> GraphResult<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(vertex))
        }
    }

    fn require_edge(&self, edge: EdgeId) -> GraphResult<()> {
        if self.contains_edge(edge) {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound(edge))
        }
    }

    /// Keep only the edges this view holds, preserving order.
    fn retain_visible(&self, edges: Vec<EdgeId>) -> Vec<EdgeId> {
        let state = self.state.borrow();
        edges
            .into_iter()
            .filter(|edge| state.edges.contains(edge))
            .collect()
    }

    /// Run a directed query on the base and filter the result to this view.
    fn directed_query(
        &self,
        vertex: VertexId,
        query: impl FnOnce(&dyn DirectedGraph, VertexId) -> GraphResult<Vec<EdgeId>>,
    ) -> GraphResult<Vec<EdgeId>> {
        let base = self.base.borrow();
        let directed = base
            .as_directed()
            .ok_or(GraphError::UnsupportedCapability(Capability::Directed))?;
        self.require_vertex(vertex)?;
        let edges = query(directed, vertex)?;
        Ok(self.retain_visible(edges))
    }
}

impl<G: ListenableGraph> GraphRead for Subgraph<G> {
    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.state.borrow().vertices.contains(&vertex)
    }

    fn contains_edge(&self, edge: EdgeId) -> bool {
        self.state.borrow().edges.contains(&edge)
    }

    fn vertex_set(&self) -> Vec<VertexId> {
        self.state.borrow().vertices.iter().copied().collect()
    }

    fn edge_set(&self) -> Vec<EdgeId> {
        self.state.borrow().edges.iter().copied().collect()
    }

    fn vertex_count(&self) -> usize {
        self.state.borrow().vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.state.borrow().edges.len()
    }

    fn edge(&self, edge: EdgeId) -> Option<Edge> {
        if !self.contains_edge(edge) {
            return None;
        }
        self.base.borrow().edge(edge)
    }

    fn edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.require_vertex(vertex)?;
        let edges = self.base.borrow().edges_of(vertex)?;
        Ok(self.retain_visible(edges))
    }

    fn get_all_edges(&self, source: VertexId, target: VertexId) -> Option<Vec<EdgeId>> {
        if !self.contains_vertex(source) || !self.contains_vertex(target) {
            return None;
        }
        let edges = self.base.borrow().get_all_edges(source, target)?;
        Some(self.retain_visible(edges))
    }

    fn edge_factory(&self) -> Rc<dyn EdgeFactory> {
        self.base.borrow().edge_factory()
    }

    fn as_directed(&self) -> Option<&dyn DirectedGraph> {
        if self.base.borrow().as_directed().is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn as_undirected(&self) -> Option<&dyn UndirectedGraph> {
        if self.base.borrow().as_undirected().is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl<G: ListenableGraph> GraphMut for Subgraph<G> {
    /// Remove a vertex from the view, along with the view's edges touching
    /// it. The base is left as is.
    fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        self.state.borrow_mut().remove_vertex(vertex)
    }

    fn remove_edge(&mut self, edge: EdgeId) -> bool {
        self.state.borrow_mut().remove_edge(edge)
    }

    fn remove_edge_between(&mut self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        let edge = self.get_edge(source, target)?;
        self.remove_edge(edge).then_some(edge)
    }
}

/// Degree and adjacency queries count only the edges the view holds.
impl<G: ListenableGraph> DirectedGraph for Subgraph<G> {
    fn in_degree_of(&self, vertex: VertexId) -> GraphResult<usize> {
        Ok(self.incoming_edges_of(vertex)?.len())
    }

    fn out_degree_of(&self, vertex: VertexId) -> GraphResult<usize> {
        Ok(self.outgoing_edges_of(vertex)?.len())
    }

    fn incoming_edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.directed_query(vertex, |graph, v| graph.incoming_edges_of(v))
    }

    fn outgoing_edges_of(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.directed_query(vertex, |graph, v| graph.outgoing_edges_of(v))
    }
}

impl<G: ListenableGraph> UndirectedGraph for Subgraph<G> {
    fn degree_of(&self, vertex: VertexId) -> GraphResult<usize> {
        let base = self.base.borrow();
        if base.as_undirected().is_none() {
            return Err(GraphError::UnsupportedCapability(Capability::Undirected));
        }
        self.require_vertex(vertex)?;

        let state = self.state.borrow();
        let degree = base
            .edges_of(vertex)?
            .into_iter()
            .filter(|edge| state.edges.contains(edge))
            .filter_map(|edge| base.edge(edge))
            .map(|edge| if edge.is_loop() { 2 } else { 1 })
            .sum();
        Ok(degree)
    }
}

impl<G: ListenableGraph> WeightedGraph for Subgraph<G> {
    fn edge_weight(&self, edge: EdgeId) -> GraphResult<f64> {
        self.require_edge(edge)?;
        self.base.borrow().edge_weight(edge)
    }

    /// Set the weight on the edge record shared with the base.
    fn set_edge_weight(&mut self, edge: EdgeId, weight: f64) -> GraphResult<()> {
        self.require_edge(edge)?;
        self.base.borrow_mut().set_edge_weight(edge, weight)
    }
}

impl<G: ListenableGraph> Drop for Subgraph<G> {
    fn drop(&mut self) {
        // Skipped while the base is borrowed; the dead listener is then
        // pruned on the base's next mutation.
        if let Some(id) = self.listener.take() {
            if let Ok(mut base) = self.base.try_borrow_mut() {
                base.remove_listener(id);
            }
        }
    }
}

impl<G: ListenableGraph> fmt::Display for Subgraph<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.base.borrow();
        let state = self.state.borrow();
        let kind = if base.as_directed().is_some() {
            GraphKind::Directed
        } else {
            GraphKind::Undirected
        };
        let edges: Vec<Edge> = state.edges.iter().filter_map(|e| base.edge(*e)).collect();
        write_graph(f, kind, state.vertices.iter().copied(), &edges)
    }
}

impl<G: ListenableGraph> fmt::Debug for Subgraph<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Subgraph")
            .field("vertices", &state.vertices)
            .field("edges", &state.edges)
            .field("listener", &self.listener)
            .field("config", &self.config)
            .finish()
    }
}
