//! Cascades base graph removals into a subgraph.

use crate::state::SubgraphState;
use sift_graph::{GraphEvent, GraphListener, GraphRead};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Listener a subgraph registers on its base.
///
/// Holds the membership sets weakly: once the subgraph is gone the listener
/// does nothing.
pub(crate) struct BaseGraphListener {
    state: Weak<RefCell<SubgraphState>>,
}

impl BaseGraphListener {
    pub fn new(state: &Rc<RefCell<SubgraphState>>) -> Self {
        Self {
            state: Rc::downgrade(state),
        }
    }
}

impl GraphListener for BaseGraphListener {
    fn graph_changed(&mut self, _graph: &dyn GraphRead, event: &GraphEvent) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();

        match event {
            GraphEvent::VertexRemoved(vertex) => {
                if state.vertices.contains(vertex) {
                    debug!(%vertex, "cascading vertex removal into subgraph");
                    state.remove_vertex(*vertex);
                }
            }
            GraphEvent::EdgeRemoved(edge) => {
                if state.edges.contains(&edge.id) {
                    debug!(edge = %edge.id, "cascading edge removal into subgraph");
                    state.remove_edge(edge.id);
                }
            }
            // Views only ever shrink with their base.
            GraphEvent::VertexAdded(_) | GraphEvent::EdgeAdded(_) => {}
        }
    }

    fn is_active(&self) -> bool {
        self.state.strong_count() > 0
    }
}
