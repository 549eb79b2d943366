//! Graph mutation events and listener registration.

use crate::GraphRead;
use indexmap::IndexMap;
use sift_core::{Edge, EntityId, VertexId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A mutation published by a listenable graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    /// A vertex was added.
    VertexAdded(VertexId),

    /// A vertex was removed. Its incident edges were removed before.
    VertexRemoved(VertexId),

    /// An edge was added.
    EdgeAdded(Edge),

    /// An edge was removed.
    EdgeRemoved(Edge),
}

impl GraphEvent {
    /// Returns true for the two removal events.
    pub fn is_removal(&self) -> bool {
        matches!(self, GraphEvent::VertexRemoved(_) | GraphEvent::EdgeRemoved(_))
    }

    /// The element this event is about.
    pub fn entity(&self) -> EntityId {
        match self {
            GraphEvent::VertexAdded(v) | GraphEvent::VertexRemoved(v) => EntityId::Vertex(*v),
            GraphEvent::EdgeAdded(e) | GraphEvent::EdgeRemoved(e) => EntityId::Edge(e.id),
        }
    }
}

/// Receives mutation events from a listenable graph.
///
/// `graph` is the publishing graph, already reflecting the change. A
/// listener must not try to borrow the publisher through any other path.
pub trait GraphListener {
    fn graph_changed(&mut self, graph: &dyn GraphRead, event: &GraphEvent);

    /// Whether the listener still has anyone to notify. Inactive listeners
    /// are unregistered by the graph on its next mutation.
    fn is_active(&self) -> bool {
        true
    }
}

/// Registration handle returned by `add_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// Listener that records every event it receives.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GraphEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first.
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GraphListener for EventLog {
    fn graph_changed(&mut self, _graph: &dyn GraphRead, event: &GraphEvent) {
        self.events.push(event.clone());
    }
}

/// Ordered set of registered listeners.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: IndexMap<ListenerId, Rc<RefCell<dyn GraphListener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Rc<RefCell<dyn GraphListener>>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, listener);
        id
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Unregister every inactive listener. Returns how many were dropped.
    pub fn retain_active(&mut self) -> usize {
        let before = self.listeners.len();
        self.listeners
            .retain(|_, listener| listener.try_borrow().map_or(true, |l| l.is_active()));
        before - self.listeners.len()
    }

    /// Deliver `event` to every listener in registration order.
    pub fn dispatch(&self, graph: &dyn GraphRead, event: &GraphEvent) {
        for listener in self.listeners.values() {
            listener.borrow_mut().graph_changed(graph, event);
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}
