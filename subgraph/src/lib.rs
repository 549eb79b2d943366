//! SIFT Subgraph
//!
//! Live filtered views over an observable base graph.
//!
//! A [`Subgraph`] holds a subset of the base's vertices and edges. It never
//! mutates the base's element sets; removals in the base cascade into every
//! open view, and insertions into the view are validated against the
//! base.
//!
//! # Module Structure
//!
//! - `subgraph` - The view and its graph capability implementations
//! - `state` - Vertex/edge membership shared with the change listener
//! - `listener` - Cascades base removals into the view
//! - `integrity` - Rejects value-equal handles that are not the base's own
//! - `config` - View settings

mod config;
mod integrity;
mod listener;
mod state;
mod subgraph;

pub use config::SubgraphConfig;
pub use integrity::IntegrityChecker;
pub use subgraph::Subgraph;
