//! SIFT Graph
//!
//! This crate provides the observable base graph that subgraph views are
//! derived from:
//! - Capability traits: read, remove, directed, undirected, weighted, listenable
//! - Event channel: vertex/edge added/removed notifications
//! - Edge factory
//! - In-memory graph storage with an adjacency index

mod config;
mod event;
mod factory;
mod graph;
mod index;
mod traits;

pub use config::*;
pub use event::*;
pub use factory::*;
pub use graph::*;
pub use traits::*;
