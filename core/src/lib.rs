//! SIFT Core Types
//!
//! This crate provides the foundational types shared by base graphs and
//! their subgraph views:
//! - Identity types (GraphId, VertexId, EdgeId, EntityId)
//! - The edge record (Edge)
//! - Common error types

mod entity;
mod error;
mod id;

pub use entity::*;
pub use error::*;
pub use id::*;
