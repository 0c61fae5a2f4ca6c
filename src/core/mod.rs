//! Scene graph model and route precomputation.
//!
//! This module contains the static half of navigation:
//! - Capabilities (actions and checkers) and cooperative cancellation
//! - The scene tree, built append-only and immutable afterwards
//! - The path table mapping every scene to its route from the root
//!
//! Nothing here performs navigation; see [`crate::navigator`].

mod cancel;
mod capability;
mod error;
mod graph;
mod path;

pub use cancel::{CancelToken, Cancelled};
pub use capability::{Capability, CapabilityFn};
pub use error::GraphError;
pub use graph::{Edge, EdgeId, Metadata, Node, NodeId, SceneGraph};
pub use path::PathTable;
