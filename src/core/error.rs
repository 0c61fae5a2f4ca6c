//! Graph construction errors.

use thiserror::Error;

/// Errors raised while attaching scenes to a [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Node #{0} does not belong to this graph")]
    UnknownNode(usize),

    #[error("Scene '{0}' is already part of the graph")]
    DuplicateScene(String),

    #[error("Scene '{parent}' already has an edge keyed '{key}'")]
    DuplicateEdgeKey { parent: String, key: String },
}
