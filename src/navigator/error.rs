//! Navigator construction errors.

use thiserror::Error;

/// Errors that can occur when building a [`Navigator`](super::Navigator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Scene graph not specified. Call .graph(graph) before .build()")]
    MissingGraph,

    #[error("max_retry must be at least 1")]
    ZeroRetry,
}
