//! Loader error types.

use super::registry::CapabilityKind;
use crate::core::GraphError;
use std::fmt;
use thiserror::Error;

/// A key referenced by a description but absent from its registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingEntry {
    pub kind: CapabilityKind,
    pub key: String,
}

impl MissingEntry {
    pub fn action(key: impl Into<String>) -> Self {
        Self {
            kind: CapabilityKind::Action,
            key: key.into(),
        }
    }

    pub fn checker(key: impl Into<String>) -> Self {
        Self {
            kind: CapabilityKind::Checker,
            key: key.into(),
        }
    }
}

impl fmt::Display for MissingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.key)
    }
}

/// Errors that can occur while turning a description into a graph.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the description failed
    #[error("Failed to read graph description: {0}")]
    Io(#[from] std::io::Error),

    /// The description is not valid JSON or does not have the expected shape
    #[error("Invalid graph description: {0}")]
    Parse(#[from] serde_json::Error),

    /// One or more referenced keys are not registered
    #[error("Missing registry entries: {}", list(.0))]
    Unresolved(Vec<MissingEntry>),

    /// The description does not form a valid scene tree
    #[error("Invalid scene graph: {0}")]
    Graph(#[from] GraphError),
}

impl LoadError {
    /// Keys that failed to resolve; empty for other errors.
    pub fn missing(&self) -> &[MissingEntry] {
        match self {
            Self::Unresolved(missing) => missing.as_slice(),
            _ => &[],
        }
    }
}

fn list(missing: &[MissingEntry]) -> String {
    missing
        .iter()
        .map(MissingEntry::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
