//! Builder for constructing navigators.

use super::config::NavigatorConfig;
use super::engine::Navigator;
use super::error::BuildError;
use crate::core::SceneGraph;

/// Builder for constructing a [`Navigator`] with a fluent API.
///
/// ```rust
/// use navtrie::core::{Capability, Node, SceneGraph};
/// use navtrie::navigator::NavigatorBuilder;
///
/// let graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
/// let navigator = NavigatorBuilder::new()
///     .graph(graph)
///     .max_retry(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(navigator.config().max_retry, 3);
/// ```
#[derive(Debug, Default)]
pub struct NavigatorBuilder {
    graph: Option<SceneGraph>,
    config: NavigatorConfig,
}

impl NavigatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene graph (required).
    pub fn graph(mut self, graph: SceneGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the attempt budget per edge.
    pub fn max_retry(mut self, max_retry: usize) -> Self {
        self.config.max_retry = max_retry;
        self
    }

    /// Build the navigator.
    /// Returns an error if the graph is missing or the config is invalid.
    pub fn build(self) -> Result<Navigator, BuildError> {
        let graph = self.graph.ok_or(BuildError::MissingGraph)?;
        Navigator::new(graph, self.config)
    }
}
