//! Application-facing navigation entry point.
//!
//! [`Explorer`] pairs a [`Navigator`] with the external collaborator that
//! the registered actions and checkers drive (a device handle, a screen
//! recognizer, ...). The rest of an application only needs
//! [`Explorer::navigate_to`].

use crate::core::{Cancelled, SceneGraph};
use crate::loader::{collect_missing, CapabilityKind, LoadError, Registry};
use crate::navigator::{BuildError, NavigationReport, Navigator, NavigatorConfig};
use tracing::debug;

/// Navigation facade over an external collaborator `C`.
///
/// The explorer keeps the registries it was created with so a graph
/// loaded with placeholders can be bound after the fact.
///
/// # Example
///
/// ```rust
/// use navtrie::core::Capability;
/// use navtrie::explorer::Explorer;
/// use navtrie::loader::{load_unbound, GraphDescription, Registry};
/// use navtrie::navigator::NavigatorConfig;
///
/// let description = GraphDescription::from_json_str(r#"{
///     "name": "home",
///     "checker": "at_home",
///     "children": {
///         "shop": {"action": "open_shop", "target": {"name": "shop", "checker": "at_shop"}}
///     }
/// }"#).unwrap();
///
/// let graph = load_unbound(&description).unwrap();
/// let actions = Registry::new().with(Capability::constant("open_shop", true));
/// let checkers = Registry::new()
///     .with(Capability::constant("at_home", true))
///     .with(Capability::constant("at_shop", true));
///
/// let mut explorer =
///     Explorer::new((), graph, actions, checkers, NavigatorConfig::default()).unwrap();
/// assert_eq!(explorer.navigate_to("shop"), Ok(false));
///
/// explorer.rebind().unwrap();
/// assert_eq!(explorer.navigate_to("shop"), Ok(true));
/// ```
#[derive(Debug)]
pub struct Explorer<C> {
    context: C,
    navigator: Navigator,
    actions: Registry,
    checkers: Registry,
}

impl<C> Explorer<C> {
    pub fn new(
        context: C,
        graph: SceneGraph,
        actions: Registry,
        checkers: Registry,
        config: NavigatorConfig,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            context,
            navigator: Navigator::new(graph, config)?,
            actions,
            checkers,
        })
    }

    /// The external collaborator.
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Navigate to the scene named `target`.
    ///
    /// `Ok(false)` covers both unknown scenes and transitions that never
    /// confirmed; `Err(Cancelled)` means the run was aborted.
    pub fn navigate_to(&self, target: &str) -> Result<bool, Cancelled> {
        self.navigator.navigate_to(target)
    }

    /// Like [`navigate_to`](Self::navigate_to), with the full report.
    pub fn navigate(&self, target: &str) -> Result<NavigationReport, Cancelled> {
        self.navigator.navigate(target)
    }

    /// Replace every placeholder capability with the registry entry of
    /// the same key.
    ///
    /// Capabilities that are already bound are left alone, so calling this
    /// again is a no-op. If any placeholder key is unregistered nothing is
    /// replaced and every missing key is reported.
    pub fn rebind(&mut self) -> Result<(), LoadError> {
        let graph = self.navigator.graph();
        let mut references = Vec::new();
        for id in graph.node_ids() {
            let node = graph.node_at(id);
            if node.checker().is_placeholder() {
                references.push((CapabilityKind::Checker, node.checker().key()));
            }
            for edge in graph.children(id) {
                if edge.action().is_placeholder() {
                    references.push((CapabilityKind::Action, edge.action().key()));
                }
            }
        }
        let pending = references.len();
        collect_missing(references, &self.actions, &self.checkers)?;

        let graph = self.navigator.graph_mut();
        for node in graph.nodes_mut() {
            if node.checker().is_placeholder() {
                if let Some(checker) = self.checkers.get(node.checker().key()) {
                    node.set_checker(checker.clone());
                }
            }
        }
        for edge in graph.edges_mut() {
            if edge.action().is_placeholder() {
                if let Some(action) = self.actions.get(edge.action().key()) {
                    edge.set_action(action.clone());
                }
            }
        }

        debug!(bound = pending, "placeholders rebound");
        Ok(())
    }
}
