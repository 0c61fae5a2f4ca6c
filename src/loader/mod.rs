//! Building scene graphs from persisted descriptions.
//!
//! A description names its capabilities by key; loading resolves each key
//! against caller-supplied registries while the graph is built. Every key
//! is checked before any node is created, and all misses are reported
//! together, so a load either yields a complete graph or nothing.
//!
//! # Example
//!
//! ```rust
//! use navtrie::core::Capability;
//! use navtrie::loader::{load_str, Registry};
//!
//! let json = r#"{
//!     "root": {
//!         "name": "home",
//!         "checker": "at_home",
//!         "children": {
//!             "terminal": {
//!                 "action": "open_terminal",
//!                 "target": {"name": "terminal", "checker": "at_terminal"}
//!             }
//!         }
//!     }
//! }"#;
//!
//! let actions = Registry::new().with(Capability::constant("open_terminal", true));
//! let checkers = Registry::new()
//!     .with(Capability::constant("at_home", true))
//!     .with(Capability::constant("at_terminal", true));
//!
//! let graph = load_str(json, &actions, &checkers).unwrap();
//! assert_eq!(graph.scene_count(), 2);
//! ```

mod description;
mod error;
mod registry;

pub use description::{EdgeDescription, GraphDescription, NodeDescription};
pub use error::{LoadError, MissingEntry};
pub use registry::{CapabilityKind, Registry};

use crate::core::{Capability, Node, NodeId, SceneGraph};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// Build a graph from `description`, resolving every capability key.
///
/// Fails with [`LoadError::Unresolved`] listing each missing key, or with
/// [`LoadError::Graph`] if the description repeats a scene name.
pub fn load(
    description: &GraphDescription,
    actions: &Registry,
    checkers: &Registry,
) -> Result<SceneGraph, LoadError> {
    check_references(description, actions, checkers)?;
    let graph = build(&description.root, &mut |kind: CapabilityKind, key: &str| {
        let registry = match kind {
            CapabilityKind::Action => actions,
            CapabilityKind::Checker => checkers,
        };
        registry.get(key).cloned().ok_or_else(|| {
            LoadError::Unresolved(vec![MissingEntry {
                kind,
                key: key.to_string(),
            }])
        })
    })?;
    debug!(
        scenes = graph.scene_count(),
        edges = graph.edge_count(),
        "scene graph loaded"
    );
    Ok(graph)
}

/// [`load`] from JSON text in either the bare or `"root"`-wrapped form.
pub fn load_str(
    json: &str,
    actions: &Registry,
    checkers: &Registry,
) -> Result<SceneGraph, LoadError> {
    load(&GraphDescription::from_json_str(json)?, actions, checkers)
}

/// [`load`] from an already parsed JSON value.
pub fn load_value(
    value: Value,
    actions: &Registry,
    checkers: &Registry,
) -> Result<SceneGraph, LoadError> {
    load(&GraphDescription::from_value(value)?, actions, checkers)
}

/// [`load`] from a JSON file on disk.
pub fn load_path(
    path: impl AsRef<Path>,
    actions: &Registry,
    checkers: &Registry,
) -> Result<SceneGraph, LoadError> {
    load(&GraphDescription::from_path(path)?, actions, checkers)
}

/// Build a graph whose capabilities are inert placeholders.
///
/// Each placeholder remembers its key so the graph can be bound later
/// with [`Explorer::rebind`](crate::explorer::Explorer::rebind).
pub fn load_unbound(description: &GraphDescription) -> Result<SceneGraph, LoadError> {
    build(&description.root, &mut |_: CapabilityKind, key: &str| {
        Ok(Capability::placeholder(key))
    })
}

/// Accumulate one failure per missing key, deduplicated, in description order.
pub(crate) fn collect_missing<'a, I>(
    references: I,
    actions: &Registry,
    checkers: &Registry,
) -> Result<(), LoadError>
where
    I: IntoIterator<Item = (CapabilityKind, &'a str)>,
{
    let checks: Vec<Validation<(), NonEmptyVec<MissingEntry>>> = references
        .into_iter()
        .map(|(kind, key)| {
            let registry = match kind {
                CapabilityKind::Action => actions,
                CapabilityKind::Checker => checkers,
            };
            if registry.contains(key) {
                Validation::success(())
            } else {
                Validation::fail(MissingEntry {
                    kind,
                    key: key.to_string(),
                })
            }
        })
        .collect();

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => {
            let mut seen = HashSet::new();
            let missing = errors
                .iter()
                .filter(|entry| seen.insert((*entry).clone()))
                .cloned()
                .collect();
            Err(LoadError::Unresolved(missing))
        }
    }
}

fn check_references(
    description: &GraphDescription,
    actions: &Registry,
    checkers: &Registry,
) -> Result<(), LoadError> {
    let mut references = Vec::new();
    for node in description.nodes() {
        references.push((CapabilityKind::Checker, node.checker.as_str()));
        for edge in node.children.values() {
            references.push((CapabilityKind::Action, edge.action.as_str()));
        }
    }
    collect_missing(references, actions, checkers)
}

type Resolver<'r> = dyn FnMut(CapabilityKind, &str) -> Result<Capability, LoadError> + 'r;

fn build(root: &NodeDescription, resolve: &mut Resolver<'_>) -> Result<SceneGraph, LoadError> {
    let checker = resolve(CapabilityKind::Checker, &root.checker)?;
    let mut graph = SceneGraph::new(scene(root, checker));
    let root_id = graph.root();
    attach_children(&mut graph, root_id, root, resolve)?;
    Ok(graph)
}

fn attach_children(
    graph: &mut SceneGraph,
    parent: NodeId,
    description: &NodeDescription,
    resolve: &mut Resolver<'_>,
) -> Result<(), LoadError> {
    for (key, edge) in &description.children {
        let action = resolve(CapabilityKind::Action, &edge.action)?;
        let checker = resolve(CapabilityKind::Checker, &edge.target.checker)?;
        let node = scene(&edge.target, checker);
        let child = graph.attach_keyed(parent, key.clone(), node, action)?;
        attach_children(graph, child, &edge.target, resolve)?;
    }
    Ok(())
}

fn scene(description: &NodeDescription, checker: Capability) -> Node {
    Node::new(description.name.clone(), checker)
        .with_metadata(description.meta.clone().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"{
        "name": "home",
        "checker": "at_home",
        "children": {
            "terminal": {
                "action": "open_terminal",
                "target": {
                    "name": "terminal",
                    "checker": "at_terminal",
                    "meta": {"zone": "main"},
                    "children": {
                        "story": {
                            "action": "open_story",
                            "target": {"name": "story", "checker": "at_story"}
                        }
                    }
                }
            },
            "base": {
                "action": "open_base",
                "target": {"name": "base", "checker": "at_base"}
            }
        }
    }"#;

    fn actions() -> Registry {
        ["open_terminal", "open_story", "open_base"]
            .into_iter()
            .map(|key| Capability::constant(key, true))
            .collect()
    }

    fn checkers() -> Registry {
        ["at_home", "at_terminal", "at_story", "at_base"]
            .into_iter()
            .map(|key| Capability::constant(key, true))
            .collect()
    }

    #[test]
    fn load_builds_full_tree() {
        let graph = load_str(GRAPH, &actions(), &checkers()).unwrap();

        assert_eq!(graph.scene_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        let story = graph.find("story").unwrap();
        let terminal = graph.find("terminal").unwrap();
        assert_eq!(graph.parent_of(story), Some(terminal));
        assert_eq!(graph.node(story).unwrap().checker().key(), "at_story");
        assert_eq!(
            graph.node(terminal).unwrap().metadata().get("zone"),
            Some(&Value::from("main"))
        );
    }

    #[test]
    fn edge_keys_come_from_description() {
        let json = r#"{
            "name": "home",
            "checker": "at_home",
            "children": {
                "to_shop": {"action": "open_base", "target": {"name": "base", "checker": "at_base"}}
            }
        }"#;
        let graph = load_str(json, &actions(), &checkers()).unwrap();

        let edge = graph.children(graph.root()).next().unwrap();
        assert_eq!(edge.key(), "to_shop");
        assert_eq!(graph.node(edge.target()).unwrap().name(), "base");
    }

    #[test]
    fn missing_action_fails_whole_load() {
        let partial: Registry = ["open_terminal", "open_base"]
            .into_iter()
            .map(|key| Capability::constant(key, true))
            .collect();

        let error = load_str(GRAPH, &partial, &checkers()).unwrap_err();

        assert_eq!(error.missing(), &[MissingEntry::action("open_story")]);
        assert!(error.to_string().contains("open_story"));
    }

    #[test]
    fn all_missing_keys_are_reported_once() {
        let json = r#"{
            "name": "home",
            "checker": "nope",
            "children": {
                "a": {"action": "ghost", "target": {"name": "a", "checker": "nope"}},
                "b": {"action": "ghost", "target": {"name": "b", "checker": "at_base"}}
            }
        }"#;

        let error = load_str(json, &actions(), &checkers()).unwrap_err();

        assert_eq!(
            error.missing(),
            &[MissingEntry::checker("nope"), MissingEntry::action("ghost")]
        );
    }

    #[test]
    fn duplicate_scene_names_are_rejected() {
        let json = r#"{
            "name": "home",
            "checker": "at_home",
            "children": {
                "a": {"action": "open_base", "target": {"name": "base", "checker": "at_base"}},
                "b": {"action": "open_base", "target": {"name": "base", "checker": "at_base"}}
            }
        }"#;

        let error = load_str(json, &actions(), &checkers()).unwrap_err();

        assert!(matches!(error, LoadError::Graph(_)));
    }

    #[test]
    fn unbound_load_uses_placeholders() {
        let description = GraphDescription::from_json_str(GRAPH).unwrap();
        let graph = load_unbound(&description).unwrap();

        let terminal = graph.find("terminal").unwrap();
        let checker = graph.node(terminal).unwrap().checker();
        assert!(checker.is_placeholder());
        assert_eq!(checker.key(), "at_terminal");
        assert!(graph
            .children(graph.root())
            .all(|edge| edge.action().is_placeholder()));
    }

    #[test]
    fn load_path_reports_io_errors() {
        let result = load_path("/definitely/not/here.json", &actions(), &checkers());
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
