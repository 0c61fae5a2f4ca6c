//! Persisted form of a scene graph.

use super::error::LoadError;
use crate::core::Metadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A scene as written on disk. Capabilities are referenced by registry key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    pub checker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, EdgeDescription>,
}

/// An outgoing edge as written on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub action: String,
    pub target: NodeDescription,
}

/// A whole graph description.
///
/// On disk the root node may appear bare or wrapped as `{"root": {...}}`;
/// both parse to the same value.
///
/// Text is parsed with `serde_json`'s default nesting limit of 128. Each
/// scene spends three levels (node, `children`, edge), so descriptions
/// deeper than about 40 scenes below the root are rejected with
/// [`LoadError::Parse`]. Build such graphs with the
/// [`SceneGraph`](crate::core::SceneGraph) API instead.
///
/// ```rust
/// use navtrie::loader::GraphDescription;
///
/// let bare = GraphDescription::from_json_str(r#"{"name": "home", "checker": "at_home"}"#).unwrap();
/// let wrapped = GraphDescription::from_json_str(
///     r#"{"root": {"name": "home", "checker": "at_home"}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(bare, wrapped);
/// assert_eq!(bare.root.name, "home");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub root: NodeDescription,
}

impl GraphDescription {
    pub fn from_value(mut value: Value) -> Result<Self, LoadError> {
        let wrapped = value.as_object_mut().and_then(|object| object.remove("root"));
        let root = wrapped.unwrap_or(value);
        Ok(Self {
            root: serde_json::from_value(root)?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Every scene in the description, depth-first.
    pub fn nodes(&self) -> Vec<&NodeDescription> {
        let mut nodes = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.values().rev().map(|edge| &edge.target));
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"{
        "root": {
            "name": "home",
            "checker": "at_home",
            "meta": {"kind": "hub"},
            "children": {
                "terminal": {
                    "action": "open_terminal",
                    "target": {
                        "name": "terminal",
                        "checker": "at_terminal",
                        "children": {
                            "main_story": {
                                "action": "open_story",
                                "target": {"name": "story", "checker": "at_story"}
                            }
                        }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn parses_nested_description() {
        let description = GraphDescription::from_json_str(NESTED).unwrap();

        assert_eq!(description.root.name, "home");
        assert_eq!(description.root.checker, "at_home");
        assert_eq!(
            description.root.meta.as_ref().unwrap().get("kind"),
            Some(&Value::from("hub"))
        );

        let terminal = &description.root.children["terminal"];
        assert_eq!(terminal.action, "open_terminal");
        assert_eq!(terminal.target.children["main_story"].target.name, "story");
    }

    #[test]
    fn meta_and_children_are_optional() {
        let description =
            GraphDescription::from_json_str(r#"{"name": "home", "checker": "c", "meta": null}"#)
                .unwrap();

        assert!(description.root.meta.is_none());
        assert!(description.root.children.is_empty());
    }

    #[test]
    fn missing_checker_is_a_parse_error() {
        let result = GraphDescription::from_json_str(r#"{"name": "home"}"#);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    /// A single chain `s0 -> s1 -> ... -> s{depth}`.
    fn chain(depth: usize) -> String {
        let mut json = format!(r#"{{"name": "s{depth}", "checker": "c"}}"#);
        for level in (0..depth).rev() {
            json = format!(
                r#"{{"name": "s{level}", "checker": "c", "children": {{"next": {{"action": "a", "target": {json}}}}}}}"#
            );
        }
        json
    }

    #[test]
    fn forty_deep_chain_parses() {
        let description = GraphDescription::from_json_str(&chain(40)).unwrap();
        assert_eq!(description.nodes().len(), 41);
    }

    #[test]
    fn nesting_past_the_parser_limit_is_a_parse_error() {
        let result = GraphDescription::from_json_str(&chain(70));
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn nodes_lists_every_scene() {
        let description = GraphDescription::from_json_str(NESTED).unwrap();
        let names: Vec<&str> = description
            .nodes()
            .iter()
            .map(|node| node.name.as_str())
            .collect();

        assert_eq!(names, vec!["home", "terminal", "story"]);
    }
}
