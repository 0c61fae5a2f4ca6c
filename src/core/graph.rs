//! Scene graph: nodes, edges and the tree that owns them.
//!
//! Nodes and edges live in an arena owned by [`SceneGraph`]. Ids are stable
//! indices into that arena, so a node "owns" its children through the edge
//! ids it holds and the parent link is a plain, non-owning [`NodeId`].

use super::capability::Capability;
use super::error::GraphError;
use std::collections::{BTreeMap, HashMap};

/// Opaque per-scene attachment. The graph never looks inside it.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Index of a node inside its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an edge inside its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A scene: a name, the checker confirming it, and opaque metadata.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    checker: Capability,
    metadata: Metadata,
    children: BTreeMap<String, EdgeId>,
    parent: Option<NodeId>,
}

impl Node {
    /// Create a detached scene. It becomes part of a graph through
    /// [`SceneGraph::new`] or [`SceneGraph::attach`].
    pub fn new(name: impl Into<String>, checker: Capability) -> Self {
        Self {
            name: name.into(),
            checker,
            metadata: Metadata::new(),
            children: BTreeMap::new(),
            parent: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Unique scene name, used as the navigation target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability confirming that this scene is showing.
    pub fn checker(&self) -> &Capability {
        &self.checker
    }

    /// Opaque data carried for the caller; navigation ignores it.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The node whose edge leads here. `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Outgoing edges keyed by edge key, in key order.
    pub fn children(&self) -> impl Iterator<Item = (&str, EdgeId)> + '_ {
        self.children.iter().map(|(key, id)| (key.as_str(), *id))
    }

    pub(crate) fn set_checker(&mut self, checker: Capability) {
        self.checker = checker;
    }
}

/// A guarded transition from `source` to `target`.
#[derive(Debug, Clone)]
pub struct Edge {
    key: String,
    source: NodeId,
    target: NodeId,
    action: Capability,
}

impl Edge {
    /// Key under which this edge is stored in its source node.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn action(&self) -> &Capability {
        &self.action
    }

    pub(crate) fn set_action(&mut self, action: Capability) {
        self.action = action;
    }
}

/// Rooted tree of scenes.
///
/// Construction is append-only: there is no way to remove a node or edge,
/// and every scene name is unique within the graph.
///
/// # Example
///
/// ```rust
/// use navtrie::core::{Capability, Node, SceneGraph};
///
/// let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
/// let terminal = graph
///     .attach(
///         graph.root(),
///         Node::new("terminal", Capability::constant("at_terminal", true)),
///         Capability::constant("open_terminal", true),
///     )
///     .unwrap();
///
/// assert_eq!(graph.find("terminal"), Some(terminal));
/// assert_eq!(graph.parent_of(terminal), Some(graph.root()));
/// ```
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    names: HashMap<String, NodeId>,
}

impl SceneGraph {
    /// Create a graph holding only `root`.
    pub fn new(mut root: Node) -> Self {
        root.parent = None;
        root.children.clear();
        let id = NodeId(0);
        let mut names = HashMap::new();
        names.insert(root.name.clone(), id);
        Self {
            nodes: vec![root],
            edges: Vec::new(),
            names,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach `child` under `parent`, keyed by the child's name.
    pub fn attach(
        &mut self,
        parent: NodeId,
        child: Node,
        action: Capability,
    ) -> Result<NodeId, GraphError> {
        let key = child.name.clone();
        self.attach_keyed(parent, key, child, action)
    }

    /// Attach `child` under `parent` with an explicit edge key.
    ///
    /// Fails without modifying the graph if `parent` is not part of this
    /// graph, if `parent` already has an edge under `key`, or if a scene
    /// named like `child` already exists anywhere in the graph.
    pub fn attach_keyed(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        mut child: Node,
        action: Capability,
    ) -> Result<NodeId, GraphError> {
        let key = key.into();
        let parent_node = self
            .nodes
            .get(parent.0)
            .ok_or(GraphError::UnknownNode(parent.0))?;

        if parent_node.children.contains_key(&key) {
            return Err(GraphError::DuplicateEdgeKey {
                parent: parent_node.name.clone(),
                key,
            });
        }
        if self.names.contains_key(&child.name) {
            return Err(GraphError::DuplicateScene(child.name));
        }

        let child_id = NodeId(self.nodes.len());
        let edge_id = EdgeId(self.edges.len());

        child.parent = Some(parent);
        child.children.clear();
        self.names.insert(child.name.clone(), child_id);
        self.nodes.push(child);
        self.edges.push(Edge {
            key: key.clone(),
            source: parent,
            target: child_id,
            action,
        });
        self.nodes[parent.0].children.insert(key, edge_id);

        Ok(child_id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Look up a scene by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Outgoing edges of `id`, in key order. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children.values())
            .map(|edge| &self.edges[edge.0])
    }

    /// Ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent_of(node);
        }
        chain
    }

    pub fn scene_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node ids in insertion order; the root comes first.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub(crate) fn node_at(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn edge_at(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.iter_mut()
    }
}
