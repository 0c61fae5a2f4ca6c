//! Root-to-scene route precomputation.

use super::graph::{EdgeId, NodeId, SceneGraph};
use std::collections::HashMap;

/// Cached route from the root to every scene.
///
/// Each entry is the ordered list of edges to follow from the root. The
/// root itself maps to an empty route. Built once per graph; lookups are a
/// single hash probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    routes: HashMap<String, Vec<EdgeId>>,
}

impl PathTable {
    /// Walk the tree depth-first from the root and record every route.
    ///
    /// Children are visited in edge-key order. Should two scenes share a
    /// name, the one visited last keeps the entry; [`SceneGraph`] rejects
    /// such graphs, so this only matters for the traversal order itself.
    pub fn build(graph: &SceneGraph) -> Self {
        let mut routes = HashMap::with_capacity(graph.scene_count());
        let mut stack: Vec<(NodeId, Vec<EdgeId>)> = vec![(graph.root(), Vec::new())];

        while let Some((id, route)) = stack.pop() {
            let node = graph.node_at(id);
            // Reverse so the smallest key is popped first.
            let children: Vec<EdgeId> = node.children().map(|(_, edge)| edge).collect();
            for edge in children.into_iter().rev() {
                let mut extended = route.clone();
                extended.push(edge);
                stack.push((graph.edge_at(edge).target(), extended));
            }
            routes.insert(node.name().to_string(), route);
        }

        Self { routes }
    }

    /// Route to `scene`, or `None` if no such scene exists.
    pub fn get(&self, scene: &str) -> Option<&[EdgeId]> {
        self.routes.get(scene).map(Vec::as_slice)
    }

    pub fn contains(&self, scene: &str) -> bool {
        self.routes.contains_key(scene)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn scenes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}
