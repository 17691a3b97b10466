/// SceneGraph: hierarchical node arena.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. World
/// transforms are never cached: `world_matrix()` composes the node's local
/// transform with every ancestor at read time, so a change to any
/// ancestor is always visible to the next read.

use glam::Mat4;
use slotmap::SlotMap;
use crate::error::Result;
use crate::overlay_bail;
use super::node::{ModelNode, Node, NodeFlags, NodeKey, Transform};

/// A scene graph with a single root node.
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl SceneGraph {
    /// Create a graph containing only an identity root named `"scene"`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("scene"));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Insert `node` as the last child of `parent`.
    pub fn add_node(&mut self, parent: NodeKey, mut node: Node) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            overlay_bail!("folio3d::SceneGraph", InvalidNode, "parent {:?} is not in the graph", parent);
        }
        node.parent = Some(parent);
        node.children.clear();
        let key = self.nodes.insert(node);
        self.nodes[parent].children.push(key);
        Ok(key)
    }

    /// Instantiate a loader-produced tree under `parent`.
    ///
    /// Every node carrying geometry is flagged as shadow caster and
    /// receiver. Returns the key of the instantiated root.
    pub fn attach(&mut self, parent: NodeKey, model: ModelNode) -> Result<NodeKey> {
        let ModelNode { name, transform, geometry, material, children } = model;

        let mut node = Node::new(name).with_transform(transform);
        if let Some(geometry) = geometry {
            node = node
                .with_geometry(geometry)
                .with_flags(NodeFlags::VISIBLE | NodeFlags::CAST_SHADOW | NodeFlags::RECEIVE_SHADOW);
        }
        if let Some(material) = material {
            node = node.with_material(material);
        }

        let key = self.add_node(parent, node)?;
        for child in children {
            self.attach(key, child)?;
        }
        Ok(key)
    }

    /// Remove `key` and all of its descendants. The root cannot be removed.
    ///
    /// Returns the number of nodes removed (0 for a stale key).
    pub fn remove_subtree(&mut self, key: NodeKey) -> Result<usize> {
        if key == self.root {
            overlay_bail!("folio3d::SceneGraph", InvalidNode, "the root node cannot be removed");
        }
        let Some(parent) = self.nodes.get(key).map(|n| n.parent) else {
            return Ok(0);
        };

        let doomed: Vec<NodeKey> = self.depth_first(key).collect();
        for k in &doomed {
            self.nodes.remove(*k);
        }
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != key);
        }
        Ok(doomed.len())
    }

    /// Replace a node's local transform.
    pub fn set_transform(&mut self, key: NodeKey, transform: Transform) -> Result<()> {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.set_transform(transform);
                Ok(())
            }
            None => overlay_bail!("folio3d::SceneGraph", InvalidNode, "cannot set transform of stale node {:?}", key),
        }
    }

    /// World transform of `key`: local transform composed with every ancestor.
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let mut node = self.nodes.get(key)?;
        let mut world = node.transform().to_matrix();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            world = node.transform().to_matrix() * world;
        }
        Some(world)
    }

    /// Pre-order depth-first traversal of the subtree rooted at `key`.
    ///
    /// Children are visited in insertion order. A stale key yields nothing.
    pub fn depth_first(&self, key: NodeKey) -> DepthFirst<'_> {
        let stack = if self.nodes.contains_key(key) { vec![key] } else { Vec::new() };
        DepthFirst { graph: self, stack }
    }

    /// Iterate over all live nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`SceneGraph::depth_first`].
pub struct DepthFirst<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeKey>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let key = self.stack.pop()?;
        if let Some(node) = self.graph.nodes.get(key) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(key)
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
