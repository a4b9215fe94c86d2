use crate::node::NodeKind;
use crate::types::{NodeId, Rect};

/// A wrapper around a [`NodeKind`] that adds scene graph relationships and
/// the computed layout rectangle.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// The visual payload (container, shape or text).
    pub kind: NodeKind,
    /// Indices of child nodes, in presentation order.
    pub children: Vec<NodeId>,
    /// Index of parent node.
    pub parent: Option<NodeId>,
    /// The computed layout rectangle (set by `LayoutEngine`), relative to
    /// the parent node.
    pub layout_rect: Rect,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            parent: None,
            layout_rect: Rect::default(),
        }
    }
}

/// The scene graph data structure.
///
/// Manages the arena of nodes and their relationships. Boards are built
/// once per import and never torn down midway, so slots are not recycled.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    /// The arena of all nodes.
    pub nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a new node to the scene graph and returns its ID.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SceneNode::new(kind));
        id
    }

    /// Establishes a parent-child relationship between two nodes.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p_node) = self.nodes.get_mut(parent) {
            p_node.children.push(child);
        }
        if let Some(c_node) = self.nodes.get_mut(child) {
            c_node.parent = Some(parent);
        }
    }

    /// Returns a shared reference to the node.
    pub fn get_node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Returns a mutable reference to the node.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }
}
