//! Arena-backed trees shared by the command grammar and the motion map.
//!
//! Nodes live in a flat `Vec` and refer to their children by [`NodeId`].
//! Child order is declaration order, which both dispatchers rely on for
//! first-match-wins lookup.

/// Index of a node inside a [`Tree`]
pub type NodeId = usize;

/// Every tree is created with its root at slot 0.
pub const ROOT: NodeId = 0;

/// Node payloads decide whether they may own children.
pub trait NodeKind {
    /// Leaves (value/action bindings) never get children.
    fn is_leaf(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct Node<K> {
    pub kind: K,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Tree<K> {
    nodes: Vec<Node<K>>,
}

impl<K: NodeKind> Tree<K> {
    pub fn new(root: K) -> Self {
        Tree {
            nodes: vec![Node {
                kind: root,
                children: Vec::new(),
            }],
        }
    }

    /// Append `kind` as the last child of `parent`.
    ///
    /// Panics if `parent` is a leaf kind: trees are built once from static
    /// descriptions, so this is a construction bug rather than a runtime error.
    pub fn add_child(&mut self, parent: NodeId, kind: K) -> NodeId {
        assert!(
            !self.nodes[parent].kind.is_leaf(),
            "leaf node {parent} cannot own children"
        );
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &K {
        &self.nodes[id].kind
    }

    /// Children of `id` in declaration order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &K)> + '_ {
        self.nodes[id]
            .children
            .iter()
            .map(move |&child| (child, &self.nodes[child].kind))
    }

    /// First child of `id` whose kind satisfies `pred`
    pub fn find_child(&self, id: NodeId, pred: impl Fn(&K) -> bool) -> Option<NodeId> {
        self.children(id)
            .find(|(_, kind)| pred(kind))
            .map(|(child, _)| child)
    }
}

#[cfg(test)]
impl<K> Tree<K> {
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id]
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.nodes[parent].children.contains(&child)
    }
}
