//! The node arena - owner of every live tree node.
//!
//! The arena stores nodes in a `Vec` indexed by [`NodeId`], with slot 0
//! permanently reserved for the NIL sentinel. It performs only low-level
//! pointer surgery (rotations, transplant, subtree minimum); the case
//! analysis that decides *when* to rewire lives in the engine crate.

use tracing::trace;

use crate::node::{Color, Node, NodeId};

/// Id-addressed storage for red-black tree nodes.
///
/// Ids are monotonically assigned and never reused: deleting a node vacates
/// its slot, and only [`reset`](Self::reset) reclaims storage. All link
/// accessors are NIL-safe - the sentinel reads as a black, keyless node whose
/// links are itself.
#[derive(Debug, Clone)]
pub struct NodeArena {
    /// Slot 0 is the reserved NIL sentinel and is always `None`.
    nodes: Vec<Option<Node>>,
    /// Root of the tree, or NIL when empty.
    root: NodeId,
    /// Number of live nodes.
    len: usize,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![None],
            root: NodeId::NIL,
            len: 0,
        }
    }

    /// Allocate a new red leaf holding `key`. Links start NIL; the caller is
    /// responsible for attaching the node to the tree.
    pub fn alloc(&mut self, key: i64) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Some(Node::new_leaf(id, key)));
        self.len += 1;
        trace!("allocated node {id} for key {key}");
        id
    }

    /// Vacate a node's slot. The id is never handed out again.
    pub fn remove(&mut self, id: NodeId) {
        debug_assert!(!id.is_nil(), "cannot remove the NIL sentinel");
        let slot = &mut self.nodes[id.index() as usize];
        debug_assert!(slot.is_some(), "double remove of {id}");
        *slot = None;
        self.len -= 1;
    }

    /// Drop every node, restore the id counter, and empty the tree.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(None);
        self.root = NodeId::NIL;
        self.len = 0;
    }

    // ==================== Structural queries ====================

    /// Current root, or NIL when the tree is empty.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Point the external root reference at `id`.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = id;
        if !id.is_nil() {
            self.node_mut(id).parent = NodeId::NIL;
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `id` names a live (allocated, not yet removed) node.
    #[must_use]
    pub fn is_live(&self, id: NodeId) -> bool {
        !id.is_nil()
            && (id.index() as usize) < self.nodes.len()
            && self.nodes[id.index() as usize].is_some()
    }

    /// The key stored at a live node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is NIL or vacated; the sentinel is keyless.
    #[must_use]
    pub fn key(&self, id: NodeId) -> i64 {
        self.node(id).key
    }

    /// The color of `id`. NIL reads as black.
    #[must_use]
    pub fn color(&self, id: NodeId) -> Color {
        if id.is_nil() {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    /// Whether `id` is red. NIL is never red.
    #[must_use]
    pub fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    /// Whether `id` is black. NIL is always black.
    #[must_use]
    pub fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }

    /// Left child of `id`, or NIL. NIL's children are NIL.
    #[must_use]
    pub fn left(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).left
        }
    }

    /// Right child of `id`, or NIL.
    #[must_use]
    pub fn right(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).right
        }
    }

    /// Parent of `id`, or NIL for the root. NIL's parent is NIL.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).parent
        }
    }

    /// Borrow a live node record (used by snapshot capture).
    ///
    /// # Panics
    ///
    /// Panics if `id` is NIL or names a vacated slot.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.index() as usize]
            .as_ref()
            .unwrap_or_else(|| panic!("no live node at {id}"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.index() as usize]
            .as_mut()
            .unwrap_or_else(|| panic!("no live node at {id}"))
    }

    // ==================== Mutators ====================

    /// Set a node's color. Writing to NIL is ignored (the sentinel stays black).
    pub fn set_color(&mut self, id: NodeId, color: Color) {
        if !id.is_nil() {
            self.node_mut(id).color = color;
        }
    }

    /// Set a node's left child pointer (one direction only).
    pub fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.node_mut(id).left = child;
    }

    /// Set a node's right child pointer (one direction only).
    pub fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.node_mut(id).right = child;
    }

    /// Set a node's parent pointer. Writing to NIL is ignored, so the shared
    /// sentinel never carries a stale parent.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if !id.is_nil() {
            self.node_mut(id).parent = parent;
        }
    }

    // ==================== Pointer surgery ====================

    /// Rotate the subtree at `x` to the left.
    ///
    /// Pure link rewiring: BST order is preserved and no color changes. Does
    /// nothing when `x` has no right child to promote.
    pub fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        if x.is_nil() || y.is_nil() {
            return;
        }
        trace!("rotate left around {x}");

        let y_left = self.left(y);
        self.set_right(x, y_left);
        if !y_left.is_nil() {
            self.set_parent(y_left, x);
        }

        let x_parent = self.parent(x);
        self.set_parent(y, x_parent);
        if x_parent.is_nil() {
            self.root = y;
        } else if x == self.left(x_parent) {
            self.set_left(x_parent, y);
        } else {
            self.set_right(x_parent, y);
        }

        self.set_left(y, x);
        self.set_parent(x, y);
    }

    /// Rotate the subtree at `y` to the right. Mirror of [`rotate_left`](Self::rotate_left).
    pub fn rotate_right(&mut self, y: NodeId) {
        let x = self.left(y);
        if y.is_nil() || x.is_nil() {
            return;
        }
        trace!("rotate right around {y}");

        let x_right = self.right(x);
        self.set_left(y, x_right);
        if !x_right.is_nil() {
            self.set_parent(x_right, y);
        }

        let y_parent = self.parent(y);
        self.set_parent(x, y_parent);
        if y_parent.is_nil() {
            self.root = x;
        } else if y == self.left(y_parent) {
            self.set_left(y_parent, x);
        } else {
            self.set_right(y_parent, x);
        }

        self.set_right(x, y);
        self.set_parent(y, x);
    }

    /// Replace the subtree rooted at `u` with the one rooted at `v`.
    ///
    /// Fixes the parent's child pointer (or the external root reference when
    /// `u` was the root) and `v`'s parent pointer when `v` is a real node.
    /// `u` keeps its own links; the caller splices or discards it.
    pub fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        if parent.is_nil() {
            self.root = v;
        } else if u == self.left(parent) {
            self.set_left(parent, v);
        } else {
            self.set_right(parent, v);
        }
        self.set_parent(v, parent);
    }

    /// Leftmost node of the subtree rooted at `x` (in-order minimum).
    /// Returns NIL for an empty subtree.
    #[must_use]
    pub fn minimum(&self, mut x: NodeId) -> NodeId {
        while !self.left(x).is_nil() {
            x = self.left(x);
        }
        x
    }

    // ==================== Traversal ====================

    /// Ids of reachable nodes in in-order (ascending key) sequence.
    #[must_use]
    pub fn in_order_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;
        while !current.is_nil() || !stack.is_empty() {
            while !current.is_nil() {
                stack.push(current);
                current = self.left(current);
            }
            let id = stack.pop().unwrap_or(NodeId::NIL);
            out.push(id);
            current = self.right(id);
        }
        out
    }

    /// Keys in ascending order.
    #[must_use]
    pub fn in_order_keys(&self) -> Vec<i64> {
        self.in_order_ids().iter().map(|&id| self.key(id)).collect()
    }
}
