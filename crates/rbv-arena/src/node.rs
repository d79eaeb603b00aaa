//! Node identifiers, colors, and the node record itself.
//!
//! Nodes are addressed by stable integer ids rather than native references,
//! so parent back-links are plain data and deep snapshots are structural
//! copies of id/key/color/link fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Red-black node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Red node - must have black children.
    Red,
    /// Black node - contributes to black-height.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Black => write!(f, "black"),
        }
    }
}

/// A stable identifier for a node in the arena.
///
/// Ids are assigned monotonically and never reused within a tree's lifetime;
/// a deleted node's slot stays vacant until [`reset`](crate::NodeArena::reset).
/// Id 0 is reserved for the shared NIL sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// The shared NIL sentinel: one conceptual black, keyless node referenced
    /// by every leaf link and by nodes lacking a real child or parent.
    pub const NIL: NodeId = NodeId(0);

    /// Create a node id from its raw index.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Raw index into the arena.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Whether this id is the NIL sentinel.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "NIL")
        } else {
            write!(f, "n{}", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A live tree node.
///
/// Links hold [`NodeId::NIL`] where no real neighbor exists. The arena owns
/// every node exclusively; the NIL sentinel is referenced, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// This node's own id.
    pub id: NodeId,
    /// The ordered key.
    pub key: i64,
    /// Current color.
    pub color: Color,
    /// Left child, or NIL.
    pub left: NodeId,
    /// Right child, or NIL.
    pub right: NodeId,
    /// Parent, or NIL for the root.
    pub parent: NodeId,
}

impl Node {
    /// A freshly allocated red leaf with all links NIL.
    #[must_use]
    pub const fn new_leaf(id: NodeId, key: i64) -> Self {
        Self {
            id,
            key,
            color: Color::Red,
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: NodeId::NIL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_id() {
        assert!(NodeId::NIL.is_nil());
        assert!(!NodeId::from_index(1).is_nil());
        assert_eq!(format!("{:?}", NodeId::NIL), "NIL");
        assert_eq!(format!("{:?}", NodeId::from_index(3)), "n3");
    }

    #[test]
    fn test_new_leaf_is_red_and_unlinked() {
        let node = Node::new_leaf(NodeId::from_index(1), 42);
        assert_eq!(node.color, Color::Red);
        assert!(node.left.is_nil());
        assert!(node.right.is_nil());
        assert!(node.parent.is_nil());
    }
}
