//! Step records and the deep tree snapshots they carry.

use rbv_arena::{Color, NodeArena, NodeId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::operation::OperationId;

/// Classification tag for a recorded step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    /// A node was created or attached.
    Create,
    /// One or more nodes changed color.
    Recolor,
    /// Left rotation around a pivot.
    RotateLeft,
    /// Right rotation around a pivot.
    RotateRight,
    /// A comparison made while descending.
    Traverse,
    /// The searched key exists (also used for duplicate inserts).
    Found,
    /// The searched key does not exist.
    NotFound,
    /// A node was spliced out of the tree.
    Remove,
    /// Another physical node took over a deleted node's position.
    Replace,
    /// Terminal marker for a completed structural operation.
    Done,
}

/// Value-type copy of one node: ids, key, color, links. Never aliases the
/// live arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub key: i64,
    pub color: Color,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
}

impl SnapshotNode {
    /// Copy a single live node out of the arena.
    #[must_use]
    pub fn capture(arena: &NodeArena, id: NodeId) -> Self {
        let node = arena.node(id);
        Self {
            id: node.id,
            key: node.key,
            color: node.color,
            left: node.left,
            right: node.right,
            parent: node.parent,
        }
    }
}

/// A deep, independent copy of the tree shape at one instant.
///
/// Captures the arena slice reachable from the root. Later mutation of the
/// live tree never alters a snapshot (copy-on-record).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Root id, or NIL for an empty tree.
    pub root: NodeId,
    /// Reachable nodes in in-order (ascending key) sequence.
    pub nodes: Vec<SnapshotNode>,
}

impl TreeSnapshot {
    /// Capture the nodes reachable from the arena's current root.
    #[must_use]
    pub fn capture(arena: &NodeArena) -> Self {
        let nodes = arena
            .in_order_ids()
            .into_iter()
            .map(|id| SnapshotNode::capture(arena, id))
            .collect();
        Self {
            root: arena.root(),
            nodes,
        }
    }

    /// Look up a snapshot node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SnapshotNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Number of nodes captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot shows an empty tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<i64> {
        self.nodes.iter().map(|node| node.key).collect()
    }
}

/// Node ids a step wants emphasized during playback.
pub type Highlights = SmallVec<[NodeId; 4]>;

/// One immutable entry in the step log.
///
/// Created exactly once at a decision point, appended, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Sequential 1-based id, global across the tree's lifetime until reset.
    pub id: u64,
    /// Classification tag.
    pub kind: StepKind,
    /// Human-readable description of the decision taken.
    pub description: String,
    /// Tree shape at this instant.
    pub snapshot: TreeSnapshot,
    /// A transient node shown outside the main tree (the just-created,
    /// not-yet-attached node), if any.
    pub extra: Option<SnapshotNode>,
    /// Node ids to visually highlight.
    pub highlights: Highlights,
    /// The node currently being traversed, if any.
    pub traversing: Option<NodeId>,
    /// The operation this step belongs to.
    pub operation: OperationId,
}
