//! Red-black invariant verification.
//!
//! A violation here is never a recoverable domain condition - it means the
//! rebalancing engine itself is defective. The facade runs this checker under
//! `debug_assert!` after every mutation; tests call it directly.

use rbv_arena::{NodeArena, NodeId};
use thiserror::Error;

/// A broken red-black or BST invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// The root must be black (or the tree empty).
    #[error("root {id} (key {key}) is red")]
    RedRoot { id: NodeId, key: i64 },

    /// No red node may have a red child.
    #[error("red node {parent_key} has red child {child_key}")]
    RedRedEdge { parent_key: i64, child_key: i64 },

    /// Every path from a node to a descendant NIL must carry the same number
    /// of black nodes.
    #[error("black-height mismatch under key {key}: left {left}, right {right}")]
    BlackHeightMismatch { key: i64, left: usize, right: usize },

    /// In-order keys must be strictly increasing.
    #[error("keys out of order: {prev} precedes {next}")]
    KeysOutOfOrder { prev: i64, next: i64 },

    /// A child's parent back-link must name the node it hangs under.
    #[error("node {child_key} does not link back to its parent {parent_key}")]
    BrokenParentLink { parent_key: i64, child_key: i64 },
}

/// Check all five invariants over the live tree.
pub fn verify(arena: &NodeArena) -> Result<(), InvariantError> {
    let root = arena.root();
    if root.is_nil() {
        return Ok(());
    }
    if arena.is_red(root) {
        return Err(InvariantError::RedRoot {
            id: root,
            key: arena.key(root),
        });
    }
    if !arena.parent(root).is_nil() {
        return Err(InvariantError::BrokenParentLink {
            parent_key: arena.key(arena.parent(root)),
            child_key: arena.key(root),
        });
    }

    black_height(arena, root)?;

    let keys = arena.in_order_keys();
    for pair in keys.windows(2) {
        if pair[0] >= pair[1] {
            return Err(InvariantError::KeysOutOfOrder {
                prev: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

/// Black-height of the subtree at `id`, validating red-red edges and parent
/// back-links on the way down. NIL counts as one black node.
fn black_height(arena: &NodeArena, id: NodeId) -> Result<usize, InvariantError> {
    if id.is_nil() {
        return Ok(1);
    }

    for child in [arena.left(id), arena.right(id)] {
        if child.is_nil() {
            continue;
        }
        if arena.parent(child) != id {
            return Err(InvariantError::BrokenParentLink {
                parent_key: arena.key(id),
                child_key: arena.key(child),
            });
        }
        if arena.is_red(id) && arena.is_red(child) {
            return Err(InvariantError::RedRedEdge {
                parent_key: arena.key(id),
                child_key: arena.key(child),
            });
        }
    }

    let left = black_height(arena, arena.left(id))?;
    let right = black_height(arena, arena.right(id))?;
    if left != right {
        return Err(InvariantError::BlackHeightMismatch {
            key: arena.key(id),
            left,
            right,
        });
    }
    Ok(left + usize::from(arena.is_black(id)))
}
