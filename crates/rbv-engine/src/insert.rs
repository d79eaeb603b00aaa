//! Insert and insert-fixup.
//!
//! BST descent attaches the new key as a red leaf, then the fixup loop walks
//! double-red violations up the tree. Three cases, selected by the uncle's
//! color and the new node's position under its grandparent:
//!
//! - **red uncle**: recolor and ascend;
//! - **black uncle, inner (zig-zag) child**: rotate the parent to straighten;
//! - **black uncle, outer (zig-zig) child**: recolor, rotate the grandparent,
//!   done.

use rbv_arena::{Color, NodeId};
use rbv_trace::{OperationId, SnapshotNode, StepKind};
use tracing::debug;

use crate::tree::RbTree;

impl RbTree {
    pub(crate) fn insert_inner(&mut self, key: i64, op: OperationId) {
        // Descend to the insertion point, one traverse step per comparison.
        let mut x = self.arena.root();
        let mut parent = NodeId::NIL;
        while !x.is_nil() {
            let node_key = self.arena.key(x);
            if key == node_key {
                self.record(
                    op,
                    StepKind::Found,
                    format!("key {key} already present at {x}; tree unchanged"),
                    &[x],
                    Some(x),
                    None,
                );
                return;
            }
            parent = x;
            let side = if key < node_key { "left" } else { "right" };
            self.record(
                op,
                StepKind::Traverse,
                format!("compare {key} with {node_key}: descend {side}"),
                &[],
                Some(x),
                None,
            );
            x = if key < node_key {
                self.arena.left(x)
            } else {
                self.arena.right(x)
            };
        }

        // New red leaf, shown outside the tree until it is attached.
        let node = self.arena.alloc(key);
        let detached = SnapshotNode::capture(&self.arena, node);
        self.record(
            op,
            StepKind::Create,
            format!("created red node {node} for key {key}"),
            &[],
            None,
            Some(detached),
        );

        self.arena.set_parent(node, parent);
        if parent.is_nil() {
            self.arena.set_root(node);
            self.record(
                op,
                StepKind::Create,
                format!("inserted {key} as root"),
                &[node],
                None,
                None,
            );
        } else {
            let parent_key = self.arena.key(parent);
            let side = if key < parent_key {
                self.arena.set_left(parent, node);
                "left"
            } else {
                self.arena.set_right(parent, node);
                "right"
            };
            self.record(
                op,
                StepKind::Create,
                format!("attached {key} as {side} child of {parent_key}"),
                &[node, parent],
                None,
                None,
            );
        }

        self.insert_fixup(node, op);
        self.enforce_black_root(op);
        self.record(
            op,
            StepKind::Done,
            format!("insert of {key} complete"),
            &[],
            None,
            None,
        );
    }

    /// Restore the no-red-red invariant starting from a freshly attached red
    /// node. The root-black invariant is re-established by the caller.
    fn insert_fixup(&mut self, mut node: NodeId, op: OperationId) {
        while self.arena.is_red(self.arena.parent(node)) {
            let parent = self.arena.parent(node);
            let grandparent = self.arena.parent(parent);
            let parent_is_left = parent == self.arena.left(grandparent);
            let uncle = if parent_is_left {
                self.arena.right(grandparent)
            } else {
                self.arena.left(grandparent)
            };

            if self.arena.is_red(uncle) {
                // Red uncle: push the grandparent's blackness down and ascend.
                debug!("insert fixup: red uncle at {uncle}, ascending");
                self.arena.set_color(parent, Color::Black);
                self.arena.set_color(uncle, Color::Black);
                self.arena.set_color(grandparent, Color::Red);
                self.record(
                    op,
                    StepKind::Recolor,
                    format!(
                        "uncle {} is red: recolored parent {} and uncle black, grandparent {} red",
                        self.arena.key(uncle),
                        self.arena.key(parent),
                        self.arena.key(grandparent)
                    ),
                    &[parent, uncle, grandparent],
                    None,
                    None,
                );
                node = grandparent;
                continue;
            }

            // Black uncle, inner child: straighten the zig-zag first.
            let node_is_inner = if parent_is_left {
                node == self.arena.right(parent)
            } else {
                node == self.arena.left(parent)
            };
            if node_is_inner {
                debug!("insert fixup: black uncle, inner child at {node}");
                node = parent;
                let pivot_key = self.arena.key(node);
                if parent_is_left {
                    self.arena.rotate_left(node);
                    self.record(
                        op,
                        StepKind::RotateLeft,
                        format!("inner child: rotated {pivot_key} left to straighten the path"),
                        &[node, self.arena.parent(node)],
                        None,
                        None,
                    );
                } else {
                    self.arena.rotate_right(node);
                    self.record(
                        op,
                        StepKind::RotateRight,
                        format!("inner child: rotated {pivot_key} right to straighten the path"),
                        &[node, self.arena.parent(node)],
                        None,
                        None,
                    );
                }
            }

            // Black uncle, outer child: recolor, rotate the grandparent, stop.
            let parent = self.arena.parent(node);
            let grandparent = self.arena.parent(parent);
            debug!("insert fixup: black uncle, outer child under {grandparent}");
            self.arena.set_color(parent, Color::Black);
            self.arena.set_color(grandparent, Color::Red);
            self.record(
                op,
                StepKind::Recolor,
                format!(
                    "uncle is black: recolored parent {} black, grandparent {} red",
                    self.arena.key(parent),
                    self.arena.key(grandparent)
                ),
                &[parent, grandparent],
                None,
                None,
            );
            let grandparent_key = self.arena.key(grandparent);
            if parent_is_left {
                self.arena.rotate_right(grandparent);
                self.record(
                    op,
                    StepKind::RotateRight,
                    format!("rotated grandparent {grandparent_key} right"),
                    &[grandparent, parent],
                    None,
                    None,
                );
            } else {
                self.arena.rotate_left(grandparent);
                self.record(
                    op,
                    StepKind::RotateLeft,
                    format!("rotated grandparent {grandparent_key} left"),
                    &[grandparent, parent],
                    None,
                    None,
                );
            }
            break;
        }
    }
}
