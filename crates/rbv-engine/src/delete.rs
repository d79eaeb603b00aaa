//! Delete and delete-fixup.
//!
//! Standard BST deletion with a physical successor relink for two-child
//! targets, then the double-black fixup. Because the fixup seed `x` may be
//! the shared NIL sentinel (which stores no parent), the engine threads
//! `x_parent` explicitly instead of temporarily mutating the sentinel.
//!
//! Four cases per iteration, selected by the sibling's color and the nephews'
//! colors:
//!
//! - **red sibling**: recolor + rotate the parent toward `x`, re-aim;
//! - **black sibling, both nephews black**: recolor the sibling red, ascend;
//! - **black sibling, far nephew black, near red**: recolor + rotate the
//!   sibling away from `x`, re-aim;
//! - **black sibling, far nephew red**: recolor + rotate the parent toward
//!   `x`, terminate.

use rbv_arena::{Color, NodeId};
use rbv_trace::{OperationId, StepKind};
use tracing::debug;

use crate::tree::RbTree;

impl RbTree {
    pub(crate) fn delete_inner(&mut self, key: i64, op: OperationId) {
        // Locate the target, one traverse step per comparison.
        let mut z = self.arena.root();
        while !z.is_nil() {
            let node_key = self.arena.key(z);
            if key == node_key {
                break;
            }
            let side = if key < node_key { "left" } else { "right" };
            self.record(
                op,
                StepKind::Traverse,
                format!("compare {key} with {node_key}: descend {side}"),
                &[],
                Some(z),
                None,
            );
            z = if key < node_key {
                self.arena.left(z)
            } else {
                self.arena.right(z)
            };
        }
        if z.is_nil() {
            self.record(
                op,
                StepKind::NotFound,
                format!("key {key} is not in the tree; nothing to delete"),
                &[],
                None,
                None,
            );
            return;
        }
        self.record(
            op,
            StepKind::Found,
            format!("found {key} at {z}"),
            &[z],
            Some(z),
            None,
        );

        // Splice. Track the color physically removed from the tree and the
        // node (possibly NIL) now occupying the vacated structural slot.
        let mut removed_color = self.arena.color(z);
        let x;
        let x_parent;

        let z_left = self.arena.left(z);
        let z_right = self.arena.right(z);
        if z_left.is_nil() {
            x = z_right;
            x_parent = self.arena.parent(z);
            self.arena.transplant(z, x);
            self.arena.remove(z);
            self.record(
                op,
                StepKind::Remove,
                if x.is_nil() {
                    format!("removed leaf {z} (key {key})")
                } else {
                    format!(
                        "removed {z} (key {key}); right child {} took its place",
                        self.arena.key(x)
                    )
                },
                &[],
                None,
                None,
            );
        } else if z_right.is_nil() {
            x = z_left;
            x_parent = self.arena.parent(z);
            self.arena.transplant(z, x);
            self.arena.remove(z);
            self.record(
                op,
                StepKind::Remove,
                format!(
                    "removed {z} (key {key}); left child {} took its place",
                    self.arena.key(x)
                ),
                &[x],
                None,
                None,
            );
        } else {
            // Two children: physically relink the in-order successor into
            // z's position. The successor keeps z's color, so the color that
            // leaves the tree is the successor's original one.
            let successor = self.arena.minimum(z_right);
            let successor_key = self.arena.key(successor);
            removed_color = self.arena.color(successor);
            x = self.arena.right(successor);

            if self.arena.parent(successor) == z {
                x_parent = successor;
            } else {
                x_parent = self.arena.parent(successor);
                self.arena.transplant(successor, x);
                self.arena.set_right(successor, self.arena.right(z));
                self.arena.set_parent(self.arena.right(z), successor);
            }
            self.arena.transplant(z, successor);
            self.arena.set_left(successor, z_left);
            self.arena.set_parent(z_left, successor);
            self.arena.set_color(successor, self.arena.color(z));
            self.arena.remove(z);

            self.record(
                op,
                StepKind::Replace,
                format!(
                    "successor {successor_key} ({successor}) moved into the \
                     position and color of {key}"
                ),
                &[successor],
                None,
                None,
            );
            self.record(
                op,
                StepKind::Remove,
                format!("removed {z} (key {key})"),
                &[successor],
                None,
                None,
            );
        }

        // Removing a red node cannot violate black-height or no-red-red.
        if removed_color == Color::Black {
            self.delete_fixup(x, x_parent, op);
        }
        self.record(
            op,
            StepKind::Done,
            format!("delete of {key} complete"),
            &[],
            None,
            None,
        );
    }

    /// Resolve a double-black at `x` (possibly NIL, hence the explicit
    /// parent) by walking the four sibling cases up the tree.
    fn delete_fixup(&mut self, mut x: NodeId, mut x_parent: NodeId, op: OperationId) {
        while x != self.arena.root() && self.arena.is_black(x) {
            if x_parent.is_nil() {
                break;
            }
            let x_is_left = x == self.arena.left(x_parent);
            let mut sibling = if x_is_left {
                self.arena.right(x_parent)
            } else {
                self.arena.left(x_parent)
            };

            if self.arena.is_red(sibling) {
                // Red sibling: make it the subtree root so the remaining
                // cases see a black sibling.
                debug!("delete fixup: red sibling {sibling}");
                self.arena.set_color(sibling, Color::Black);
                self.arena.set_color(x_parent, Color::Red);
                self.record(
                    op,
                    StepKind::Recolor,
                    format!(
                        "sibling {} is red: recolored it black and parent {} red",
                        self.arena.key(sibling),
                        self.arena.key(x_parent)
                    ),
                    &[sibling, x_parent],
                    None,
                    None,
                );
                let parent_key = self.arena.key(x_parent);
                if x_is_left {
                    self.arena.rotate_left(x_parent);
                    self.record(
                        op,
                        StepKind::RotateLeft,
                        format!("rotated parent {parent_key} left"),
                        &[x_parent],
                        None,
                        None,
                    );
                    sibling = self.arena.right(x_parent);
                } else {
                    self.arena.rotate_right(x_parent);
                    self.record(
                        op,
                        StepKind::RotateRight,
                        format!("rotated parent {parent_key} right"),
                        &[x_parent],
                        None,
                        None,
                    );
                    sibling = self.arena.left(x_parent);
                }
            }

            let (near, far) = if x_is_left {
                (self.arena.left(sibling), self.arena.right(sibling))
            } else {
                (self.arena.right(sibling), self.arena.left(sibling))
            };

            if self.arena.is_black(near) && self.arena.is_black(far) {
                // Both nephews black: drop one black from both sides and
                // move the deficit up.
                debug!("delete fixup: black sibling {sibling} with black nephews, ascending");
                self.arena.set_color(sibling, Color::Red);
                self.record(
                    op,
                    StepKind::Recolor,
                    format!(
                        "sibling {} and both its children are black: recolored \
                         sibling red, double-black moves up",
                        self.arena.key(sibling)
                    ),
                    &[sibling],
                    None,
                    None,
                );
                x = x_parent;
                x_parent = self.arena.parent(x);
                continue;
            }

            if self.arena.is_black(far) {
                // Near nephew red, far black: convert to the far-red case.
                debug!("delete fixup: near nephew {near} red, far black");
                self.arena.set_color(near, Color::Black);
                self.arena.set_color(sibling, Color::Red);
                self.record(
                    op,
                    StepKind::Recolor,
                    format!(
                        "near nephew {} is red: recolored it black and sibling {} red",
                        self.arena.key(near),
                        self.arena.key(sibling)
                    ),
                    &[near, sibling],
                    None,
                    None,
                );
                let sibling_key = self.arena.key(sibling);
                if x_is_left {
                    self.arena.rotate_right(sibling);
                    self.record(
                        op,
                        StepKind::RotateRight,
                        format!("rotated sibling {sibling_key} right"),
                        &[sibling],
                        None,
                        None,
                    );
                    sibling = self.arena.right(x_parent);
                } else {
                    self.arena.rotate_left(sibling);
                    self.record(
                        op,
                        StepKind::RotateLeft,
                        format!("rotated sibling {sibling_key} left"),
                        &[sibling],
                        None,
                        None,
                    );
                    sibling = self.arena.left(x_parent);
                }
            }

            // Far nephew red: the sibling absorbs the parent's color and the
            // rotation restores the missing black. Terminates the loop.
            let far = if x_is_left {
                self.arena.right(sibling)
            } else {
                self.arena.left(sibling)
            };
            debug!("delete fixup: far nephew {far} red, terminating");
            self.arena.set_color(sibling, self.arena.color(x_parent));
            self.arena.set_color(x_parent, Color::Black);
            self.arena.set_color(far, Color::Black);
            self.record(
                op,
                StepKind::Recolor,
                format!(
                    "far nephew {} is red: sibling {} took parent's color, \
                     parent {} and far nephew black",
                    self.arena.key(far),
                    self.arena.key(sibling),
                    self.arena.key(x_parent)
                ),
                &[sibling, x_parent, far],
                None,
                None,
            );
            let parent_key = self.arena.key(x_parent);
            if x_is_left {
                self.arena.rotate_left(x_parent);
                self.record(
                    op,
                    StepKind::RotateLeft,
                    format!("rotated parent {parent_key} left"),
                    &[x_parent],
                    None,
                    None,
                );
            } else {
                self.arena.rotate_right(x_parent);
                self.record(
                    op,
                    StepKind::RotateRight,
                    format!("rotated parent {parent_key} right"),
                    &[x_parent],
                    None,
                    None,
                );
            }
            x = self.arena.root();
            x_parent = NodeId::NIL;
        }

        // Absorb the extra black. NIL is already black; recorded only when a
        // real node actually changes color.
        if self.arena.is_red(x) {
            self.arena.set_color(x, Color::Black);
            self.record(
                op,
                StepKind::Recolor,
                format!("recolored {} black to absorb the extra black", self.arena.key(x)),
                &[x],
                None,
                None,
            );
        }
    }
}
