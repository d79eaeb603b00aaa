//! The tree facade - public insert/delete/search/reset driving the
//! rebalancing engine, the step log, and operation grouping together.

use rbv_arena::{Color, NodeArena, NodeId};
use rbv_trace::{
    Highlights, Operation, OperationId, OperationKind, SnapshotNode, Step, StepKind, StepLog,
};
use tracing::debug;

use crate::verify::{self, InvariantError};

/// An instrumented red-black tree over `i64` keys.
///
/// Every structural decision (comparison, recoloring, rotation, node
/// creation/removal) is appended to the owned [`StepLog`] as an immutable
/// step with a deep snapshot, so a presentation layer can replay the whole
/// history stepwise.
///
/// Single-threaded by design: every call runs to completion, and the tree is
/// not safe for concurrent mutation. Callers needing shared access must
/// serialize externally.
#[derive(Debug, Default)]
pub struct RbTree {
    pub(crate) arena: NodeArena,
    log: StepLog,
    /// Explicit handle for the operation steps are tagged with. `Some` only
    /// between `start_operation` and `end_operation`; facade calls outside a
    /// batch open (and close) a singleton operation of their own kind.
    active_op: Option<OperationId>,
}

impl RbTree {
    /// Create an empty tree with an empty step log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Operation grouping ====================

    /// Open an explicit operation; steps recorded until
    /// [`end_operation`](Self::end_operation) carry its id.
    ///
    /// Nesting is not supported: starting while another operation is open
    /// replaces the active context.
    pub fn start_operation(&mut self, kind: OperationKind, keys: &[i64]) {
        self.active_op = Some(self.log.open_operation(kind, keys.to_vec()));
    }

    /// Close the active operation. Subsequent facade calls auto-open
    /// singleton operations again.
    pub fn end_operation(&mut self) {
        self.active_op = None;
    }

    /// Run `body` under the active operation, or under a fresh singleton
    /// operation of `kind` when none is open. Returns the steps newly
    /// appended by this call.
    fn scoped(
        &mut self,
        kind: OperationKind,
        key: i64,
        body: impl FnOnce(&mut Self, OperationId),
    ) -> Vec<Step> {
        let mark = self.log.len();
        match self.active_op {
            Some(op) => body(self, op),
            None => {
                let op = self.log.open_operation(kind, vec![key]);
                body(self, op);
            }
        }
        self.log.steps()[mark..].to_vec()
    }

    /// Append one step tagged with `op`, snapshotting the tree as it is now.
    pub(crate) fn record(
        &mut self,
        op: OperationId,
        kind: StepKind,
        description: String,
        highlights: &[NodeId],
        traversing: Option<NodeId>,
        extra: Option<SnapshotNode>,
    ) {
        self.log.record(
            &self.arena,
            kind,
            description,
            Highlights::from_slice(highlights),
            traversing,
            extra,
            op,
        );
    }

    // ==================== Public operations ====================

    /// Insert `key`, rebalance, and return the steps appended by this call.
    ///
    /// A key already present is a recorded no-op: one terminal step notes the
    /// duplicate and the tree is left unchanged.
    pub fn insert(&mut self, key: i64) -> Vec<Step> {
        debug!("insert {key}");
        let steps = self.scoped(OperationKind::Insert, key, |tree, op| {
            tree.insert_inner(key, op);
        });
        debug_assert!(
            self.check_invariants().is_ok(),
            "red-black invariants broken after insert of {key}: {:?}",
            self.check_invariants()
        );
        steps
    }

    /// Delete `key`, rebalance, and return the steps appended by this call.
    ///
    /// A missing key (including a delete on an empty tree) is a recorded
    /// no-op terminating in a not-found step.
    pub fn delete(&mut self, key: i64) -> Vec<Step> {
        debug!("delete {key}");
        let steps = self.scoped(OperationKind::Delete, key, |tree, op| {
            tree.delete_inner(key, op);
        });
        debug_assert!(
            self.check_invariants().is_ok(),
            "red-black invariants broken after delete of {key}: {:?}",
            self.check_invariants()
        );
        steps
    }

    /// Search for `key`. Never mutates the tree; still records a traverse
    /// step per comparison and a terminal found/not-found step.
    pub fn search(&mut self, key: i64) -> Vec<Step> {
        self.scoped(OperationKind::Search, key, |tree, op| {
            tree.search_inner(key, op);
        })
    }

    /// Clear the tree, the step log, the operation list, and all counters.
    /// A reset tree behaves identically to a freshly constructed one.
    pub fn reset(&mut self) {
        self.arena.reset();
        self.log.reset();
        self.active_op = None;
    }

    // ==================== Read-only views ====================

    /// The full ordered step log.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        self.log.steps()
    }

    /// All operations in insertion order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        self.log.operations()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Whether `key` is present (no steps recorded).
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.find(key) != NodeId::NIL
    }

    /// Keys in ascending order.
    #[must_use]
    pub fn in_order_keys(&self) -> Vec<i64> {
        self.arena.in_order_keys()
    }

    /// The root's key, or `None` for an empty tree.
    #[must_use]
    pub fn root_key(&self) -> Option<i64> {
        let root = self.arena.root();
        (!root.is_nil()).then(|| self.arena.key(root))
    }

    /// Verify the five red-black invariants over the live tree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        verify::verify(&self.arena)
    }

    /// Silent descent used by `contains`.
    fn find(&self, key: i64) -> NodeId {
        let mut x = self.arena.root();
        while !x.is_nil() {
            let node_key = self.arena.key(x);
            if key == node_key {
                return x;
            }
            x = if key < node_key {
                self.arena.left(x)
            } else {
                self.arena.right(x)
            };
        }
        NodeId::NIL
    }

    // ==================== Search instrumentation ====================

    fn search_inner(&mut self, key: i64, op: OperationId) {
        let mut x = self.arena.root();
        while !x.is_nil() {
            let node_key = self.arena.key(x);
            if key == node_key {
                self.record(
                    op,
                    StepKind::Found,
                    format!("found {key} at {x}"),
                    &[x],
                    Some(x),
                    None,
                );
                return;
            }
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
        self.record(
            op,
            StepKind::NotFound,
            format!("key {key} is not in the tree"),
            &[],
            None,
            None,
        );
    }

    /// Force the root black at the end of an insert, recorded only when the
    /// color actually changes.
    pub(crate) fn enforce_black_root(&mut self, op: OperationId) {
        let root = self.arena.root();
        if self.arena.is_red(root) {
            self.arena.set_color(root, Color::Black);
            self.record(
                op,
                StepKind::Recolor,
                format!("recolored root {} black", self.arena.key(root)),
                &[root],
                None,
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rbv_trace::{OperationKind, StepKind};

    use super::*;

    #[test]
    fn test_empty_tree_queries() {
        let tree = RbTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root_key(), None);
        assert!(!tree.contains(5));
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_search_never_mutates() {
        let mut tree = RbTree::new();
        for key in [20, 10, 30] {
            tree.insert(key);
        }
        let before = tree.in_order_keys();
        let steps = tree.search(10);
        assert_eq!(tree.in_order_keys(), before);
        assert_eq!(steps.last().unwrap().kind, StepKind::Found);

        let steps = tree.search(99);
        assert_eq!(steps.last().unwrap().kind, StepKind::NotFound);
        assert_eq!(tree.in_order_keys(), before);
    }

    #[test]
    fn test_singleton_operations_auto_open_per_call() {
        let mut tree = RbTree::new();
        tree.insert(1);
        tree.search(1);
        tree.delete(1);

        let kinds: Vec<OperationKind> = tree
            .operations()
            .iter()
            .map(|operation| operation.kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Insert,
                OperationKind::Search,
                OperationKind::Delete
            ]
        );
        // every step carries the id of its own operation
        for step in tree.steps() {
            assert!(
                tree.operations()
                    .iter()
                    .any(|operation| operation.id == step.operation)
            );
        }
    }

    #[test]
    fn test_explicit_batch_groups_all_steps() {
        let mut tree = RbTree::new();
        tree.start_operation(OperationKind::Batch("DEMO".to_owned()), &[3, 1, 2]);
        for key in [3, 1, 2] {
            tree.insert(key);
        }
        tree.end_operation();

        assert_eq!(tree.operations().len(), 1);
        let batch = tree.operations()[0].id;
        assert!(tree.steps().iter().all(|step| step.operation == batch));
        assert_eq!(tree.operations()[0].keys, vec![3, 1, 2]);

        // after the batch ends, calls open fresh singleton operations
        tree.insert(4);
        assert_eq!(tree.operations().len(), 2);
        assert_eq!(tree.operations()[1].kind, OperationKind::Insert);
    }

    #[test]
    fn test_returned_steps_are_exactly_the_new_ones() {
        let mut tree = RbTree::new();
        let first = tree.insert(10);
        let second = tree.insert(20);
        assert_eq!(first.first().unwrap().id, 1);
        assert_eq!(
            second.first().unwrap().id,
            first.last().unwrap().id + 1,
            "each call returns only its own appended steps"
        );
        assert_eq!(
            tree.steps().len(),
            first.len() + second.len(),
            "the log is the concatenation of all returned slices"
        );
    }
}
