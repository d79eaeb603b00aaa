//! The append-only step log.

use rbv_arena::{NodeArena, NodeId};
use tracing::debug;

use crate::operation::{Operation, OperationId, OperationKind};
use crate::step::{Highlights, SnapshotNode, Step, StepKind, TreeSnapshot};

/// Append-only ordered log of steps plus the operations grouping them.
///
/// The log holds no ambient "current operation" state: every
/// [`record`](Self::record) call names its operation explicitly, so two trees
/// in one process can never cross-talk. The facade owns the active handle.
#[derive(Debug)]
pub struct StepLog {
    steps: Vec<Step>,
    operations: Vec<Operation>,
    next_step_id: u64,
    next_operation_id: u64,
}

impl Default for StepLog {
    fn default() -> Self {
        Self::new()
    }
}

impl StepLog {
    /// Create an empty log with both counters at their initial values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            operations: Vec::new(),
            next_step_id: 1,
            next_operation_id: 1,
        }
    }

    /// Open a new operation and return its handle.
    ///
    /// Nesting is not supported; the caller replaces whatever handle it was
    /// holding (and is responsible for having ended it first).
    pub fn open_operation(&mut self, kind: OperationKind, keys: Vec<i64>) -> OperationId {
        let id = OperationId::from_raw(self.next_operation_id);
        self.next_operation_id += 1;
        debug!("opened operation {id:?}: {kind} {keys:?}");
        self.operations.push(Operation { id, kind, keys });
        id
    }

    /// Snapshot the arena NOW, assign the next step id, and append.
    ///
    /// Returns the recorded step. The snapshot is a deep copy; later arena
    /// mutation never alters it.
    pub fn record(
        &mut self,
        arena: &NodeArena,
        kind: StepKind,
        description: String,
        highlights: Highlights,
        traversing: Option<NodeId>,
        extra: Option<SnapshotNode>,
        operation: OperationId,
    ) -> &Step {
        let id = self.next_step_id;
        self.next_step_id += 1;
        debug!("step {id} [{kind:?}] {description}");
        self.steps.push(Step {
            id,
            kind,
            description,
            snapshot: TreeSnapshot::capture(arena),
            extra,
            highlights,
            traversing,
            operation,
        });
        // just pushed, so the log is non-empty
        self.steps.last().unwrap_or_else(|| unreachable!())
    }

    /// All recorded steps in insertion order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// All operations in insertion order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Clear steps and operations and restore both id counters.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.operations.clear();
        self.next_step_id = 1;
        self.next_operation_id = 1;
    }
}
