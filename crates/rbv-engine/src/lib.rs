//! rbv-engine - Instrumented red-black tree engine.
//!
//! A balanced binary search tree over `i64` keys whose every structural
//! decision - comparison, recoloring, rotation, node creation and removal -
//! is recorded as an ordered log of immutable steps with deep snapshots,
//! suitable for stepwise playback by a presentation layer.
//!
//! # Layering
//!
//! - [`rbv_arena`] owns the nodes and does the pointer surgery;
//! - [`rbv_trace`] records steps and groups them into operations;
//! - this crate drives both: the case analysis of insert-fixup and
//!   delete-fixup lives here, as does the public [`RbTree`] facade.
//!
//! # Example
//!
//! ```
//! use rbv_engine::RbTree;
//!
//! let mut tree = RbTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.root_key(), Some(20));
//! assert!(tree.check_invariants().is_ok());
//!
//! // the whole history is replayable
//! assert!(!tree.steps().is_empty());
//! assert_eq!(tree.steps()[0].id, 1);
//! ```

mod delete;
mod insert;
mod tree;
mod verify;

pub use tree::RbTree;
pub use verify::InvariantError;

// Re-exported so consumers of the facade can name every type it returns.
pub use rbv_arena::{Color, NodeId};
pub use rbv_trace::{
    Highlights, Operation, OperationId, OperationKind, SnapshotNode, Step, StepKind, TreeSnapshot,
};
