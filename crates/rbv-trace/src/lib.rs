//! rbv-trace - Step log and operation grouper.
//!
//! Every structural decision the rebalancing engine makes becomes an
//! immutable [`Step`] carrying a deep [`TreeSnapshot`] of the arena at that
//! instant, suitable for stepwise playback. Steps are grouped under
//! [`Operation`]s for the UI; grouping never affects the algorithmic outcome.
//!
//! The one hard resource rule lives here: **copy-on-record**. A snapshot is
//! captured at [`StepLog::record`] time and shares no storage with the live
//! arena, so later mutation can never retroactively change an emitted step.

mod log;
mod operation;
mod step;

pub use log::StepLog;
pub use operation::{Operation, OperationId, OperationKind};
pub use step::{Highlights, SnapshotNode, Step, StepKind, TreeSnapshot};
