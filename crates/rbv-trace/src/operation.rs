//! Operation grouping - UI-facing labels over runs of steps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based identifier of an operation, restored to 1 by reset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(u64);

impl OperationId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op{}", self.0)
    }
}

/// What kind of facade activity an operation groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Insert,
    Delete,
    Search,
    /// Caller-chosen label for an explicit batch (e.g. "INSERT_BATCH").
    Batch(String),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "INSERT"),
            Self::Delete => write!(f, "DELETE"),
            Self::Search => write!(f, "SEARCH"),
            Self::Batch(label) => write!(f, "{label}"),
        }
    }
}

/// One named, keyed grouping of steps.
///
/// Operations affect playback grouping only, never the algorithmic outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Stable id steps refer back to.
    pub id: OperationId,
    /// Operation-type tag.
    pub kind: OperationKind,
    /// Keys involved, in caller order.
    pub keys: Vec<i64>,
}
