//! rbv-arena - Node store for the red-black tree visualizer.
//!
//! Owns every live tree node in an id-addressed arena and exposes the
//! low-level pointer surgery (rotations, transplant, subtree minimum) the
//! rebalancing engine drives. No rebalancing decisions are made here.
//!
//! # Key concepts
//!
//! - **`NodeId`**: stable `u32` handle, monotonically assigned, never reused
//!   within a tree lifetime. Id 0 is the shared NIL sentinel.
//! - **NIL sentinel**: one conceptual black, keyless node standing for every
//!   external leaf; referenced by links, never stored.
//! - **Arena addressing**: child/parent links are ids, not references, so
//!   snapshots are cheap structural clones with no lifetime entanglement.

mod arena;
mod node;

pub use arena::NodeArena;
pub use node::{Color, Node, NodeId};
