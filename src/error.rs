//! Programmer-misuse errors for the mutable graph container (C17), per
//! spec.md §7: "internal consistency checks... active during development
//! only." These are never returned by algorithmic procedures (§7's
//! "algorithmic outcomes never use exceptions") — they only surface from
//! the container's own debug-gated bookkeeping and explicit bounds checks
//! on handle reuse after removal. Follows the teacher's
//! `crates/algorithms/src/shortest_paths/bellman_ford/error.rs` shape:
//! a small `enum` implementing `Display` + `error_stack::Context`.

use core::fmt::{Display, Formatter};

use error_stack::Context;

/// A handle (node or edge index) that no longer identifies a live element,
/// either because it was never valid or because a prior removal swapped a
/// different element into its slot.
#[derive(Debug)]
pub enum GraphContainerError {
    /// A node index was used that is `>=` the current node count.
    NodeOutOfBounds { index: usize, node_count: usize },
    /// An edge index was used that is `>=` the current edge count.
    EdgeOutOfBounds { index: usize, edge_count: usize },
    /// A consistency check (debug builds only) found an adjacency-list
    /// entry pointing at a node or edge that no longer exists.
    DanglingReference,
}

impl Display for GraphContainerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NodeOutOfBounds { index, node_count } => {
                write!(f, "node index {index} out of bounds (node count {node_count})")
            }
            Self::EdgeOutOfBounds { index, edge_count } => {
                write!(f, "edge index {index} out of bounds (edge count {edge_count})")
            }
            Self::DanglingReference => write!(f, "adjacency list references a removed node or edge"),
        }
    }
}

impl Context for GraphContainerError {}
