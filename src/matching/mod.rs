//! C16: matching. Bipartite cardinality/weighted matching via augmenting
//! paths and a Hungarian-style dual, non-bipartite cardinality and
//! weighted matching via blossom contraction, and minimum-weight edge
//! covering built on top of matching. Per spec.md §4.11 and
//! `original_source/matching/matching.{h,cpp}`.

pub mod bipartite;
pub mod blossom;
pub mod cover;

/// A matching over `n` nodes as a match array: `mate[i] == i` means `i`
/// is unmatched, otherwise `mate[i]` is `i`'s partner. Shared output
/// shape across every matching procedure, per spec.md §7.
pub type Mate = Vec<usize>;

fn unmatched(n: usize) -> Mate {
    (0..n).collect()
}
