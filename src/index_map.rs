//! C2: node/edge index map.
//!
//! An index map is a total, injective function from a handle currently
//! present in a graph to a dense, non-negative integer. It is supplied
//! alongside the graph view rather than baked into it, so the same
//! physical graph can be indexed under different partitions by different
//! algorithm invocations.

/// Maps a node or edge handle to a dense `usize` index.
///
/// The default implementation below treats any handle that is itself
/// convertible to `usize` (plain integer ids, the common case for
/// adjacency-list-backed graphs) as its own index.
pub trait IndexMap<H> {
    fn index_of(&self, handle: &H) -> usize;
}

/// The identity index map: valid whenever the handle type is already a
/// dense `usize`-like id.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl IndexMap<usize> for Identity {
    #[inline]
    fn index_of(&self, handle: &usize) -> usize {
        *handle
    }
}

impl<H, F> IndexMap<H> for F
where
    F: Fn(&H) -> usize,
{
    #[inline]
    fn index_of(&self, handle: &H) -> usize {
        (self)(handle)
    }
}
