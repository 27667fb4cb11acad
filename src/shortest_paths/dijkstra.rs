//! Dijkstra's algorithm: two façades over the priority search engine (C9)
//! differing only in which queue variant they use, per spec.md §4.5.
//! Assumes non-negative edge weights; violating that precondition yields
//! silently wrong answers (spec.md §4.5) — route negative weights through
//! [`crate::shortest_paths::bellman_ford`] or
//! [`crate::shortest_paths::dag`] instead.

use crate::adapter::{Accept, SearchAdapter, TerminationReason};
use crate::algebra::{ShortestPathAlgebra, WeightAlgebra};
use crate::index_map::IndexMap;
use crate::queue::{IndexedHeap, ScanQueue};
use crate::search_record::SearchRecord;
use crate::traversal::priority_search;
use crate::view::GraphView;

/// Dense Dijkstra: scan-for-min queue, `O(V^2)`. Appropriate when the
/// graph is dense enough that every node is touched regardless.
pub fn dense<G, M, W>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> (SearchRecord<G::NodeId, G::EdgeId, W, M>, TerminationReason)
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + Default + std::ops::Add<Output = W> + PartialOrd,
{
    dense_with_adapter(graph, index_map, source, weight, &mut Accept)
}

pub fn dense_with_adapter<G, M, W, A>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
    adapter: &mut A,
) -> (SearchRecord<G::NodeId, G::EdgeId, W, M>, TerminationReason)
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + Default + std::ops::Add<Output = W> + PartialOrd,
    A: SearchAdapter<G::NodeId, G::EdgeId>,
{
    let algebra = ShortestPathAlgebra;
    let queue = ScanQueue::new(move |a: &(W, G::NodeId), b: &(W, G::NodeId)| algebra.priority(&a.0, &b.0));
    priority_search::run(graph, index_map, source, &algebra, weight, queue, adapter)
}

/// Sparse Dijkstra: indexed binary heap, `O(E log V)`. Appropriate for
/// sparse graphs where most nodes are never touched at all.
pub fn sparse<G, M, W>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> (SearchRecord<G::NodeId, G::EdgeId, W, M>, TerminationReason)
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + Default + std::ops::Add<Output = W> + PartialOrd,
{
    sparse_with_adapter(graph, index_map, source, weight, &mut Accept)
}

pub fn sparse_with_adapter<G, M, W, A>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
    adapter: &mut A,
) -> (SearchRecord<G::NodeId, G::EdgeId, W, M>, TerminationReason)
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + Default + std::ops::Add<Output = W> + PartialOrd,
    A: SearchAdapter<G::NodeId, G::EdgeId>,
{
    let algebra = ShortestPathAlgebra;
    let key_map = index_map.clone();
    let queue = IndexedHeap::new(
        move |a: &(W, G::NodeId), b: &(W, G::NodeId)| algebra.priority(&a.0, &b.0),
        move |entry: &(W, G::NodeId)| key_map.index_of(&entry.1),
    );
    priority_search::run(graph, index_map, source, &algebra, weight, queue, adapter)
}
