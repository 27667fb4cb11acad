//! Prim's algorithm: the priority search engine (C9) run with
//! [`BottleneckAlgebra`], so each node's label is the weight of the
//! single edge that pulled it into the tree rather than an accumulated
//! distance. The resulting `SearchRecord`'s predecessor edges, taken
//! together, are the minimum spanning tree. Per spec.md §4.7.

use crate::algebra::{BottleneckAlgebra, WeightAlgebra};
use crate::index_map::IndexMap;
use crate::queue::{IndexedHeap, PriorityQueue, ScanQueue};
use crate::search_record::SearchRecord;
use crate::traversal::priority_search;
use crate::view::GraphView;

/// Dense variant: O(V^2) via [`ScanQueue`], no heap bookkeeping overhead
/// for small or densely connected graphs.
pub fn dense<G, M, W>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> SearchRecord<G::NodeId, G::EdgeId, W, M>
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Default + Copy + PartialOrd,
{
    let algebra = BottleneckAlgebra;
    let queue = ScanQueue::new(move |a: &(W, G::NodeId), b: &(W, G::NodeId)| algebra.priority(&a.0, &b.0));
    let (record, _) = priority_search::run(
        graph,
        index_map,
        source,
        &BottleneckAlgebra,
        weight,
        queue,
        &mut crate::adapter::Accept,
    );
    record
}

/// Sparse variant: O(E log V) via [`IndexedHeap`].
pub fn sparse<G, M, W>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> SearchRecord<G::NodeId, G::EdgeId, W, M>
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Default + Copy + PartialOrd,
{
    let algebra = BottleneckAlgebra;
    let key_map = index_map.clone();
    let queue = IndexedHeap::new(
        move |a: &(W, G::NodeId), b: &(W, G::NodeId)| algebra.priority(&a.0, &b.0),
        move |entry: &(W, G::NodeId)| key_map.index_of(&entry.1),
    );
    let (record, _) = priority_search::run(
        graph,
        index_map,
        source,
        &BottleneckAlgebra,
        weight,
        queue,
        &mut crate::adapter::Accept,
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_map::Identity;

    struct WeightedGraph {
        adj: Vec<Vec<(usize, i64)>>,
    }

    impl GraphView for WeightedGraph {
        type NodeId = usize;
        type EdgeId = usize;
        fn edge_begin(&self, _n: usize) -> usize {
            0
        }
        fn edge_inc(&self, _n: usize, e: usize) -> usize {
            e + 1
        }
        fn edge_end(&self, n: usize, e: usize) -> bool {
            e >= self.adj[n].len()
        }
        fn target(&self, n: usize, e: usize) -> usize {
            self.adj[n][e].0
        }
    }

    #[test]
    fn prim_finds_the_minimum_spanning_tree_of_a_square() {
        // Square with both diagonals; the two short sides plus one long
        // diagonal is never optimal, the two short cross edges are.
        let g = WeightedGraph {
            adj: vec![
                vec![(1, 1), (3, 4), (2, 10)],
                vec![(0, 1), (2, 1), (3, 10)],
                vec![(1, 1), (3, 1), (0, 10)],
                vec![(2, 1), (0, 4), (1, 10)],
            ],
        };
        let record = sparse(&g, Identity, 0, |n, e| g.adj[n][e].1);
        let mut total = 0i64;
        for node in 1..4 {
            total += *record.label(node).unwrap();
        }
        assert_eq!(total, 3); // edges of weight 1 each for nodes 1, 2, 3
    }
}
