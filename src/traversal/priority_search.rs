//! Generic priority search engine (C9): the Dijkstra-shaped loop that
//! every shortest-path, MST and max-flow-augmenting-path procedure in
//! this crate is built from, parameterised by a [`PriorityQueue`] (C4)
//! and a [`WeightAlgebra`] (C7). See spec.md §4.4 and
//! `original_source/priority_search.h`.

use crate::adapter::{SearchAdapter, TerminationReason};
use crate::algebra::WeightAlgebra;
use crate::index_map::IndexMap;
use crate::queue::PriorityQueue;
use crate::search_record::{NodeState, SearchRecord};
use crate::view::GraphView;

/// Run a priority search from `source`, relaxing edges through `weight`
/// (a per-edge weight lookup) via `algebra`. `queue` must already be
/// empty; it is consumed entirely by the run.
///
/// Closed nodes are never relaxed again, which is only correct if
/// `algebra` is monotonic; callers needing negative weights must use
/// [`crate::shortest_paths::dag`] or
/// [`crate::shortest_paths::bellman_ford`] instead.
pub fn run<G, M, W, Alg, Q, A, WF>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    algebra: &Alg,
    mut weight: WF,
    mut queue: Q,
    adapter: &mut A,
) -> (SearchRecord<G::NodeId, G::EdgeId, W, M>, TerminationReason)
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy,
    Alg: WeightAlgebra<W>,
    Q: PriorityQueue<(W, G::NodeId)>,
    A: SearchAdapter<G::NodeId, G::EdgeId>,
    WF: FnMut(G::NodeId, G::EdgeId) -> W,
{
    let mut record = SearchRecord::new(source, index_map);
    let init = algebra.init();
    record.set_label(source, init);
    queue.push((init, source));

    let mut reason = TerminationReason::Completed;

    while let Some((node_score, node)) = queue.pop() {
        if record.state(node) == NodeState::Closed {
            // stale entry left behind by a prior decrease-key / duplicate
            // push; the authoritative label already won.
            continue;
        }
        record.close(node);
        if !adapter.node_preprocess(node) {
            reason = TerminationReason::AbortedAtNodePreprocess;
            break;
        }

        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            if !adapter.edge_filter(node, edge) {
                edge = graph.edge_inc(node, edge);
                continue;
            }
            if !adapter.edge_process(node, edge) {
                reason = TerminationReason::AbortedAtEdgeProcess;
                return (record, reason);
            }

            let target = graph.target(node, edge);
            if record.state(target) != NodeState::Closed {
                let w = weight(node, edge);
                let candidate = algebra.combine(&node_score, &w);
                match record.state(target) {
                    NodeState::Undiscovered => {
                        record.discover(target, node, edge, candidate);
                        queue.push((candidate, target));
                    }
                    NodeState::Discovered => {
                        let current = *record.label(target).expect("discovered has a label");
                        if algebra.priority(&candidate, &current) {
                            record.relax(target, node, edge, candidate);
                            queue.rebuild((candidate, target));
                        }
                    }
                    NodeState::Closed => unreachable!("checked above"),
                }
            }
            edge = graph.edge_inc(node, edge);
        }

        if !adapter.node_postprocess(node) {
            reason = TerminationReason::AbortedAtNodePostprocess;
            break;
        }
    }

    (record, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Accept;
    use crate::algebra::ShortestPathAlgebra;
    use crate::index_map::Identity;
    use crate::queue::IndexedHeap;

    struct WeightedGraph {
        adj: Vec<Vec<(usize, i64)>>, // (target, weight) per node
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
    fn scenario_s2_dijkstra_labels() {
        // S2: {(0,1,1),(0,2,3),(1,2,1)}, n=3, undirected, Dijkstra from 0.
        let g = WeightedGraph {
            adj: vec![
                vec![(1, 1), (2, 3)],
                vec![(0, 1), (2, 1)],
                vec![(0, 3), (1, 1)],
            ],
        };
        let algebra = ShortestPathAlgebra;
        let queue = IndexedHeap::new(
            move |a: &(i64, usize), b: &(i64, usize)| algebra.priority(&a.0, &b.0),
            |entry: &(i64, usize)| entry.1,
        );
        let (record, reason) = run(
            &g,
            Identity,
            0,
            &ShortestPathAlgebra,
            |n, e| g.adj[n][e].1,
            queue,
            &mut Accept,
        );
        assert!(reason.is_completed());
        assert_eq!(*record.label(0).unwrap(), 0);
        assert_eq!(*record.label(1).unwrap(), 1);
        assert_eq!(*record.label(2).unwrap(), 2);
    }
}
