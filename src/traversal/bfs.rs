//! Breadth-first search engine (C8), two-queue level alternation per
//! `original_source/breadth_search.h`.

use crate::adapter::{SearchAdapter, TerminationReason};
use crate::index_map::IndexMap;
use crate::search_record::{NodeState, SearchRecord};
use crate::traversal::Directedness;
use crate::view::GraphView;

/// Run a breadth-first search from `source`. The resulting record's label
/// for a node is its step count (BFS distance) from `source`.
pub fn run<G, M, A>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    directedness: Directedness,
    adapter: &mut A,
) -> (SearchRecord<G::NodeId, G::EdgeId, u64, M>, TerminationReason)
where
    G: GraphView,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    A: SearchAdapter<G::NodeId, G::EdgeId>,
{
    let mut record = SearchRecord::new(source, index_map);
    record.set_label(source, 0);

    let mut current_level = vec![source];
    let mut reason = TerminationReason::Completed;

    'levels: while !current_level.is_empty() {
        let mut next_level = Vec::new();
        for node in current_level.drain(..) {
            record.close(node);
            if !adapter.node_preprocess(node) {
                reason = TerminationReason::AbortedAtNodePreprocess;
                break 'levels;
            }

            let step = *record.label(node).expect("node was discovered before closing");
            let parent_edge = record.predecessor_edge(node);
            let mut edge = graph.edge_begin(node);
            while !graph.edge_end(node, edge) {
                if !adapter.edge_filter(node, edge) {
                    edge = graph.edge_inc(node, edge);
                    continue;
                }
                let is_parent_edge = directedness.is_undirected()
                    && parent_edge
                        .zip(record.predecessor_node(node))
                        .map(|(pe, _)| same_edge(&edge, &pe))
                        .unwrap_or(false);
                if is_parent_edge {
                    edge = graph.edge_inc(node, edge);
                    continue;
                }

                let target = graph.target(node, edge);
                let already_closed = record.state(target) == NodeState::Closed;
                if directedness.is_undirected() || !already_closed {
                    if !adapter.edge_process(node, edge) {
                        reason = TerminationReason::AbortedAtEdgeProcess;
                        break 'levels;
                    }
                }
                if record.state(target) == NodeState::Undiscovered {
                    record.discover(target, node, edge, step + 1);
                    next_level.push(target);
                }
                edge = graph.edge_inc(node, edge);
            }

            if !adapter.node_postprocess(node) {
                reason = TerminationReason::AbortedAtNodePostprocess;
                break 'levels;
            }
        }
        current_level = next_level;
    }

    (record, reason)
}

fn same_edge<E: PartialEq>(a: &E, b: &E) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Accept;
    use crate::index_map::Identity;
    use crate::view::GraphView as _;

    struct VecGraph {
        adj: Vec<Vec<usize>>,
    }

    impl GraphView for VecGraph {
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
            self.adj[n][e]
        }
    }

    #[test]
    fn scenario_s1_single_edge_label_is_one() {
        // S1: {(0,1,2)}, n=2, undirected BFS from 0.
        let g = VecGraph {
            adj: vec![vec![1], vec![0]],
        };
        let (record, reason) = run(&g, Identity, 0, Directedness::Undirected, &mut Accept);
        assert!(reason.is_completed());
        assert_eq!(*record.label(1).unwrap(), 1);
        assert_eq!(record.opt_dist(1), Some(&1));
    }

    #[test]
    fn single_node_graph_has_label_zero() {
        let g = VecGraph { adj: vec![vec![]] };
        let (record, _) = run(&g, Identity, 0, Directedness::Directed, &mut Accept);
        assert_eq!(*record.label(0).unwrap(), 0);
    }

    #[test]
    fn node_preprocess_can_abort_the_run() {
        struct StopAt(usize);
        impl SearchAdapter<usize, usize> for StopAt {
            fn node_preprocess(&mut self, node: usize) -> bool {
                node != self.0
            }
        }
        let g = VecGraph {
            adj: vec![vec![1], vec![2], vec![]],
        };
        let (record, reason) = run(&g, Identity, 0, Directedness::Directed, &mut StopAt(1));
        assert_eq!(reason, TerminationReason::AbortedAtNodePreprocess);
        assert_eq!(record.state(2), NodeState::Undiscovered);
    }
}
