//! Depth-first search engine (C8), explicit stack of (node, current edge)
//! per `original_source/depth_search.h`. Label is the (discovery, finish)
//! time pair.

use crate::adapter::{SearchAdapter, TerminationReason};
use crate::index_map::IndexMap;
use crate::search_record::{NodeState, SearchRecord};
use crate::traversal::Directedness;
use crate::view::GraphView;

/// (discovery time, finish time). Finish is `None` until the node is
/// popped from the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfsLabel {
    pub discovery: u64,
    pub finish: Option<u64>,
}

struct Frame<N, E> {
    node: N,
    edge: E,
}

/// Run a depth-first search from `source`.
pub fn run<G, M, A>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    directedness: Directedness,
    adapter: &mut A,
) -> (SearchRecord<G::NodeId, G::EdgeId, DfsLabel, M>, TerminationReason)
where
    G: GraphView,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    A: SearchAdapter<G::NodeId, G::EdgeId>,
{
    let mut record = SearchRecord::new(source, index_map);
    let mut clock: u64 = 0;
    let mut reason = TerminationReason::Completed;

    record.set_label(
        source,
        DfsLabel { discovery: clock, finish: None },
    );
    if !adapter.node_preprocess(source) {
        return (record, TerminationReason::AbortedAtNodePreprocess);
    }
    clock += 1;

    let mut stack = vec![Frame { node: source, edge: graph.edge_begin(source) }];

    'outer: while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        if graph.edge_end(node, frame.edge) {
            if !adapter.node_postprocess(node) {
                reason = TerminationReason::AbortedAtNodePostprocess;
                break 'outer;
            }
            let discovery = record.label(node).expect("discovered on push").discovery;
            record.set_label(node, DfsLabel { discovery, finish: Some(clock) });
            clock += 1;
            record.close(node);
            stack.pop();
            continue;
        }

        let edge = frame.edge;
        frame.edge = graph.edge_inc(node, edge);

        let parent_edge = record.predecessor_edge(node);
        if directedness.is_undirected() && parent_edge == Some(edge) {
            continue;
        }

        if !adapter.edge_filter(node, edge) {
            continue;
        }
        if !adapter.edge_process(node, edge) {
            reason = TerminationReason::AbortedAtEdgeProcess;
            break 'outer;
        }

        let target = graph.target(node, edge);
        if record.state(target) == NodeState::Undiscovered {
            record.discover(
                target,
                node,
                edge,
                DfsLabel { discovery: clock, finish: None },
            );
            if !adapter.node_preprocess(target) {
                reason = TerminationReason::AbortedAtNodePreprocess;
                break 'outer;
            }
            clock += 1;
            stack.push(Frame { node: target, edge: graph.edge_begin(target) });
        }
    }

    (record, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Accept;
    use crate::index_map::Identity;

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
    fn discovery_and_finish_nest_properly_for_descendants() {
        let g = VecGraph {
            adj: vec![vec![1], vec![2], vec![]],
        };
        let (record, reason) = run(&g, Identity, 0, Directedness::Directed, &mut Accept);
        assert!(reason.is_completed());
        let l0 = *record.label(0).unwrap();
        let l1 = *record.label(1).unwrap();
        let l2 = *record.label(2).unwrap();
        assert!(l0.discovery < l1.discovery);
        assert!(l1.discovery < l2.discovery);
        assert!(l2.finish.unwrap() < l1.finish.unwrap());
        assert!(l1.finish.unwrap() < l0.finish.unwrap());
    }

    #[test]
    fn undirected_dfs_suppresses_immediate_parent_edge() {
        // 0 <-> 1 as two directed edges (simulating an undirected edge).
        let g = VecGraph {
            adj: vec![vec![1], vec![0]],
        };
        struct RecordEdges(Vec<(usize, usize)>);
        impl SearchAdapter<usize, usize> for RecordEdges {
            fn edge_process(&mut self, node: usize, edge: usize) -> bool {
                self.0.push((node, edge));
                true
            }
        }
        let mut rec = RecordEdges(Vec::new());
        let (_, reason) = run(&g, Identity, 0, Directedness::Undirected, &mut rec);
        assert!(reason.is_completed());
        // the 1 -> 0 back-edge to the immediate parent must not appear
        assert!(!rec.0.contains(&(1, 0)));
    }
}
