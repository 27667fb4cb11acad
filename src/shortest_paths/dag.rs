//! DAG relaxation: shortest paths (possibly over negative weights) by
//! processing nodes in topological order, dropping the priority-search
//! engine's closed-set restriction since a topological order already
//! guarantees each node is only ever relaxed after all paths that could
//! improve it have been considered. The only valid way to run negative
//! weights through this crate's relaxation machinery outside of
//! Bellman-Ford (spec.md §4.4).

use crate::index_map::IndexMap;
use crate::search_record::{NodeState, SearchRecord};
use crate::view::GraphView;

/// `topo_order` must list nodes so that every edge goes from an earlier
/// position to a later one (as produced by
/// [`crate::structural::toposort::total`]); this does not itself verify
/// that — garbage in, garbage out, matching the DAG-only precondition.
pub fn run<G, M, W>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    topo_order: &[G::NodeId],
    mut weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> SearchRecord<G::NodeId, G::EdgeId, W, M>
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + std::ops::Add<Output = W> + PartialOrd + Default,
{
    let mut record = SearchRecord::new(source, index_map);
    record.set_label(source, W::default());

    let start = topo_order
        .iter()
        .position(|&n| n == source)
        .unwrap_or(0);

    for &node in &topo_order[start..] {
        if record.state(node) == NodeState::Undiscovered {
            continue;
        }
        let node_label = *record.label(node).expect("reachable node has a label");
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let target = graph.target(node, edge);
            let candidate = node_label + weight(node, edge);
            let improves = match record.state(target) {
                NodeState::Undiscovered => true,
                _ => *record.label(target).expect("discovered has a label") > candidate,
            };
            if improves {
                if record.state(target) == NodeState::Undiscovered {
                    record.discover(target, node, edge, candidate);
                } else {
                    record.relax(target, node, edge, candidate);
                }
            }
            edge = graph.edge_inc(node, edge);
        }
        record.close(node);
    }

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
    fn handles_negative_weights_on_a_dag() {
        let g = WeightedGraph {
            adj: vec![vec![(1, 5), (2, 1)], vec![(2, -10)], vec![]],
        };
        let topo = [0usize, 1, 2];
        let record = run(&g, Identity, 0, &topo, |n, e| g.adj[n][e].1);
        assert_eq!(*record.label(2).unwrap(), -5);
    }
}
