//! Bellman-Ford: level-alternating relaxation that tolerates negative
//! edge weights and reports a negative-cycle witness rather than
//! silently returning a wrong tree, per spec.md §4.5 and
//! `original_source/bellman_ford.h`.

use crate::index_map::IndexMap;
use crate::search_record::{NodeState, SearchRecord};
use crate::view::GraphView;

pub enum BellmanFordOutcome<N, E, W, M> {
    /// No negative cycle reachable from the source: a valid
    /// shortest-path tree.
    Tree(SearchRecord<N, E, W, M>),
    /// A node that was still being relaxed at the `n`-th iteration; its
    /// predecessor chain, walked `n` times to escape any tail that is
    /// not itself on the cycle, lands back on the cycle, which
    /// [`SearchRecord::find_cycle`] can then extract.
    NegativeCycle(SearchRecord<N, E, W, M>, N),
}

/// Run Bellman-Ford from `source`. `nodes` must list every node in the
/// graph (C17's container, or the caller's own enumeration) since
/// Bellman-Ford must be able to relax every edge regardless of whether
/// it is reachable from the frontier yet.
pub fn run<G, M, W>(
    graph: &G,
    index_map: M,
    nodes: &[G::NodeId],
    source: G::NodeId,
    mut weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> BellmanFordOutcome<G::NodeId, G::EdgeId, W, M>
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + std::ops::Add<Output = W> + PartialOrd + Default,
{
    let mut record = SearchRecord::new(source, index_map);
    record.set_label(source, W::default());
    record.close(source);

    let mut active = vec![source];
    let n = nodes.len().max(1);

    for iteration in 1..=n {
        if active.is_empty() {
            break;
        }
        let mut next_active = Vec::new();
        for node in active.drain(..) {
            let node_label = *record.label(node).expect("active nodes are discovered");
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
                    record.close(target);
                    if iteration == n {
                        return BellmanFordOutcome::NegativeCycle(record, target);
                    }
                    next_active.push(target);
                }
                edge = graph.edge_inc(node, edge);
            }
        }
        active = next_active;
    }

    BellmanFordOutcome::Tree(record)
}
