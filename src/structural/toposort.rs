//! Topological ordering by reversed DFS finish order, with cycle
//! detection via back-edge spotting (an edge into a node that is open
//! on the DFS stack but not yet closed), per spec.md §4.6.

use crate::adapter::SearchAdapter;
use crate::index_map::IndexMap;
use crate::property::PropertyStore;
use crate::traversal::{dfs, Directedness};
use crate::view::GraphView;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Undiscovered,
    Open,
    Closed,
}

struct OrderAdapter<'a, G: GraphView, M> {
    graph: &'a G,
    index_map: M,
    mark: PropertyStore<Mark>,
    order: Vec<G::NodeId>,
    has_cycle: bool,
}

impl<'a, G, M> SearchAdapter<G::NodeId, G::EdgeId> for OrderAdapter<'a, G, M>
where
    G: GraphView,
    M: IndexMap<G::NodeId>,
{
    fn node_preprocess(&mut self, node: G::NodeId) -> bool {
        let idx = self.index_map.index_of(&node);
        self.mark.set(idx, Mark::Open);
        true
    }

    fn edge_filter(&mut self, node: G::NodeId, edge: G::EdgeId) -> bool {
        let target = self.graph.target(node, edge);
        let idx = self.index_map.index_of(&target);
        if *self.mark.get(idx) == Mark::Open {
            self.has_cycle = true;
        }
        true
    }

    fn node_postprocess(&mut self, node: G::NodeId) -> bool {
        let idx = self.index_map.index_of(&node);
        self.mark.set(idx, Mark::Closed);
        self.order.push(node);
        true
    }
}

/// Topologically sort the subgraph reachable from `source`.
/// Returns `None` if that subgraph contains a cycle.
pub fn partial<G, M>(graph: &G, index_map: M, source: G::NodeId) -> Option<Vec<G::NodeId>>
where
    G: GraphView,
    G::NodeId: Copy,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    total_from(graph, index_map, std::iter::once(source))
}

/// Topologically sort every node in `nodes`, following edges from each
/// undiscovered node in turn. Returns `None` if the graph has a cycle.
pub fn total<G, M>(graph: &G, index_map: M, nodes: &[G::NodeId]) -> Option<Vec<G::NodeId>>
where
    G: GraphView,
    G::NodeId: Copy,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    total_from(graph, index_map, nodes.iter().copied())
}

fn total_from<G, M>(
    graph: &G,
    index_map: M,
    sources: impl Iterator<Item = G::NodeId>,
) -> Option<Vec<G::NodeId>>
where
    G: GraphView,
    G::NodeId: Copy,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    let mut adapter = OrderAdapter {
        graph,
        index_map: index_map.clone(),
        mark: PropertyStore::new(Mark::Undiscovered),
        order: Vec::new(),
        has_cycle: false,
    };

    for source in sources {
        let idx = index_map.index_of(&source);
        if *adapter.mark.get(idx) != Mark::Undiscovered {
            continue;
        }
        dfs::run(graph, index_map.clone(), source, Directedness::Directed, &mut adapter);
        if adapter.has_cycle {
            return None;
        }
    }

    adapter.order.reverse();
    Some(adapter.order)
}

/// Whether the subgraph reachable from `source` is acyclic.
pub fn is_dag<G, M>(graph: &G, index_map: M, source: G::NodeId) -> bool
where
    G: GraphView,
    G::NodeId: Copy,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    partial(graph, index_map, source).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn orders_a_simple_dag() {
        let g = VecGraph {
            adj: vec![vec![1, 2], vec![2], vec![]],
        };
        let order = total(&g, Identity, &[0, 1, 2]).unwrap();
        let pos = |n: usize| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(0) < pos(1));
        assert!(pos(1) < pos(2));
    }

    #[test]
    fn detects_a_cycle() {
        let g = VecGraph {
            adj: vec![vec![1], vec![2], vec![0]],
        };
        assert!(total(&g, Identity, &[0, 1, 2]).is_none());
        assert!(!is_dag(&g, Identity, 0));
    }
}
