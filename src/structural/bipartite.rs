//! Bipartiteness via two-colouring BFS: the source gets colour 0, every
//! newly discovered node the opposite colour of its predecessor;
//! `edge_process` rejects an edge whose endpoints share a colour — the
//! witness of an odd cycle. Per spec.md §4.6.

use crate::adapter::{SearchAdapter, TerminationReason};
use crate::index_map::IndexMap;
use crate::property::PropertyStore;
use crate::traversal::{bfs, Directedness};
use crate::view::GraphView;

struct ColourAdapter<'a, G: GraphView, M> {
    graph: &'a G,
    index_map: M,
    colour: PropertyStore<Option<u8>>,
}

impl<'a, G, M> SearchAdapter<G::NodeId, G::EdgeId> for ColourAdapter<'a, G, M>
where
    G: GraphView,
    M: IndexMap<G::NodeId>,
{
    fn node_preprocess(&mut self, node: G::NodeId) -> bool {
        let idx = self.index_map.index_of(&node);
        if self.colour.get(idx).is_none() {
            self.colour.set(idx, Some(0));
        }
        true
    }

    fn edge_process(&mut self, node: G::NodeId, edge: G::EdgeId) -> bool {
        let target = self.graph.target(node, edge);
        let node_idx = self.index_map.index_of(&node);
        let target_idx = self.index_map.index_of(&target);
        let node_colour = self.colour.get(node_idx).expect("node already coloured");
        match *self.colour.get(target_idx) {
            Some(c) => c != node_colour,
            None => {
                self.colour.set(target_idx, Some(1 - node_colour));
                true
            }
        }
    }
}

/// Check bipartiteness of the component reachable from `source`,
/// treating the graph as undirected.
pub fn from_source<G, M>(graph: &G, index_map: M, source: G::NodeId) -> bool
where
    G: GraphView,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    let mut adapter = ColourAdapter {
        graph,
        index_map: index_map.clone(),
        colour: PropertyStore::new(None),
    };
    let (_, reason) = bfs::run(graph, index_map, source, Directedness::Undirected, &mut adapter);
    reason == TerminationReason::Completed
}

/// Check bipartiteness over every component of the graph.
pub fn whole_graph<G, M>(graph: &G, index_map: M, nodes: &[G::NodeId]) -> bool
where
    G: GraphView,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    let mut adapter = ColourAdapter {
        graph,
        index_map: index_map.clone(),
        colour: PropertyStore::new(None),
    };
    for &source in nodes {
        let idx = index_map.index_of(&source);
        if adapter.colour.get(idx).is_some() {
            continue;
        }
        let (_, reason) = bfs::run(
            graph,
            index_map.clone(),
            source,
            Directedness::Undirected,
            &mut adapter,
        );
        if reason != TerminationReason::Completed {
            return false;
        }
    }
    true
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
    fn scenario_s4_even_cycle_is_bipartite() {
        // S4: {(0,1,3),(1,2,2),(2,3,1),(3,0,0)}, n=4.
        let g = VecGraph {
            adj: vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![2, 0]],
        };
        assert!(from_source(&g, Identity, 0));
    }

    #[test]
    fn odd_cycle_is_not_bipartite() {
        let g = VecGraph {
            adj: vec![vec![1, 2], vec![0, 2], vec![0, 1]],
        };
        assert!(!from_source(&g, Identity, 0));
    }
}
