//! Articulation points and bridges via a single DFS pass maintaining a
//! low-link value per node, per spec.md §4.6 and
//! `original_source/articulation_point.h`. The "ancestor" pointer of the
//! spec is realised here as the discovery-time of the earliest node
//! reachable via one back edge — numerically equivalent, simpler to
//! compare in Rust than carrying node handles around.

use crate::adapter::SearchAdapter;
use crate::index_map::IndexMap;
use crate::property::PropertyStore;
use crate::traversal::{dfs, Directedness};
use crate::view::GraphView;

pub struct Report<N, E> {
    pub articulation_points: Vec<N>,
    pub bridges: Vec<(N, E)>,
}

struct LowLinkAdapter<'a, G: GraphView, M> {
    graph: &'a G,
    index_map: M,
    root: G::NodeId,
    clock: u64,
    discovery: PropertyStore<Option<u64>>,
    low: PropertyStore<u64>,
    parent: PropertyStore<Option<G::NodeId>>,
    marked_articulation: PropertyStore<bool>,
    root_children: usize,
    report: Report<G::NodeId, G::EdgeId>,
}

impl<'a, G, M> SearchAdapter<G::NodeId, G::EdgeId> for LowLinkAdapter<'a, G, M>
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId>,
{
    fn node_preprocess(&mut self, node: G::NodeId) -> bool {
        let idx = self.index_map.index_of(&node);
        self.discovery.set(idx, Some(self.clock));
        self.low.set(idx, self.clock);
        self.clock += 1;
        true
    }

    fn edge_process(&mut self, node: G::NodeId, edge: G::EdgeId) -> bool {
        let target = self.graph.target(node, edge);
        let target_idx = self.index_map.index_of(&target);
        match *self.discovery.get(target_idx) {
            None => {
                self.parent.set(target_idx, Some(node));
                if node == self.root {
                    self.root_children += 1;
                }
            }
            Some(target_disc) => {
                let node_idx = self.index_map.index_of(&node);
                let node_low = *self.low.get(node_idx);
                if target_disc < node_low {
                    self.low.set(node_idx, target_disc);
                }
            }
        }
        true
    }

    fn node_postprocess(&mut self, node: G::NodeId) -> bool {
        let node_idx = self.index_map.index_of(&node);
        let node_low = *self.low.get(node_idx);
        if let Some(parent) = *self.parent.get(node_idx) {
            let parent_idx = self.index_map.index_of(&parent);
            let parent_disc = self.discovery.get(parent_idx).expect("parent already visited");

            if parent != self.root {
                if node_low >= parent_disc {
                    if !*self.marked_articulation.get(parent_idx) {
                        self.marked_articulation.set(parent_idx, true);
                        self.report.articulation_points.push(parent);
                    }
                }
            }
            if node_low > parent_disc {
                if let Some(edge) = self.find_edge_to(parent, node) {
                    self.report.bridges.push((parent, edge));
                }
            }

            let parent_low = *self.low.get(parent_idx);
            if node_low < parent_low {
                self.low.set(parent_idx, node_low);
            }
        } else if self.root_children >= 2 {
            let root_idx = self.index_map.index_of(&self.root);
            if !*self.marked_articulation.get(root_idx) {
                self.marked_articulation.set(root_idx, true);
                self.report.articulation_points.push(self.root);
            }
        }
        true
    }
}

impl<'a, G, M> LowLinkAdapter<'a, G, M>
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId>,
{
    fn find_edge_to(&self, from: G::NodeId, to: G::NodeId) -> Option<G::EdgeId> {
        let mut edge = self.graph.edge_begin(from);
        while !self.graph.edge_end(from, edge) {
            if self.graph.target(from, edge) == to {
                return Some(edge);
            }
            edge = self.graph.edge_inc(from, edge);
        }
        None
    }
}

/// Find the articulation points and bridges of the undirected graph,
/// searching only the component reachable from `root`.
pub fn find<G, M>(graph: &G, index_map: M, root: G::NodeId) -> Report<G::NodeId, G::EdgeId>
where
    G: GraphView,
    G::NodeId: PartialEq,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    let mut adapter = LowLinkAdapter {
        graph,
        index_map: index_map.clone(),
        root,
        clock: 0,
        discovery: PropertyStore::new(None),
        low: PropertyStore::new(0),
        parent: PropertyStore::new(None),
        marked_articulation: PropertyStore::new(false),
        root_children: 0,
        report: Report { articulation_points: Vec::new(), bridges: Vec::new() },
    };
    let (_, _reason) = dfs::run(graph, index_map, root, Directedness::Undirected, &mut adapter);
    adapter.report
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

    fn undirected(edges: &[(usize, usize)], n: usize) -> VecGraph {
        let mut adj = vec![Vec::new(); n];
        for &(a, b) in edges {
            adj[a].push(b);
            adj[b].push(a);
        }
        VecGraph { adj }
    }

    #[test]
    fn bridge_between_two_triangles() {
        // triangle 0-1-2, bridge 2-3, triangle 3-4-5
        let g = undirected(
            &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)],
            6,
        );
        let report = find(&g, Identity, 0);
        assert!(report.articulation_points.contains(&2));
        assert!(report.articulation_points.contains(&3));
        let bridge_nodes: Vec<(usize, usize)> = report
            .bridges
            .iter()
            .map(|&(n, e)| (n, g.adj[n][e]))
            .collect();
        assert!(bridge_nodes.contains(&(2, 3)) || bridge_nodes.contains(&(3, 2)));
    }

    #[test]
    fn single_cycle_has_no_articulation_points() {
        let g = undirected(&[(0, 1), (1, 2), (2, 0)], 3);
        let report = find(&g, Identity, 0);
        assert!(report.articulation_points.is_empty());
        assert!(report.bridges.is_empty());
    }
}
