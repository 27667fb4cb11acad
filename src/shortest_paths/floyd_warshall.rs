//! Floyd-Warshall: all-pairs shortest paths via median-node
//! concatenation, one [`SearchRecord`] per source, per spec.md §4.5 and
//! `original_source/floyd_warshall.h`.

use crate::index_map::IndexMap;
use crate::search_record::{NodeState, SearchRecord};
use crate::view::GraphView;

pub enum FloydWarshallOutcome<N, E, W, M> {
    /// One shortest-path tree per source, indexed in the same order as
    /// the `nodes` slice passed in.
    AllPairs(Vec<SearchRecord<N, E, W, M>>),
    /// A negative cycle was detected while computing the tree rooted at
    /// `nodes[source_index]`; the cycle can be extracted from that tree
    /// with `find_cycle(nodes[source_index])`.
    NegativeCycle {
        trees: Vec<SearchRecord<N, E, W, M>>,
        source_index: usize,
    },
}

pub fn run<G, M, W>(
    graph: &G,
    index_map: M,
    nodes: &[G::NodeId],
    mut weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> FloydWarshallOutcome<G::NodeId, G::EdgeId, W, M>
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + std::ops::Add<Output = W> + PartialOrd + Default,
{
    let mut trees: Vec<SearchRecord<G::NodeId, G::EdgeId, W, M>> = nodes
        .iter()
        .map(|&s| {
            let mut tree = SearchRecord::new(s, index_map.clone());
            tree.set_label(s, W::default());
            tree.close(s);
            let mut edge = graph.edge_begin(s);
            while !graph.edge_end(s, edge) {
                let target = graph.target(s, edge);
                let w = weight(s, edge);
                if tree.state(target) == NodeState::Undiscovered {
                    tree.discover(target, s, edge, w);
                    tree.close(target);
                } else {
                    let current = *tree.label(target).expect("discovered has a label");
                    if w < current {
                        tree.relax(target, s, edge, w);
                    }
                }
                edge = graph.edge_inc(s, edge);
            }
            tree
        })
        .collect();

    for &median in nodes {
        // snapshot the (source, median) and (median, target) edges needed
        // this round before mutating any tree, so relaxations within the
        // same median iteration don't cascade (spec.md describes a single
        // concatenation pass per median).
        let median_edges: Vec<(G::NodeId, G::EdgeId, G::NodeId, W)> = {
            let mut v = Vec::new();
            let mut edge = graph.edge_begin(median);
            while !graph.edge_end(median, edge) {
                let target = graph.target(median, edge);
                v.push((median, edge, target, weight(median, edge)));
                edge = graph.edge_inc(median, edge);
            }
            v
        };

        for (source_index, tree) in trees.iter_mut().enumerate() {
            if tree.state(median) != NodeState::Closed {
                continue;
            }
            let via_median = *tree.label(median).expect("closed has a label");
            for &(_m, m_edge, target, w) in &median_edges {
                let candidate = via_median + w;
                let improves = match tree.state(target) {
                    NodeState::Undiscovered => true,
                    _ => *tree.label(target).expect("discovered has a label") > candidate,
                };
                if improves {
                    if tree.state(target) == NodeState::Undiscovered {
                        tree.discover(target, median, m_edge, candidate);
                        tree.close(target);
                    } else {
                        tree.relax(target, median, m_edge, candidate);
                        tree.close(target);
                    }
                    // a source's own predecessor changing away from itself
                    // is the negative-cycle witness (spec.md §4.5).
                    let root = tree.root();
                    if target == root && tree.predecessor_node(root) != Some(root) {
                        return FloydWarshallOutcome::NegativeCycle { trees, source_index };
                    }
                }
            }
        }
    }

    FloydWarshallOutcome::AllPairs(trees)
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
    fn all_pairs_distances_for_a_triangle() {
        let g = WeightedGraph {
            adj: vec![
                vec![(1, 1), (2, 4)],
                vec![(2, 1)],
                vec![],
            ],
        };
        let nodes = [0, 1, 2];
        match run(&g, Identity, &nodes, |n, e| g.adj[n][e].1) {
            FloydWarshallOutcome::AllPairs(trees) => {
                assert_eq!(*trees[0].label(2).unwrap(), 2);
                assert_eq!(*trees[1].label(2).unwrap(), 1);
            }
            FloydWarshallOutcome::NegativeCycle { .. } => panic!("no cycle expected"),
        }
    }

    #[test]
    fn detects_negative_cycle() {
        let g = WeightedGraph {
            adj: vec![vec![(1, 1)], vec![(0, -2)]],
        };
        let nodes = [0, 1];
        match run(&g, Identity, &nodes, |n, e| g.adj[n][e].1) {
            FloydWarshallOutcome::NegativeCycle { .. } => {}
            FloydWarshallOutcome::AllPairs(_) => panic!("negative cycle expected"),
        }
    }
}
