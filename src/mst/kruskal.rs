//! Kruskal's algorithm: collect every edge, sort ascending by weight,
//! then accept each one that joins two still-separate components per
//! [`UnionFind`]. Per spec.md §4.7 and `original_source/kruskal.h`.

use crate::index_map::IndexMap;
use crate::union_find::UnionFind;
use crate::view::GraphView;

/// The accepted tree edges, in the order they were added, each as
/// `(from, edge, to, weight)`.
pub fn run<G, M, W>(
    graph: &G,
    index_map: M,
    nodes: &[G::NodeId],
    mut weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
) -> Vec<(G::NodeId, G::EdgeId, G::NodeId, W)>
where
    G: GraphView,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + PartialOrd,
{
    let mut candidates: Vec<(G::NodeId, G::EdgeId, G::NodeId, W)> = Vec::new();
    for &node in nodes {
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let target = graph.target(node, edge);
            candidates.push((node, edge, target, weight(node, edge)));
            edge = graph.edge_inc(node, edge);
        }
    }
    candidates.sort_by(|a, b| a.3.partial_cmp(&b.3).expect("weights are totally ordered"));

    let mut uf = UnionFind::new(index_map, nodes.len());
    let mut tree = Vec::new();
    for (from, edge, to, w) in candidates {
        if uf.union(&from, &to) {
            tree.push((from, edge, to, w));
        }
    }
    tree
}
