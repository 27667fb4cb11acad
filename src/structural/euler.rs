//! Eulerian tours: existence tests and Hierholzer's construction, for
//! both directed and undirected graphs, per spec.md §4.6 and
//! `original_source/eulerian_tour.h`.

use crate::index_map::IndexMap;
use crate::property::PropertyStore;
use crate::view::GraphView;

/// Degree bookkeeping a caller supplies once per node: `out_degree` for
/// directed graphs is edges leaving the node; for undirected graphs it is
/// simply the node's degree (and `in_degree` should equal it).
pub struct DegreeReport {
    pub in_degree: Vec<i64>,
    pub out_degree: Vec<i64>,
}

/// Whether a directed graph restricted to `nodes` has an Eulerian
/// circuit: every node's in-degree equals its out-degree, and the graph
/// (ignoring isolated nodes) is connected when edges are treated as
/// undirected. Connectivity is the caller's responsibility to verify
/// (e.g. via [`crate::structural::scc`]); this only checks the degree
/// condition.
pub fn has_eulerian_circuit_directed(degrees: &DegreeReport) -> bool {
    degrees
        .in_degree
        .iter()
        .zip(&degrees.out_degree)
        .all(|(i, o)| i == o)
}

/// Whether a directed graph has an Eulerian path (not necessarily
/// closed): at most one node with out-degree exactly one more than
/// in-degree, at most one with in-degree exactly one more, and every
/// other node balanced.
pub fn has_eulerian_path_directed(degrees: &DegreeReport) -> bool {
    let mut starts = 0;
    let mut ends = 0;
    for (&i, &o) in degrees.in_degree.iter().zip(&degrees.out_degree) {
        if o == i + 1 {
            starts += 1;
        } else if i == o + 1 {
            ends += 1;
        } else if i != o {
            return false;
        }
    }
    starts <= 1 && ends <= 1
}

/// Whether an undirected graph has an Eulerian circuit: every node has
/// even degree.
pub fn has_eulerian_circuit_undirected(degree: &[i64]) -> bool {
    degree.iter().all(|&d| d % 2 == 0)
}

/// Whether an undirected graph has an Eulerian path: zero or exactly two
/// odd-degree nodes.
pub fn has_eulerian_path_undirected(degree: &[i64]) -> bool {
    degree.iter().filter(|&&d| d % 2 != 0).count() <= 2
}

/// Hierholzer's algorithm: builds an Eulerian tour starting at `source`
/// by repeatedly walking until stuck, then splicing in detours from the
/// first node on the current tour with an unused edge. `edge_index_map`
/// gives each edge a dense slot in the `used` bitset; `edge_count` sizes
/// it. Assumes the degree conditions already hold; a graph that does not
/// satisfy them produces a tour that does not traverse every edge, which
/// callers can detect by comparing the tour's edge count against the
/// graph's.
pub fn hierholzer<G, M, EM>(
    graph: &G,
    index_map: M,
    edge_index_map: EM,
    source: G::NodeId,
    edge_count: usize,
) -> Vec<(G::NodeId, G::EdgeId)>
where
    G: GraphView,
    G::NodeId: Copy,
    G::EdgeId: Copy,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId>,
{
    let mut next_edge: PropertyStore<G::EdgeId> = PropertyStore::new(graph.edge_begin(source));
    let mut used = vec![false; edge_count];

    let mut tour: Vec<(G::NodeId, G::EdgeId)> = Vec::new();
    let mut stack: Vec<(G::NodeId, Option<G::EdgeId>)> = vec![(source, None)];

    while let Some(&(node, arrival_edge)) = stack.last() {
        let idx = index_map.index_of(&node);
        let mut cursor = *next_edge.get(idx);
        let mut advanced = false;
        while !graph.edge_end(node, cursor) {
            let slot = edge_index_map.index_of(&cursor);
            if !used[slot] {
                used[slot] = true;
                next_edge.set(idx, graph.edge_inc(node, cursor));
                let target = graph.target(node, cursor);
                stack.push((target, Some(cursor)));
                advanced = true;
                break;
            }
            cursor = graph.edge_inc(node, cursor);
            next_edge.set(idx, cursor);
        }
        if !advanced {
            stack.pop();
            if let Some(edge) = arrival_edge {
                tour.push((node, edge));
            }
        }
    }

    tour.reverse();
    tour
}
