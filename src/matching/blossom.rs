//! Non-bipartite cardinality and weighted matching via blossom
//! contraction, per spec.md §4.11 and §3's blossom graph invariants, and
//! `petgraph`'s own `maximum_matching`. A greedy pass seeds an initial
//! cardinality matching (cheap, and shrinks the number of augmenting
//! searches the blossom phase below has to run), then every remaining
//! free node roots one alternating-tree search; odd cycles discovered
//! mid-search are contracted into a single join vertex rather than
//! modelled as their own node type, trading the blossom graph's sub-node
//! bookkeeping for a `first_inner` vertex alias table.
//!
//! [`max_weighted`] reuses this same tree-growing and blossom-contraction
//! machinery, driven by per-vertex dual potentials instead of a plain
//! reachability search, per `original_source/matching/matching.cpp`'s
//! `nonbipartite_solver_t::m_max_weighted`. It carries a restricted form
//! of that function's `expose_node` relaxation (freeing the tree's
//! cheapest vertex when no edge is tight enough to extend it), limited to
//! plain tree vertices; it does not carry `delete_blossom`, or blossom-dual
//! variables that persist across root searches — see DESIGN.md for what
//! that trades away.

use std::collections::VecDeque;

use crate::index_map::IndexMap;
use crate::matching::{unmatched, Mate};
use crate::view::GraphView;

const NONE: usize = usize::MAX;

#[derive(Clone, Copy)]
enum Label<N, E> {
    None,
    Start,
    /// `v` is on the alternating path from this outer node back to its tree's root.
    Vertex(N),
    /// Two outer nodes joined directly by an edge (a blossom-forming edge).
    Edge(E, [N; 2]),
    /// Marks a vertex visited while searching for a blossom's join vertex.
    Flag(E),
}

impl<N: PartialEq, E: PartialEq> Label<N, E> {
    fn is_outer(&self) -> bool {
        !matches!(self, Label::None | Label::Flag(_))
    }

    fn is_inner(&self) -> bool {
        !self.is_outer()
    }

    fn to_vertex(&self) -> Option<N>
    where
        N: Copy,
    {
        match self {
            Label::Vertex(v) => Some(*v),
            _ => None,
        }
    }

    fn is_flagged(&self, edge: &E) -> bool {
        matches!(self, Label::Flag(e) if e == edge)
    }
}

fn non_backtracking_dfs<G>(graph: &G, index_map: &impl IndexMap<G::NodeId>, source: G::NodeId, visited: &mut [bool], mate: &mut Mate)
where
    G: GraphView,
{
    let si = index_map.index_of(&source);
    if visited[si] {
        return;
    }
    visited[si] = true;
    let mut edge = graph.edge_begin(source);
    while !graph.edge_end(source, edge) {
        let target = graph.target(source, edge);
        let ti = index_map.index_of(&target);
        if !visited[ti] {
            mate[si] = ti;
            mate[ti] = si;
            non_backtracking_dfs(graph, index_map, target, visited, mate);
            break;
        }
        edge = graph.edge_inc(source, edge);
    }
}

/// Greedy matching: a non-backtracking DFS alternates "take this edge"
/// and "skip this edge", giving a maximal (not maximum) matching in
/// `O(V + E)`. Useful on its own when an approximate matching suffices.
pub fn greedy<G, M>(graph: &G, index_map: &M, nodes: &[G::NodeId]) -> Mate
where
    G: GraphView,
    M: IndexMap<G::NodeId>,
{
    let mut mate = unmatched(nodes.len());
    let mut visited = vec![false; nodes.len()];
    for &node in nodes {
        non_backtracking_dfs(graph, index_map, node, &mut visited, &mut mate);
    }
    mate
}

/// Maximum cardinality matching over a general (not-necessarily-bipartite)
/// graph, by Gabow's blossom algorithm. `O(V^3)`. `nodes` must be dense:
/// `nodes[index_map.index_of(&n)] == n` for every node `n`.
pub fn maximum_cardinality<G, M>(graph: &G, index_map: M, nodes: &[G::NodeId]) -> Mate
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    G::EdgeId: PartialEq + Copy,
    M: IndexMap<G::NodeId>,
{
    let n = nodes.len();
    let mut mate = greedy(graph, &index_map, nodes);

    let mut label: Vec<Label<G::NodeId, G::EdgeId>> = vec![Label::None; n];
    let mut first_inner = vec![NONE; n];
    let mut visited = vec![false; n];

    for start_idx in 0..n {
        if mate[start_idx] != start_idx {
            continue; // already matched; only free nodes root a search.
        }
        let start = nodes[start_idx];
        label.iter_mut().for_each(|l| *l = Label::None);
        label[start_idx] = Label::Start;
        first_inner[start_idx] = NONE;
        visited.iter_mut().for_each(|v| *v = false);
        visited[start_idx] = true;

        let mut queue = VecDeque::new();
        queue.push_back(start);

        'search: while let Some(outer) = queue.pop_front() {
            let outer_idx = index_map.index_of(&outer);
            let mut edge = graph.edge_begin(outer);
            while !graph.edge_end(outer, edge) {
                let other = graph.target(outer, edge);
                if other == outer {
                    edge = graph.edge_inc(outer, edge);
                    continue;
                }
                let other_idx = index_map.index_of(&other);

                if mate[other_idx] == other_idx && other != start {
                    mate[other_idx] = outer_idx;
                    augment_path(&index_map, outer, other, &mut mate, &label, nodes);
                    break 'search;
                } else if label[other_idx].is_outer() {
                    find_join(&index_map, outer, other, edge, &mate, &mut label, &mut first_inner, nodes, |labeled| {
                        let li = index_map.index_of(&labeled);
                        if !visited[li] {
                            visited[li] = true;
                            queue.push_back(labeled);
                        }
                    });
                } else {
                    let mate_idx = mate[other_idx];
                    if label[mate_idx].is_inner() {
                        label[mate_idx] = Label::Vertex(outer);
                        first_inner[mate_idx] = other_idx;
                    }
                    if !visited[mate_idx] {
                        visited[mate_idx] = true;
                        queue.push_back(nodes[mate_idx]);
                    }
                }
                edge = graph.edge_inc(outer, edge);
            }
        }
    }
    mate
}

#[allow(clippy::too_many_arguments)]
fn find_join<N, E, M>(
    index_map: &M,
    outer: N,
    other: N,
    edge: E,
    mate: &Mate,
    label: &mut [Label<N, E>],
    first_inner: &mut [usize],
    nodes: &[N],
    mut visitor: impl FnMut(N),
) where
    N: PartialEq + Copy,
    E: PartialEq + Copy,
    M: IndexMap<N>,
{
    let outer_idx = index_map.index_of(&outer);
    let other_idx = index_map.index_of(&other);
    let mut left = first_inner[outer_idx];
    let mut right = first_inner[other_idx];
    if left == right {
        return;
    }
    label[left] = Label::Flag(edge);
    label[right] = Label::Flag(edge);

    let join = loop {
        if right != NONE {
            std::mem::swap(&mut left, &mut right);
        }
        let via = label[mate[left]].to_vertex().expect("inner vertex's mate is labelled");
        left = first_inner[index_map.index_of(&via)];
        if !label[left].is_flagged(&edge) {
            label[left] = Label::Flag(edge);
        } else {
            break left;
        }
    };

    for endpoint in [outer_idx, other_idx] {
        let mut inner = first_inner[endpoint];
        while inner != join {
            visitor(nodes[inner]);
            label[inner] = Label::Edge(edge, [outer, other]);
            first_inner[inner] = join;
            let via = label[mate[inner]].to_vertex().expect("inner vertex's mate is labelled");
            inner = first_inner[index_map.index_of(&via)];
        }
    }

    for (idx, lbl) in label.iter().enumerate() {
        if lbl.is_outer() && label[first_inner[idx]].is_outer() {
            first_inner[idx] = join;
        }
    }
}

fn augment_path<N, E, M>(index_map: &M, outer: N, other: N, mate: &mut Mate, label: &[Label<N, E>], nodes: &[N])
where
    N: PartialEq + Copy,
    E: PartialEq + Copy,
    M: IndexMap<N>,
{
    let outer_idx = index_map.index_of(&outer);
    let other_idx = index_map.index_of(&other);
    let previous_mate = mate[outer_idx];
    mate[outer_idx] = other_idx;

    if mate[previous_mate] != outer_idx {
        return; // path end: the rest of the chain is already consistent.
    }
    match label[outer_idx] {
        Label::Vertex(vertex) => {
            mate[previous_mate] = index_map.index_of(&vertex);
            augment_path(index_map, vertex, nodes[previous_mate], mate, label, nodes);
        }
        Label::Edge(_, [source, target]) => {
            augment_path(index_map, source, target, mate, label, nodes);
            augment_path(index_map, target, source, mate, label, nodes);
        }
        _ => unreachable!("inner vertex reached via augmenting edge always carries Vertex or Edge"),
    }
}

/// Maximum-weight matching over a general graph that need not be perfect.
/// Every vertex gets a potential initialized to its heaviest incident
/// edge; each round picks the globally cheapest admissible action across
/// every outer vertex — extend the tree along a tight edge, or contract a
/// blossom when a tight edge lands on a vertex that is already outer in
/// this tree — exactly like [`bipartite::max_weighted`], plus blossom
/// contraction reusing [`find_join`] and [`augment_path`] from
/// [`maximum_cardinality`] above. A round-local union-find over the
/// vertices a blossom has swallowed (rebuilt fresh per root) keeps an
/// edge whose endpoints already share a blossom from being picked twice
/// in a row, which would otherwise never make progress.
///
/// Potentials are tracked at twice their true value throughout: a tight
/// edge between two already-outer vertices must split its slack between
/// both endpoints, which only ever divides evenly once everything is
/// pre-doubled (the standard integer-arithmetic trick for this family of
/// algorithms — matching.cpp uses floating-point potentials for the same
/// reason). When no edge is cheap enough to beat giving up, the tree's
/// cheapest-potential vertex is exposed (freed, flipping the alternating
/// path above it) exactly as [`bipartite::max_weighted`]'s case 1 does —
/// without this, a root processed early can lock in a cheap pairing a
/// later root could have improved on, which is wrong even on graphs with
/// no odd cycle to contract. Blossom-contracted members that
/// matching.cpp's `search_data_t` would track as `ext_quasi_node_t` are
/// not exposable here (only a plain tree vertex or the root is), which is
/// this function's one remaining gap relative to the fully general
/// `expose_node`/`delete_blossom` machinery — see DESIGN.md. `nodes` must
/// be dense, as [`maximum_cardinality`] requires. `O(V^3)`.
///
/// Per `original_source/matching/matching.cpp`'s
/// `nonbipartite_solver_t::m_max_weighted<false>`.
///
/// [`bipartite::max_weighted`]: crate::matching::bipartite::max_weighted
pub fn max_weighted<G, M>(graph: &G, index_map: M, nodes: &[G::NodeId], weight: impl Fn(G::NodeId, G::EdgeId) -> i64) -> (Mate, i64)
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    G::EdgeId: PartialEq + Copy,
    M: IndexMap<G::NodeId>,
{
    let n = nodes.len();
    let mut mate = unmatched(n);
    let mut pot = vec![0i64; n]; // tracked at 2x true value throughout.
    for (idx, &node) in nodes.iter().enumerate() {
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let doubled = 2 * weight(node, edge);
            if doubled > pot[idx] {
                pot[idx] = doubled;
            }
            edge = graph.edge_inc(node, edge);
        }
    }

    for start_idx in 0..n {
        if mate[start_idx] != start_idx {
            continue;
        }
        let start = nodes[start_idx];
        let mut label: Vec<Label<G::NodeId, G::EdgeId>> = vec![Label::None; n];
        let mut first_inner = vec![NONE; n];
        let mut blossom_of: Vec<usize> = (0..n).collect();
        label[start_idx] = Label::Start;

        'tree: loop {
            let exts: Vec<usize> = (0..n).filter(|&i| label[i].is_outer()).collect();
            // (from, edge, to, both endpoints already outer, potential decrement needed to make it tight)
            let mut best: Option<(usize, G::EdgeId, usize, bool, i64)> = None;
            for &from_idx in &exts {
                let from = nodes[from_idx];
                let mut edge = graph.edge_begin(from);
                while !graph.edge_end(from, edge) {
                    let to = graph.target(from, edge);
                    if to == from {
                        edge = graph.edge_inc(from, edge);
                        continue;
                    }
                    let to_idx = index_map.index_of(&to);
                    if union_find(&blossom_of, from_idx) == union_find(&blossom_of, to_idx) {
                        edge = graph.edge_inc(from, edge);
                        continue;
                    }
                    let both_outer = label[to_idx].is_outer();
                    let actionable = both_outer || mate[to_idx] == to_idx || label[mate[to_idx]].is_inner();
                    if !actionable {
                        edge = graph.edge_inc(from, edge);
                        continue;
                    }
                    let slack = pot[from_idx] + pot[to_idx] - 2 * weight(from, edge);
                    let delta = if both_outer { slack / 2 } else { slack };
                    if best.map_or(true, |(_, _, _, _, d)| delta < d) {
                        best = Some((from_idx, edge, to_idx, both_outer, delta));
                    }
                    edge = graph.edge_inc(from, edge);
                }
            }
            // The cheapest exposable outer vertex: giving up on the tree
            // by freeing it (flipping the alternating path above it) is
            // always available and bounds how far potentials may drop.
            let mut cheapest_ext = None;
            for &ext in &exts {
                if ext != start_idx && label[ext].to_vertex().is_none() {
                    continue; // blossom-absorbed member: not exposable here.
                }
                if cheapest_ext.is_none_or(|c| pot[ext] < pot[c]) {
                    cheapest_ext = Some(ext);
                }
            }

            let take_edge = match (best, cheapest_ext) {
                (Some((.., edge_delta)), Some(c)) => edge_delta <= pot[c],
                (Some(_), None) => true,
                (None, _) => false,
            };

            let Some(delta) = (if take_edge {
                best.map(|(.., d)| d)
            } else {
                cheapest_ext.map(|c| pot[c])
            }) else {
                break; // stuck: no admissible edge and nothing exposable.
            };

            for &ext in &exts {
                pot[ext] -= delta;
                let partner = mate[ext];
                if partner != ext && !label[partner].is_outer() {
                    pot[partner] += delta;
                }
            }

            if take_edge {
                let (from_idx, edge, to_idx, both_outer, _) = best.expect("take_edge implies an edge candidate");
                let from = nodes[from_idx];
                let to = nodes[to_idx];
                if both_outer {
                    find_join(&index_map, from, to, edge, &mate, &mut label, &mut first_inner, nodes, |labeled| {
                        union(&mut blossom_of, index_map.index_of(&labeled), from_idx);
                    });
                    union(&mut blossom_of, from_idx, to_idx);
                } else if mate[to_idx] == to_idx && to != start {
                    mate[to_idx] = from_idx;
                    augment_path(&index_map, from, to, &mut mate, &label, nodes);
                    break 'tree;
                } else {
                    let mate_idx = mate[to_idx];
                    if label[mate_idx].is_inner() {
                        label[mate_idx] = Label::Vertex(from);
                        first_inner[mate_idx] = to_idx;
                    }
                }
            } else {
                let target_idx = cheapest_ext.expect("checked above");
                if target_idx != start_idx {
                    expose(&index_map, target_idx, &mut mate, &label, nodes);
                }
                break 'tree;
            }
        }
    }

    let total = total_weight(graph, &index_map, nodes, &mate, &weight);
    (mate, total)
}

/// Gives up on a tree vertex that no longer pays for itself: frees it from
/// its current match and flips the alternating path above it so its old
/// partner is matched to that path's next link instead. Per
/// `original_source/matching/matching.cpp`'s `expose_node`, restricted to
/// plain [`Label::Vertex`]-labelled tree members (the root is handled by
/// the caller, which never exposes `start_idx` itself).
fn expose<N, E, M>(index_map: &M, target_idx: usize, mate: &mut Mate, label: &[Label<N, E>], nodes: &[N])
where
    N: PartialEq + Copy,
    E: PartialEq + Copy,
    M: IndexMap<N>,
{
    let partner_idx = mate[target_idx];
    let ancestor = label[target_idx].to_vertex().expect("exposable node is Vertex-labelled");
    mate[partner_idx] = index_map.index_of(&ancestor);
    mate[target_idx] = target_idx;
    augment_path(index_map, ancestor, nodes[partner_idx], mate, label, nodes);
}

fn union_find(parent: &[usize], mut x: usize) -> usize {
    while parent[x] != x {
        x = parent[x];
    }
    x
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = union_find(parent, a);
    let rb = union_find(parent, b);
    if ra != rb {
        parent[ra] = rb;
    }
}

fn total_weight<G, M>(graph: &G, index_map: &M, nodes: &[G::NodeId], mate: &Mate, weight: &impl Fn(G::NodeId, G::EdgeId) -> i64) -> i64
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    M: IndexMap<G::NodeId>,
{
    let mut total = 0i64;
    for (idx, &node) in nodes.iter().enumerate() {
        let partner = mate[idx];
        if partner <= idx {
            continue; // unmatched (partner == idx), or already counted from the other side.
        }
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let target = graph.target(node, edge);
            if index_map.index_of(&target) == partner {
                total += weight(node, edge);
                break;
            }
            edge = graph.edge_inc(node, edge);
        }
    }
    total
}
