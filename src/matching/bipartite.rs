//! Bipartite matching: cardinality via Kuhn's augmenting-path algorithm,
//! a minimum-cost perfect matching via the Hungarian dual-variable
//! method, and a maximum-weight matching that need not be perfect via the
//! same dual-variable technique generalized with an "expose the cheapest
//! exposed vertex" relaxation. Per spec.md §4.11 and
//! `original_source/matching/matching.{h,cpp}`.

use crate::index_map::IndexMap;
use crate::matching::{unmatched, Mate};
use crate::view::GraphView;

/// Maximum cardinality matching over a bipartite graph whose edges all
/// run from `left` to the opposite side. `nodes` must be dense:
/// `nodes[index_map.index_of(&n)] == n` for every node `n`, left or
/// right, so a match index can be turned back into a handle to recurse
/// into. `O(V * E)`.
pub fn cardinality<G, M>(graph: &G, index_map: M, nodes: &[G::NodeId], left: &[G::NodeId]) -> Mate
where
    G: GraphView,
    G::NodeId: Copy + PartialEq,
    M: IndexMap<G::NodeId>,
{
    let mut mate = unmatched(nodes.len());
    for &root in left {
        let root_idx = index_map.index_of(&root);
        if mate[root_idx] != root_idx {
            continue;
        }
        let mut visited = vec![false; nodes.len()];
        try_augment(graph, &index_map, nodes, root, &mut visited, &mut mate);
    }
    mate
}

fn try_augment<G, M>(graph: &G, index_map: &M, nodes: &[G::NodeId], node: G::NodeId, visited: &mut [bool], mate: &mut Mate) -> bool
where
    G: GraphView,
    G::NodeId: Copy + PartialEq,
    M: IndexMap<G::NodeId>,
{
    let mut edge = graph.edge_begin(node);
    while !graph.edge_end(node, edge) {
        let target = graph.target(node, edge);
        let target_idx = index_map.index_of(&target);
        if !visited[target_idx] {
            visited[target_idx] = true;
            let free = mate[target_idx] == target_idx;
            if free || try_augment(graph, index_map, nodes, nodes[mate[target_idx]], visited, mate) {
                let node_idx = index_map.index_of(&node);
                mate[target_idx] = node_idx;
                mate[node_idx] = target_idx;
                return true;
            }
        }
        edge = graph.edge_inc(node, edge);
    }
    false
}

/// Minimum-cost perfect matching between two equal-size sides `0..n`
/// (the Hungarian / Kuhn-Munkres algorithm), given as a dense cost
/// function rather than a sparse [`GraphView`] — the dual-variable
/// bookkeeping only makes sense when every left/right pair is a
/// candidate edge. A missing edge is modelled as `infinity`; if every
/// perfect matching would have to use one, the instance is infeasible
/// and this returns `None`. `O(n^3)`.
pub fn weighted_perfect<W>(n: usize, cost: impl Fn(usize, usize) -> W, infinity: W) -> Option<(Vec<usize>, W)>
where
    W: Copy + Default + PartialOrd + std::ops::Add<Output = W> + std::ops::Sub<Output = W>,
{
    // `u`/`v` are the dual potentials on the left/right sides; `p[j]` is
    // the left node currently matched to right node `j` (`n` means
    // unmatched), and `way[j]` is the left node `j` was most recently
    // reached from, used to walk the augmenting path back once a free
    // right node is found.
    let mut u = vec![W::default(); n + 1];
    let mut v = vec![W::default(); n + 1];
    let mut p = vec![n; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![infinity; n + 1];
        let mut used = vec![false; n + 1];
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = infinity;
            let mut j1 = 0usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let edge_cost = if i0 == 0 { infinity } else { cost(i0 - 1, j - 1) };
                let reduced = if edge_cost >= infinity { infinity } else { edge_cost - u[i0] - v[j] };
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            if delta >= infinity {
                return None; // every remaining edge is missing: no perfect matching.
            }
            for j in 0..=n {
                if used[j] {
                    u[p[j]] = u[p[j]] + delta;
                    v[j] = v[j] - delta;
                } else {
                    minv[j] = minv[j] - delta;
                }
            }
            j0 = j1;
            if p[j0] == n {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut left_to_right = vec![n; n];
    for j in 1..=n {
        if p[j] != n {
            left_to_right[p[j] - 1] = j - 1;
        }
    }
    let total = (0..n).fold(W::default(), |acc, i| acc + cost(i, left_to_right[i]));
    Some((left_to_right, total))
}

/// Maximum-weight matching over a bipartite graph that need not be
/// perfect: every `left` node gets a potential initialized to its
/// heaviest incident edge, and each round either extends the alternating
/// tree along the tightest admissible edge (`pot[from] + pot[to] -
/// weight`), or, if giving up on the current tree is cheaper, exposes the
/// tree's cheapest potential node and starts fresh from the next root.
/// Per `original_source/matching/matching.cpp`'s
/// `bipartite_solver_t::m_max_weighted<false>` and its `m_augment`.
/// `nodes` must be dense, the same way [`cardinality`] requires. `O(V^3)`.
pub fn max_weighted<G, M, W>(graph: &G, index_map: M, nodes: &[G::NodeId], left: &[G::NodeId], weight: impl Fn(G::NodeId, G::EdgeId) -> W) -> (Mate, W)
where
    G: GraphView,
    G::NodeId: Copy + PartialEq,
    M: IndexMap<G::NodeId>,
    W: Copy + Default + PartialOrd + std::ops::Add<Output = W> + std::ops::Sub<Output = W>,
{
    let n = nodes.len();
    let mut mate = unmatched(n);
    let mut pot = vec![W::default(); n];
    for &node in left {
        let idx = index_map.index_of(&node);
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let w = weight(node, edge);
            if w > pot[idx] {
                pot[idx] = w;
            }
            edge = graph.edge_inc(node, edge);
        }
    }

    for &root in left {
        let root_idx = index_map.index_of(&root);
        if mate[root_idx] != root_idx {
            continue;
        }
        // `prev[v] == v` means `v` is not in the current alternating tree;
        // every tree node other than `root` has `prev[v]` set to the node
        // that pulled it in, exactly mirroring the C++ `prev` array.
        let mut prev = (0..n).collect::<Vec<_>>();
        let mut exts = vec![root_idx];

        'tree: loop {
            let mut best: Option<(usize, G::EdgeId, usize, W)> = None;
            for &from_idx in &exts {
                let from = nodes[from_idx];
                let mut edge = graph.edge_begin(from);
                while !graph.edge_end(from, edge) {
                    let to = graph.target(from, edge);
                    let to_idx = index_map.index_of(&to);
                    if prev[to_idx] != to_idx {
                        edge = graph.edge_inc(from, edge);
                        continue;
                    }
                    let w = weight(from, edge);
                    let delta = pot[from_idx] + pot[to_idx] - w;
                    if best.map_or(true, |(_, _, _, d)| delta < d) {
                        best = Some((from_idx, edge, to_idx, delta));
                    }
                    edge = graph.edge_inc(from, edge);
                }
            }

            let mut cheapest_ext = exts[0];
            for &ext in &exts {
                if pot[ext] < pot[cheapest_ext] {
                    cheapest_ext = ext;
                }
            }

            let take_edge = best.is_some_and(|(_, _, _, d)| d <= pot[cheapest_ext]);
            let delta = if take_edge { best.expect("checked above").3 } else { pot[cheapest_ext] };

            for &ext in &exts {
                pot[ext] = pot[ext] - delta;
                let partner = mate[ext];
                if partner != ext {
                    pot[partner] = pot[partner] + delta;
                }
            }

            if take_edge {
                let (from_idx, _edge, to_idx, _) = best.expect("checked above");
                prev[to_idx] = from_idx;
                let partner = mate[to_idx];
                if partner == to_idx {
                    augment(root_idx, to_idx, &prev, &mut mate);
                    break 'tree;
                }
                prev[partner] = to_idx;
                exts.push(partner);
            } else {
                if cheapest_ext != root_idx {
                    let partner = mate[cheapest_ext];
                    augment(root_idx, partner, &prev, &mut mate);
                    mate[cheapest_ext] = cheapest_ext;
                }
                break 'tree;
            }
        }
    }

    let total = matched_weight(graph, &index_map, nodes, left, &mate, &weight);
    (mate, total)
}

/// Flips the match pointer along the alternating path from `root` down to
/// `tail`, walking `prev` back to the root one matched edge at a time.
/// Mirrors `bipartite_solver_t::m_augment`.
fn augment(root: usize, tail: usize, prev: &[usize], mate: &mut Mate) {
    let mut tail = tail;
    loop {
        let p = prev[tail];
        mate[p] = tail;
        mate[tail] = p;
        if p == root {
            break;
        }
        tail = prev[p];
    }
}

fn matched_weight<G, M, W>(graph: &G, index_map: &M, nodes: &[G::NodeId], left: &[G::NodeId], mate: &Mate, weight: &impl Fn(G::NodeId, G::EdgeId) -> W) -> W
where
    G: GraphView,
    G::NodeId: Copy + PartialEq,
    M: IndexMap<G::NodeId>,
    W: Copy + Default + std::ops::Add<Output = W>,
{
    let mut total = W::default();
    for &node in left {
        let idx = index_map.index_of(&node);
        let partner = mate[idx];
        if partner == idx {
            continue;
        }
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let to = graph.target(node, edge);
            if index_map.index_of(&to) == partner {
                total = total + weight(node, edge);
                break;
            }
            edge = graph.edge_inc(node, edge);
        }
    }
    total
}
