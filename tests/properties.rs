//! Property tests for the universal invariants of spec.md §8 — predecessor
//! chains reach the root, BFS's step law, DFS interval nesting, flow
//! conservation and matching validity — checked over randomly generated
//! small graphs rather than the hand-picked scenarios in `catalogue.rs`.

use proptest::prelude::*;

use graphalgo::adapter::Accept;
use graphalgo::container::Graph;
use graphalgo::flow::max_flow;
use graphalgo::flow::residual::{PipeState, ResidualNetwork};
use graphalgo::index_map::{Identity, IndexMap};
use graphalgo::matching::bipartite;
use graphalgo::traversal::{bfs, dfs, Directedness};
use graphalgo::view::GraphView;

#[derive(Debug)]
struct AdjGraph {
    adj: Vec<Vec<usize>>,
}

impl GraphView for AdjGraph {
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

/// A small random undirected graph: `n` in `2..=8` nodes, each unordered
/// pair independently an edge with some probability.
fn undirected_graph(n: usize, coin_flips: &[bool]) -> AdjGraph {
    let mut adj = vec![Vec::new(); n];
    let mut i = 0;
    for a in 0..n {
        for b in (a + 1)..n {
            if coin_flips.get(i).copied().unwrap_or(false) {
                adj[a].push(b);
                adj[b].push(a);
            }
            i += 1;
        }
    }
    AdjGraph { adj }
}

fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn small_undirected_graph() -> impl Strategy<Value = AdjGraph> {
    (2usize..=8).prop_flat_map(|n| {
        proptest::collection::vec(any::<bool>(), pair_count(n)).prop_map(move |flips| undirected_graph(n, &flips))
    })
}

proptest! {
    /// Every node BFS discovers has a predecessor chain that walks back to
    /// the root in a finite number of steps.
    #[test]
    fn predecessor_chain_always_reaches_root(g in small_undirected_graph()) {
        let (record, _) = bfs::run(&g, Identity, 0, Directedness::Undirected, &mut Accept);
        for node in 0..g.adj.len() {
            if record.opt_dist(node).is_some() {
                let path = record.path_from_root(node);
                prop_assert_eq!(path[0], 0);
                prop_assert_eq!(*path.last().unwrap(), node);
            }
        }
    }

    /// BFS's step law: any edge between two closed nodes has endpoints
    /// whose labels (step counts from the source) differ by at most one,
    /// since an edge could always have been used to discover the far
    /// endpoint one step later than the near one.
    #[test]
    fn bfs_step_law_holds_on_every_edge(g in small_undirected_graph()) {
        let (record, _) = bfs::run(&g, Identity, 0, Directedness::Undirected, &mut Accept);
        for a in 0..g.adj.len() {
            let Some(&la) = record.opt_dist(a) else { continue };
            for &b in &g.adj[a] {
                if let Some(&lb) = record.opt_dist(b) {
                    let diff = if la > lb { la - lb } else { lb - la };
                    prop_assert!(diff <= 1, "edge ({a},{b}) labels {la} and {lb} differ by more than one step");
                }
            }
        }
    }

    /// DFS interval nesting: a child's discovery/finish interval sits
    /// strictly inside its parent's.
    #[test]
    fn dfs_intervals_nest_for_every_tree_edge(g in small_undirected_graph()) {
        let (record, _) = dfs::run(&g, Identity, 0, Directedness::Undirected, &mut Accept);
        for node in 0..g.adj.len() {
            let Some(parent) = record.predecessor_node(node) else { continue };
            if parent == node {
                continue;
            }
            let child_label = *record.label(node).unwrap();
            let parent_label = *record.label(parent).unwrap();
            let child_finish = child_label.finish.expect("dfs completed");
            let parent_finish = parent_label.finish.expect("dfs completed");
            prop_assert!(parent_label.discovery < child_label.discovery);
            prop_assert!(child_finish < parent_finish);
        }
    }

    /// Flow conservation: at every node other than source and sink, total
    /// flow in equals total flow out, and the amount leaving the source
    /// equals the amount arriving at the sink (both equal to the reported
    /// total).
    ///
    /// Built on [`Graph`] rather than a hand-rolled adjacency list so every
    /// edge handle the algorithm sees is globally unique by construction —
    /// a position-within-one-node's-list handle (as a plain `Vec<Vec<_>>>`
    /// would hand out) is not, and silently maps a residual lookup to the
    /// wrong pipe whenever two nodes' adjacency lists are different
    /// lengths.
    #[test]
    fn max_flow_conserves_flow_at_every_internal_node(
        n in 3usize..6,
        caps in proptest::collection::vec(0i64..6, 20),
    ) {
        // A layered graph 0 -> ... -> n-1 with a pipe i -> j (i < j) for
        // every nonzero capacity drawn, capped at 20 candidate pipes so the
        // test stays small.
        let mut g: Graph<(), ()> = Graph::new();
        for _ in 0..n {
            g.add_node(());
        }
        let mut pipe_of = Vec::new();
        let mut is_forward = Vec::new();
        let mut pipe_caps = Vec::new();
        let mut next_cap = caps.into_iter();
        for a in 0..n {
            for b in (a + 1)..n {
                let cap = next_cap.next().unwrap_or(0);
                if cap == 0 {
                    continue;
                }
                let pipe = pipe_caps.len();
                pipe_caps.push(cap);
                let fwd = g.add_edge(a, b, ()).unwrap();
                let bwd = g.add_edge(b, a, ()).unwrap();
                let needed = fwd.max(bwd) + 1;
                if pipe_of.len() < needed {
                    pipe_of.resize(needed, 0);
                    is_forward.resize(needed, false);
                }
                pipe_of[fwd] = pipe;
                pipe_of[bwd] = pipe;
                is_forward[fwd] = true;
                is_forward[bwd] = false;
            }
        }
        let mut residual: ResidualNetwork<usize, PipeMap, i64> =
            ResidualNetwork::new(PipeMap(pipe_of.clone()), PipeState::direct(0));
        for (pipe, &cap) in pipe_caps.iter().enumerate() {
            residual.set_pipe(&pipe, PipeState::direct(cap));
        }
        let source = 0;
        let sink = n - 1;
        let total = max_flow::augmenting_path_shortest(&g, Identity, &mut residual, |_node, e: usize| is_forward[e], source, sink);

        for node in 0..n {
            if node == source || node == sink {
                continue;
            }
            let mut inflow = 0i64;
            let mut outflow = 0i64;
            let mut edge = g.edge_begin(node);
            while !g.edge_end(node, edge) {
                let flow = residual.flow_of(&edge);
                if is_forward[edge] {
                    outflow += flow;
                } else {
                    inflow += flow;
                }
                edge = g.edge_inc(node, edge);
            }
            prop_assert_eq!(inflow, outflow, "node {node} does not conserve flow");
        }

        let mut outflow_from_source = 0i64;
        let mut edge = g.edge_begin(source);
        while !g.edge_end(source, edge) {
            let flow = residual.flow_of(&edge);
            outflow_from_source += if is_forward[edge] { flow } else { -flow };
            edge = g.edge_inc(source, edge);
        }
        prop_assert_eq!(outflow_from_source, total);
    }

    /// A cardinality matching never matches a node to itself and is
    /// symmetric: whoever `a` is matched to is matched back to `a`.
    #[test]
    fn bipartite_matching_is_symmetric_and_respects_edges(
        left_size in 1usize..5,
        right_size in 1usize..5,
        flips in proptest::collection::vec(any::<bool>(), 16),
    ) {
        let total = left_size + right_size;
        let mut adj = vec![Vec::new(); total];
        let mut i = 0;
        for l in 0..left_size {
            for r in 0..right_size {
                if flips.get(i).copied().unwrap_or(false) {
                    adj[l].push(left_size + r);
                    adj[left_size + r].push(l);
                }
                i += 1;
            }
        }
        let g = AdjGraph { adj };
        let nodes: Vec<usize> = (0..total).collect();
        let left: Vec<usize> = (0..left_size).collect();
        let mate = bipartite::cardinality(&g, Identity, &nodes, &left);

        for l in 0..left_size {
            if mate[l] != l {
                let r = mate[l];
                prop_assert_eq!(mate[r], l, "matching is not symmetric for {l}<->{r}");
                prop_assert!(g.adj[l].contains(&r), "matched pair ({l},{r}) is not an edge");
            }
        }
    }
}

/// Maps a [`Graph`] edge handle (unique per direction) to the shared
/// residual-network slot both directions of one physical pipe use, the
/// same convention `tests/catalogue.rs`'s `PipeSlot` uses.
#[derive(Clone)]
struct PipeMap(Vec<usize>);

impl IndexMap<usize> for PipeMap {
    fn index_of(&self, handle: &usize) -> usize {
        self.0[*handle]
    }
}
