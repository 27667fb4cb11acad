//! C14: maximum flow. All three families share one precondition: the
//! caller's [`GraphView`] must present both directions of every pipe as
//! distinct edges from each endpoint (as built by, e.g., joining a
//! forward view with a reversed one), and `is_forward` tells an
//! algorithm which direction a given `(node, edge)` pair traverses so it
//! can ask the [`ResidualNetwork`] for the right residual. Per spec.md
//! §4.9 and `original_source/{flows,max_flow}.h`.

use crate::adapter::{Accept, SearchAdapter};
use crate::algebra::{MaxFlowAlgebra, WeightAlgebra};
use crate::flow::residual::ResidualNetwork;
use crate::index_map::IndexMap;
use crate::queue::{IndexedHeap, PriorityQueue};
use crate::search_record::{NodeState, SearchRecord};
use crate::traversal::{bfs, priority_search, Directedness};
use crate::view::GraphView;

/// Filters a view down to edges with positive residual capacity in the
/// traversed direction, so every augmenting-path search automatically
/// only ever proposes admissible edges.
pub(crate) struct ResidualFilterAdapter<'r, E, EM, W, IF> {
    pub(crate) residual: &'r ResidualNetwork<E, EM, W>,
    pub(crate) is_forward: IF,
}

impl<'r, N, E, EM, W, IF> SearchAdapter<N, E> for ResidualFilterAdapter<'r, E, EM, W, IF>
where
    E: Copy,
    EM: IndexMap<E>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(N, E) -> bool,
{
    fn edge_filter(&mut self, node: N, edge: E) -> bool {
        let forward = (self.is_forward)(node, edge);
        self.residual.residual_capacity(&edge, forward) > W::default()
    }
}

pub(crate) fn path_bottleneck<N, E, EM, W, IF>(
    record: &SearchRecord<N, E, impl Copy, impl IndexMap<N> + Clone>,
    residual: &ResidualNetwork<E, EM, W>,
    is_forward: &IF,
    sink: N,
) -> W
where
    N: Copy + PartialEq,
    E: Copy,
    EM: IndexMap<E>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(N, E) -> bool,
{
    let mut node = sink;
    let mut bottleneck: Option<W> = None;
    while let (Some(pred), Some(edge)) = (record.predecessor_node(node), record.predecessor_edge(node)) {
        if pred == node {
            break;
        }
        let residual_here = residual.residual_capacity(&edge, is_forward(pred, edge));
        bottleneck = Some(match bottleneck {
            Some(b) if b < residual_here => b,
            _ => residual_here,
        });
        node = pred;
    }
    bottleneck.unwrap_or_else(W::default)
}

pub(crate) fn augment_path<N, E, EM, W, IF>(
    record: &SearchRecord<N, E, impl Copy, impl IndexMap<N> + Clone>,
    residual: &mut ResidualNetwork<E, EM, W>,
    is_forward: &IF,
    sink: N,
    amount: W,
) where
    N: Copy + PartialEq,
    E: Copy,
    EM: IndexMap<E>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(N, E) -> bool,
{
    let mut node = sink;
    while let (Some(pred), Some(edge)) = (record.predecessor_node(node), record.predecessor_edge(node)) {
        if pred == node {
            break;
        }
        residual.add_flow(&edge, amount, is_forward(pred, edge));
        node = pred;
    }
}

/// Shortest augmenting path (Edmonds-Karp): BFS finds a minimum-edge-count
/// s-t path in the residual graph each round. `O(V * E^2)`.
pub fn augmenting_path_shortest<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    source: G::NodeId,
    sink: G::NodeId,
) -> W
where
    G: GraphView,
    G::NodeId: PartialEq,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut total = W::default();
    loop {
        let mut filter = ResidualFilterAdapter { residual: &*residual, is_forward: &is_forward };
        let (record, _) = bfs::run(graph, index_map.clone(), source, Directedness::Directed, &mut filter);
        if record.state(sink) != NodeState::Closed {
            break;
        }
        let delta = path_bottleneck(&record, residual, &is_forward, sink);
        if delta <= W::default() {
            break;
        }
        augment_path(&record, residual, &is_forward, sink, delta);
        total = total + delta;
    }
    total
}

/// Widest augmenting path: priority search orders candidate paths by
/// bottleneck capacity via [`MaxFlowAlgebra`], always saturating the
/// fattest available route first. `O(E^2 log U)`.
pub fn augmenting_path_widest<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    source: G::NodeId,
    sink: G::NodeId,
    infinite_capacity: W,
) -> W
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId> + Clone,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut total = W::default();
    loop {
        let algebra = MaxFlowAlgebra { cap: infinite_capacity };
        let key_map = index_map.clone();
        let queue = IndexedHeap::new(
            move |a: &(W, G::NodeId), b: &(W, G::NodeId)| algebra.priority(&a.0, &b.0),
            move |entry: &(W, G::NodeId)| key_map.index_of(&entry.1),
        );
        let residual_ref = &*residual;
        let (record, _) = priority_search::run(
            graph,
            index_map.clone(),
            source,
            &MaxFlowAlgebra { cap: infinite_capacity },
            |node, edge| residual_ref.residual_capacity(&edge, is_forward(node, edge)),
            queue,
            &mut Accept,
        );
        if record.state(sink) != NodeState::Closed {
            break;
        }
        let delta = *record.label(sink).expect("closed node has a label");
        if delta <= W::default() {
            break;
        }
        augment_path(&record, residual, &is_forward, sink, delta);
        total = total + delta;
    }
    total
}

/// Dinic's algorithm: alternate BFS layering (distances from source in the
/// residual graph) with a blocking flow found by DFS restricted to edges
/// that advance exactly one layer, using a per-node current-edge cursor
/// that persists across the whole blocking-flow phase so no edge is ever
/// re-examined within a phase. `O(V^2 * E)`.
pub fn dinic<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    source: G::NodeId,
    sink: G::NodeId,
) -> W
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    G::EdgeId: Copy + PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut total = W::default();
    loop {
        let mut filter = ResidualFilterAdapter { residual: &*residual, is_forward: &is_forward };
        let (layers, _) = bfs::run(graph, index_map.clone(), source, Directedness::Directed, &mut filter);
        if layers.state(sink) != NodeState::Closed {
            break;
        }
        let mut cursor = crate::property::PropertyStore::new(graph.edge_begin(source));

        loop {
            let delta = blocking_dfs(
                graph,
                &index_map,
                residual,
                &is_forward,
                &layers,
                &mut cursor,
                source,
                sink,
            );
            match delta {
                Some(d) if d > W::default() => total = total + d,
                _ => break,
            }
        }
    }
    total
}

#[allow(clippy::too_many_arguments)]
fn blocking_dfs<G, M, EM, W, IF>(
    graph: &G,
    index_map: &M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: &IF,
    layers: &SearchRecord<G::NodeId, G::EdgeId, u64, M>,
    cursor: &mut crate::property::PropertyStore<G::EdgeId>,
    node: G::NodeId,
    sink: G::NodeId,
) -> Option<W>
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    G::EdgeId: Copy,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    if node == sink {
        return None;
    }
    let idx = index_map.index_of(&node);
    let node_layer = *layers.label(node)?;
    loop {
        let edge = *cursor.get(idx);
        if graph.edge_end(node, edge) {
            return None;
        }
        let target = graph.target(node, edge);
        let forward = is_forward(node, edge);
        let residual_here = residual.residual_capacity(&edge, forward);
        let target_layer = layers.label(target).copied();
        let admissible = residual_here > W::default() && target_layer == Some(node_layer + 1);
        if !admissible {
            cursor.set(idx, graph.edge_inc(node, edge));
            continue;
        }
        if target == sink {
            residual.add_flow(&edge, residual_here, forward);
            return Some(residual_here);
        }
        match blocking_dfs(graph, index_map, residual, is_forward, layers, cursor, target, sink) {
            Some(delta) if delta > W::default() => {
                let sent = if delta < residual_here { delta } else { residual_here };
                residual.add_flow(&edge, sent, forward);
                return Some(sent);
            }
            _ => {
                cursor.set(idx, graph.edge_inc(node, edge));
            }
        }
    }
}

/// Push-or-relabel step shared by all three preflow-push orderings below,
/// per `original_source/max_flow.h`'s `discharge_or_relabel`. Drains
/// `node`'s overflow along admissible edges (positive residual, height
/// exactly one more than the target's) starting from its persistent
/// `cur_edge` cursor; once the cursor runs off the end of the adjacency
/// list without fully draining the overflow, relabels `node` to one more
/// than the minimum height among its residual-positive neighbours and
/// rewinds the cursor to that edge. `on_push(target, target_height)` fires
/// every time flow lands on `target`, so the caller's scheduling structure
/// can react without re-reading `height` itself. Returns whether `node`
/// was relabelled.
#[allow(clippy::too_many_arguments)]
fn discharge<G, M, EM, W, IF>(
    graph: &G,
    index_map: &M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: &IF,
    node: G::NodeId,
    cur_edge: &mut crate::property::PropertyStore<G::EdgeId>,
    overflow: &mut crate::property::PropertyStore<W>,
    height: &mut crate::property::PropertyStore<usize>,
    mut on_push: impl FnMut(G::NodeId, usize),
) -> bool
where
    G: GraphView,
    G::NodeId: Copy,
    M: IndexMap<G::NodeId>,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let idx = index_map.index_of(&node);
    loop {
        if *overflow.get(idx) <= W::default() {
            return false;
        }
        let edge = *cur_edge.get(idx);
        if graph.edge_end(node, edge) {
            let mut best: Option<(G::EdgeId, usize)> = None;
            let mut scan = graph.edge_begin(node);
            while !graph.edge_end(node, scan) {
                let forward = is_forward(node, scan);
                if residual.residual_capacity(&scan, forward) > W::default() {
                    let target_height = *height.get(index_map.index_of(&graph.target(node, scan)));
                    if best.map_or(true, |(_, h)| target_height < h) {
                        best = Some((scan, target_height));
                    }
                }
                scan = graph.edge_inc(node, scan);
            }
            match best {
                Some((first, min_height)) => {
                    cur_edge.set(idx, first);
                    height.set(idx, min_height + 1);
                }
                None => height.set(idx, *height.get(idx) + 1),
            }
            return true;
        }
        let target = graph.target(node, edge);
        let forward = is_forward(node, edge);
        let residual_here = residual.residual_capacity(&edge, forward);
        let target_idx = index_map.index_of(&target);
        let target_height = *height.get(target_idx);
        if residual_here > W::default() && *height.get(idx) == target_height + 1 {
            let node_overflow = *overflow.get(idx);
            let pushed = if node_overflow < residual_here { node_overflow } else { residual_here };
            residual.add_flow(&edge, pushed, forward);
            overflow.set(idx, node_overflow - pushed);
            let new_target_overflow = *overflow.get(target_idx) + pushed;
            overflow.set(target_idx, new_target_overflow);
            on_push(target, target_height);
        } else {
            cur_edge.set(idx, graph.edge_inc(node, edge));
        }
    }
}

/// Saturate every edge leaving `source` and raise its height to the node
/// count, the common setup step of all three preflow-push orderings.
#[allow(clippy::too_many_arguments)]
fn saturate_source<G, M, EM, W, IF>(
    graph: &G,
    index_map: &M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: &IF,
    source: G::NodeId,
    overflow: &mut crate::property::PropertyStore<W>,
    height: &crate::property::PropertyStore<usize>,
    mut on_push: impl FnMut(G::NodeId, usize),
) where
    G: GraphView,
    M: IndexMap<G::NodeId>,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut edge = graph.edge_begin(source);
    while !graph.edge_end(source, edge) {
        let forward = is_forward(source, edge);
        let capacity = residual.residual_capacity(&edge, forward);
        if capacity > W::default() {
            let target = graph.target(source, edge);
            residual.add_flow(&edge, capacity, forward);
            let target_idx = index_map.index_of(&target);
            let target_height = *height.get(target_idx);
            let new_overflow = *overflow.get(target_idx) + capacity;
            overflow.set(target_idx, new_overflow);
            on_push(target, target_height);
        }
        edge = graph.edge_inc(source, edge);
    }
}

/// Preflow-push with relabel-to-front scheduling: nodes are discharged in
/// a list order that moves a just-relabelled node to the front and
/// restarts the scan, per `original_source/max_flow.h`'s
/// `preflow_push_relabel_to_front`. `O(V^3)`.
pub fn preflow_push_relabel_to_front<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    nodes: &[G::NodeId],
    source: G::NodeId,
    sink: G::NodeId,
) -> W
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    M: IndexMap<G::NodeId>,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut height = crate::property::PropertyStore::new(0usize);
    let mut overflow = crate::property::PropertyStore::new(W::default());
    let mut cur_edge = crate::property::PropertyStore::new(graph.edge_begin(source));
    for &node in nodes {
        cur_edge.set(index_map.index_of(&node), graph.edge_begin(node));
    }
    height.set(index_map.index_of(&source), nodes.len());
    saturate_source(graph, &index_map, residual, &is_forward, source, &mut overflow, &height, |_, _| {});

    let mut order: Vec<G::NodeId> = nodes.iter().copied().filter(|&n| n != source && n != sink).collect();
    let mut i = 0;
    while i < order.len() {
        let node = order[i];
        let relabelled = discharge(graph, &index_map, residual, &is_forward, node, &mut cur_edge, &mut overflow, &mut height, |_, _| {});
        if relabelled {
            order.remove(i);
            order.insert(0, node);
            i = 0;
        } else {
            i += 1;
        }
    }
    *overflow.get(index_map.index_of(&sink))
}

/// Preflow-push with FIFO scheduling: a round-robin queue of overflowing
/// nodes, re-enqueueing a node at the back whenever a discharge leaves it
/// still overflowing, per `original_source/max_flow.h`'s
/// `preflow_push_fifo`. `O(V^3)`.
pub fn preflow_push_fifo<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    nodes: &[G::NodeId],
    source: G::NodeId,
    sink: G::NodeId,
) -> W
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    M: IndexMap<G::NodeId>,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut height = crate::property::PropertyStore::new(0usize);
    let mut overflow = crate::property::PropertyStore::new(W::default());
    let mut cur_edge = crate::property::PropertyStore::new(graph.edge_begin(source));
    for &node in nodes {
        cur_edge.set(index_map.index_of(&node), graph.edge_begin(node));
    }
    height.set(index_map.index_of(&source), nodes.len());

    let mut queue: std::collections::VecDeque<G::NodeId> = std::collections::VecDeque::new();
    let mut in_queue = crate::property::PropertyStore::new(false);

    saturate_source(graph, &index_map, residual, &is_forward, source, &mut overflow, &height, |target, _| {
        if target != source && target != sink {
            let idx = index_map.index_of(&target);
            if !*in_queue.get(idx) {
                in_queue.set(idx, true);
                queue.push_back(target);
            }
        }
    });

    while let Some(node) = queue.pop_front() {
        in_queue.set(index_map.index_of(&node), false);
        discharge(graph, &index_map, residual, &is_forward, node, &mut cur_edge, &mut overflow, &mut height, |target, _| {
            if target != source && target != sink {
                let idx = index_map.index_of(&target);
                if !*in_queue.get(idx) {
                    in_queue.set(idx, true);
                    queue.push_back(target);
                }
            }
        });
        let node_idx = index_map.index_of(&node);
        if *overflow.get(node_idx) > W::default() {
            in_queue.set(node_idx, true);
            queue.push_back(node);
        }
    }
    *overflow.get(index_map.index_of(&sink))
}

/// Preflow-push with highest-label scheduling: always discharges an
/// overflowing node of maximum height, tracked in buckets indexed by
/// height (up to `2 * num_nodes - 1`, the highest a label can reach), per
/// `original_source/max_flow.h`'s `preflow_push_highest_label`. `O(V^2
/// sqrt(E))`.
pub fn preflow_push_highest_label<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    nodes: &[G::NodeId],
    source: G::NodeId,
    sink: G::NodeId,
) -> W
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    M: IndexMap<G::NodeId>,
    EM: IndexMap<G::EdgeId>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let n = nodes.len();
    let mut height = crate::property::PropertyStore::new(0usize);
    let mut overflow = crate::property::PropertyStore::new(W::default());
    let mut cur_edge = crate::property::PropertyStore::new(graph.edge_begin(source));
    for &node in nodes {
        cur_edge.set(index_map.index_of(&node), graph.edge_begin(node));
    }
    height.set(index_map.index_of(&source), n);

    let bucket_count = 2 * n.max(1);
    let mut buckets: Vec<Vec<G::NodeId>> = vec![Vec::new(); bucket_count];
    let mut max_height = 0usize;

    saturate_source(graph, &index_map, residual, &is_forward, source, &mut overflow, &height, |target, target_height| {
        if target != source && target != sink {
            buckets[target_height].push(target);
            if target_height > max_height {
                max_height = target_height;
            }
        }
    });

    loop {
        while max_height > 0 && buckets[max_height].is_empty() {
            max_height -= 1;
        }
        let Some(node) = buckets[max_height].pop() else { break };
        discharge(graph, &index_map, residual, &is_forward, node, &mut cur_edge, &mut overflow, &mut height, |target, target_height| {
            if target != source && target != sink {
                buckets[target_height].push(target);
                if target_height > max_height {
                    max_height = target_height;
                }
            }
        });
        let node_idx = index_map.index_of(&node);
        if *overflow.get(node_idx) > W::default() {
            let new_height = *height.get(node_idx);
            buckets[new_height].push(node);
            if new_height > max_height {
                max_height = new_height;
            }
        }
    }
    *overflow.get(index_map.index_of(&sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::residual::PipeState;
    use crate::index_map::Identity;

    // Each physical edge (a, b, capacity) appears twice: once forward in
    // `a`'s adjacency, once backward in `b`'s — both tagged with the same
    // edge index so they share one `ResidualNetwork` slot.
    struct FlowGraph {
        adj: Vec<Vec<(usize, usize, bool)>>, // (target, edge_index, is_forward)
    }

    impl GraphView for FlowGraph {
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

    fn build_network() -> (FlowGraph, ResidualNetwork<usize, Identity, i64>) {
        // 4-node network; sink 3's incoming capacity (4 + 9) bounds max flow 0 -> 3 at 13.
        let edges = [(0usize, 1usize, 10i64), (0, 2, 10), (1, 2, 2), (1, 3, 4), (2, 3, 9)];
        let mut adj: Vec<Vec<(usize, usize, bool)>> = vec![Vec::new(); 4];
        let mut residual = ResidualNetwork::new(Identity, PipeState::direct(0));
        for (i, &(a, b, cap)) in edges.iter().enumerate() {
            adj[a].push((b, i, true));
            adj[b].push((a, i, false));
            residual.set_pipe(&i, PipeState::direct(cap));
        }
        (FlowGraph { adj }, residual)
    }

    #[test]
    fn shortest_augmenting_path_finds_max_flow() {
        let (g, mut residual) = build_network();
        let total = augmenting_path_shortest(
            &g,
            Identity,
            &mut residual,
            |n, e| g.adj[n][e].2,
            0,
            3,
        );
        assert_eq!(total, 13);
    }

    #[test]
    fn widest_augmenting_path_finds_max_flow() {
        let (g, mut residual) = build_network();
        let total = augmenting_path_widest(&g, Identity, &mut residual, |n, e| g.adj[n][e].2, 0, 3, i64::MAX);
        assert_eq!(total, 13);
    }

    #[test]
    fn dinic_finds_max_flow() {
        let (g, mut residual) = build_network();
        let total = dinic(&g, Identity, &mut residual, |n, e| g.adj[n][e].2, 0, 3);
        assert_eq!(total, 13);
    }

    /// Maps a [`crate::container::Graph`] edge handle (unique per
    /// direction) to the shared residual-network slot both directions of
    /// one physical pipe use. Plain `FlowGraph` above only gets away with a
    /// position-keyed `EdgeId` because its specific adjacency lists happen
    /// not to collide; preflow-push's relabel bookkeeping is exercised
    /// against a graph built on `Graph` instead so that's not relied on.
    #[derive(Clone)]
    struct PipeMap(Vec<usize>);

    impl crate::index_map::IndexMap<usize> for PipeMap {
        fn index_of(&self, handle: &usize) -> usize {
            self.0[*handle]
        }
    }

    fn build_container_network() -> (
        crate::container::Graph<(), ()>,
        ResidualNetwork<usize, PipeMap, i64>,
        Vec<bool>,
        Vec<usize>,
    ) {
        let edges = [(0usize, 1usize, 10i64), (0, 2, 10), (1, 2, 2), (1, 3, 4), (2, 3, 9)];
        let mut g: crate::container::Graph<(), ()> = crate::container::Graph::new();
        for _ in 0..4 {
            g.add_node(());
        }
        let mut pipe_of = Vec::new();
        let mut is_forward = Vec::new();
        let mut pipe_caps = Vec::new();
        for &(a, b, cap) in &edges {
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
        let mut residual: ResidualNetwork<usize, PipeMap, i64> = ResidualNetwork::new(PipeMap(pipe_of), PipeState::direct(0));
        for (pipe, &cap) in pipe_caps.iter().enumerate() {
            residual.set_pipe(&pipe, PipeState::direct(cap));
        }
        let nodes: Vec<usize> = (0..g.node_count()).collect();
        (g, residual, is_forward, nodes)
    }

    #[test]
    fn preflow_push_relabel_to_front_finds_max_flow() {
        let (g, mut residual, is_forward, nodes) = build_container_network();
        let total = preflow_push_relabel_to_front(&g, Identity, &mut residual, |_n, e: usize| is_forward[e], &nodes, 0, 3);
        assert_eq!(total, 13);
    }

    #[test]
    fn preflow_push_fifo_finds_max_flow() {
        let (g, mut residual, is_forward, nodes) = build_container_network();
        let total = preflow_push_fifo(&g, Identity, &mut residual, |_n, e: usize| is_forward[e], &nodes, 0, 3);
        assert_eq!(total, 13);
    }

    #[test]
    fn preflow_push_highest_label_finds_max_flow() {
        let (g, mut residual, is_forward, nodes) = build_container_network();
        let total = preflow_push_highest_label(&g, Identity, &mut residual, |_n, e: usize| is_forward[e], &nodes, 0, 3);
        assert_eq!(total, 13);
    }
}
