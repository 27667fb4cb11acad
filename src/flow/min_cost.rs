//! C15: minimum-cost flow over the same [`ResidualNetwork`] max flow (C14)
//! runs on, per spec.md §4.10 and `original_source/{cycle_canceling,
//! min_cost_flow}.h`.
//!
//! Two independent algorithms, both assuming costed pipes
//! ([`PipeState::costed_direct`](crate::flow::residual::PipeState::costed_direct)):
//!
//! - [`successive_shortest_paths`] grows the flow one cheapest augmenting
//!   path at a time, maintaining node potentials so every round after the
//!   first can use ordinary Dijkstra (via reduced costs, Edmonds-Karp's
//!   trick) instead of Bellman-Ford. Requires the original costs to carry
//!   no negative cycle at zero flow.
//! - [`cycle_canceling`] instead starts from a feasible flow of the
//!   requested value found by ignoring cost entirely, then repeatedly
//!   finds and cancels a negative-cost cycle in the residual graph until
//!   none remains. Detects cycles reachable from `source` only, which
//!   covers every network where the cancelling cycle passes back through
//!   the flow already pushed from source to sink.

use crate::algebra::{ShortestPathAlgebra, WeightAlgebra};
use crate::flow::max_flow::{augment_path, path_bottleneck, ResidualFilterAdapter};
use crate::flow::residual::ResidualNetwork;
use crate::index_map::IndexMap;
use crate::property::PropertyStore;
use crate::queue::IndexedHeap;
use crate::search_record::NodeState;
use crate::shortest_paths::bellman_ford::{self, BellmanFordOutcome};
use crate::traversal::{bfs, priority_search, Directedness};
use crate::view::GraphView;

fn path_cost<N, E, EM, W, IF>(
    record: &crate::search_record::SearchRecord<N, E, impl Copy, impl IndexMap<N> + Clone>,
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
    let mut cost = W::default();
    while let (Some(pred), Some(edge)) = (record.predecessor_node(node), record.predecessor_edge(node)) {
        if pred == node {
            break;
        }
        let forward = is_forward(pred, edge);
        cost = cost + residual.marginal_cost(&edge, forward).unwrap_or_else(W::default);
        node = pred;
    }
    cost
}

/// Grow a min-cost flow from `source` to `sink` one cheapest augmenting
/// path at a time, stopping once the sink is unreachable or, if
/// `target_flow` is given, once that much flow has been sent. Returns
/// `(flow_sent, total_cost)`.
///
/// Assumes the original (zero-flow) costed graph has no negative-cost
/// cycle; route networks that might have one through [`cycle_canceling`]
/// instead.
#[allow(clippy::too_many_arguments)]
pub fn successive_shortest_paths<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    nodes: &[G::NodeId],
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    source: G::NodeId,
    sink: G::NodeId,
    infinite_cost: W,
    target_flow: Option<W>,
) -> (W, W)
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId> + Clone,
    W: Copy
        + Default
        + std::ops::Add<Output = W>
        + std::ops::Sub<Output = W>
        + std::ops::Neg<Output = W>
        + std::ops::Mul<Output = W>
        + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut potentials: PropertyStore<W> = PropertyStore::new(W::default());
    {
        let residual_ref = &*residual;
        let weight = |node: G::NodeId, edge: G::EdgeId| {
            let forward = is_forward(node, edge);
            if residual_ref.residual_capacity(&edge, forward) > W::default() {
                residual_ref.marginal_cost(&edge, forward).unwrap_or_else(W::default)
            } else {
                infinite_cost
            }
        };
        if let BellmanFordOutcome::Tree(record) = bellman_ford::run(graph, index_map.clone(), nodes, source, weight) {
            for &node in nodes {
                if let Some(&label) = record.label(node) {
                    potentials.set(index_map.index_of(&node), label);
                }
            }
        }
    }

    let mut flow_sent = W::default();
    let mut total_cost = W::default();
    loop {
        if let Some(target) = target_flow {
            if flow_sent >= target {
                break;
            }
        }
        let residual_ref = &*residual;
        let potentials_ref = &potentials;
        let reduced_cost = |node: G::NodeId, edge: G::EdgeId| {
            let forward = is_forward(node, edge);
            let target = graph.target(node, edge);
            let raw = residual_ref.marginal_cost(&edge, forward).unwrap_or_else(W::default);
            raw + *potentials_ref.get(index_map.index_of(&node)) - *potentials_ref.get(index_map.index_of(&target))
        };

        let algebra = ShortestPathAlgebra;
        let key_map = index_map.clone();
        let queue = IndexedHeap::new(
            move |a: &(W, G::NodeId), b: &(W, G::NodeId)| algebra.priority(&a.0, &b.0),
            move |entry: &(W, G::NodeId)| key_map.index_of(&entry.1),
        );
        let mut filter = ResidualFilterAdapter { residual: residual_ref, is_forward: &is_forward };
        let (record, _) = priority_search::run(graph, index_map.clone(), source, &ShortestPathAlgebra, reduced_cost, queue, &mut filter);

        if record.state(sink) != NodeState::Closed {
            break;
        }
        for &node in nodes {
            if record.state(node) == NodeState::Closed {
                let dist = *record.label(node).expect("closed node has a label");
                let idx = index_map.index_of(&node);
                potentials.set(idx, *potentials.get(idx) + dist);
            }
        }

        let mut delta = path_bottleneck(&record, residual, &is_forward, sink);
        if let Some(target) = target_flow {
            let remaining = target - flow_sent;
            if remaining < delta {
                delta = remaining;
            }
        }
        if delta <= W::default() {
            break;
        }
        let cost_per_unit = path_cost(&record, residual, &is_forward, sink);
        augment_path(&record, residual, &is_forward, sink, delta);
        flow_sent = flow_sent + delta;
        total_cost = total_cost + cost_per_unit * delta;
    }
    (flow_sent, total_cost)
}

fn cycle_bottleneck_and_cost<N, E, EM, W, IF>(cycle: &[(N, E)], residual: &ResidualNetwork<E, EM, W>, is_forward: &IF) -> (W, W)
where
    N: Copy,
    E: Copy,
    EM: IndexMap<E>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(N, E) -> bool,
{
    let mut bottleneck: Option<W> = None;
    let mut cost = W::default();
    for &(node, edge) in cycle {
        let forward = is_forward(node, edge);
        let residual_here = residual.residual_capacity(&edge, forward);
        bottleneck = Some(match bottleneck {
            Some(b) if b < residual_here => b,
            _ => residual_here,
        });
        cost = cost + residual.marginal_cost(&edge, forward).unwrap_or_else(W::default);
    }
    (bottleneck.unwrap_or_else(W::default), cost)
}

fn cancel_cycle<N, E, EM, W, IF>(cycle: &[(N, E)], residual: &mut ResidualNetwork<E, EM, W>, is_forward: &IF, amount: W)
where
    N: Copy,
    E: Copy,
    EM: IndexMap<E>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
    IF: Fn(N, E) -> bool,
{
    for &(node, edge) in cycle {
        let forward = is_forward(node, edge);
        residual.add_flow(&edge, amount, forward);
    }
}

/// Push flow from `source` towards `sink`, picking paths by hop count
/// (cost plays no part in path choice) up to `target_flow`, while still
/// totting up what that flow costs. Returns `(sent, cost)`; `sent` is
/// less than `target_flow` when the network's max flow falls short of it.
fn feasible_flow<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: &IF,
    source: G::NodeId,
    sink: G::NodeId,
    target_flow: W,
) -> (W, W)
where
    G: GraphView,
    G::NodeId: PartialEq,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId>,
    W: Copy
        + Default
        + std::ops::Add<Output = W>
        + std::ops::Sub<Output = W>
        + std::ops::Neg<Output = W>
        + std::ops::Mul<Output = W>
        + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let mut sent = W::default();
    let mut cost = W::default();
    while sent < target_flow {
        let mut filter = ResidualFilterAdapter { residual: &*residual, is_forward };
        let (record, _) = bfs::run(graph, index_map.clone(), source, Directedness::Directed, &mut filter);
        if record.state(sink) != NodeState::Closed {
            break;
        }
        let mut delta = path_bottleneck(&record, residual, is_forward, sink);
        let remaining = target_flow - sent;
        if remaining < delta {
            delta = remaining;
        }
        if delta <= W::default() {
            break;
        }
        let cost_per_unit = path_cost(&record, residual, is_forward, sink);
        augment_path(&record, residual, is_forward, sink, delta);
        sent = sent + delta;
        cost = cost + cost_per_unit * delta;
    }
    (sent, cost)
}

/// Establish a flow of exactly `target_flow` (cost ignored), then
/// repeatedly cancel negative-cost cycles reachable from `source` in the
/// residual graph until none remain. Returns `(feasible, flow_sent,
/// total_cost)`; `feasible` is `false` when the network cannot carry
/// `target_flow` units at all, in which case `flow_sent` is the
/// shortfall-free maximum actually achieved and `total_cost` is 0.
#[allow(clippy::too_many_arguments)]
pub fn cycle_canceling<G, M, EM, W, IF>(
    graph: &G,
    index_map: M,
    nodes: &[G::NodeId],
    residual: &mut ResidualNetwork<G::EdgeId, EM, W>,
    is_forward: IF,
    source: G::NodeId,
    sink: G::NodeId,
    infinite_cost: W,
    target_flow: W,
) -> (bool, W, W)
where
    G: GraphView,
    G::NodeId: PartialEq + Copy,
    G::EdgeId: Copy + PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    EM: IndexMap<G::EdgeId>,
    W: Copy
        + Default
        + std::ops::Add<Output = W>
        + std::ops::Sub<Output = W>
        + std::ops::Neg<Output = W>
        + std::ops::Mul<Output = W>
        + PartialOrd,
    IF: Fn(G::NodeId, G::EdgeId) -> bool,
{
    let (sent, mut total_cost) = feasible_flow(graph, index_map.clone(), residual, &is_forward, source, sink, target_flow);
    if sent < target_flow {
        return (false, sent, W::default());
    }

    loop {
        let residual_ref = &*residual;
        let weight = |node: G::NodeId, edge: G::EdgeId| {
            let forward = is_forward(node, edge);
            if residual_ref.residual_capacity(&edge, forward) > W::default() {
                residual_ref.marginal_cost(&edge, forward).unwrap_or_else(W::default)
            } else {
                infinite_cost
            }
        };
        let outcome = bellman_ford::run(graph, index_map.clone(), nodes, source, weight);
        let (record, provoke) = match outcome {
            BellmanFordOutcome::Tree(_) => break,
            BellmanFordOutcome::NegativeCycle(record, provoke) => (record, provoke),
        };
        let cycle = record.find_cycle(provoke);
        if cycle.is_empty() {
            break;
        }
        let (bottleneck, cycle_cost) = cycle_bottleneck_and_cost(&cycle, residual, &is_forward);
        if bottleneck <= W::default() || cycle_cost >= W::default() {
            break;
        }
        cancel_cycle(&cycle, residual, &is_forward, bottleneck);
        total_cost = total_cost + cycle_cost * bottleneck;
    }

    (true, sent, total_cost)
}
