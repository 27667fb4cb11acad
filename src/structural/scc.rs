//! Strongly connected components: Tarjan's single-pass low-link
//! algorithm, and Kosaraju's two-pass finish-order algorithm, per
//! spec.md §4.6 and `original_source/strong_components.h`.

use crate::adapter::SearchAdapter;
use crate::index_map::IndexMap;
use crate::property::PropertyStore;
use crate::traversal::{dfs, Directedness};
use crate::view::GraphView;

struct TarjanAdapter<'a, G: GraphView, M> {
    graph: &'a G,
    index_map: M,
    clock: u64,
    discovery: PropertyStore<Option<u64>>,
    low: PropertyStore<u64>,
    parent: PropertyStore<Option<G::NodeId>>,
    on_stack: PropertyStore<bool>,
    stack: Vec<G::NodeId>,
    components: Vec<Vec<G::NodeId>>,
}

impl<'a, G, M> SearchAdapter<G::NodeId, G::EdgeId> for TarjanAdapter<'a, G, M>
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
        self.on_stack.set(idx, true);
        self.stack.push(node);
        true
    }

    fn edge_process(&mut self, node: G::NodeId, edge: G::EdgeId) -> bool {
        let target = self.graph.target(node, edge);
        let target_idx = self.index_map.index_of(&target);
        let node_idx = self.index_map.index_of(&node);
        match *self.discovery.get(target_idx) {
            None => {
                self.parent.set(target_idx, Some(node));
            }
            Some(target_disc) if *self.on_stack.get(target_idx) => {
                let node_low = *self.low.get(node_idx);
                if target_disc < node_low {
                    self.low.set(node_idx, target_disc);
                }
            }
            Some(_) => {
                // edge into an already-finished component: irrelevant to
                // this node's low-link.
            }
        }
        true
    }

    fn node_postprocess(&mut self, node: G::NodeId) -> bool {
        let node_idx = self.index_map.index_of(&node);
        let node_low = *self.low.get(node_idx);
        let node_disc = *self.discovery.get(node_idx).as_ref().expect("visited has discovery time");

        if let Some(parent) = *self.parent.get(node_idx) {
            let parent_idx = self.index_map.index_of(&parent);
            let parent_low = *self.low.get(parent_idx);
            if node_low < parent_low {
                self.low.set(parent_idx, node_low);
            }
        }

        if node_low == node_disc {
            let mut component = Vec::new();
            loop {
                let popped = self.stack.pop().expect("root of component is on the stack");
                let popped_idx = self.index_map.index_of(&popped);
                self.on_stack.set(popped_idx, false);
                let is_root = popped == node;
                component.push(popped);
                if is_root {
                    break;
                }
            }
            self.components.push(component);
        }
        true
    }
}

/// Tarjan's algorithm: the strongly connected components of the subgraph
/// reachable from `source`, each as a `Vec` of member nodes.
pub fn tarjan<G, M>(graph: &G, index_map: M, source: G::NodeId) -> Vec<Vec<G::NodeId>>
where
    G: GraphView,
    G::NodeId: PartialEq,
    G::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    let mut adapter = TarjanAdapter {
        graph,
        index_map: index_map.clone(),
        clock: 0,
        discovery: PropertyStore::new(None),
        low: PropertyStore::new(0),
        parent: PropertyStore::new(None),
        on_stack: PropertyStore::new(false),
        stack: Vec::new(),
        components: Vec::new(),
    };
    dfs::run(graph, index_map, source, Directedness::Directed, &mut adapter);
    adapter.components
}

struct FinishOrderAdapter<M> {
    index_map: M,
    visited: PropertyStore<bool>,
    order: Vec<usize>,
}

impl<N, E, M> SearchAdapter<N, E> for FinishOrderAdapter<M>
where
    N: Copy,
    M: IndexMap<N>,
{
    fn node_preprocess(&mut self, node: N) -> bool {
        let idx = self.index_map.index_of(&node);
        self.visited.set(idx, true);
        true
    }

    fn node_postprocess(&mut self, node: N) -> bool {
        let idx = self.index_map.index_of(&node);
        self.order.push(idx);
        true
    }
}

struct ComponentCollector<N, M> {
    index_map: M,
    visited: Vec<bool>,
    members: Vec<N>,
}

impl<N, E, M> SearchAdapter<N, E> for ComponentCollector<N, M>
where
    N: Copy,
    M: IndexMap<N>,
{
    fn node_preprocess(&mut self, node: N) -> bool {
        let idx = self.index_map.index_of(&node);
        if idx >= self.visited.len() {
            self.visited.resize(idx + 1, false);
        }
        self.visited[idx] = true;
        self.members.push(node);
        true
    }
}

/// Kosaraju's algorithm: finish-order DFS on `graph`, then a second DFS
/// on `transpose` (the same graph with every edge reversed) processing
/// nodes in decreasing finish order. `transpose` must have identical
/// `NodeId`/`EdgeId` types and describe the reverse of every edge in
/// `graph`.
pub fn kosaraju<G, T, M>(
    graph: &G,
    transpose: &T,
    index_map: M,
    nodes: &[G::NodeId],
) -> Vec<Vec<G::NodeId>>
where
    G: GraphView,
    G::NodeId: Copy,
    G::EdgeId: PartialEq,
    T: GraphView<NodeId = G::NodeId, EdgeId = G::EdgeId>,
    T::EdgeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
{
    let mut first_pass = FinishOrderAdapter {
        index_map: index_map.clone(),
        visited: PropertyStore::new(false),
        order: Vec::new(),
    };
    for &node in nodes {
        let idx = index_map.index_of(&node);
        if *first_pass.visited.get(idx) {
            continue;
        }
        dfs::run(graph, index_map.clone(), node, Directedness::Directed, &mut first_pass);
    }

    let mut finished_globally: Vec<bool> = Vec::new();
    let mut components = Vec::new();
    for &idx in first_pass.order.iter().rev() {
        if idx >= finished_globally.len() {
            finished_globally.resize(idx + 1, false);
        }
        if finished_globally[idx] {
            continue;
        }
        let node = *nodes
            .iter()
            .find(|&&n| index_map.index_of(&n) == idx)
            .expect("every visited index came from a node in `nodes`");
        let mut collector = ComponentCollector {
            index_map: index_map.clone(),
            visited: Vec::new(),
            members: Vec::new(),
        };
        dfs::run(transpose, index_map.clone(), node, Directedness::Directed, &mut collector);
        for &member in &collector.members {
            let member_idx = index_map.index_of(&member);
            if member_idx >= finished_globally.len() {
                finished_globally.resize(member_idx + 1, false);
            }
            finished_globally[member_idx] = true;
        }
        components.push(collector.members);
    }
    components
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

    fn transpose_of(adj: &[Vec<usize>]) -> VecGraph {
        let mut t = vec![Vec::new(); adj.len()];
        for (from, targets) in adj.iter().enumerate() {
            for &to in targets {
                t[to].push(from);
            }
        }
        VecGraph { adj: t }
    }

    #[test]
    fn tarjan_finds_a_single_cycle_as_one_component() {
        let g = VecGraph {
            adj: vec![vec![1], vec![2], vec![0]],
        };
        let components = tarjan(&g, Identity, 0);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
    }

    #[test]
    fn tarjan_splits_two_cycles_joined_by_a_bridge_edge() {
        // 0 <-> 1 cycle, one-way edge 1 -> 2, 2 <-> 3 cycle.
        let g = VecGraph {
            adj: vec![vec![1], vec![0, 2], vec![3], vec![2]],
        };
        let mut components = tarjan(&g, Identity, 0);
        components.sort_by_key(|c| c.len());
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 2);
        assert_eq!(components[1].len(), 2);
    }

    #[test]
    fn kosaraju_agrees_with_tarjan_on_two_cycles() {
        let adj = vec![vec![1], vec![0, 2], vec![3], vec![2]];
        let g = VecGraph { adj: adj.clone() };
        let t = transpose_of(&adj);
        let nodes = [0usize, 1, 2, 3];
        let mut components = kosaraju(&g, &t, Identity, &nodes);
        components.sort_by_key(|c| c.len());
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 2);
        assert_eq!(components[1].len(), 2);
    }
}
