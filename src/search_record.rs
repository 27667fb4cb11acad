//! C5: the tree-search record every traversal engine produces.
//!
//! Per node it holds discovery state, a predecessor node/edge pair, and a
//! label whose meaning depends on the engine (step count for BFS, a
//! (discovery, finish) pair for DFS, a weight for priority search). See
//! `original_source/tree_search.h`.

use crate::index_map::IndexMap;
use crate::property::PropertyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Undiscovered,
    Discovered,
    Closed,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState::Undiscovered
    }
}

/// Per-node state/predecessor/label table plus path and cycle
/// reconstruction, keyed through an [`IndexMap`].
pub struct SearchRecord<N, E, L, M> {
    root: N,
    index_map: M,
    state: PropertyStore<NodeState>,
    predecessor_node: PropertyStore<Option<N>>,
    predecessor_edge: PropertyStore<Option<E>>,
    label: PropertyStore<Option<L>>,
}

impl<N, E, L, M> SearchRecord<N, E, L, M>
where
    N: Copy,
    E: Copy,
    L: Clone,
    M: IndexMap<N>,
{
    pub fn new(root: N, index_map: M) -> Self {
        let idx = index_map.index_of(&root);
        let mut rec = SearchRecord {
            root,
            index_map,
            state: PropertyStore::new(NodeState::Undiscovered),
            predecessor_node: PropertyStore::new(None),
            predecessor_edge: PropertyStore::new(None),
            label: PropertyStore::new(None),
        };
        rec.state.set(idx, NodeState::Discovered);
        rec.predecessor_node.set(idx, Some(root));
        rec
    }

    fn idx(&self, n: N) -> usize {
        self.index_map.index_of(&n)
    }

    pub fn root(&self) -> N {
        self.root
    }

    pub fn state(&self, n: N) -> NodeState {
        *self.state.get(self.idx(n))
    }

    pub fn discover(&mut self, n: N, pred: N, via: E, label: L) {
        let idx = self.idx(n);
        self.state.set(idx, NodeState::Discovered);
        self.predecessor_node.set(idx, Some(pred));
        self.predecessor_edge.set(idx, Some(via));
        self.label.set(idx, Some(label));
    }

    pub fn close(&mut self, n: N) {
        self.state.set(self.idx(n), NodeState::Closed);
    }

    pub fn relax(&mut self, n: N, pred: N, via: E, label: L) {
        let idx = self.idx(n);
        self.predecessor_node.set(idx, Some(pred));
        self.predecessor_edge.set(idx, Some(via));
        self.label.set(idx, Some(label));
    }

    pub fn predecessor_node(&self, n: N) -> Option<N> {
        *self.predecessor_node.get(self.idx(n))
    }

    pub fn predecessor_edge(&self, n: N) -> Option<E> {
        *self.predecessor_edge.get(self.idx(n))
    }

    pub fn label(&self, n: N) -> Option<&L> {
        self.label.get(self.idx(n)).as_ref()
    }

    pub fn set_label(&mut self, n: N, label: L) {
        self.label.set(self.idx(n), Some(label));
    }

    /// The label of `n` if its state is *closed*, otherwise empty — the
    /// `opt_dist` operation of spec.md §4.8.
    pub fn opt_dist(&self, n: N) -> Option<&L> {
        if self.state(n) == NodeState::Closed {
            self.label(n)
        } else {
            None
        }
    }

    /// Collect the path from the root to `n`, root first, by walking
    /// predecessors and reversing.
    pub fn path_from_root(&self, n: N) -> Vec<N>
    where
        N: PartialEq,
    {
        let mut path = Vec::new();
        let mut current = n;
        loop {
            path.push(current);
            let pred = self.predecessor_node(current).unwrap_or(current);
            if self.idx(pred) == self.idx(current) {
                break;
            }
            current = pred;
        }
        path.reverse();
        path
    }

    /// Extract the cycle a negative-cycle (or similar) detection pointed
    /// at via `provoke`: mark nodes while walking predecessors until a
    /// previously marked node is revisited, per spec.md §4.8. The
    /// interval between the two visits is the cycle.
    pub fn find_cycle(&self, provoke: N) -> Vec<(N, E)> {
        let mut seen: Vec<N> = Vec::new();
        let mut current = provoke;
        loop {
            if seen.iter().any(|&s| self.idx(s) == self.idx(current)) {
                break;
            }
            seen.push(current);
            match (self.predecessor_node(current), self.predecessor_edge(current)) {
                (Some(pred), Some(_)) if self.idx(pred) != self.idx(current) => current = pred,
                _ => break,
            }
        }
        // `current` is the first repeated node; walk forward from its
        // first occurrence in `seen` to the end, pairing each node with
        // the edge that leaves it towards the next one in the cycle.
        let start = seen
            .iter()
            .position(|&s| self.idx(s) == self.idx(current))
            .unwrap_or(0);
        let cycle_nodes = &seen[start..];
        let mut cycle = Vec::with_capacity(cycle_nodes.len());
        for &node in cycle_nodes.iter().rev() {
            if let Some(edge) = self.predecessor_edge(node) {
                let pred = self.predecessor_node(node).expect("edge implies predecessor");
                cycle.push((pred, edge));
            }
        }
        cycle.reverse();
        cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_map::Identity;

    #[test]
    fn path_from_root_is_root_first() {
        let mut rec: SearchRecord<usize, usize, u32, Identity> = SearchRecord::new(0, Identity);
        rec.discover(1, 0, 10, 1);
        rec.discover(2, 1, 11, 2);
        assert_eq!(rec.path_from_root(2), vec![0, 1, 2]);
    }

    #[test]
    fn opt_dist_only_defined_for_closed_nodes() {
        let mut rec: SearchRecord<usize, usize, u32, Identity> = SearchRecord::new(0, Identity);
        rec.discover(1, 0, 10, 5);
        assert_eq!(rec.opt_dist(1), None);
        rec.close(1);
        assert_eq!(rec.opt_dist(1), Some(&5));
    }

    #[test]
    fn find_cycle_extracts_the_loop() {
        let mut rec: SearchRecord<usize, usize, u32, Identity> = SearchRecord::new(0, Identity);
        // 0 -> 1 -> 2 -> 1 (cycle through 1, 2)
        rec.discover(1, 0, 1, 1);
        rec.discover(2, 1, 2, 2);
        rec.relax(1, 2, 3, 1);
        let cycle = rec.find_cycle(1);
        assert!(!cycle.is_empty());
        let nodes: Vec<usize> = cycle.iter().map(|&(n, _)| n).collect();
        assert!(nodes.contains(&1) && nodes.contains(&2));
    }
}
