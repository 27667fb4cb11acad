//! A*: Dijkstra ordered by `combine(label, heuristic(node, goal))`
//! instead of by `label` alone, stopping the instant the destination is
//! popped. Optimal only if `heuristic` is admissible and consistent;
//! this module requires but does not enforce that (spec.md §4.5).

use crate::index_map::IndexMap;
use crate::queue::{IndexedHeap, PriorityQueue};
use crate::search_record::{NodeState, SearchRecord};
use crate::view::GraphView;

pub fn run<G, M, W>(
    graph: &G,
    index_map: M,
    source: G::NodeId,
    goal: G::NodeId,
    mut weight: impl FnMut(G::NodeId, G::EdgeId) -> W,
    mut heuristic: impl FnMut(G::NodeId, G::NodeId) -> W,
) -> (SearchRecord<G::NodeId, G::EdgeId, W, M>, bool)
where
    G: GraphView,
    G::NodeId: PartialEq,
    M: IndexMap<G::NodeId> + Clone,
    W: Copy + std::ops::Add<Output = W> + PartialOrd + Default,
{
    let mut record = SearchRecord::new(source, index_map.clone());
    record.set_label(source, W::default());

    let key_map = index_map;
    let mut queue = IndexedHeap::new(
        |a: &(W, G::NodeId), b: &(W, G::NodeId)| a.0 < b.0,
        move |entry: &(W, G::NodeId)| key_map.index_of(&entry.1),
    );
    queue.push((heuristic(source, goal), source));

    while let Some((_, node)) = queue.pop() {
        if record.state(node) == NodeState::Closed {
            continue;
        }
        record.close(node);
        if node == goal {
            return (record, true);
        }

        let g = *record.label(node).expect("discovered has a label");
        let mut edge = graph.edge_begin(node);
        while !graph.edge_end(node, edge) {
            let target = graph.target(node, edge);
            if record.state(target) != NodeState::Closed {
                let candidate_g = g + weight(node, edge);
                let improves = match record.state(target) {
                    NodeState::Undiscovered => true,
                    _ => *record.label(target).expect("discovered has a label") > candidate_g,
                };
                if improves {
                    if record.state(target) == NodeState::Undiscovered {
                        record.discover(target, node, edge, candidate_g);
                    } else {
                        record.relax(target, node, edge, candidate_g);
                    }
                    let f = candidate_g + heuristic(target, goal);
                    queue.rebuild((f, target));
                }
            }
            edge = graph.edge_inc(node, edge);
        }
    }

    (record, false)
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
    fn zero_heuristic_matches_dijkstra() {
        let g = WeightedGraph {
            adj: vec![
                vec![(1, 1), (2, 3)],
                vec![(2, 1)],
                vec![],
            ],
        };
        let (record, found) = run(&g, Identity, 0, 2, |n, e| g.adj[n][e].1, |_, _| 0i64);
        assert!(found);
        assert_eq!(*record.label(2).unwrap(), 2);
    }

    #[test]
    fn unreachable_goal_is_reported() {
        let g = WeightedGraph {
            adj: vec![vec![], vec![]],
        };
        let (_, found) = run(&g, Identity, 0, 1, |n, e| g.adj[n][e].1, |_, _| 0i64);
        assert!(!found);
    }
}
