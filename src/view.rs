//! C1: the graph view protocol.
//!
//! Every algorithm in this crate is written against [`GraphView`] rather
//! than against a concrete storage layout. A view exposes finite forward
//! iteration over a node's outgoing edges through a begin/increment/end
//! cursor, mirroring `original_source/graph_concepts.h`'s `graph_cpt`
//! concept, plus O(1) edge-to-target resolution.
//!
//! Handles (`NodeId`/`EdgeId`) are required to be cheap, `Copy` values;
//! their notion of equality for algorithm bookkeeping purposes is always
//! mediated by an accompanying [`IndexMap`](crate::index_map::IndexMap),
//! never by handle identity, so the same handle type can be shared by
//! several unrelated graphs.

/// Abstract iteration over a node's outgoing edges and edge-to-target
/// resolution. Implementors need not be restartable mid-iteration except
/// by calling [`edge_begin`](GraphView::edge_begin) again.
pub trait GraphView {
    type NodeId: Copy;
    type EdgeId: Copy;

    /// First edge in `node`'s adjacency list, or the sentinel for which
    /// [`edge_end`](GraphView::edge_end) is true if `node` has none.
    fn edge_begin(&self, node: Self::NodeId) -> Self::EdgeId;

    /// Advance `edge` to the next edge in `node`'s adjacency list.
    fn edge_inc(&self, node: Self::NodeId, edge: Self::EdgeId) -> Self::EdgeId;

    /// True once `edge` has walked past the last edge of `node`.
    fn edge_end(&self, node: Self::NodeId, edge: Self::EdgeId) -> bool;

    /// The node `edge` (incident to `node`) leads to.
    fn target(&self, node: Self::NodeId, edge: Self::EdgeId) -> Self::NodeId;

    /// Iterate the edges of `node` as a plain Rust iterator.
    fn edges(&self, node: Self::NodeId) -> EdgeCursor<'_, Self>
    where
        Self: Sized,
    {
        EdgeCursor {
            graph: self,
            node,
            edge: self.edge_begin(node),
            done: false,
        }
    }

    /// A view that only offers edges for which `pred` holds, per
    /// `graph_adapter.h`'s filtered adjacency list.
    fn filter<P>(self, pred: P) -> FilteredView<Self, P>
    where
        Self: Sized,
        P: Fn(Self::NodeId, Self::EdgeId) -> bool,
    {
        FilteredView { inner: self, pred }
    }

    /// A view that concatenates `self`'s and `other`'s adjacency lists
    /// over the same node set.
    fn join<G>(self, other: G) -> JoinedView<Self, G>
    where
        Self: Sized,
        G: GraphView<NodeId = Self::NodeId>,
    {
        JoinedView { left: self, right: other }
    }
}

/// Forward iterator over the edges of a single node, built from the
/// begin/increment/end cursor protocol.
pub struct EdgeCursor<'a, G: GraphView> {
    graph: &'a G,
    node: G::NodeId,
    edge: G::EdgeId,
    done: bool,
}

impl<'a, G: GraphView> Iterator for EdgeCursor<'a, G> {
    type Item = G::EdgeId;

    fn next(&mut self) -> Option<G::EdgeId> {
        if self.done || self.graph.edge_end(self.node, self.edge) {
            self.done = true;
            return None;
        }
        let current = self.edge;
        self.edge = self.graph.edge_inc(self.node, self.edge);
        Some(current)
    }
}

/// A view over `G` that skips edges rejected by `pred`; begin and
/// increment both advance past rejected edges so callers never observe
/// one.
pub struct FilteredView<G, P> {
    inner: G,
    pred: P,
}

impl<G, P> FilteredView<G, P>
where
    G: GraphView,
    P: Fn(G::NodeId, G::EdgeId) -> bool,
{
    fn skip_rejected(&self, node: G::NodeId, mut edge: G::EdgeId) -> G::EdgeId {
        while !self.inner.edge_end(node, edge) && !(self.pred)(node, edge) {
            edge = self.inner.edge_inc(node, edge);
        }
        edge
    }
}

impl<G, P> GraphView for FilteredView<G, P>
where
    G: GraphView,
    P: Fn(G::NodeId, G::EdgeId) -> bool,
{
    type NodeId = G::NodeId;
    type EdgeId = G::EdgeId;

    fn edge_begin(&self, node: Self::NodeId) -> Self::EdgeId {
        let first = self.inner.edge_begin(node);
        self.skip_rejected(node, first)
    }

    fn edge_inc(&self, node: Self::NodeId, edge: Self::EdgeId) -> Self::EdgeId {
        let next = self.inner.edge_inc(node, edge);
        self.skip_rejected(node, next)
    }

    fn edge_end(&self, node: Self::NodeId, edge: Self::EdgeId) -> bool {
        self.inner.edge_end(node, edge)
    }

    fn target(&self, node: Self::NodeId, edge: Self::EdgeId) -> Self::NodeId {
        self.inner.target(node, edge)
    }
}

/// Which underlying view a joined edge handle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinedEdge<L, R> {
    Left(L),
    Right(R),
}

/// A view that concatenates two views sharing the same node set. Requires
/// both halves to agree on node and edge handle types (per spec.md's open
/// question on the joined view: behaviour for mismatched handle types is
/// unspecified, so this adapter does not attempt to support it).
pub struct JoinedView<L, R> {
    left: L,
    right: R,
}

impl<L, R> GraphView for JoinedView<L, R>
where
    L: GraphView,
    R: GraphView<NodeId = L::NodeId, EdgeId = L::EdgeId>,
{
    type NodeId = L::NodeId;
    type EdgeId = JoinedEdge<L::EdgeId, R::EdgeId>;

    fn edge_begin(&self, node: Self::NodeId) -> Self::EdgeId {
        let first = self.left.edge_begin(node);
        if self.left.edge_end(node, first) {
            JoinedEdge::Right(self.right.edge_begin(node))
        } else {
            JoinedEdge::Left(first)
        }
    }

    fn edge_inc(&self, node: Self::NodeId, edge: Self::EdgeId) -> Self::EdgeId {
        match edge {
            JoinedEdge::Left(e) => {
                let next = self.left.edge_inc(node, e);
                if self.left.edge_end(node, next) {
                    JoinedEdge::Right(self.right.edge_begin(node))
                } else {
                    JoinedEdge::Left(next)
                }
            }
            JoinedEdge::Right(e) => JoinedEdge::Right(self.right.edge_inc(node, e)),
        }
    }

    fn edge_end(&self, node: Self::NodeId, edge: Self::EdgeId) -> bool {
        match edge {
            JoinedEdge::Left(e) => self.left.edge_end(node, e),
            JoinedEdge::Right(e) => self.right.edge_end(node, e),
        }
    }

    fn target(&self, node: Self::NodeId, edge: Self::EdgeId) -> Self::NodeId {
        match edge {
            JoinedEdge::Left(e) => self.left.target(node, e),
            JoinedEdge::Right(e) => self.right.target(node, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trivial adjacency-list-over-vectors view, used across the crate's
    /// unit tests: node ids and edge ids are both plain `usize`s, `adj[n]`
    /// lists the targets reachable from node `n`.
    pub struct VecGraph {
        pub adj: Vec<Vec<usize>>,
    }

    impl GraphView for VecGraph {
        type NodeId = usize;
        type EdgeId = usize;

        fn edge_begin(&self, _node: usize) -> usize {
            0
        }

        fn edge_inc(&self, _node: usize, edge: usize) -> usize {
            edge + 1
        }

        fn edge_end(&self, node: usize, edge: usize) -> bool {
            edge >= self.adj[node].len()
        }

        fn target(&self, node: usize, edge: usize) -> usize {
            self.adj[node][edge]
        }
    }

    #[test]
    fn edge_cursor_yields_all_edges_in_order() {
        let g = VecGraph {
            adj: vec![vec![1, 2], vec![2], vec![]],
        };
        let edges: Vec<usize> = g.edges(0).map(|e| g.target(0, e)).collect();
        assert_eq!(edges, vec![1, 2]);
    }

    #[test]
    fn filtered_view_skips_rejected_edges() {
        let g = VecGraph {
            adj: vec![vec![1, 2, 3], vec![], vec![], vec![]],
        };
        let odd_only = g.filter(|n: usize, e: usize| (n, e) != (0, 1));
        let targets: Vec<usize> = odd_only.edges(0).map(|e| odd_only.target(0, e)).collect();
        assert_eq!(targets, vec![1, 3]);
    }

    #[test]
    fn joined_view_concatenates_both_halves() {
        let a = VecGraph {
            adj: vec![vec![1], vec![], vec![]],
        };
        let b = VecGraph {
            adj: vec![vec![2], vec![], vec![]],
        };
        let joined = a.join(b);
        let targets: Vec<usize> = joined.edges(0).map(|e| joined.target(0, e)).collect();
        assert_eq!(targets, vec![1, 2]);
    }
}
