//! C13: residual-network bookkeeping for a single directed arc, per
//! spec.md §4.8 and `original_source/pipe.h`. Three arc shapes share one
//! representation: a plain directed pipe only ever carries flow forward
//! (`allow_negative = false`, reverse residual is the flow already sent,
//! available to cancel); a bidirectional pipe may carry flow in either
//! direction up to its capacity (`allow_negative = true`); a costed pipe
//! is either shape plus a per-unit cost used by min-cost flow, with the
//! reverse arc's cost implicitly the negation of the forward one.

use crate::index_map::IndexMap;
use crate::property::PropertyStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeState<W> {
    pub capacity: W,
    pub flow: W,
    pub cost: Option<W>,
    pub allow_negative: bool,
}

impl<W> PipeState<W>
where
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
{
    pub fn direct(capacity: W) -> Self {
        PipeState { capacity, flow: W::default(), cost: None, allow_negative: false }
    }

    pub fn bidirect(capacity: W) -> Self {
        PipeState { capacity, flow: W::default(), cost: None, allow_negative: true }
    }

    pub fn costed_direct(capacity: W, cost: W) -> Self {
        PipeState { capacity, flow: W::default(), cost: Some(cost), allow_negative: false }
    }

    /// Capacity still available in `forward`'s direction.
    pub fn residual_capacity(&self, forward: bool) -> W {
        if forward {
            self.capacity - self.flow
        } else if self.allow_negative {
            self.capacity + self.flow
        } else {
            self.flow
        }
    }

    /// Per-unit cost of sending one more unit of flow in `forward`'s
    /// direction; `None` for uncosted pipes. The reverse direction's cost
    /// is the negated forward cost (cancelling flow refunds what it cost).
    pub fn marginal_cost(&self, forward: bool) -> Option<W> {
        self.cost.map(|c| if forward { c } else { -c })
    }

    pub fn push(&mut self, amount: W, forward: bool) {
        self.flow = if forward { self.flow + amount } else { self.flow - amount };
    }
}

/// A residual network over a fixed set of arcs, each identified by an
/// `EdgeId` resolved through `EM`. Arcs are addressed by the edge handle
/// of their forward direction; `residual_capacity`/`add_flow` take a
/// `forward` flag rather than modelling the reverse arc as a distinct
/// edge handle, since the underlying [`GraphView`](crate::view::GraphView)
/// this runs over already exposes both directions of each pipe as
/// separate edges when built via [`crate::view::GraphView::join`].
pub struct ResidualNetwork<E, EM, W> {
    index_map: EM,
    pipes: PropertyStore<PipeState<W>>,
    _edge: std::marker::PhantomData<E>,
}

impl<E, EM, W> ResidualNetwork<E, EM, W>
where
    EM: IndexMap<E>,
    W: Copy + Default + std::ops::Add<Output = W> + std::ops::Sub<Output = W> + std::ops::Neg<Output = W> + PartialOrd,
{
    pub fn new(index_map: EM, default: PipeState<W>) -> Self {
        ResidualNetwork { index_map, pipes: PropertyStore::new(default), _edge: std::marker::PhantomData }
    }

    pub fn set_pipe(&mut self, edge: &E, pipe: PipeState<W>) {
        self.pipes.set(self.index_map.index_of(edge), pipe);
    }

    pub fn residual_capacity(&self, edge: &E, forward: bool) -> W {
        self.pipes.get(self.index_map.index_of(edge)).residual_capacity(forward)
    }

    pub fn marginal_cost(&self, edge: &E, forward: bool) -> Option<W> {
        self.pipes.get(self.index_map.index_of(edge)).marginal_cost(forward)
    }

    pub fn add_flow(&mut self, edge: &E, amount: W, forward: bool) {
        self.pipes.get_mut(self.index_map.index_of(edge)).push(amount, forward);
    }

    pub fn flow_of(&self, edge: &E) -> W {
        self.pipes.get(self.index_map.index_of(edge)).flow
    }

    /// Flow values for every edge that has had its pipe set, as
    /// `(edge_index, flow)` pairs (edge indices, since this type has no
    /// way to recover a handle from a dense index).
    pub fn get_flows(&self) -> Vec<(usize, W)> {
        (0..self.pipes.len())
            .filter(|&i| self.pipes.is_set(i))
            .map(|i| (i, self.pipes.get(i).flow))
            .collect()
    }
}
