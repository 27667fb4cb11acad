//! C13-C15: flow networks, maximum flow, and minimum-cost flow.

pub mod max_flow;
pub mod min_cost;
pub mod residual;
