//! Capacity graphs and the max-flow machinery run over them.

pub mod capacity_graph;
pub mod max_flow;
pub mod min_cut;
