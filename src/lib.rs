//! # division-elimination
//!
//! Decides which teams of a sports division are mathematically eliminated
//! from finishing first.
//!
//! Given current wins and the games every pair of teams still has to play,
//! each team is checked with a max-flow computation; eliminated teams come
//! with a certificate, a subset of rivals whose records alone prove the
//! elimination.
//!
//! ## Architecture
//!
//! - **core** — Team records and the validated division table (with its text loader)
//! - **graph** — Capacity graph, Edmonds–Karp max flow, min cut
//! - **elimination** — Flow network construction, analyzer, certificates, observers
//! - **simulation** — Random division generation

pub mod core;
pub mod elimination;
pub mod graph;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::division::{Division, DivisionError};
    pub use crate::core::team::{TeamName, TeamRecord};
    pub use crate::elimination::analyzer::{
        AnalysisError, AnalyzerConfig, DivisionReport, EliminationAnalyzer, TeamAnalysis, Verdict,
    };
    pub use crate::elimination::certificate::Certificate;
    pub use crate::elimination::network::EliminationNetwork;
    pub use crate::elimination::observer::{AnalysisObserver, LogObserver, NoopObserver};
    pub use crate::graph::capacity_graph::CapacityGraph;
    pub use crate::graph::max_flow::{FlowError, MaxFlowSolver};
}
