//! Hooks the analyzer calls at fixed points of each team's analysis.
//!
//! The analyzer itself never writes output; anything a caller wants to see
//! along the way goes through an [`AnalysisObserver`].

use crate::core::team::TeamName;
use crate::elimination::certificate::Certificate;
use crate::elimination::network::EliminationNetwork;
use crate::graph::max_flow::MaxFlowSolver;
use log::{debug, log_enabled, trace, Level};

/// Receives events during elimination analysis. Every method defaults to a
/// no-op so implementors only override what they need.
pub trait AnalysisObserver {
    /// The target was eliminated by the wins pre-check alone.
    fn on_trivial_elimination(&self, _team: &TeamName, _by: &[TeamName]) {}

    /// The flow network for the target is built, before solving.
    fn on_network_built(&self, _team: &TeamName, _network: &EliminationNetwork) {}

    /// Max flow has converged.
    fn on_flow_computed(
        &self,
        _team: &TeamName,
        _network: &EliminationNetwork,
        _solver: &MaxFlowSolver,
    ) {
    }

    /// A certificate was extracted from the residual graph.
    fn on_certificate(&self, _team: &TeamName, _certificate: &Certificate) {}
}

impl<T: AnalysisObserver + ?Sized> AnalysisObserver for &T {
    fn on_trivial_elimination(&self, team: &TeamName, by: &[TeamName]) {
        (**self).on_trivial_elimination(team, by)
    }

    fn on_network_built(&self, team: &TeamName, network: &EliminationNetwork) {
        (**self).on_network_built(team, network)
    }

    fn on_flow_computed(&self, team: &TeamName, network: &EliminationNetwork, solver: &MaxFlowSolver) {
        (**self).on_flow_computed(team, network, solver)
    }

    fn on_certificate(&self, team: &TeamName, certificate: &Certificate) {
        (**self).on_certificate(team, certificate)
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Writes events through the `log` facade: summaries at `debug`, full
/// capacity, residual and flow dumps at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl AnalysisObserver for LogObserver {
    fn on_trivial_elimination(&self, team: &TeamName, by: &[TeamName]) {
        let names: Vec<&str> = by.iter().map(|t| t.as_str()).collect();
        debug!("{}: trivially eliminated by {}", team, names.join(", "));
    }

    fn on_network_built(&self, team: &TeamName, network: &EliminationNetwork) {
        debug!(
            "{}: network with {} nodes ({} game nodes), max possible wins {}",
            team,
            network.node_count(),
            network.game_node_count(),
            network.max_possible_wins()
        );
        if log_enabled!(Level::Trace) {
            trace!("{}: original capacities", team);
            for (from, to, capacity) in network.graph().edges() {
                trace!(
                    "  {} -> {} capacity {}",
                    network.node_label(from),
                    network.node_label(to),
                    capacity
                );
            }
        }
    }

    fn on_flow_computed(&self, team: &TeamName, network: &EliminationNetwork, solver: &MaxFlowSolver) {
        debug!(
            "{}: max flow {}, total remaining games {}, {} augmenting paths",
            team,
            solver.total_flow(),
            network.total_remaining_games(),
            solver.augmentations()
        );
        if log_enabled!(Level::Trace) {
            trace!("{}: residual capacities", team);
            for (from, to, capacity) in solver.residual_graph().edges() {
                trace!(
                    "  {} -> {} residual {}",
                    network.node_label(from),
                    network.node_label(to),
                    capacity
                );
            }
            trace!("{}: flow per edge", team);
            for (from, to, flow) in solver.flows() {
                trace!(
                    "  {} -> {} carries {}",
                    network.node_label(from),
                    network.node_label(to),
                    flow
                );
            }
        }
    }

    fn on_certificate(&self, team: &TeamName, certificate: &Certificate) {
        debug!(
            "{}: eliminated by {} (average {:.2} wins)",
            team,
            certificate,
            certificate.average_wins()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records the order of events it sees.
    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl AnalysisObserver for Recorder {
        fn on_certificate(&self, team: &TeamName, certificate: &Certificate) {
            self.events
                .borrow_mut()
                .push(format!("{} {}", team, certificate));
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        let recorder = Recorder::default();
        recorder.on_trivial_elimination(&TeamName::new("A"), &[TeamName::new("B")]);
        assert!(recorder.events.borrow().is_empty());

        let cert = Certificate {
            teams: vec![TeamName::new("B")],
            total_wins: 10,
            games_among: 0,
        };
        recorder.on_certificate(&TeamName::new("A"), &cert);
        assert_eq!(*recorder.events.borrow(), vec!["A { B }".to_string()]);
    }
}
