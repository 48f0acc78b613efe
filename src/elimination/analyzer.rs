use crate::core::division::Division;
use crate::core::team::TeamName;
use crate::elimination::certificate::Certificate;
use crate::elimination::network::EliminationNetwork;
use crate::elimination::observer::{AnalysisObserver, NoopObserver};
use crate::graph::capacity_graph::Capacity;
use crate::graph::max_flow::{FlowError, MaxFlowSolver};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from running an elimination analysis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("team index {index} is out of range for a division of {team_count} teams")]
    TeamOutOfRange { index: usize, team_count: usize },
    #[error("no team named '{0}' in the division")]
    UnknownTeam(String),
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Analyzer settings.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Attach [`FlowDiagnostics`] to every flow-based analysis.
    pub verbose: bool,
}

/// Numbers behind a flow-based verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDiagnostics {
    pub max_flow: Capacity,
    pub total_remaining_games: Capacity,
    pub node_count: usize,
}

/// Outcome for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    NotEliminated,
    /// Every listed team already has more wins than the target can reach.
    TriviallyEliminated { by: Vec<TeamName> },
    /// No outcome of the remaining games lets the target finish first.
    Eliminated { certificate: Certificate },
}

impl Verdict {
    pub fn is_eliminated(&self) -> bool {
        !matches!(self, Verdict::NotEliminated)
    }
}

/// Result of analysing a single team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub team: TeamName,
    pub index: usize,
    pub max_possible_wins: u32,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub diagnostics: Option<FlowDiagnostics>,
}

impl TeamAnalysis {
    pub fn is_eliminated(&self) -> bool {
        self.verdict.is_eliminated()
    }
}

impl fmt::Display for TeamAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::NotEliminated => write!(f, "{} is not eliminated.", self.team)?,
            Verdict::TriviallyEliminated { by } => {
                let names: Vec<&str> = by.iter().map(|t| t.as_str()).collect();
                writeln!(f, "{} is trivially eliminated.", self.team)?;
                write!(
                    f,
                    "Reason: {} already {} more wins than {} can achieve.",
                    names.join(", "),
                    if by.len() == 1 { "has" } else { "have" },
                    self.team
                )?;
            }
            Verdict::Eliminated { certificate } => write!(
                f,
                "{} is eliminated by the subset {}.",
                self.team, certificate
            )?,
        }
        if let Some(diag) = &self.diagnostics {
            write!(
                f,
                "\n  max flow {} of {} remaining games ({} nodes)",
                diag.max_flow, diag.total_remaining_games, diag.node_count
            )?;
        }
        Ok(())
    }
}

/// Verdicts for every team of a division, in division order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionReport {
    pub teams: Vec<TeamAnalysis>,
}

impl DivisionReport {
    /// Analysis of the team with the given name.
    pub fn get(&self, name: &str) -> Option<&TeamAnalysis> {
        self.teams.iter().find(|t| t.team.as_str() == name)
    }

    /// Names of eliminated teams, in division order.
    pub fn eliminated(&self) -> Vec<&TeamName> {
        self.teams
            .iter()
            .filter(|t| t.is_eliminated())
            .map(|t| &t.team)
            .collect()
    }
}

impl fmt::Display for DivisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for analysis in &self.teams {
            writeln!(f, "{}", analysis)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Decides elimination for teams of one division.
///
/// Each team is first checked against the wins of every other team; only
/// when that pre-check passes is a flow network built and solved. The
/// division is only read, so one analyzer can answer for every team.
///
/// # Examples
///
/// ```
/// use division_elimination::core::division::Division;
/// use division_elimination::elimination::analyzer::{EliminationAnalyzer, Verdict};
///
/// let division: Division = "3
/// Leader  10 0 1  0 0 1
/// Chaser   9 1 2  0 0 2
/// Trailer  2 8 3  1 2 0
/// ".parse().unwrap();
///
/// let analyzer = EliminationAnalyzer::new(&division);
/// let trailer = analyzer.analyze_team(2).unwrap();
/// assert!(matches!(trailer.verdict, Verdict::TriviallyEliminated { .. }));
/// ```
pub struct EliminationAnalyzer<'a> {
    division: &'a Division,
    config: AnalyzerConfig,
    observer: Box<dyn AnalysisObserver + 'a>,
}

impl<'a> EliminationAnalyzer<'a> {
    pub fn new(division: &'a Division) -> Self {
        Self {
            division,
            config: AnalyzerConfig::default(),
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: impl AnalysisObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn division(&self) -> &Division {
        self.division
    }

    /// Indices of every other team whose current wins already exceed the
    /// best total the team at `target` can reach.
    pub fn trivial_eliminators(&self, target: usize) -> Result<Vec<usize>, AnalysisError> {
        self.check_index(target)?;
        let max_wins = self.division.max_possible_wins(target);
        Ok((0..self.division.len())
            .filter(|&i| i != target && self.division.wins(i) > max_wins)
            .collect())
    }

    /// Decide elimination for the team at `target`.
    pub fn analyze_team(&self, target: usize) -> Result<TeamAnalysis, AnalysisError> {
        let eliminators = self.trivial_eliminators(target)?;
        let team = self.division.name(target).clone();
        let max_possible_wins = self.division.max_possible_wins(target);

        if !eliminators.is_empty() {
            let by: Vec<TeamName> = eliminators
                .iter()
                .map(|&i| self.division.name(i).clone())
                .collect();
            self.observer.on_trivial_elimination(&team, &by);
            return Ok(TeamAnalysis {
                team,
                index: target,
                max_possible_wins,
                verdict: Verdict::TriviallyEliminated { by },
                diagnostics: None,
            });
        }

        let network = EliminationNetwork::build(self.division, target)?;
        self.observer.on_network_built(&team, &network);

        let mut solver = MaxFlowSolver::new(network.graph(), network.source(), network.sink())?;
        let max_flow = solver.compute_max_flow();
        self.observer.on_flow_computed(&team, &network, &solver);

        let total = network.total_remaining_games();
        let verdict = if max_flow < total {
            let certificate = self.extract_certificate(&network, &solver);
            debug_assert!(certificate.is_sound(max_possible_wins));
            self.observer.on_certificate(&team, &certificate);
            Verdict::Eliminated { certificate }
        } else {
            Verdict::NotEliminated
        };

        let diagnostics = self.config.verbose.then(|| FlowDiagnostics {
            max_flow,
            total_remaining_games: total,
            node_count: network.node_count(),
        });

        Ok(TeamAnalysis {
            team,
            index: target,
            max_possible_wins,
            verdict,
            diagnostics,
        })
    }

    /// Decide elimination for the team with the given name.
    pub fn analyze_team_by_name(&self, name: &str) -> Result<TeamAnalysis, AnalysisError> {
        let index = self
            .division
            .index_of(name)
            .ok_or_else(|| AnalysisError::UnknownTeam(name.to_string()))?;
        self.analyze_team(index)
    }

    /// Decide elimination for every team of the division.
    pub fn analyze_all(&self) -> Result<DivisionReport, AnalysisError> {
        let teams = (0..self.division.len())
            .map(|i| self.analyze_team(i))
            .collect::<Result<Vec<_>, _>>()?;
        let eliminated = teams.iter().filter(|t| t.is_eliminated()).count();
        info!(
            "analysed {} teams, {} eliminated",
            teams.len(),
            eliminated
        );
        Ok(DivisionReport { teams })
    }

    /// Team nodes still reachable from the source in the final residual
    /// graph, decoded back to their teams.
    fn extract_certificate(&self, network: &EliminationNetwork, solver: &MaxFlowSolver) -> Certificate {
        let cut = solver.min_cut();
        let members: Vec<usize> = (0..self.division.len())
            .filter(|&i| network.team_node(i).map_or(false, |node| cut.contains(node)))
            .collect();
        Certificate::from_indices(self.division, &members)
    }

    fn check_index(&self, index: usize) -> Result<(), AnalysisError> {
        if index >= self.division.len() {
            return Err(AnalysisError::TeamOutOfRange {
                index,
                team_count: self.division.len(),
            });
        }
        Ok(())
    }
}
