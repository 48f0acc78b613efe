use crate::core::division::Division;
use crate::core::team::TeamName;
use crate::elimination::analyzer::AnalysisError;
use crate::graph::capacity_graph::{Capacity, CapacityGraph};
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

/// The flow network asking whether every other team can be held to at most
/// the target's best possible win total.
///
/// Node layout:
///
/// - `0` is the source,
/// - `1..=g` are the game nodes, one per pair of other teams that still
///   meet (pairs in ascending `(i, j)` order),
/// - the next `n - 1` ids are team nodes in division order with the
///   target's slot skipped,
/// - the last id is the sink.
///
/// Source→game edges carry the games left in the pair, game→team edges are
/// unbounded, and team→sink edges carry how many more wins that team can
/// take without passing the target.
#[derive(Debug, Clone)]
pub struct EliminationNetwork {
    graph: CapacityGraph,
    target: usize,
    team_names: Vec<TeamName>,
    /// Original team indices of each game node, in node order.
    game_pairs: Vec<(usize, usize)>,
    max_possible_wins: u32,
    total_remaining_games: Capacity,
    unbounded: Capacity,
}

impl EliminationNetwork {
    /// Build the network for the team at `target`.
    pub fn build(division: &Division, target: usize) -> Result<Self, AnalysisError> {
        let team_count = division.len();
        if target >= team_count {
            return Err(AnalysisError::TeamOutOfRange {
                index: target,
                team_count,
            });
        }

        let mut game_pairs = Vec::new();
        for i in (0..team_count).filter(|&i| i != target) {
            for j in ((i + 1)..team_count).filter(|&j| j != target) {
                if division.games_between(i, j) > 0 {
                    game_pairs.push((i, j));
                }
            }
        }

        let total_remaining_games: Capacity = game_pairs
            .iter()
            .map(|&(i, j)| Capacity::from(division.games_between(i, j)))
            .sum();

        let mut network = Self {
            graph: CapacityGraph::new(2 + game_pairs.len() + (team_count - 1)),
            target,
            team_names: division.teams().iter().map(|t| t.name().clone()).collect(),
            game_pairs,
            max_possible_wins: division.max_possible_wins(target),
            total_remaining_games,
            // Every finite path is bounded by the games on its source edge,
            // so this can never be a bottleneck.
            unbounded: total_remaining_games + 1,
        };

        let source = network.source();
        let sink = network.sink();

        for (offset, &(i, j)) in network.game_pairs.iter().enumerate() {
            let game_node = 1 + offset;
            let team_i = network.adjusted_team_node(i);
            let team_j = network.adjusted_team_node(j);
            network
                .graph
                .add_edge(source, game_node, Capacity::from(division.games_between(i, j)));
            network.graph.add_edge(game_node, team_i, network.unbounded);
            network.graph.add_edge(game_node, team_j, network.unbounded);
        }

        for i in (0..team_count).filter(|&i| i != target) {
            let slack = network.max_possible_wins.saturating_sub(division.wins(i));
            let team_node = network.adjusted_team_node(i);
            network.graph.add_edge(team_node, sink, Capacity::from(slack));
        }

        Ok(network)
    }

    fn team_node_start(&self) -> usize {
        1 + self.game_pairs.len()
    }

    fn adjusted_team_node(&self, original_index: usize) -> usize {
        self.team_node_start() + original_index - usize::from(original_index > self.target)
    }

    /// Team node for the team at `original_index`; `None` for the target
    /// itself or an index outside the division.
    pub fn team_node(&self, original_index: usize) -> Option<usize> {
        if original_index == self.target || original_index >= self.team_names.len() {
            None
        } else {
            Some(self.adjusted_team_node(original_index))
        }
    }

    /// Inverse of [`team_node`](Self::team_node).
    pub fn team_for_node(&self, node: usize) -> Option<usize> {
        let start = self.team_node_start();
        if node < start || node >= self.sink() {
            return None;
        }
        let slot = node - start;
        Some(if slot >= self.target { slot + 1 } else { slot })
    }

    pub fn graph(&self) -> &CapacityGraph {
        &self.graph
    }

    pub fn source(&self) -> usize {
        0
    }

    pub fn sink(&self) -> usize {
        self.graph.vertex_count() - 1
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn node_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn game_node_count(&self) -> usize {
        self.game_pairs.len()
    }

    /// Pairs of original team indices, one per game node in node order.
    pub fn game_nodes(&self) -> &[(usize, usize)] {
        &self.game_pairs
    }

    pub fn max_possible_wins(&self) -> u32 {
        self.max_possible_wins
    }

    /// Sum of the source edges: games left among teams other than the target.
    pub fn total_remaining_games(&self) -> Capacity {
        self.total_remaining_games
    }

    /// Capacity used for game→team edges.
    pub fn unbounded_capacity(&self) -> Capacity {
        self.unbounded
    }

    /// Human-readable label of a node. Ids outside the network get a
    /// plain `node N` label.
    pub fn node_label(&self, node: usize) -> String {
        if node == self.source() {
            "source".to_string()
        } else if node == self.sink() {
            "sink".to_string()
        } else if let Some(team) = self.team_for_node(node) {
            self.team_names[team].to_string()
        } else if let Some(&(i, j)) = node.checked_sub(1).and_then(|k| self.game_pairs.get(k)) {
            format!("{} vs {}", self.team_names[i], self.team_names[j])
        } else {
            format!("node {}", node)
        }
    }

    /// Render the network as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let mut dot: DiGraph<String, String> = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..self.node_count())
            .map(|node| dot.add_node(self.node_label(node)))
            .collect();

        for (from, to, capacity) in self.graph.edges() {
            let label = if capacity == self.unbounded {
                "∞".to_string()
            } else {
                capacity.to_string()
            };
            dot.add_edge(nodes[from], nodes[to], label);
        }

        format!("{}", Dot::new(&dot))
    }
}
