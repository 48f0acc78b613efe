use crate::graph::capacity_graph::{Capacity, CapacityGraph};
use crate::graph::min_cut::{find_min_cut, MinCut};
use log::trace;
use std::collections::VecDeque;
use thiserror::Error;

/// Precondition violations when setting up a max-flow computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("source and sink must differ, both are vertex {0}")]
    SourceIsSink(usize),
    #[error("vertex {vertex} is out of range for a graph of {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },
}

/// Maximum flow via Edmonds–Karp: Ford–Fulkerson with breadth-first
/// (shortest) augmenting paths.
///
/// The solver borrows the input graph only while it is constructed and
/// keeps its own residual copy, so the caller's graph is never mutated.
/// After [`compute_max_flow`](Self::compute_max_flow) the residual graph
/// stays available for min-cut inspection.
///
/// # Examples
///
/// ```
/// use division_elimination::graph::capacity_graph::CapacityGraph;
/// use division_elimination::graph::max_flow::MaxFlowSolver;
///
/// let mut graph = CapacityGraph::new(4);
/// graph.add_edge(0, 1, 3);
/// graph.add_edge(0, 2, 2);
/// graph.add_edge(1, 3, 2);
/// graph.add_edge(2, 3, 3);
///
/// let mut solver = MaxFlowSolver::new(&graph, 0, 3).unwrap();
/// assert_eq!(solver.compute_max_flow(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    original: CapacityGraph,
    residual: CapacityGraph,
    source: usize,
    sink: usize,
    /// Predecessor of each vertex on the last BFS tree.
    parent: Vec<Option<usize>>,
    total_flow: Capacity,
    augmentations: usize,
}

impl MaxFlowSolver {
    /// Set up a solver over `graph` from `source` to `sink`.
    pub fn new(graph: &CapacityGraph, source: usize, sink: usize) -> Result<Self, FlowError> {
        let vertex_count = graph.vertex_count();
        for vertex in [source, sink] {
            if vertex >= vertex_count {
                return Err(FlowError::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
        }
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }

        Ok(Self {
            original: graph.clone(),
            residual: graph.clone(),
            source,
            sink,
            parent: vec![None; vertex_count],
            total_flow: 0,
            augmentations: 0,
        })
    }

    /// Breadth-first search for a shortest source→sink path with positive
    /// residual capacity on every edge. Fills the predecessor map and
    /// stops as soon as the sink is reached.
    pub fn find_augmenting_path(&mut self) -> bool {
        let n = self.residual.vertex_count();
        self.parent.clear();
        self.parent.resize(n, None);

        let mut visited = vec![false; n];
        visited[self.source] = true;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);

        while let Some(current) = queue.pop_front() {
            for (next, &capacity) in self.residual.row(current).iter().enumerate() {
                if !visited[next] && capacity > 0 {
                    visited[next] = true;
                    self.parent[next] = Some(current);
                    if next == self.sink {
                        return true;
                    }
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Augment along shortest paths until none remain. Returns the total
    /// flow, which is also what repeated calls return once converged.
    pub fn compute_max_flow(&mut self) -> Capacity {
        while self.find_augmenting_path() {
            let path = self.current_path();

            // Bottleneck along the path
            let bottleneck = path
                .iter()
                .map(|&(u, v)| self.residual.capacity(u, v))
                .min()
                .unwrap_or(0);

            for &(u, v) in &path {
                self.residual.push(u, v, bottleneck);
            }

            self.total_flow += bottleneck;
            self.augmentations += 1;
            trace!(
                "augmenting path #{} of {} edges carries {}",
                self.augmentations,
                path.len(),
                bottleneck
            );
        }
        self.total_flow
    }

    /// Edges of the path recorded by the last successful BFS, sink first.
    fn current_path(&self) -> Vec<(usize, usize)> {
        let mut path = Vec::new();
        let mut v = self.sink;
        while v != self.source {
            match self.parent[v] {
                Some(u) => {
                    path.push((u, v));
                    v = u;
                }
                None => break,
            }
        }
        path
    }

    /// The residual graph in its current state.
    pub fn residual_graph(&self) -> &CapacityGraph {
        &self.residual
    }

    /// Flow pushed so far.
    pub fn total_flow(&self) -> Capacity {
        self.total_flow
    }

    /// Number of augmenting paths used so far.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Flow carried by the original edge `from -> to`.
    ///
    /// Assumes the input had no antiparallel edge pairs, which holds for
    /// the layered networks built in this crate.
    pub fn flow(&self, from: usize, to: usize) -> Capacity {
        self.original
            .capacity(from, to)
            .saturating_sub(self.residual.capacity(from, to))
    }

    /// Original edges that carry flow, as `(from, to, flow)`.
    pub fn flows(&self) -> Vec<(usize, usize, Capacity)> {
        self.original
            .edges()
            .into_iter()
            .map(|(u, v, _)| (u, v, self.flow(u, v)))
            .filter(|&(_, _, f)| f > 0)
            .collect()
    }

    /// Min cut read off the current residual graph.
    pub fn min_cut(&self) -> MinCut {
        find_min_cut(&self.original, &self.residual, self.source)
    }
}
