use crate::graph::capacity_graph::{Capacity, CapacityGraph};
use std::collections::VecDeque;

/// An s–t cut read off a residual graph after max flow has converged.
///
/// The source side is exactly the set of vertices still reachable from
/// the source through edges with positive residual capacity. For a
/// maximum flow this set is the same whichever maximum flow was found,
/// and the original edges leaving it are all saturated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    source_side: Vec<bool>,
    capacity: Capacity,
}

impl MinCut {
    /// Whether `vertex` lies on the source side of the cut.
    pub fn contains(&self, vertex: usize) -> bool {
        self.source_side.get(vertex).copied().unwrap_or(false)
    }

    /// Vertices on the source side, ascending.
    pub fn source_side(&self) -> Vec<usize> {
        self.source_side
            .iter()
            .enumerate()
            .filter(|&(_, &reachable)| reachable)
            .map(|(v, _)| v)
            .collect()
    }

    /// Total original capacity of the edges crossing from the source side
    /// to the sink side.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }
}

/// Vertices reachable from `start` along edges with positive capacity.
pub fn reachable_from(graph: &CapacityGraph, start: usize) -> Vec<bool> {
    let mut visited = vec![false; graph.vertex_count()];
    if start >= visited.len() {
        return visited;
    }
    visited[start] = true;
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for (next, &capacity) in graph.row(current).iter().enumerate() {
            if !visited[next] && capacity > 0 {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Build the min cut from a converged residual graph.
pub fn find_min_cut(original: &CapacityGraph, residual: &CapacityGraph, source: usize) -> MinCut {
    let source_side = reachable_from(residual, source);
    let capacity = original
        .edges()
        .into_iter()
        .filter(|&(u, v, _)| source_side[u] && !source_side[v])
        .map(|(_, _, c)| c)
        .sum();

    MinCut {
        source_side,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachability_follows_positive_edges() {
        let mut graph = CapacityGraph::new(4);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(3, 0, 1);

        let reachable = reachable_from(&graph, 0);
        assert_eq!(reachable, vec![true, true, true, false]);
    }

    #[test]
    fn test_cut_of_unsolved_graph_is_source_only_when_nothing_leaves() {
        let graph = CapacityGraph::new(3);
        let cut = find_min_cut(&graph, &graph, 0);
        assert_eq!(cut.source_side(), vec![0]);
        assert_eq!(cut.capacity(), 0);
    }

    #[test]
    fn test_saturated_bottleneck() {
        // 0 -> 1 has capacity 2 and is saturated in the residual graph.
        let mut original = CapacityGraph::new(3);
        original.add_edge(0, 1, 2);
        original.add_edge(1, 2, 5);

        let mut residual = original.clone();
        residual.push(0, 1, 2);
        residual.push(1, 2, 2);

        let cut = find_min_cut(&original, &residual, 0);
        assert_eq!(cut.source_side(), vec![0]);
        assert_eq!(cut.capacity(), 2);
        assert!(!cut.contains(1));
    }
}
