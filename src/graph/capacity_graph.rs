/// Capacity of a single directed edge.
pub type Capacity = u64;

/// A fixed-size directed graph holding an explicit capacity for every
/// ordered pair of vertices.
///
/// A capacity of zero means there is no edge. The matrix is dense because
/// the networks built here are small (tens of teams) and the max-flow
/// solver scans whole rows anyway.
///
/// # Examples
///
/// ```
/// use division_elimination::graph::capacity_graph::CapacityGraph;
///
/// let mut graph = CapacityGraph::new(3);
/// graph.add_edge(0, 1, 5);
/// graph.add_edge(1, 2, 3);
///
/// assert_eq!(graph.capacity(0, 1), 5);
/// assert_eq!(graph.capacity(1, 0), 0);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityGraph {
    vertex_count: usize,
    /// Row-major `vertex_count * vertex_count` matrix.
    capacities: Vec<Capacity>,
}

impl CapacityGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            capacities: vec![0; vertex_count * vertex_count],
        }
    }

    /// Set the capacity of the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is out of range or `from == to`.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity) {
        assert!(
            from < self.vertex_count && to < self.vertex_count,
            "edge {} -> {} is out of range for a graph of {} vertices",
            from,
            to,
            self.vertex_count
        );
        assert!(from != to, "self-loop on vertex {} is not allowed", from);
        let idx = self.index(from, to);
        self.capacities[idx] = capacity;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Capacity of `from -> to`; zero when there is no edge.
    pub fn capacity(&self, from: usize, to: usize) -> Capacity {
        self.capacities[self.index(from, to)]
    }

    /// Capacities of all edges leaving `from`, indexed by target vertex.
    pub fn row(&self, from: usize) -> &[Capacity] {
        let start = from * self.vertex_count;
        &self.capacities[start..start + self.vertex_count]
    }

    /// Sum of capacities leaving `vertex`.
    pub fn outgoing_capacity(&self, vertex: usize) -> Capacity {
        self.row(vertex).iter().sum()
    }

    /// Sum of capacities entering `vertex`.
    pub fn incoming_capacity(&self, vertex: usize) -> Capacity {
        (0..self.vertex_count).map(|from| self.capacity(from, vertex)).sum()
    }

    /// Number of edges with non-zero capacity.
    pub fn edge_count(&self) -> usize {
        self.capacities.iter().filter(|&&c| c > 0).count()
    }

    /// All edges with non-zero capacity as `(from, to, capacity)`, row by row.
    pub fn edges(&self) -> Vec<(usize, usize, Capacity)> {
        let mut edges = Vec::new();
        for from in 0..self.vertex_count {
            for (to, &capacity) in self.row(from).iter().enumerate() {
                if capacity > 0 {
                    edges.push((from, to, capacity));
                }
            }
        }
        edges
    }

    /// Move `amount` of capacity from `from -> to` onto the reverse edge.
    ///
    /// Only the max-flow solver uses this, on its own residual copy.
    pub(crate) fn push(&mut self, from: usize, to: usize, amount: Capacity) {
        let forward = self.index(from, to);
        let backward = self.index(to, from);
        self.capacities[forward] -= amount;
        self.capacities[backward] += amount;
    }

    fn index(&self, from: usize, to: usize) -> usize {
        from * self.vertex_count + to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_empty() {
        let graph = CapacityGraph::new(4);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_add_edge_overwrites() {
        let mut graph = CapacityGraph::new(3);
        graph.add_edge(0, 2, 7);
        graph.add_edge(0, 2, 4);
        assert_eq!(graph.capacity(0, 2), 4);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_in_out_capacity() {
        let mut graph = CapacityGraph::new(4);
        graph.add_edge(0, 1, 2);
        graph.add_edge(0, 2, 3);
        graph.add_edge(1, 3, 4);
        graph.add_edge(2, 3, 1);
        assert_eq!(graph.outgoing_capacity(0), 5);
        assert_eq!(graph.incoming_capacity(3), 5);
        assert_eq!(graph.edges(), vec![(0, 1, 2), (0, 2, 3), (1, 3, 4), (2, 3, 1)]);
    }

    #[test]
    fn test_push_moves_capacity_to_reverse_edge() {
        let mut graph = CapacityGraph::new(2);
        graph.add_edge(0, 1, 5);
        graph.push(0, 1, 3);
        assert_eq!(graph.capacity(0, 1), 2);
        assert_eq!(graph.capacity(1, 0), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_edge() {
        let mut graph = CapacityGraph::new(2);
        graph.add_edge(0, 2, 1);
    }

    #[test]
    #[should_panic(expected = "self-loop")]
    fn test_self_loop() {
        let mut graph = CapacityGraph::new(2);
        graph.add_edge(1, 1, 1);
    }
}
