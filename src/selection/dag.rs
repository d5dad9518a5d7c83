use std::collections::HashSet;

use crate::core::error::OError;

/// A domination DAG: an edge `u -> v` means individual `u` dominates
/// individual `v`. Built once per generation from pairwise Pareto
/// comparisons and then peeled, Kahn-style, into non-domination fronts.
///
/// `pop_and_get_fronts` repeatedly collects every node whose in-degree has
/// reached zero (nobody left dominates it) into the next front, then removes
/// that whole layer at once — the standard NSGA-II fast non-dominated sort
/// restated as a graph peel.
///
/// The DAG is single-use: `pop_and_get_fronts` consumes the edges as it
/// peels, and calling it twice is a programmer error.
#[derive(Debug, Default)]
pub struct DominationDag {
    adjacency: Vec<HashSet<usize>>,
    in_degree: Vec<usize>,
    destructed: bool,
}

impl DominationDag {
    /// Build an empty DAG with `node_count` nodes (indices `0..node_count`).
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![HashSet::new(); node_count],
            in_degree: vec![0; node_count],
            destructed: false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Record that `from` dominates `to`. Both must be valid node indices
    /// and `from != to`. Adding the same edge twice is a no-op.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), OError> {
        if from >= self.node_count() || to >= self.node_count() {
            return Err(OError::precondition(
                "domination-dag",
                "add_edge referenced a node outside the graph",
            ));
        }
        if from == to {
            return Err(OError::precondition("domination-dag", "self-domination edge"));
        }
        if self.adjacency[from].insert(to) {
            self.in_degree[to] += 1;
        }
        Ok(())
    }

    /// Destructively peel the graph into non-domination fronts: front 0 is
    /// every node with in-degree zero (nothing left dominates it), front 1
    /// is every node that becomes in-degree zero once front 0 is removed,
    /// and so on. Returns an error if called more than once on the same
    /// DAG.
    pub fn pop_and_get_fronts(&mut self) -> Result<Vec<Vec<usize>>, OError> {
        if self.destructed {
            return Err(OError::precondition(
                "domination-dag",
                "pop_and_get_fronts called on an already-peeled DAG",
            ));
        }
        self.destructed = true;

        let n = self.node_count();
        let mut in_degree = self.in_degree.clone();
        let mut fronts = Vec::new();
        let mut current: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut remaining = n;

        while !current.is_empty() {
            remaining -= current.len();
            let mut next = Vec::new();
            for &u in &current {
                for &v in &self.adjacency[u] {
                    in_degree[v] -= 1;
                    if in_degree[v] == 0 {
                        next.push(v);
                    }
                }
            }
            fronts.push(std::mem::take(&mut current));
            current = next;
        }

        if remaining != 0 {
            return Err(OError::precondition(
                "domination-dag",
                "graph has a cycle: Pareto dominance should never contain one",
            ));
        }
        Ok(fronts)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// The worked example: nodes 0..=4, edges 0->1, 0->2, 0->4, 1->3, 4->3.
    /// Fronts should be [{0}, {1,2}, {4}, {3}].
    #[test]
    fn layered_peel_matches_worked_example() {
        let mut dag = DominationDag::new(5);
        dag.add_edge(0, 1).unwrap();
        dag.add_edge(0, 2).unwrap();
        dag.add_edge(0, 4).unwrap();
        dag.add_edge(4, 3).unwrap();
        dag.add_edge(1, 3).unwrap();

        let mut fronts = dag.pop_and_get_fronts().unwrap();
        for front in fronts.iter_mut() {
            front.sort_unstable();
        }
        assert_eq!(fronts, vec![vec![0], vec![1, 2], vec![4], vec![3]]);
    }

    #[test]
    fn disconnected_component_peels_independently() {
        let mut dag = DominationDag::new(7);
        dag.add_edge(0, 1).unwrap();
        dag.add_edge(0, 2).unwrap();
        dag.add_edge(0, 4).unwrap();
        dag.add_edge(4, 3).unwrap();
        dag.add_edge(1, 3).unwrap();
        dag.add_edge(5, 6).unwrap();

        let mut fronts = dag.pop_and_get_fronts().unwrap();
        for front in fronts.iter_mut() {
            front.sort_unstable();
        }
        assert_eq!(fronts[0], vec![0, 5]);
        assert!(fronts.iter().flatten().collect::<HashSet<_>>().len() == 7);
    }

    #[test]
    fn isolated_nodes_are_all_front_zero() {
        let mut dag = DominationDag::new(4);
        let fronts = dag.pop_and_get_fronts().unwrap();
        assert_eq!(fronts.len(), 1);
        assert_eq!(fronts[0].len(), 4);
    }

    #[test]
    fn reuse_after_peel_is_a_precondition_error() {
        let mut dag = DominationDag::new(2);
        dag.add_edge(0, 1).unwrap();
        dag.pop_and_get_fronts().unwrap();
        assert!(dag.pop_and_get_fronts().is_err());
    }

    #[test]
    fn out_of_range_edge_is_a_precondition_error() {
        let mut dag = DominationDag::new(2);
        assert!(dag.add_edge(0, 5).is_err());
    }
}
