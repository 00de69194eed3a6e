use bitvec::prelude::*;
use tracing::debug;

use crate::graph::GraphError;

/// Strongly connected component decomposition of a directed graph.
///
/// Component ids are numbered in topological order of the condensation:
/// for every edge `u -> v` between different components,
/// `component(u) < component(v)`.
#[derive(Debug, Clone)]
pub struct StronglyConnectedComponents {
    graph: Vec<Vec<usize>>,
    component: Vec<usize>,
    num_components: usize,
}

/// Flattened decomposition result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SccSummary {
    /// Number of components.
    pub num_components: usize,
    /// Vertices of each component, components in topological order.
    pub groups: Vec<Vec<usize>>,
    /// Deduplicated condensation edges per component.
    pub condensation: Vec<Vec<usize>>,
}

impl StronglyConnectedComponents {
    /// Decompose the graph given by `adjacency[v]` = successors of `v`.
    pub fn new(adjacency: &[Vec<usize>]) -> Result<Self, GraphError> {
        let num_vertices = adjacency.len();
        let mut reversed = vec![Vec::new(); num_vertices];
        for (origin, edges) in adjacency.iter().enumerate() {
            for &vertex in edges {
                if vertex >= num_vertices {
                    return Err(GraphError::VertexOutOfRange {
                        origin,
                        vertex,
                        num_vertices,
                    });
                }
                reversed[vertex].push(origin);
            }
        }

        let order = finishing_order(adjacency);

        // Latest finisher first: each reverse search is confined to one component
        let mut labels: Vec<Option<usize>> = vec![None; num_vertices];
        let mut stack = Vec::new();
        let mut num_components = 0;
        for &start in order.iter().rev() {
            if labels[start].is_some() {
                continue;
            }
            labels[start] = Some(num_components);
            stack.push(start);
            while let Some(v) = stack.pop() {
                for &u in &reversed[v] {
                    if labels[u].is_none() {
                        labels[u] = Some(num_components);
                        stack.push(u);
                    }
                }
            }
            num_components += 1;
        }

        let component: Vec<usize> = labels.into_iter().flatten().collect();
        debug_assert_eq!(component.len(), num_vertices);
        debug!(num_vertices, num_components, "decomposed graph");

        Ok(Self {
            graph: adjacency.to_vec(),
            component,
            num_components,
        })
    }

    /// Whether `u` and `v` are mutually reachable.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is out of range.
    pub fn is_same(&self, u: usize, v: usize) -> bool {
        self.component[u] == self.component[v]
    }

    /// Component id of `v`, if `v` is a vertex.
    pub fn component(&self, v: usize) -> Option<usize> {
        self.component.get(v).copied()
    }

    /// Component id of every vertex.
    pub fn components(&self) -> &[usize] {
        &self.component
    }

    /// Number of distinct components.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Number of vertices in the decomposed graph.
    pub fn num_vertices(&self) -> usize {
        self.graph.len()
    }

    /// Condensation DAG: sorted, deduplicated successor ids per component.
    pub fn condensation(&self) -> Vec<Vec<usize>> {
        let mut dag = vec![Vec::new(); self.num_components];
        for (v, edges) in self.graph.iter().enumerate() {
            let from = self.component[v];
            for &e in edges {
                let to = self.component[e];
                if from != to {
                    dag[from].push(to);
                }
            }
        }
        for successors in &mut dag {
            successors.sort_unstable();
            successors.dedup();
        }
        dag
    }

    /// Vertices grouped by component, groups in topological order and
    /// vertices ascending within each group.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.num_components];
        for (v, &c) in self.component.iter().enumerate() {
            groups[c].push(v);
        }
        groups
    }

    /// Everything at once.
    pub fn summary(&self) -> SccSummary {
        SccSummary {
            num_components: self.num_components,
            groups: self.groups(),
            condensation: self.condensation(),
        }
    }
}

/// Post-order of an iterative DFS over every vertex.
fn finishing_order(graph: &[Vec<usize>]) -> Vec<usize> {
    let n = graph.len();
    let mut visited = bitvec![0; n];
    let mut order = Vec::with_capacity(n);
    // (vertex, index of the next edge to explore)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited.set(start, true);
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (v, cursor) = *frame;
            match graph[v].get(cursor) {
                Some(&next) => {
                    frame.1 += 1;
                    if !visited[next] {
                        visited.set(next, true);
                        stack.push((next, 0));
                    }
                }
                None => {
                    order.push(v);
                    stack.pop();
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Vec<usize>> {
        // 0 -> 1 -> 2 -> 0 cycle, 1 -> 3
        vec![vec![1], vec![2, 3], vec![0], vec![]]
    }

    #[test]
    fn test_cycle_with_tail() {
        let scc = StronglyConnectedComponents::new(&sample()).unwrap();
        assert_eq!(scc.num_components(), 2);
        assert!(scc.is_same(0, 2));
        assert!(!scc.is_same(0, 3));
        assert_eq!(scc.groups(), vec![vec![0, 1, 2], vec![3]]);
        assert_eq!(scc.condensation(), vec![vec![1], vec![]]);
    }

    #[test]
    fn test_finishing_order_is_postorder() {
        assert_eq!(finishing_order(&sample()), vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_rejects_dangling_edge() {
        let err = StronglyConnectedComponents::new(&[vec![1], vec![5]]).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                origin: 1,
                vertex: 5,
                num_vertices: 2
            }
        );
    }

    #[test]
    fn test_long_path_does_not_recurse() {
        let n = 200_000;
        let graph: Vec<Vec<usize>> = (0..n)
            .map(|v| if v + 1 < n { vec![v + 1] } else { vec![] })
            .collect();
        let scc = StronglyConnectedComponents::new(&graph).unwrap();
        assert_eq!(scc.num_components(), n);
        assert_eq!(scc.component(0), Some(0));
        assert_eq!(scc.component(n - 1), Some(n - 1));
    }
}
