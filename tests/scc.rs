//! Strongly connected components against brute-force reachability

use proptest::prelude::*;
use rbseq::{GraphError, StronglyConnectedComponents};
use test_case::test_case;

fn reachability(graph: &[Vec<usize>]) -> Vec<Vec<bool>> {
    let n = graph.len();
    let mut reach = vec![vec![false; n]; n];
    for (start, row) in reach.iter_mut().enumerate() {
        let mut stack = vec![start];
        row[start] = true;
        while let Some(v) = stack.pop() {
            for &w in &graph[v] {
                if !row[w] {
                    row[w] = true;
                    stack.push(w);
                }
            }
        }
    }
    reach
}

fn graphs() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..24).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(0..n, 0..4), n)
    })
}

#[test]
fn test_cycle_with_exit() {
    // 0 -> 1, 1 -> 2, 2 -> 0, 1 -> 3
    let graph = vec![vec![1], vec![2, 3], vec![0], vec![]];
    let scc = StronglyConnectedComponents::new(&graph).unwrap();

    assert_eq!(scc.num_components(), 2);
    assert!(scc.is_same(0, 2));
    assert!(!scc.is_same(0, 3));

    // The cycle feeds into {3}, so it comes first
    let groups = scc.groups();
    assert_eq!(groups, vec![vec![0, 1, 2], vec![3]]);
    assert_eq!(scc.condensation(), vec![vec![1], vec![]]);
}

#[test_case(vec![] , 0 ; "empty graph")]
#[test_case(vec![vec![]] , 1 ; "single vertex")]
#[test_case(vec![vec![0]] , 1 ; "self loop")]
#[test_case(vec![vec![1], vec![0]] , 1 ; "two cycle")]
#[test_case(vec![vec![1], vec![2], vec![]] , 3 ; "path")]
#[test_case(vec![vec![1, 1], vec![0, 0], vec![0]] , 2 ; "parallel edges")]
fn test_component_counts(graph: Vec<Vec<usize>>, expected: usize) {
    let scc = StronglyConnectedComponents::new(&graph).unwrap();
    assert_eq!(scc.num_components(), expected);
    assert_eq!(scc.groups().len(), expected);
}

#[test]
fn test_condensation_is_deduplicated() {
    // Both 0 and 1 point into {2}, twice each
    let graph = vec![vec![1, 2, 2], vec![0, 2], vec![]];
    let scc = StronglyConnectedComponents::new(&graph).unwrap();
    assert_eq!(scc.summary().condensation, vec![vec![1], vec![]]);
}

#[test]
fn test_invalid_edge() {
    let graph = vec![vec![0], vec![2]];
    assert_eq!(
        StronglyConnectedComponents::new(&graph).unwrap_err(),
        GraphError::VertexOutOfRange {
            origin: 1,
            vertex: 2,
            num_vertices: 2
        }
    );
}

proptest! {
    #[test]
    fn same_component_iff_mutually_reachable(graph in graphs()) {
        let scc = StronglyConnectedComponents::new(&graph).unwrap();
        let reach = reachability(&graph);
        for u in 0..graph.len() {
            for v in 0..graph.len() {
                prop_assert_eq!(scc.is_same(u, v), reach[u][v] && reach[v][u]);
            }
        }
    }

    #[test]
    fn component_ids_are_topological(graph in graphs()) {
        let scc = StronglyConnectedComponents::new(&graph).unwrap();
        for (from, successors) in scc.condensation().iter().enumerate() {
            for &to in successors {
                prop_assert!(from < to, "edge {} -> {} goes backwards", from, to);
            }
        }
        let total: usize = scc.groups().iter().map(Vec::len).sum();
        prop_assert_eq!(total, graph.len());
    }
}
