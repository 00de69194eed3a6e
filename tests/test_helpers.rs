//! Shared fixtures for integration tests

#![allow(dead_code)]
use rbseq::monoid::Monoid;
use rbseq::{CopyPolicy, RedBlackTree, Root, TreeConfig};

/// The three-element pair sequence used across the scenario tests
pub fn sample_pairs() -> Vec<(i64, i64)> {
    vec![(1, 2), (5, 1), (3, 9)]
}

/// One single-character string per char of `s`
pub fn letters(s: &str) -> Vec<String> {
    s.chars().map(String::from).collect()
}

/// Tree with a generous pool, suitable for persistent experiments
pub fn roomy_tree<M: Monoid, P: CopyPolicy>(capacity: usize) -> RedBlackTree<M, P> {
    RedBlackTree::with_config(TreeConfig { capacity })
}

/// Dump that panics on error, for terse assertions
pub fn contents<M, P>(tree: &RedBlackTree<M, P>, root: Root) -> Vec<M::Value>
where
    M: Monoid,
    P: CopyPolicy,
{
    tree.dump(root).expect("dump succeeds")
}
