//! Structural invariant checker

use super::{Color, CopyPolicy, RedBlackTree, Root};
use crate::monoid::Monoid;
use crate::pool::NodeId;
use crate::SeqError;
use std::fmt::Debug;

/// Facts about a checked subtree
struct Checked<S> {
    size: usize,
    /// Level plus one if the node itself is black
    black_height: u32,
    color: Color,
    sum: S,
}

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P>
where
    M::Value: PartialEq + Debug,
{
    /// Validate size, level, color and aggregate of every node under `root`
    ///
    /// Intended for tests and debugging; costs O(n).
    pub fn check_invariants(&self, root: Root) -> Result<(), SeqError> {
        if let Some(id) = root {
            self.check_node(id)?;
        }
        Ok(())
    }

    fn check_node(&self, id: NodeId) -> Result<Checked<M::Value>, SeqError> {
        let node = self.pool.get(id)?;
        let violation = |what: String| SeqError::InvariantViolation(format!("slot {}: {what}", id.index()));

        let (left, right) = match (node.left, node.right) {
            (None, None) => {
                if node.color != Color::Black {
                    return Err(violation("red leaf".into()));
                }
                if node.size != 1 || node.level != 0 {
                    return Err(violation(format!(
                        "leaf with size {} level {}",
                        node.size, node.level
                    )));
                }
                if node.sum != node.value {
                    return Err(violation(format!(
                        "leaf aggregate {:?} differs from value {:?}",
                        node.sum, node.value
                    )));
                }
                return Ok(Checked {
                    size: 1,
                    black_height: 1,
                    color: Color::Black,
                    sum: node.sum.clone(),
                });
            }
            (Some(l), Some(r)) => (self.check_node(l)?, self.check_node(r)?),
            _ => return Err(violation("internal node with one child".into())),
        };

        if node.color == Color::Red && (left.color == Color::Red || right.color == Color::Red) {
            return Err(violation("red node with red child".into()));
        }
        if left.black_height != right.black_height {
            return Err(violation(format!(
                "black heights differ: {} vs {}",
                left.black_height, right.black_height
            )));
        }
        if node.level != left.black_height {
            return Err(violation(format!(
                "level {} but children have black height {}",
                node.level, left.black_height
            )));
        }
        if node.size != left.size + right.size {
            return Err(violation(format!(
                "size {} but children hold {}",
                node.size,
                left.size + right.size
            )));
        }
        let expected = M::combine(&M::combine(&left.sum, &node.value), &right.sum);
        if node.sum != expected {
            return Err(violation(format!(
                "aggregate {:?}, expected {:?}",
                node.sum, expected
            )));
        }

        Ok(Checked {
            size: node.size,
            black_height: node.level + u32::from(node.color == Color::Black),
            color: node.color,
            sum: node.sum.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::monoid::Sum;
    use crate::tree::{Color, Ephemeral, RedBlackTree};
    use crate::SeqError;

    #[test]
    fn test_built_tree_is_valid() {
        let mut tree = RedBlackTree::<Sum, Ephemeral>::new(128);
        let values: Vec<i64> = (0..100).collect();
        let root = tree.build(&values).unwrap();
        tree.check_invariants(root).unwrap();
    }

    #[test]
    fn test_detects_corrupted_aggregate() {
        let mut tree = RedBlackTree::<Sum, Ephemeral>::new(8);
        let root = tree.build(&[1, 2, 3]).unwrap();
        let id = root.unwrap();
        tree.pool.get_mut(id).unwrap().sum = 42;
        assert!(matches!(
            tree.check_invariants(root),
            Err(SeqError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_detects_red_leaf() {
        let mut tree = RedBlackTree::<Sum, Ephemeral>::new(8);
        let root = tree.build(&[1, 2]).unwrap();
        let (leaf, _) = tree.children(root.unwrap()).unwrap();
        tree.pool.get_mut(leaf).unwrap().color = Color::Red;
        assert!(tree.check_invariants(root).is_err());
    }
}
