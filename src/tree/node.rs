//! Tree node layout

use crate::pool::NodeId;

/// Node color for black-height balancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Color {
    /// Counts toward black height
    Black,
    /// Shares its parent's level
    Red,
}

/// Tree node stored in the pool
///
/// Leaves carry an element; internal nodes have exactly two children and
/// hold the identity as their own value.
#[derive(Debug, Clone)]
pub struct Node<S> {
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) color: Color,
    /// Black nodes strictly below this one on any path to a leaf
    pub(crate) level: u32,
    /// Leaf count of the subtree
    pub(crate) size: usize,
    pub(crate) value: S,
    pub(crate) sum: S,
}

impl<S: Clone> Node<S> {
    /// Black leaf holding `value`
    pub fn leaf(value: S) -> Self {
        Self {
            left: None,
            right: None,
            color: Color::Black,
            level: 0,
            size: 1,
            sum: value.clone(),
            value,
        }
    }

    /// Red internal node over two subtrees; cached fields are filled by `update`
    pub(crate) fn internal(left: NodeId, right: NodeId, identity: S) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            color: Color::Red,
            level: 0,
            size: 0,
            sum: identity.clone(),
            value: identity,
        }
    }
}

impl<S> Node<S> {
    /// Whether this node is a leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none()
    }

    /// Node color
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Balancing level
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Leaf count
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Element (the identity for internal nodes)
    #[inline]
    pub fn value(&self) -> &S {
        &self.value
    }

    /// Left-to-right fold of the subtree
    #[inline]
    pub fn aggregate(&self) -> &S {
        &self.sum
    }

    /// Left child
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Whether this node is red
    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_is_black_level_zero() {
        let leaf = Node::leaf(5i64);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.color(), Color::Black);
        assert_eq!(leaf.level(), 0);
        assert_eq!(leaf.size(), 1);
        assert_eq!(*leaf.aggregate(), 5);
    }
}
