//! Invariant maintenance: `update`, rotations and the level-guided merge step

use super::{Color, CopyPolicy, Node, RedBlackTree, Root};
use crate::monoid::Monoid;
use crate::pool::NodeId;
use crate::SeqError;
use std::cmp::Ordering;

/// Rotation direction, named after the way the parent moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Right child rises, parent becomes its left child
    Left,
    /// Left child rises, parent becomes its right child
    Right,
}

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P> {
    /// Recompute size, level and aggregate of `id` from its children
    ///
    /// Must run bottom-up after every structural edit.
    pub(crate) fn update(&mut self, id: NodeId) -> Result<NodeId, SeqError> {
        let node = self.pool.get(id)?;
        let (size, level, sum) = match (node.left, node.right) {
            (None, None) => (1, 0, node.value.clone()),
            (Some(l), Some(r)) => {
                let left = self.pool.get(l)?;
                let right = self.pool.get(r)?;
                let level = left.level + u32::from(left.color == Color::Black);
                (left.size + right.size, level, M::combine(&left.sum, &right.sum))
            }
            _ => {
                return Err(SeqError::InvariantViolation(format!(
                    "internal node {} has a single child",
                    id.index()
                )))
            }
        };

        let node = self.pool.get_mut(id)?;
        node.size = size;
        node.level = level;
        node.sum = sum;
        Ok(id)
    }

    /// Both children of an internal node
    pub(crate) fn children(&self, id: NodeId) -> Result<(NodeId, NodeId), SeqError> {
        let node = self.pool.get(id)?;
        match (node.left, node.right) {
            (Some(l), Some(r)) => Ok((l, r)),
            _ => Err(SeqError::InvariantViolation(format!(
                "expected internal node at slot {}",
                id.index()
            ))),
        }
    }

    /// Single rotation at `id`, returning the new subtree root
    ///
    /// Both `id` and the child that rises must already belong to the
    /// running operation (prepared through the copy policy).
    pub(crate) fn rotate(&mut self, id: NodeId, direction: Direction) -> Result<NodeId, SeqError> {
        let (l, r) = self.children(id)?;
        let risen = match direction {
            Direction::Right => {
                let inner = self.pool.get(l)?.right;
                self.pool.get_mut(id)?.left = inner;
                self.pool.get_mut(l)?.right = Some(id);
                l
            }
            Direction::Left => {
                let inner = self.pool.get(r)?.left;
                self.pool.get_mut(id)?.right = inner;
                self.pool.get_mut(r)?.left = Some(id);
                r
            }
        };
        self.update(id)?;
        self.update(risen)
    }

    fn set_color(&mut self, id: NodeId, color: Color) -> Result<(), SeqError> {
        self.pool.get_mut(id)?.color = color;
        Ok(())
    }

    fn is_red(&self, id: Option<NodeId>) -> Result<bool, SeqError> {
        match id {
            Some(id) => Ok(self.pool.get(id)?.is_red()),
            None => Ok(false),
        }
    }

    /// Recolor a subtree root black, cloning it first if the policy asks
    pub(crate) fn blacken(&mut self, root: Root) -> Result<Root, SeqError> {
        match root {
            Some(id) if self.pool.get(id)?.is_red() => {
                let id = P::prepare(&mut self.pool, id)?;
                self.set_color(id, Color::Black)?;
                Ok(Some(id))
            }
            other => Ok(other),
        }
    }

    /// Fresh red node directly above two subtrees of equal level
    fn join(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, SeqError> {
        let id = self
            .pool
            .alloc(Node::internal(left, right, M::identity()))?;
        self.update(id)
    }

    /// Concatenate two non-empty subtrees, descending into the deeper one
    ///
    /// The result may be red with a red child on the side that was
    /// descended; the caller repairs it one level up, or recolors the root.
    pub(crate) fn submerge(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, SeqError> {
        let left_level = self.pool.get(left)?.level;
        let right_level = self.pool.get(right)?.level;

        match left_level.cmp(&right_level) {
            Ordering::Less => {
                let r = P::prepare(&mut self.pool, right)?;
                let (inner, outer) = self.children(r)?;
                let c = self.submerge(left, inner)?;
                self.pool.get_mut(r)?.left = Some(c);

                let c_left = self.pool.get(c)?.left;
                if !self.is_red(Some(r))? && self.is_red(Some(c))? && self.is_red(c_left)? {
                    self.set_color(r, Color::Red)?;
                    self.set_color(c, Color::Black)?;
                    if !self.is_red(Some(outer))? {
                        return self.rotate(r, Direction::Right);
                    }
                    let outer = P::prepare(&mut self.pool, outer)?;
                    self.set_color(outer, Color::Black)?;
                    self.pool.get_mut(r)?.right = Some(outer);
                }
                self.update(r)
            }
            Ordering::Greater => {
                let l = P::prepare(&mut self.pool, left)?;
                let (outer, inner) = self.children(l)?;
                let c = self.submerge(inner, right)?;
                self.pool.get_mut(l)?.right = Some(c);

                let c_right = self.pool.get(c)?.right;
                if !self.is_red(Some(l))? && self.is_red(Some(c))? && self.is_red(c_right)? {
                    self.set_color(l, Color::Red)?;
                    self.set_color(c, Color::Black)?;
                    if !self.is_red(Some(outer))? {
                        return self.rotate(l, Direction::Left);
                    }
                    let outer = P::prepare(&mut self.pool, outer)?;
                    self.set_color(outer, Color::Black)?;
                    self.pool.get_mut(l)?.left = Some(outer);
                }
                self.update(l)
            }
            Ordering::Equal => self.join(left, right),
        }
    }
}
