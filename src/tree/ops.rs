//! Positional sequence operations built from split and merge

use super::{CopyPolicy, RedBlackTree, Root};
use crate::monoid::Monoid;
use crate::pool::NodeId;
use crate::SeqError;

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P> {
    fn check_index(&self, root: Root, k: usize) -> Result<usize, SeqError> {
        let len = self.len(root)?;
        if k >= len {
            return Err(SeqError::IndexOutOfBounds { index: k, len });
        }
        Ok(len)
    }

    /// Insert `value` so that it ends up at position `k` (`k <= len`)
    pub fn insert(&mut self, root: &mut Root, k: usize, value: M::Value) -> Result<(), SeqError> {
        let (prefix, suffix) = self.split(*root, k)?;
        let leaf = self.leaf(value)?;
        *root = self.merge_all([prefix, Some(leaf), suffix])?;
        Ok(())
    }

    /// Remove and return the element at position `k`
    ///
    /// The removed leaf is returned to the pool in ephemeral mode; under
    /// persistence it may still be reachable from older roots and is kept.
    pub fn erase(&mut self, root: &mut Root, k: usize) -> Result<M::Value, SeqError> {
        self.check_index(*root, k)?;
        let (prefix, rest) = self.split_at(*root, k)?;
        let (single, suffix) = self.split_at(rest, 1)?;
        let value = self.take_single(single)?;
        *root = self.merge(prefix, suffix)?;
        Ok(value)
    }

    /// Element at position `k`
    pub fn get(&self, root: Root, k: usize) -> Result<M::Value, SeqError> {
        self.check_index(root, k)?;
        self.range_reduce(root, k, k + 1)
    }

    /// Replace the element at position `k`
    pub fn set(&mut self, root: &mut Root, k: usize, value: M::Value) -> Result<(), SeqError> {
        self.check_index(*root, k)?;
        if let Some(id) = *root {
            *root = Some(self.set_at(id, k, value)?);
        }
        Ok(())
    }

    fn set_at(&mut self, id: NodeId, k: usize, value: M::Value) -> Result<NodeId, SeqError> {
        let t = P::prepare(&mut self.pool, id)?;
        let node = self.pool.get_mut(t)?;
        let (Some(l), Some(r)) = (node.left, node.right) else {
            node.sum = value.clone();
            node.value = value;
            return Ok(t);
        };

        let left_size = self.pool.get(l)?.size;
        if k < left_size {
            let l = self.set_at(l, k, value)?;
            self.pool.get_mut(t)?.left = Some(l);
        } else {
            let r = self.set_at(r, k - left_size, value)?;
            self.pool.get_mut(t)?.right = Some(r);
        }
        self.update(t)
    }

    /// Prepend `value`
    pub fn push_front(&mut self, root: &mut Root, value: M::Value) -> Result<(), SeqError> {
        let leaf = self.leaf(value)?;
        *root = self.merge(Some(leaf), *root)?;
        Ok(())
    }

    /// Append `value`
    pub fn push_back(&mut self, root: &mut Root, value: M::Value) -> Result<(), SeqError> {
        let leaf = self.leaf(value)?;
        *root = self.merge(*root, Some(leaf))?;
        Ok(())
    }

    /// Remove and return the first element
    pub fn pop_front(&mut self, root: &mut Root) -> Result<M::Value, SeqError> {
        if root.is_none() {
            return Err(SeqError::EmptySequence);
        }
        let (single, rest) = self.split(*root, 1)?;
        let value = self.take_single(single)?;
        *root = rest;
        Ok(value)
    }

    /// Remove and return the last element
    pub fn pop_back(&mut self, root: &mut Root) -> Result<M::Value, SeqError> {
        let len = self.len(*root)?;
        if len == 0 {
            return Err(SeqError::EmptySequence);
        }
        let (rest, single) = self.split(*root, len - 1)?;
        let value = self.take_single(single)?;
        *root = rest;
        Ok(value)
    }

    /// Extract the value of a detached one-element sequence
    fn take_single(&mut self, single: Root) -> Result<M::Value, SeqError> {
        let id = single.ok_or(SeqError::EmptySequence)?;
        if P::PERSISTENT {
            Ok(self.pool.get(id)?.value.clone())
        } else {
            Ok(self.pool.free(id)?.value)
        }
    }
}
