//! Binary search over accumulated values
//!
//! `f` must be monotone: once it holds for an accumulated prefix (or
//! suffix) it holds for every longer one, and it must not hold for the
//! identity. The descent tests `f` on cached aggregates only.

use super::{CopyPolicy, RedBlackTree, Root};
use crate::monoid::Monoid;
use crate::SeqError;

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P> {
    /// Position of the element at which `f` first holds, scanning from the front
    ///
    /// Returns the largest `r` with `f(s[0..r))` false, i.e. the smallest
    /// `r` with `f(s[0..=r])` true, or `len` if `f` never holds.
    pub fn search_right<F>(&self, root: Root, f: F) -> Result<usize, SeqError>
    where
        F: Fn(&M::Value) -> bool,
    {
        self.search_right_from(root, M::identity(), f)
    }

    /// [`search_right`](Self::search_right) with `prefix` accumulated in front of `root`
    pub fn search_right_from<F>(&self, root: Root, prefix: M::Value, f: F) -> Result<usize, SeqError>
    where
        F: Fn(&M::Value) -> bool,
    {
        self.descend_right(root, &prefix, &f)
    }

    fn descend_right<F>(&self, root: Root, acc: &M::Value, f: &F) -> Result<usize, SeqError>
    where
        F: Fn(&M::Value) -> bool,
    {
        let Some(id) = root else {
            return Ok(0);
        };
        let node = self.pool.get(id)?;
        if !f(&M::combine(acc, &node.sum)) {
            return Ok(node.size);
        }
        let (Some(l), r) = (node.left, node.right) else {
            return Ok(0);
        };

        let left = self.pool.get(l)?;
        let with_left = M::combine(acc, &left.sum);
        if f(&with_left) {
            return self.descend_right(Some(l), acc, f);
        }
        Ok(left.size + self.descend_right(r, &with_left, f)?)
    }

    /// Mirror of [`search_right`](Self::search_right), scanning from the back
    ///
    /// Returns the smallest `l` with `f(s[l..n))` false; the element at
    /// `l - 1` is the one at which `f` first holds. Returns `0` if `f`
    /// never holds.
    pub fn search_left<F>(&self, root: Root, f: F) -> Result<usize, SeqError>
    where
        F: Fn(&M::Value) -> bool,
    {
        self.search_left_from(root, M::identity(), f)
    }

    /// [`search_left`](Self::search_left) with `suffix` accumulated behind `root`
    pub fn search_left_from<F>(&self, root: Root, suffix: M::Value, f: F) -> Result<usize, SeqError>
    where
        F: Fn(&M::Value) -> bool,
    {
        self.descend_left(root, &suffix, &f)
    }

    fn descend_left<F>(&self, root: Root, acc: &M::Value, f: &F) -> Result<usize, SeqError>
    where
        F: Fn(&M::Value) -> bool,
    {
        let Some(id) = root else {
            return Ok(0);
        };
        let node = self.pool.get(id)?;
        if !f(&M::combine(&node.sum, acc)) {
            return Ok(0);
        }
        let (l, Some(r)) = (node.left, node.right) else {
            return Ok(1);
        };

        let right = self.pool.get(r)?;
        let with_right = M::combine(&right.sum, acc);
        if f(&with_right) {
            return Ok(self.len(l)? + self.descend_left(Some(r), acc, f)?);
        }
        self.descend_left(l, &with_right, f)
    }
}
