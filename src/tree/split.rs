//! Split/merge engine plus bulk construction and extraction

use super::{Color, CopyPolicy, RedBlackTree, Root};
use crate::monoid::Monoid;
use crate::pool::NodeId;
use crate::SeqError;
use tracing::{debug, trace};

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P> {
    /// Concatenate `left` before `right`
    ///
    /// An empty operand returns the other one unchanged. The result root is black.
    pub fn merge(&mut self, left: Root, right: Root) -> Result<Root, SeqError> {
        let (l, r) = match (left, right) {
            (None, other) | (other, None) => return Ok(other),
            (Some(l), Some(r)) => (l, r),
        };
        trace!(left = l.index(), right = r.index(), "merge");

        // Red operands (split halves) would let a red-red pair survive at the top
        let l = self.blacken(Some(l))?.unwrap_or(l);
        let r = self.blacken(Some(r))?.unwrap_or(r);

        let root = self.submerge(l, r)?;
        self.pool.get_mut(root)?.color = Color::Black;
        Ok(Some(root))
    }

    /// Left fold of [`merge`](Self::merge); the empty fold is the empty sequence
    pub fn merge_all<I>(&mut self, parts: I) -> Result<Root, SeqError>
    where
        I: IntoIterator<Item = Root>,
    {
        parts
            .into_iter()
            .try_fold(None, |acc, part| self.merge(acc, part))
    }

    /// Split into positions `[0, k)` and `[k, n)`
    ///
    /// Fails with [`SeqError::IndexOutOfBounds`] when `k > n`.
    pub fn split(&mut self, root: Root, k: usize) -> Result<(Root, Root), SeqError> {
        let len = self.len(root)?;
        if k > len {
            return Err(SeqError::IndexOutOfBounds { index: k, len });
        }
        trace!(k, len, "split");
        let (left, right) = self.split_at(root, k)?;
        Ok((self.blacken(left)?, self.blacken(right)?))
    }

    /// Unchecked split; `k` is clamped to the subtree size
    pub(crate) fn split_at(&mut self, root: Root, k: usize) -> Result<(Root, Root), SeqError> {
        let Some(id) = root else {
            return Ok((None, None));
        };
        if k == 0 {
            return Ok((None, root));
        }
        if k >= self.pool.get(id)?.size {
            return Ok((root, None));
        }

        // The node's content is fully described by its two children from here on
        let t = P::prepare(&mut self.pool, id)?;
        let node = self.pool.free(t)?;
        let (l, r) = (node.left, node.right);
        let left_size = self.len(l)?;

        match k.cmp(&left_size) {
            std::cmp::Ordering::Less => {
                let (a, b) = self.split_at(l, k)?;
                Ok((a, self.merge(b, r)?))
            }
            std::cmp::Ordering::Greater => {
                let (a, b) = self.split_at(r, k - left_size)?;
                Ok((self.merge(l, a)?, b))
            }
            std::cmp::Ordering::Equal => Ok((l, r)),
        }
    }

    /// Split into `[0, a)`, `[a, b)` and `[b, n)`
    ///
    /// Fails with [`SeqError::InvalidRange`] unless `a <= b <= n`.
    pub fn split3(&mut self, root: Root, a: usize, b: usize) -> Result<(Root, Root, Root), SeqError> {
        let len = self.len(root)?;
        if a > b || b > len {
            return Err(SeqError::InvalidRange {
                start: a,
                end: b,
                len,
            });
        }
        let (prefix, rest) = self.split(root, a)?;
        let (middle, suffix) = self.split(rest, b - a)?;
        Ok((prefix, middle, suffix))
    }

    /// Balanced tree over `values` in O(n)
    pub fn build(&mut self, values: &[M::Value]) -> Result<Root, SeqError> {
        let root = self.build_range(values)?;
        debug!(len = values.len(), live = self.pool.live(), "built sequence");
        Ok(root)
    }

    fn build_range(&mut self, values: &[M::Value]) -> Result<Root, SeqError> {
        match values {
            [] => Ok(None),
            [value] => Ok(Some(self.leaf(value.clone())?)),
            _ => {
                let (front, back) = values.split_at(values.len() / 2);
                let left = self.build_range(front)?;
                let right = self.build_range(back)?;
                self.merge(left, right)
            }
        }
    }

    /// All elements in order
    pub fn dump(&self, root: Root) -> Result<Vec<M::Value>, SeqError> {
        let mut out = Vec::with_capacity(self.len(root)?);
        if let Some(id) = root {
            self.dump_into(id, &mut out)?;
        }
        Ok(out)
    }

    fn dump_into(&self, id: NodeId, out: &mut Vec<M::Value>) -> Result<(), SeqError> {
        let node = self.pool.get(id)?;
        match (node.left, node.right) {
            (Some(l), Some(r)) => {
                self.dump_into(l, out)?;
                self.dump_into(r, out)
            }
            _ => {
                out.push(node.value.clone());
                Ok(())
            }
        }
    }

    /// Debug rendering: elements formatted by `single` and joined with `", "`
    pub fn render<F>(&self, root: Root, single: F) -> Result<String, SeqError>
    where
        F: Fn(&M::Value) -> String,
    {
        Ok(self
            .dump(root)?
            .iter()
            .map(single)
            .collect::<Vec<_>>()
            .join(", "))
    }
}
