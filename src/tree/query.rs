//! Range reduction over cached aggregates

use super::{CopyPolicy, RedBlackTree, Root};
use crate::monoid::Monoid;
use crate::SeqError;

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P> {
    /// Fold of the elements in `[start, end)`
    ///
    /// Returns the identity for an empty range. Fails with
    /// [`SeqError::InvalidRange`] unless `start <= end <= len`.
    pub fn range_reduce(&self, root: Root, start: usize, end: usize) -> Result<M::Value, SeqError> {
        let len = self.len(root)?;
        if start > end || end > len {
            return Err(SeqError::InvalidRange { start, end, len });
        }
        if start == end {
            return Ok(M::identity());
        }
        self.reduce_within(root, start, end, 0, len)
    }

    /// Fold of the whole sequence
    pub fn all_reduce(&self, root: Root) -> Result<M::Value, SeqError> {
        self.aggregate_of(root)
    }

    /// `root` spans positions `[lo, hi)`
    fn reduce_within(
        &self,
        root: Root,
        start: usize,
        end: usize,
        lo: usize,
        hi: usize,
    ) -> Result<M::Value, SeqError> {
        let Some(id) = root else {
            return Ok(M::identity());
        };
        if hi <= start || end <= lo {
            return Ok(M::identity());
        }

        let node = self.pool.get(id)?;
        if start <= lo && hi <= end {
            return Ok(node.sum.clone());
        }

        let (l, r) = (node.left, node.right);
        let mid = lo + self.len(l)?;
        let left = self.reduce_within(l, start, end, lo, mid)?;
        let right = self.reduce_within(r, start, end, mid, hi)?;
        Ok(M::combine(&left, &right))
    }
}

#[cfg(test)]
mod tests {
    use crate::monoid::{Concat, MaxPair};
    use crate::tree::{Ephemeral, RedBlackTree};
    use crate::SeqError;

    #[test]
    fn test_max_pair_full_range() {
        let mut tree = RedBlackTree::<MaxPair, Ephemeral>::new(8);
        let root = tree.build(&[(1, 2), (5, 1), (3, 9)]).unwrap();
        assert_eq!(tree.range_reduce(root, 0, 3), Ok((5, 9)));
        assert_eq!(tree.range_reduce(root, 2, 2), Ok((i64::MIN, i64::MIN)));
    }

    #[test]
    fn test_partial_ranges_respect_order() {
        let mut tree = RedBlackTree::<Concat, Ephemeral>::new(16);
        let letters: Vec<String> = "abcdefg".chars().map(String::from).collect();
        let root = tree.build(&letters).unwrap();
        assert_eq!(tree.range_reduce(root, 1, 6).unwrap(), "bcdef");
        assert_eq!(tree.range_reduce(root, 3, 4).unwrap(), "d");
        assert_eq!(
            tree.range_reduce(root, 4, 8),
            Err(SeqError::InvalidRange {
                start: 4,
                end: 8,
                len: 7
            })
        );
    }
}
