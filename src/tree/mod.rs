//! Leveled red-black sequence tree
//!
//! Leaves hold the elements in order; internal nodes only cache
//! size, level and the aggregate of their subtree.
//!
//! Every mutating operation is expressed through [`RedBlackTree::split`]
//! and [`RedBlackTree::merge`], and every read goes through the cached
//! aggregates, so all positional operations cost O(log n).
//!
//! Roots are plain [`Root`] values. Operations that edit a sequence take
//! `&mut Root` and rewrite it; under the [`Persistent`] policy a copy of
//! the previous root keeps describing the previous version.

mod balance;
mod node;
mod ops;
mod policy;
mod query;
mod search;
mod split;
mod verify;

pub use node::{Color, Node};
pub use policy::{CopyPolicy, Ephemeral, Persistent};

use crate::monoid::Monoid;
use crate::pool::{NodeId, NodePool, PoolStats};
use crate::{SeqError, TreeConfig};
use std::fmt;
use std::marker::PhantomData;

/// Handle to a whole sequence; `None` is the empty sequence
pub type Root = Option<NodeId>;

/// Sequence engine owning the node pool for all of its roots
///
/// `M` supplies the element type and operator, `P` selects in-place
/// ([`Ephemeral`]) or copy-on-write ([`Persistent`]) editing.
pub struct RedBlackTree<M: Monoid, P: CopyPolicy = Ephemeral> {
    pool: NodePool<Node<M::Value>>,
    _policy: PhantomData<fn() -> (M, P)>,
}

impl<M: Monoid, P: CopyPolicy> fmt::Debug for RedBlackTree<M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("persistent", &P::PERSISTENT)
            .field("pool", &self.pool.stats())
            .finish()
    }
}

impl<M: Monoid, P: CopyPolicy> RedBlackTree<M, P> {
    /// Tree whose pool fits `max_elements` live leaves
    pub fn new(max_elements: usize) -> Self {
        Self::with_config(TreeConfig::for_elements(max_elements))
    }

    /// Tree with explicit pool sizing
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            pool: NodePool::with_capacity(config.capacity),
            _policy: PhantomData,
        }
    }

    /// Whether edits preserve earlier versions
    pub fn is_persistent(&self) -> bool {
        P::PERSISTENT
    }

    /// Allocate a single-element sequence
    pub fn leaf(&mut self, value: M::Value) -> Result<NodeId, SeqError> {
        self.pool.alloc(Node::leaf(value))
    }

    /// Dereference a node
    pub fn node(&self, id: NodeId) -> Result<&Node<M::Value>, SeqError> {
        self.pool.get(id)
    }

    /// Number of elements in `root`
    pub fn len(&self, root: Root) -> Result<usize, SeqError> {
        match root {
            Some(id) => Ok(self.pool.get(id)?.size()),
            None => Ok(0),
        }
    }

    /// Whether `root` is the empty sequence
    pub fn is_empty(&self, root: Root) -> bool {
        root.is_none()
    }

    /// Aggregate of a whole subtree; identity for the empty one
    pub(crate) fn aggregate_of(&self, root: Root) -> Result<M::Value, SeqError> {
        match root {
            Some(id) => Ok(self.pool.get(id)?.aggregate().clone()),
            None => Ok(M::identity()),
        }
    }

    /// Discard every node; all previously returned roots become stale
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Pool occupancy
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Return a node to the pool without touching its children
    ///
    /// The caller guarantees no retained root still reaches `id`.
    pub fn free(&mut self, id: NodeId) -> Result<(), SeqError> {
        self.pool.free(id).map(drop)
    }
}
