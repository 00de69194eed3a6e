//! Copy-on-write policy
//!
//! Every node an operation is about to modify passes through
//! [`CopyPolicy::prepare`] first. [`Ephemeral`] returns the node itself,
//! [`Persistent`] returns a fresh copy so that other roots sharing the
//! original never observe the edit.

use crate::pool::{NodeId, NodePool};
use crate::SeqError;

/// Decides whether a node is edited in place or cloned first
pub trait CopyPolicy {
    /// True when earlier roots must remain valid after edits
    const PERSISTENT: bool;

    /// Return a node the caller may freely modify in place of `id`
    fn prepare<T: Clone>(pool: &mut NodePool<T>, id: NodeId) -> Result<NodeId, SeqError>;
}

/// In-place editing; old roots are invalidated by every edit
#[derive(Debug, Clone, Copy, Default)]
pub struct Ephemeral;

impl CopyPolicy for Ephemeral {
    const PERSISTENT: bool = false;

    #[inline]
    fn prepare<T: Clone>(pool: &mut NodePool<T>, id: NodeId) -> Result<NodeId, SeqError> {
        pool.get(id)?;
        Ok(id)
    }
}

/// Path copying; every root ever returned stays readable
#[derive(Debug, Clone, Copy, Default)]
pub struct Persistent;

impl CopyPolicy for Persistent {
    const PERSISTENT: bool = true;

    #[inline]
    fn prepare<T: Clone>(pool: &mut NodePool<T>, id: NodeId) -> Result<NodeId, SeqError> {
        let copy = pool.get(id)?.clone();
        pool.alloc(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_reuses_node() {
        let mut pool = NodePool::with_capacity(2);
        let id = pool.alloc(1u32).unwrap();
        assert_eq!(Ephemeral::prepare(&mut pool, id), Ok(id));
        assert_eq!(pool.live(), 1);
    }

    #[test]
    fn test_persistent_copies_node() {
        let mut pool = NodePool::with_capacity(2);
        let id = pool.alloc(1u32).unwrap();
        let copy = Persistent::prepare(&mut pool, id).unwrap();
        assert_ne!(copy, id);
        *pool.get_mut(copy).unwrap() = 2;
        assert_eq!(pool.get(id), Ok(&1));
    }
}
