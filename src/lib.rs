//! # Leveled Red-Black Sequence Trees
//!
//! An in-memory ordered sequence with logarithmic split, concatenation,
//! positional insert/erase, point update and range reduction over any
//! associative operator, plus monotone binary search over accumulated values.
//!
//! ## Core Design
//!
//! 1. **Node pool**: every node lives in a fixed-capacity arena and is named by
//!    a generation-tagged [`NodeId`], so a reissued slot never aliases a stale handle
//! 2. **Leveled balancing**: red-black black-height expressed as a per-node `level`
//! 3. **Split/merge**: every mutating operation is a composition of the two
//! 4. **Copy policy**: [`Ephemeral`] mutates in place, [`Persistent`] clones the
//!    touched path so earlier roots keep describing earlier versions
//!
//! ## Usage Example
//!
//! ```
//! use rbseq::{monoid::Sum, RedBlackTree};
//!
//! let mut tree = RedBlackTree::<Sum>::new(16);
//! let mut root = tree.build(&[3, 1, 4, 1, 5])?;
//! tree.insert(&mut root, 2, 9)?;
//! assert_eq!(tree.range_reduce(root, 1, 4)?, 1 + 9 + 4);
//! assert_eq!(tree.dump(root)?, vec![3, 1, 9, 4, 1, 5]);
//! # Ok::<(), rbseq::SeqError>(())
//! ```
//!
//! The crate also ships an unrelated strongly-connected-components utility in
//! [`graph`].

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod graph;  // Strongly connected components + condensation
pub mod monoid; // Associative operator capability
pub mod pool;   // Fixed-capacity node arena
pub mod tree;   // Leveled red-black sequence engine

// Re-exports for convenience
pub use graph::{GraphError, StronglyConnectedComponents};
pub use monoid::Monoid;
pub use pool::{NodeId, NodePool, PoolStats};
pub use tree::{Color, CopyPolicy, Ephemeral, Node, Persistent, RedBlackTree, Root};

use thiserror::Error;

/// Sizing parameters for a tree's node pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of node slots reserved up front (never grows)
    pub capacity: usize,
}

impl TreeConfig {
    /// Pool for at most `max_elements` live leaves in ephemeral mode.
    ///
    /// A sequence of n leaves occupies 2n - 1 nodes, so the pool holds 2n slots.
    pub fn for_elements(max_elements: usize) -> Self {
        Self {
            capacity: 2 * max_elements.max(1),
        }
    }

    /// Pool for persistent use: `max_elements` leaves plus `retained_edits`
    /// mutating operations whose prior versions are all kept alive.
    ///
    /// Each edit clones O(log n) nodes along the paths it touches.
    pub fn persistent_for(max_elements: usize, retained_edits: usize) -> Self {
        let base = Self::for_elements(max_elements).capacity;
        Self {
            capacity: base + retained_edits * Self::nodes_per_edit(max_elements),
        }
    }

    /// Upper estimate of nodes cloned by one split/merge-based edit
    pub fn nodes_per_edit(max_elements: usize) -> usize {
        let height = usize::BITS - max_elements.max(1).leading_zeros();
        8 * (height as usize + 2)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::for_elements(1 << 10)
    }
}

/// Errors raised by the pool and the sequence engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// Position outside the sequence
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        /// Requested position
        index: usize,
        /// Sequence length at the time of the call
        len: usize,
    },

    /// Range with `start > end` or `end > len`
    #[error("invalid range [{start}, {end}) for sequence of length {len}")]
    InvalidRange {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Sequence length at the time of the call
        len: usize,
    },

    /// Pop from an empty sequence
    #[error("sequence is empty")]
    EmptySequence,

    /// Every pool slot is in use; the tree must be cleared before further use
    #[error("node pool exhausted (capacity {capacity})")]
    PoolExhausted {
        /// Fixed pool capacity
        capacity: usize,
    },

    /// Handle whose slot has been freed (and possibly reissued) since it was issued
    #[error("stale node handle: slot {index}, generation {generation}")]
    StaleHandle {
        /// Slot index carried by the handle
        index: usize,
        /// Generation carried by the handle
        generation: u32,
    },

    /// Structural invariant broken, reported by the checker
    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_elements_doubles() {
        assert_eq!(TreeConfig::for_elements(100).capacity, 200);
        assert_eq!(TreeConfig::for_elements(0).capacity, 2);
    }

    #[test]
    fn test_persistent_budget_grows_with_edits() {
        let ephemeral = TreeConfig::for_elements(1000);
        let persistent = TreeConfig::persistent_for(1000, 50);
        assert_eq!(
            persistent.capacity,
            ephemeral.capacity + 50 * TreeConfig::nodes_per_edit(1000)
        );
        // log2(1000) rounds up to 10 bits
        assert_eq!(TreeConfig::nodes_per_edit(1000), 8 * 12);
    }
}
