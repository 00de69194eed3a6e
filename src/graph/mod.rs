//! Directed graph utilities
//!
//! Strongly connected components via two depth-first passes (forward
//! graph for finishing order, reverse graph for labeling), plus the
//! condensation DAG over the resulting component ids.

mod scc;

pub use scc::{SccSummary, StronglyConnectedComponents};

use thiserror::Error;

/// Error type returned by graph construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge points outside `0..num_vertices`.
    #[error("edge {origin} -> {vertex} leaves the vertex range 0..{num_vertices}")]
    VertexOutOfRange {
        /// Edge origin.
        origin: usize,
        /// Offending edge target.
        vertex: usize,
        /// Number of vertices in the graph.
        num_vertices: usize,
    },
}
