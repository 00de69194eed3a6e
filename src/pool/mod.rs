//! Node pool
//!
//! Fixed-capacity arena that owns every tree node.
//! Handles carry the slot's generation, so a slot freed and reissued
//! can never be reached through an old handle.

mod allocator;

pub use allocator::NodePool;

/// Generation-tagged handle to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the pool
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this handle was issued
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Occupancy snapshot of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct PoolStats {
    /// Total slots
    pub capacity: usize,
    /// Slots currently holding a node
    pub live: usize,
    /// Slots on the free list
    pub available: usize,
    /// Maximum `live` observed since construction or the last clear
    pub high_water: usize,
}

impl PoolStats {
    /// Fraction of the pool in use
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.live as f64 / self.capacity as f64
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Pool: {} / {} slots live ({:.1}%)\n  Free: {}\n  Peak: {}",
            self.live,
            self.capacity,
            self.utilization() * 100.0,
            self.available,
            self.high_water
        )
    }
}
