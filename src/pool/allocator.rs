//! Slot arena with a free-list stock

use super::{NodeId, PoolStats};
use crate::SeqError;
use tracing::{debug, warn};

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity arena handing out slots in O(1)
///
/// Capacity is chosen once; running out is reported as
/// [`SeqError::PoolExhausted`] and never triggers growth.
#[derive(Debug)]
pub struct NodePool<T> {
    /// Backing store, one entry per slot
    slots: Vec<Slot<T>>,

    /// Free slot indices; the next allocation pops from the back
    stock: Vec<u32>,

    /// Peak live count since the last clear
    high_water: usize,
}

impl<T> NodePool<T> {
    /// Create a pool with `capacity` free slots
    ///
    /// # Panics
    ///
    /// Panics if `capacity` does not fit in a `u32` slot index.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            u32::try_from(capacity).is_ok(),
            "pool capacity {capacity} exceeds u32 slot indices"
        );

        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                value: None,
            })
            .collect();
        let mut pool = Self {
            slots,
            stock: Vec::with_capacity(capacity),
            high_water: 0,
        };
        pool.restock();
        pool
    }

    /// Refill the stock so that low indices are handed out first
    fn restock(&mut self) {
        self.stock.clear();
        self.stock.extend((0..self.slots.len() as u32).rev());
    }

    /// Place `value` in a free slot
    pub fn alloc(&mut self, value: T) -> Result<NodeId, SeqError> {
        let Some(index) = self.stock.pop() else {
            warn!(capacity = self.capacity(), "node pool exhausted");
            return Err(SeqError::PoolExhausted {
                capacity: self.capacity(),
            });
        };

        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        let id = NodeId::new(index, slot.generation);

        self.high_water = self.high_water.max(self.live());
        Ok(id)
    }

    /// Return a slot to the stock and hand back its contents
    ///
    /// The slot's generation advances, so `id` and every copy of it
    /// become stale. Freeing twice reports [`SeqError::StaleHandle`].
    pub fn free(&mut self, id: NodeId) -> Result<T, SeqError> {
        let slot = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .ok_or_else(|| stale(id))?;
        let value = slot.value.take().ok_or_else(|| stale(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.stock.push(id.index);
        Ok(value)
    }

    /// Dereference a handle
    #[inline]
    pub fn get(&self, id: NodeId) -> Result<&T, SeqError> {
        match self.slots.get(id.index()) {
            Some(Slot {
                generation,
                value: Some(value),
            }) if *generation == id.generation() => Ok(value),
            _ => Err(stale(id)),
        }
    }

    /// Dereference a handle for writing
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut T, SeqError> {
        match self.slots.get_mut(id.index()) {
            Some(Slot {
                generation,
                value: Some(value),
            }) if *generation == id.generation() => Ok(value),
            _ => Err(stale(id)),
        }
    }

    /// Whether `id` still names a live slot
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    /// Drop every node and return all slots to the stock
    ///
    /// Every handle issued before the call becomes stale.
    pub fn clear(&mut self) {
        let released = self.live();
        for slot in &mut self.slots {
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
        }
        self.restock();
        self.high_water = 0;
        debug!(released, capacity = self.capacity(), "node pool cleared");
    }

    /// Total slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots on the free list
    pub fn available(&self) -> usize {
        self.stock.len()
    }

    /// Slots currently holding a node
    pub fn live(&self) -> usize {
        self.capacity() - self.available()
    }

    /// Occupancy snapshot
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity(),
            live: self.live(),
            available: self.available(),
            high_water: self.high_water,
        }
    }
}

fn stale(id: NodeId) -> SeqError {
    warn!(
        index = id.index(),
        generation = id.generation(),
        "dereferenced stale node handle"
    );
    SeqError::StaleHandle {
        index: id.index(),
        generation: id.generation(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_until_exhausted() {
        let mut pool = NodePool::with_capacity(3);
        for i in 0..3 {
            pool.alloc(i).unwrap();
        }
        assert_eq!(pool.available(), 0);
        assert_eq!(
            pool.alloc(99),
            Err(SeqError::PoolExhausted { capacity: 3 })
        );
    }

    #[test]
    fn test_reissued_slot_rejects_old_handle() {
        let mut pool = NodePool::with_capacity(1);
        let old = pool.alloc("first").unwrap();
        assert_eq!(pool.free(old), Ok("first"));

        let new = pool.alloc("second").unwrap();
        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());

        assert!(matches!(pool.get(old), Err(SeqError::StaleHandle { .. })));
        assert_eq!(pool.get(new), Ok(&"second"));
    }

    #[test]
    fn test_double_free_detected() {
        let mut pool = NodePool::with_capacity(2);
        let id = pool.alloc(7u8).unwrap();
        pool.free(id).unwrap();
        assert!(matches!(pool.free(id), Err(SeqError::StaleHandle { .. })));
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut pool = NodePool::with_capacity(4);
        let ids: Vec<_> = (0..4).map(|i| pool.alloc(i).unwrap()).collect();
        assert_eq!(pool.stats().high_water, 4);

        pool.clear();
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.stats().high_water, 0);
        assert!(ids.iter().all(|&id| !pool.contains(id)));
    }
}
