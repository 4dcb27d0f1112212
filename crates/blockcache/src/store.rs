//! LRU store: the single owner of every cache entry.
//!
//! Lookups go through the [`HashIndex`]; recency order lives in the
//! circular list threaded through the same arena slots. A miss on a full
//! store inserts the new entry first and then evicts the list tail.

use tracing::{debug, trace};

use crate::entry::{Arena, BlockId, SlotId};
use crate::error::{Error, Result};
use crate::index::HashIndex;
use crate::list::{self, Iter};

/// Outcome of a single [`LruStore::access`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The block was cached and is now most recently used
    Hit,
    /// The block was not cached and has been inserted
    Miss,
}

impl Access {
    /// Whether this access was a hit
    pub fn is_hit(self) -> bool {
        matches!(self, Access::Hit)
    }
}

/// Fixed-capacity LRU cache of block ids
#[derive(Debug)]
pub struct LruStore {
    arena: Arena,
    index: HashIndex,
    capacity: usize,
    size: usize,
    evictions: u64,
}

impl LruStore {
    /// Create an empty store holding at most `capacity` blocks
    ///
    /// # Errors
    /// * [`Error::InvalidCapacity`] if `capacity` is zero
    /// * [`Error::AllocationFailed`] if the bucket array cannot be reserved
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        let index = HashIndex::with_buckets(capacity)?;
        let mut arena = Arena::new();
        list::init(&mut arena);

        debug!(capacity, "created LRU store");

        Ok(Self {
            arena,
            index,
            capacity,
            size: 0,
            evictions: 0,
        })
    }

    /// Touch `id`: promote it on a hit, insert it on a miss
    ///
    /// # Errors
    /// * [`Error::AllocationFailed`] if a new entry cannot be allocated;
    ///   the store is left unchanged
    pub fn access(&mut self, id: BlockId) -> Result<Access> {
        if let Some(slot) = self.index.lookup(&self.arena, id) {
            list::move_to_front(&mut self.arena, slot);
            return Ok(Access::Hit);
        }

        let slot = self.arena.alloc(id)?;
        self.index.insert(&mut self.arena, slot);
        list::push_front(&mut self.arena, slot);

        if self.size == self.capacity {
            self.evict_lru();
        } else {
            self.size += 1;
        }

        Ok(Access::Miss)
    }

    fn evict_lru(&mut self) {
        let Some(victim) = list::back(&self.arena) else {
            return;
        };

        let id = self.arena[victim].id;
        self.unlink(victim);
        self.evictions += 1;
        trace!(block = %id, "evicted");
    }

    fn unlink(&mut self, slot: SlotId) {
        self.index.remove(&mut self.arena, slot);
        list::remove(&mut self.arena, slot);
        self.arena.release(slot);
    }

    /// Whether `id` is cached. Does not change recency order.
    pub fn contains(&self, id: BlockId) -> bool {
        self.index.lookup(&self.arena, id).is_some()
    }

    /// Most recently used block
    pub fn mru(&self) -> Option<BlockId> {
        list::front(&self.arena).map(|slot| self.arena[slot].id)
    }

    /// Least recently used block, evicted by the next miss on a full store
    pub fn lru(&self) -> Option<BlockId> {
        list::back(&self.arena).map(|slot| self.arena[slot].id)
    }

    /// Cached blocks from most to least recently used
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.arena, self.size)
    }

    /// Release every entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.arena.clear();
        list::init(&mut self.arena);
        self.size = 0;
    }

    /// Number of cached blocks
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Maximum number of cached blocks
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries evicted since creation
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}

impl<'a> IntoIterator for &'a LruStore {
    type Item = BlockId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
