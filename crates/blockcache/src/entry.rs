//! Cache entries and the arena that owns them.
//!
//! Every entry lives in one arena slot and carries two memberships: a
//! [`Link`] into the recency list and a [`Chain`] into one hash bucket.
//! Both structures refer to entries by [`SlotId`] only; the arena is the
//! single owner.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// Position of an entry inside the arena
pub(crate) type SlotId = usize;

/// Slot 0 of every arena. Marks both ends of the recency list and is
/// never a cached entry.
pub(crate) const SENTINEL: SlotId = 0;

/// Block number at cache-line granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    /// Wrap a raw block number
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw block number
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl TryFrom<i64> for BlockId {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self> {
        u64::try_from(id)
            .map(Self)
            .map_err(|_| Error::InvalidBlockId(id))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Recency list membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub prev: SlotId,
    pub next: SlotId,
}

impl Link {
    /// A link pointing back at `slot` on both sides
    pub fn looped(slot: SlotId) -> Self {
        Self {
            prev: slot,
            next: slot,
        }
    }
}

/// Hash bucket chain membership
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Chain {
    pub prev: Option<SlotId>,
    pub next: Option<SlotId>,
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub id: BlockId,
    pub link: Link,
    pub chain: Chain,
}

impl Entry {
    fn detached(slot: SlotId, id: BlockId) -> Self {
        Self {
            id,
            link: Link::looped(slot),
            chain: Chain::default(),
        }
    }
}

/// Slot storage for entries, with released slots recycled through a free list
#[derive(Debug)]
pub(crate) struct Arena {
    slots: Vec<Entry>,
    free: Vec<SlotId>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            slots: vec![Entry::detached(SENTINEL, BlockId(0))],
            free: Vec::new(),
        }
    }

    /// Claim a slot for `id`. The entry starts detached from both structures.
    pub fn alloc(&mut self, id: BlockId) -> Result<SlotId> {
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Entry::detached(slot, id);
            return Ok(slot);
        }

        self.slots.try_reserve(1)?;
        let slot = self.slots.len();
        self.slots.push(Entry::detached(slot, id));
        Ok(slot)
    }

    /// Return a slot to the free list. The caller must already have
    /// unlinked it from the recency list and its hash bucket.
    pub fn release(&mut self, slot: SlotId) {
        debug_assert_ne!(slot, SENTINEL, "sentinel is never released");
        self.free.push(slot);
    }

    /// Drop every entry, keeping only the sentinel
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[SENTINEL] = Entry::detached(SENTINEL, BlockId(0));
        self.free.clear();
    }

    /// Slots ever handed out, excluding the sentinel
    #[cfg(test)]
    pub fn allocated(&self) -> usize {
        self.slots.len() - 1
    }
}

impl Index<SlotId> for Arena {
    type Output = Entry;

    fn index(&self, slot: SlotId) -> &Entry {
        &self.slots[slot]
    }
}

impl IndexMut<SlotId> for Arena {
    fn index_mut(&mut self, slot: SlotId) -> &mut Entry {
        &mut self.slots[slot]
    }
}
