//! Circular recency list threaded through the arena.
//!
//! The sentinel's `next` is the most recently used entry and its `prev`
//! the least recently used. Every operation is O(1); finding an entry is
//! the hash index's job.

use crate::entry::{Arena, BlockId, Link, SlotId, SENTINEL};

/// Reset the list to the empty state (sentinel linked to itself)
pub(crate) fn init(arena: &mut Arena) {
    arena[SENTINEL].link = Link::looped(SENTINEL);
}

/// Link `slot` right after the sentinel
pub(crate) fn push_front(arena: &mut Arena, slot: SlotId) {
    let first = arena[SENTINEL].link.next;

    arena[slot].link = Link {
        prev: SENTINEL,
        next: first,
    };
    arena[first].link.prev = slot;
    arena[SENTINEL].link.next = slot;
}

/// Unlink `slot` using its own neighbours
pub(crate) fn remove(arena: &mut Arena, slot: SlotId) {
    debug_assert_ne!(slot, SENTINEL);
    let Link { prev, next } = arena[slot].link;

    arena[prev].link.next = next;
    arena[next].link.prev = prev;
    arena[slot].link = Link::looped(slot);
}

pub(crate) fn move_to_front(arena: &mut Arena, slot: SlotId) {
    if arena[SENTINEL].link.next == slot {
        return; // Already at front
    }

    remove(arena, slot);
    push_front(arena, slot);
}

/// Most recently used entry
pub(crate) fn front(arena: &Arena) -> Option<SlotId> {
    Some(arena[SENTINEL].link.next).filter(|&slot| slot != SENTINEL)
}

/// Least recently used entry; the eviction victim
pub(crate) fn back(arena: &Arena) -> Option<SlotId> {
    Some(arena[SENTINEL].link.prev).filter(|&slot| slot != SENTINEL)
}

/// Iterator over cached block ids, most recently used first
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    arena: &'a Arena,
    cursor: SlotId,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(arena: &'a Arena, len: usize) -> Self {
        Self {
            arena,
            cursor: arena[SENTINEL].link.next,
            remaining: len,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        if self.cursor == SENTINEL || self.remaining == 0 {
            return None;
        }

        let entry = &self.arena[self.cursor];
        self.cursor = entry.link.next;
        self.remaining -= 1;
        Some(entry.id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
