//! Fixed-size hash index: block id -> arena slot.
//!
//! Bucket `b` chains every entry whose `id % bucket_count == b`. New
//! entries are prepended; removal uses the entry's own chain links.

use crate::entry::{Arena, BlockId, Chain, SlotId};
use crate::error::{Error, Result};

#[derive(Debug)]
pub(crate) struct HashIndex {
    buckets: Vec<Option<SlotId>>,
}

impl HashIndex {
    /// Allocate `bucket_count` empty buckets
    pub fn with_buckets(bucket_count: usize) -> Result<Self> {
        if bucket_count == 0 {
            return Err(Error::InvalidCapacity(bucket_count));
        }

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(bucket_count)?;
        buckets.resize(bucket_count, None);

        Ok(Self { buckets })
    }

    fn bucket_of(&self, id: BlockId) -> usize {
        // Lossless: the remainder is below the bucket count
        (id.get() % self.buckets.len() as u64) as usize
    }

    pub fn insert(&mut self, arena: &mut Arena, slot: SlotId) {
        let bucket = self.bucket_of(arena[slot].id);
        let head = self.buckets[bucket];

        arena[slot].chain = Chain {
            prev: None,
            next: head,
        };
        if let Some(head) = head {
            arena[head].chain.prev = Some(slot);
        }
        self.buckets[bucket] = Some(slot);
    }

    pub fn lookup(&self, arena: &Arena, id: BlockId) -> Option<SlotId> {
        let mut cursor = self.buckets[self.bucket_of(id)];

        while let Some(slot) = cursor {
            if arena[slot].id == id {
                return Some(slot);
            }
            cursor = arena[slot].chain.next;
        }

        None
    }

    pub fn remove(&mut self, arena: &mut Arena, slot: SlotId) {
        let Chain { prev, next } = arena[slot].chain;

        match prev {
            Some(prev) => arena[prev].chain.next = next,
            None => {
                let bucket = self.bucket_of(arena[slot].id);
                debug_assert_eq!(self.buckets[bucket], Some(slot));
                self.buckets[bucket] = next;
            }
        }
        if let Some(next) = next {
            arena[next].chain.prev = prev;
        }

        arena[slot].chain = Chain::default();
    }

    pub fn clear(&mut self) {
        self.buckets.fill(None);
    }

    #[cfg(test)]
    pub fn chain_len(&self, arena: &Arena, id: BlockId) -> usize {
        let mut len = 0;
        let mut cursor = self.buckets[self.bucket_of(id)];
        while let Some(slot) = cursor {
            len += 1;
            cursor = arena[slot].chain.next;
        }
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_all(index: &mut HashIndex, arena: &mut Arena, ids: &[u64]) -> Vec<SlotId> {
        ids.iter()
            .map(|&id| {
                let slot = arena.alloc(BlockId::new(id)).unwrap();
                index.insert(arena, slot);
                slot
            })
            .collect()
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(
            HashIndex::with_buckets(0).unwrap_err(),
            Error::InvalidCapacity(0)
        );
    }

    #[test]
    fn test_lookup() {
        let mut arena = Arena::new();
        let mut index = HashIndex::with_buckets(8).unwrap();
        let slots = insert_all(&mut index, &mut arena, &[1, 2, 3]);

        assert_eq!(index.lookup(&arena, BlockId::new(2)), Some(slots[1]));
        assert_eq!(index.lookup(&arena, BlockId::new(4)), None);
    }

    #[test]
    fn test_collisions_share_bucket() {
        let mut arena = Arena::new();
        let mut index = HashIndex::with_buckets(4).unwrap();
        // 1, 5 and 9 all land in bucket 1
        let slots = insert_all(&mut index, &mut arena, &[1, 5, 9]);

        assert_eq!(index.chain_len(&arena, BlockId::new(1)), 3);
        for (slot, id) in slots.iter().zip([1, 5, 9]) {
            assert_eq!(index.lookup(&arena, BlockId::new(id)), Some(*slot));
        }
        assert_eq!(index.lookup(&arena, BlockId::new(13)), None);
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut arena = Arena::new();
        let mut index = HashIndex::with_buckets(4).unwrap();
        // Chain order after prepending: 13 -> 9 -> 5 -> 1
        let slots = insert_all(&mut index, &mut arena, &[1, 5, 9, 13]);

        index.remove(&mut arena, slots[3]); // head
        index.remove(&mut arena, slots[1]); // middle
        index.remove(&mut arena, slots[0]); // tail

        assert_eq!(index.chain_len(&arena, BlockId::new(9)), 1);
        assert_eq!(index.lookup(&arena, BlockId::new(9)), Some(slots[2]));
        assert_eq!(index.lookup(&arena, BlockId::new(1)), None);
        assert_eq!(index.lookup(&arena, BlockId::new(5)), None);
        assert_eq!(index.lookup(&arena, BlockId::new(13)), None);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let mut index = HashIndex::with_buckets(2).unwrap();
        insert_all(&mut index, &mut arena, &[0, 1, 2]);

        index.clear();

        assert_eq!(index.lookup(&arena, BlockId::new(0)), None);
        assert_eq!(index.chain_len(&arena, BlockId::new(1)), 0);
    }
}
