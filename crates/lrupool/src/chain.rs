//! Hash chain index over the slot pool
//!
//! Each bucket-table entry names the head slot of that bucket's chain.
//! Chains are doubly linked through per-slot `next`/`prev` index arrays, so a
//! repurposed slot can leave its old bucket in O(1) wherever it sits in the
//! pool. Members of a bucket need not be adjacent in slot order.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use crate::arena::{Arena, NIL, NO_BUCKET};

pub(crate) struct ChainIndex<S> {
    /// bucket id -> head slot
    heads: Box<[u32]>,
    next: Box<[u32]>,
    prev: Box<[u32]>,
    hasher: S,
}

impl<S> ChainIndex<S> {
    pub(crate) fn new(slots: usize, buckets: usize, hasher: S) -> Self {
        Self {
            heads: vec![NIL; buckets].into_boxed_slice(),
            next: vec![NIL; slots].into_boxed_slice(),
            prev: vec![NIL; slots].into_boxed_slice(),
            hasher,
        }
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<S: BuildHasher> ChainIndex<S> {
    /// Bucket a key hashes to
    pub(crate) fn bucket_of<Q>(&self, key: &Q) -> u32
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % self.heads.len() as u64) as u32
    }

    /// Find the slot holding `key`
    pub(crate) fn locate<K, V, Q>(&self, arena: &Arena<K, V>, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_of(key);
        let mut cursor = self.heads[bucket as usize];

        while cursor != NIL {
            let slot = &arena[cursor];
            debug_assert_eq!(slot.bucket, bucket);
            if slot.key().is_some_and(|k| k.borrow() == key) {
                return Some(cursor);
            }
            cursor = self.next[cursor as usize];
        }

        None
    }

    /// Move `slot` from its current bucket to the head of `bucket`
    pub(crate) fn rebind<K, V>(&mut self, arena: &mut Arena<K, V>, slot: u32, bucket: u32) {
        let old = arena[slot].bucket;
        if old == bucket {
            return;
        }
        if old != NO_BUCKET {
            self.unlink(slot, old);
        }

        let head = self.heads[bucket as usize];
        self.next[slot as usize] = head;
        self.prev[slot as usize] = NIL;
        if head != NIL {
            self.prev[head as usize] = slot;
        }
        self.heads[bucket as usize] = slot;

        arena[slot].bucket = bucket;
    }

    fn unlink(&mut self, slot: u32, bucket: u32) {
        let prev = self.prev[slot as usize];
        let next = self.next[slot as usize];

        if prev == NIL {
            // slot was the head; the next member (if any) takes over
            self.heads[bucket as usize] = next;
        } else {
            self.next[prev as usize] = next;
        }
        if next != NIL {
            self.prev[next as usize] = prev;
        }

        self.next[slot as usize] = NIL;
        self.prev[slot as usize] = NIL;
    }

    /// Slots currently chained under `bucket`, head first
    pub(crate) fn members(&self, bucket: u32) -> impl Iterator<Item = u32> + '_ {
        let head = self.heads[bucket as usize];
        std::iter::successors((head != NIL).then_some(head), move |&idx| {
            let next = self.next[idx as usize];
            (next != NIL).then_some(next)
        })
    }

    /// Length of the longest chain
    pub(crate) fn longest_chain(&self) -> usize {
        (0..self.heads.len() as u32)
            .map(|bucket| self.members(bucket).count())
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn reset(&mut self) {
        self.heads.fill(NIL);
        self.next.fill(NIL);
        self.prev.fill(NIL);
    }
}
