//! Fixed slot pool
//!
//! All key/value storage is allocated once, up front. Slots are addressed by
//! `u32` index and are repurposed in place, never freed.

use std::ops::{Index, IndexMut};

/// "No slot" sentinel for every index-linked structure
pub(crate) const NIL: u32 = u32::MAX;

/// Bucket id carried by a slot that has never held an entry
pub(crate) const NO_BUCKET: u32 = u32::MAX;

/// One pool entry
pub(crate) struct Slot<K, V> {
    pub(crate) entry: Option<(K, V)>,
    pub(crate) bucket: u32,
}

impl<K, V> Slot<K, V> {
    fn vacant() -> Self {
        Self {
            entry: None,
            bucket: NO_BUCKET,
        }
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(key, _)| key)
    }
}

/// Pre-allocated slot storage
pub(crate) struct Arena<K, V> {
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Slot::vacant()).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Drop every entry and forget bucket membership
    pub(crate) fn vacate_all(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::vacant();
        }
    }
}

impl<K, V> Index<u32> for Arena<K, V> {
    type Output = Slot<K, V>;

    fn index(&self, idx: u32) -> &Self::Output {
        &self.slots[idx as usize]
    }
}

impl<K, V> IndexMut<u32> for Arena<K, V> {
    fn index_mut(&mut self, idx: u32) -> &mut Self::Output {
        &mut self.slots[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_starts_vacant() {
        let arena: Arena<u64, u64> = Arena::new(4);

        assert_eq!(arena.len(), 4);
        for idx in 0..4 {
            assert!(arena[idx].entry.is_none());
            assert_eq!(arena[idx].bucket, NO_BUCKET);
        }
    }

    #[test]
    fn test_arena_overwrite_in_place() {
        let mut arena = Arena::new(2);

        arena[1].entry = Some(("a", 1));
        arena[1].bucket = 7;
        let old = arena[1].entry.replace(("b", 2));

        assert_eq!(old, Some(("a", 1)));
        assert_eq!(arena[1].key(), Some(&"b"));
        assert!(arena[0].key().is_none());

        arena.vacate_all();
        assert!(arena[1].entry.is_none());
        assert_eq!(arena[1].bucket, NO_BUCKET);
    }
}
