//! Recency ordering over the slot pool
//!
//! Index-linked doubly linked list covering every slot exactly once.
//! `lru` is the next eviction victim, `mru` the most recently touched slot.

use crate::arena::NIL;

pub(crate) struct Recency {
    /// Neighbour towards the LRU end
    older: Box<[u32]>,
    /// Neighbour towards the MRU end
    newer: Box<[u32]>,
    lru: u32,
    mru: u32,
}

impl Recency {
    /// Sequence over `slots` slots, slot 0 least recently used
    pub(crate) fn new(slots: usize) -> Self {
        let mut recency = Self {
            older: vec![NIL; slots].into_boxed_slice(),
            newer: vec![NIL; slots].into_boxed_slice(),
            lru: NIL,
            mru: NIL,
        };
        recency.reset();
        recency
    }

    /// Relink every slot in index order
    pub(crate) fn reset(&mut self) {
        let slots = self.older.len() as u32;
        for idx in 0..slots {
            self.older[idx as usize] = if idx == 0 { NIL } else { idx - 1 };
            self.newer[idx as usize] = if idx + 1 == slots { NIL } else { idx + 1 };
        }
        self.lru = if slots == 0 { NIL } else { 0 };
        self.mru = slots.checked_sub(1).unwrap_or(NIL);
    }

    /// Slot that the next insertion repurposes
    pub(crate) fn victim(&self) -> u32 {
        self.lru
    }

    /// Move `slot` to the most-recently-used end
    pub(crate) fn touch(&mut self, slot: u32) {
        if slot == self.mru {
            return;
        }

        let older = self.older[slot as usize];
        let newer = self.newer[slot as usize];

        // slot != mru, so it always has a newer neighbour
        if older == NIL {
            self.lru = newer;
        } else {
            self.newer[older as usize] = newer;
        }
        self.older[newer as usize] = older;

        self.older[slot as usize] = self.mru;
        self.newer[slot as usize] = NIL;
        self.newer[self.mru as usize] = slot;
        self.mru = slot;
    }

    /// Slots from most to least recently used
    pub(crate) fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors((self.mru != NIL).then_some(self.mru), move |&idx| {
            let older = self.older[idx as usize];
            (older != NIL).then_some(older)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(recency: &Recency) -> Vec<u32> {
        recency.iter().collect()
    }

    #[test]
    fn test_recency_initial_order() {
        let recency = Recency::new(4);

        assert_eq!(recency.victim(), 0);
        assert_eq!(order(&recency), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_recency_touch_lru() {
        let mut recency = Recency::new(3);

        recency.touch(0);
        assert_eq!(recency.victim(), 1);
        assert_eq!(order(&recency), vec![0, 2, 1]);
    }

    #[test]
    fn test_recency_touch_middle() {
        let mut recency = Recency::new(4);

        recency.touch(2);
        assert_eq!(recency.victim(), 0);
        assert_eq!(order(&recency), vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_recency_touch_mru_is_noop() {
        let mut recency = Recency::new(3);

        recency.touch(2);
        assert_eq!(order(&recency), vec![2, 1, 0]);
    }

    #[test]
    fn test_recency_single_slot() {
        let mut recency = Recency::new(1);

        recency.touch(0);
        assert_eq!(recency.victim(), 0);
        assert_eq!(order(&recency), vec![0]);
    }

    #[test]
    fn test_recency_reset() {
        let mut recency = Recency::new(3);

        recency.touch(0);
        recency.touch(1);
        recency.reset();

        assert_eq!(recency.victim(), 0);
        assert_eq!(order(&recency), vec![2, 1, 0]);
    }
}
