//! LRU (Least Recently Used) cache over a fixed slot pool
//!
//! Lookups go through the hash chain index, recency is tracked by an
//! index-linked list, and every entry lives in a pre-allocated slot. Nothing
//! allocates after construction.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::arena::Arena;
use crate::chain::ChainIndex;
use crate::config::{CacheConfig, DEFAULT_LOAD_FACTOR};
use crate::error::Result;
use crate::recency::Recency;

/// Fixed-capacity LRU cache
///
/// Not synchronized: both `update` and `resolve` take `&mut self`. Wrap it in
/// a [`SharedCache`](crate::SharedCache) to share it between threads.
pub struct LruCache<K, V, S = RandomState> {
    arena: Arena<K, V>,
    chain: ChainIndex<S>,
    recency: Recency,
    len: usize,
    load_factor: usize,
}

impl<K, V> LruCache<K, V, RandomState>
where
    K: Hash + Eq,
{
    /// Create a cache with `capacity` slots and the default load factor
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Create a cache with `capacity * load_factor` hash buckets
    pub fn with_load_factor(capacity: usize, load_factor: usize) -> Result<Self> {
        Self::with_hasher(capacity, load_factor, RandomState::new())
    }

    /// Create a cache from a [`CacheConfig`]
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::with_load_factor(config.capacity, config.load_factor)
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Create a cache hashing keys with `hasher`
    pub fn with_hasher(capacity: usize, load_factor: usize, hasher: S) -> Result<Self> {
        let config = CacheConfig {
            capacity,
            load_factor,
        };
        let buckets = config.bucket_count()?;

        debug!(capacity, load_factor, buckets, "allocating cache pool");

        Ok(Self {
            arena: Arena::new(capacity),
            chain: ChainIndex::new(capacity, buckets, hasher),
            recency: Recency::new(capacity),
            len: 0,
            load_factor,
        })
    }

    /// Look up `key`, marking it most recently used on a hit
    pub fn resolve<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.chain.locate(&self.arena, key)?;
        self.recency.touch(idx);
        self.arena[idx].entry.as_ref().map(|(_, value)| value)
    }

    /// Insert or overwrite `key`, marking it most recently used
    ///
    /// When `key` is new and every slot is live, the least recently used
    /// entry is evicted and returned.
    pub fn update(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(idx) = self.chain.locate(&self.arena, &key) {
            if let Some((_, slot_value)) = &mut self.arena[idx].entry {
                *slot_value = value;
            }
            self.recency.touch(idx);
            return None;
        }

        let victim = self.recency.victim();
        let bucket = self.chain.bucket_of(&key);
        self.chain.rebind(&mut self.arena, victim, bucket);
        let evicted = self.arena[victim].entry.replace((key, value));
        self.recency.touch(victim);

        if evicted.is_none() {
            self.len += 1;
        } else {
            trace!(slot = victim, "evicted least recently used entry");
        }

        evicted
    }

    /// Look up `key` without touching recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.chain.locate(&self.arena, key)?;
        self.arena[idx].entry.as_ref().map(|(_, value)| value)
    }

    /// Check for `key` without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.chain.locate(&self.arena, key).is_some()
    }

    /// Key the next new insertion would evict, if the cache is full
    pub fn lru_key(&self) -> Option<&K> {
        self.arena[self.recency.victim()].key()
    }

    /// Length of the longest hash chain
    pub fn longest_chain(&self) -> usize {
        self.chain.longest_chain()
    }

    /// Vacate every slot
    ///
    /// Capacity and bucket table are kept; nothing is reallocated.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing cache");
        self.arena.vacate_all();
        self.chain.reset();
        self.recency.reset();
        self.len = 0;
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the pool
    pub fn capacity(&self) -> usize {
        self.arena.len()
    }

    /// Bucket-table entries per slot
    pub fn load_factor(&self) -> usize {
        self.load_factor
    }

    /// Size of the bucket table
    pub fn bucket_count(&self) -> usize {
        self.chain.bucket_count()
    }

    /// Hasher used for bucket selection
    pub fn hasher(&self) -> &S {
        self.chain.hasher()
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.recency
            .iter()
            .map_while(move |idx| self.arena[idx].entry.as_ref().map(|(k, v)| (k, v)))
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Panic if the index, the recency list and the pool disagree
    fn assert_consistent(&self) {
        let order: Vec<u32> = self.recency.iter().collect();
        assert_eq!(order.len(), self.capacity(), "recency covers every slot");
        let mut seen = vec![false; self.capacity()];
        for &idx in &order {
            assert!(!seen[idx as usize], "slot {} linked twice", idx);
            seen[idx as usize] = true;
        }

        // live slots sit on the MRU side of every vacant slot
        let live = order
            .iter()
            .take_while(|&&idx| self.arena[idx].entry.is_some())
            .count();
        assert_eq!(live, self.len);
        assert!(order[live..]
            .iter()
            .all(|&idx| self.arena[idx].entry.is_none()));

        for &idx in &order[..live] {
            let slot = &self.arena[idx];
            let key = slot.key().expect("live slot");
            assert_eq!(slot.bucket, self.chain.bucket_of(key));
            assert_eq!(self.chain.locate(&self.arena, key), Some(idx));
            assert!(self.chain.members(slot.bucket).any(|m| m == idx));
        }

        let chained: usize = (0..self.bucket_count() as u32)
            .map(|bucket| self.chain.members(bucket).count())
            .sum();
        assert_eq!(chained, self.len, "only live slots are chained");
    }
}
