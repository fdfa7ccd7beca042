//! Lock-serialized cache handle for concurrent callers

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use parking_lot::lock_api::{Mutex, RawMutex};

use crate::lru::LruCache;
use crate::spin::RawSpinLock;
use crate::stats::CacheStats;

/// [`LruCache`] behind a single lock, with hit/miss statistics
///
/// Every `update` and `resolve` takes the lock `R` for its whole duration.
/// Share it across threads with `Arc` or scoped borrows.
pub struct SharedCache<K, V, R = RawSpinLock, S = RandomState> {
    /// Engine guarded by the caller-chosen lock
    cache: Mutex<R, LruCache<K, V, S>>,

    /// Counters readable without the lock
    stats: CacheStats,
}

/// [`SharedCache`] guarded by a spin lock
pub type SpinCache<K, V, S = RandomState> = SharedCache<K, V, RawSpinLock, S>;

/// [`SharedCache`] guarded by a parking_lot mutex
pub type MutexCache<K, V, S = RandomState> = SharedCache<K, V, parking_lot::RawMutex, S>;

impl<K, V, R, S> SharedCache<K, V, R, S>
where
    K: Hash + Eq,
    V: Clone,
    R: RawMutex,
    S: BuildHasher,
{
    /// Wrap an existing cache
    pub fn new(cache: LruCache<K, V, S>) -> Self {
        Self {
            cache: Mutex::new(cache),
            stats: CacheStats::new(),
        }
    }

    /// Insert or overwrite `key`
    ///
    /// # Returns
    /// * `Option<(K, V)>` - The evicted entry, if any
    pub fn update(&self, key: K, value: V) -> Option<(K, V)> {
        let mut cache = self.cache.lock();
        let before = cache.len();
        let evicted = cache.update(key, value);
        let grew = cache.len() != before;
        drop(cache);

        if evicted.is_some() {
            self.stats.record_insert();
            self.stats.record_eviction();
        } else if grew {
            self.stats.record_insert();
        } else {
            self.stats.record_update();
        }

        evicted
    }

    /// Look up `key`, cloning the value out on a hit
    pub fn resolve<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.cache.lock().resolve(key).cloned();

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }

        value
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of live entries
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.lock().capacity()
    }

    /// Length of the longest hash chain
    pub fn longest_chain(&self) -> usize {
        self.cache.lock().longest_chain()
    }

    /// Vacate the cache and reset statistics
    pub fn clear(&self) {
        self.cache.lock().clear();
        self.stats.reset();
    }

    /// Take the engine back out
    pub fn into_inner(self) -> LruCache<K, V, S> {
        self.cache.into_inner()
    }
}
