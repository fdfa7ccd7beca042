//! # lrupool
//!
//! Fixed-capacity LRU cache that never allocates after construction.
//!
//! ## Architecture
//! - **Arena**: one pre-allocated slot per entry, repurposed on eviction
//! - **Hash chains**: `capacity * load_factor` buckets, per-bucket index-linked chains
//! - **Recency list**: index-linked doubly linked list for O(1) touch and victim
//! - **LruCache**: `update` / `resolve` keeping all three consistent
//!
//! The engine is single-threaded (`&mut self`). [`SharedCache`] serializes
//! concurrent callers behind a spin lock or a parking_lot mutex.
//!
//! ```
//! use lrupool::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.update("abc", "ABC");
//! cache.update("def", "DEF");
//! cache.resolve("abc");
//! cache.update("qwe", "QWE"); // evicts "def"
//!
//! assert_eq!(cache.resolve("def"), None);
//! assert_eq!(cache.resolve("abc"), Some(&"ABC"));
//! # Ok::<(), lrupool::Error>(())
//! ```

#![warn(missing_docs)]

mod arena;
mod chain;
mod config;
mod error;
mod lru;
mod recency;
mod shared;
mod spin;
mod stats;

pub use config::{CacheConfig, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::{Error, Result};
pub use lru::LruCache;
pub use shared::{MutexCache, SharedCache, SpinCache};
pub use spin::{RawSpinLock, SpinLock, SpinLockGuard};
pub use stats::{CacheStats, StatsSnapshot};
