//! Stress run summary

use std::hash::{BuildHasher, Hash};
use std::time::Duration;

use lrupool::SharedCache;
use parking_lot::lock_api::RawMutex;
use serde::Serialize;
use tracing::info;

use crate::stress::{LockKind, StressConfig};

#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    pub lock: LockKind,
    pub threads: u64,
    pub iterations: u64,
    pub capacity: usize,
    pub load_factor: usize,
    pub elapsed_ms: u64,
    pub ops_per_sec: f64,
    /// Live entries at the end of the run
    pub len: usize,
    pub longest_chain: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
}

impl StressReport {
    pub fn new<K, V, R, S>(
        config: &StressConfig,
        elapsed: Duration,
        cache: &SharedCache<K, V, R, S>,
    ) -> Self
    where
        K: Hash + Eq,
        V: Clone,
        R: RawMutex,
        S: BuildHasher,
    {
        let stats = cache.stats().snapshot();
        let total = config.threads * config.iterations;
        let secs = elapsed.as_secs_f64();

        Self {
            lock: config.lock,
            threads: config.threads,
            iterations: config.iterations,
            capacity: cache.capacity(),
            load_factor: config.load_factor,
            elapsed_ms: elapsed.as_millis() as u64,
            ops_per_sec: if secs > 0.0 { total as f64 / secs } else { 0.0 },
            len: cache.len(),
            longest_chain: cache.longest_chain(),
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            updates: stats.updates,
            evictions: stats.evictions,
            hit_ratio: stats.hit_ratio(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn log(&self) {
        info!("Exec time: {} ms", self.elapsed_ms);
        info!(
            "Throughput: {:.0} ops/sec ({} threads x {} calls, {:?} lock)",
            self.ops_per_sec, self.threads, self.iterations, self.lock
        );
        info!(
            "Cache: {}/{} live, longest chain {}",
            self.len, self.capacity, self.longest_chain
        );
        info!(
            "Resolves: {} hits, {} misses ({:.1}% hit rate)",
            self.hits,
            self.misses,
            self.hit_ratio * 100.0
        );
        info!(
            "Updates: {} inserts, {} overwrites, {} evictions",
            self.inserts, self.updates, self.evictions
        );
    }
}
