//! Multithreaded stress harness
//!
//! Every worker shares one cache behind a single lock. Worker `id` writes
//! one fresh key every `2 * id` iterations and spends the rest resolving
//! keys written by its neighbours, a few rounds behind.

use std::thread;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, ValueEnum};
use lrupool::{LruCache, MutexCache, SharedCache, SpinCache};
use parking_lot::lock_api::RawMutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::report::StressReport;

/// Lock serializing access to the shared cache
#[derive(ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LockKind {
    /// Busy-waiting test-and-test-and-set lock
    Spin,
    /// parking_lot mutex
    Mutex,
}

#[derive(Args, Debug, Clone)]
pub struct StressConfig {
    /// Worker threads
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: u64,

    /// Cache calls per worker
    #[arg(short, long, default_value_t = 1_000_000)]
    pub iterations: u64,

    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 50_000)]
    pub capacity: usize,

    /// Hash buckets per cache slot
    #[arg(short, long, default_value_t = lrupool::DEFAULT_LOAD_FACTOR)]
    pub load_factor: usize,

    /// Lock guarding the cache
    #[arg(long, value_enum, default_value_t = LockKind::Spin)]
    pub lock: LockKind,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Build the cache and run every worker to completion
pub fn run(config: &StressConfig) -> Result<StressReport> {
    let cache = LruCache::with_load_factor(config.capacity, config.load_factor)?;

    info!(
        threads = config.threads,
        iterations = config.iterations,
        capacity = config.capacity,
        lock = ?config.lock,
        "stress test start"
    );

    let report = match config.lock {
        LockKind::Spin => drive(config, SpinCache::new(cache)),
        LockKind::Mutex => drive(config, MutexCache::new(cache)),
    };

    info!(elapsed_ms = report.elapsed_ms, "stress test finish");
    Ok(report)
}

fn drive<R>(config: &StressConfig, cache: SharedCache<String, String, R>) -> StressReport
where
    R: RawMutex + Sync,
{
    let started = Instant::now();

    thread::scope(|scope| {
        for id in 1..=config.threads {
            let cache = &cache;
            scope.spawn(move || worker(id, config.threads, config.iterations, cache));
        }
    });

    StressReport::new(config, started.elapsed(), &cache)
}

fn worker<R: RawMutex>(
    id: u64,
    world: u64,
    iterations: u64,
    cache: &SharedCache<String, String, R>,
) {
    let round = 2 * id;

    for i in 0..iterations {
        if i % round == 0 {
            let n = i / round;
            cache.update(format!("{}round{}", id, n), format!("{}Round{}", id, n));
        } else {
            let key = format!("{}round{}", (i + id) % world, i / (2 * world));
            cache.resolve(key.as_str());
        }
    }

    debug!(id, "worker finished");
}
