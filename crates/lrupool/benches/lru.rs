use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrupool::{LruCache, MutexCache, SharedCache, SpinCache};

fn keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("host{}.example.com", i)).collect()
}

fn bench_resolve_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("resolve_cached", |b| {
        let mut cache: LruCache<String, String> = LruCache::new(1000).unwrap();
        let keys = keys(100);

        // Pre-populate
        for key in &keys {
            cache.update(key.clone(), key.to_uppercase());
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.resolve(keys[counter % 100].as_str()));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_resolve_50_update", |b| {
        let mut cache: LruCache<String, usize> = LruCache::new(1000).unwrap();
        let keys = keys(2000);

        let mut counter = 0usize;
        b.iter(|| {
            let key = &keys[counter % 2000];
            if counter % 2 == 0 {
                black_box(cache.resolve(key.as_str()));
            } else {
                black_box(cache.update(key.clone(), counter));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("update_always_evicts", |b| {
        let mut cache = LruCache::new(10).unwrap(); // Small cache

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.update(counter, counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("spin_lock", |b| {
        let cache: SpinCache<u64, u64> = SharedCache::new(LruCache::new(1000).unwrap());
        for i in 0..1000 {
            cache.update(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.resolve(&(counter % 1000)));
            counter += 1;
        });
    });

    group.bench_function("parking_mutex", |b| {
        let cache: MutexCache<u64, u64> = SharedCache::new(LruCache::new(1000).unwrap());
        for i in 0..1000 {
            cache.update(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.resolve(&(counter % 1000)));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_hit,
    bench_mixed_50_50,
    bench_eviction,
    bench_shared
);
criterion_main!(benches);
