use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ratelimit_cache::config::RateLimitCacheConfig;
use ratelimit_cache::RateLimitCache;
use std::time::Duration;

fn make_cache(capacity: usize) -> RateLimitCache<u64> {
    let config = RateLimitCacheConfig {
        capacity,
        window: Duration::from_secs(60),
    };
    RateLimitCache::init(config, None).unwrap()
}

/// Repeated increments of a single hot key: the move-to-front fast path.
fn bench_hot_key(c: &mut Criterion) {
    let mut cache = make_cache(1024);
    c.bench_function("increment_hot_key", |b| {
        b.iter(|| {
            let verdict = cache.increment(black_box(42), u64::MAX);
            black_box(verdict.count)
        })
    });
}

/// Cycling through more distinct keys than capacity: every call evicts.
fn bench_eviction_churn(c: &mut Criterion) {
    let mut cache = make_cache(512);
    let mut next_key = 0u64;
    c.bench_function("increment_eviction_churn", |b| {
        b.iter(|| {
            next_key = next_key.wrapping_add(1);
            let verdict = cache.increment(black_box(next_key), 100);
            black_box(verdict.allowed)
        })
    });
}

/// Read path: counter lookup with recency refresh.
fn bench_get(c: &mut Criterion) {
    let mut cache = make_cache(1024);
    for key in 0..1024u64 {
        cache.increment(key, u64::MAX);
    }
    let mut key = 0u64;
    c.bench_function("get_resident_key", |b| {
        b.iter(|| {
            key = (key + 1) % 1024;
            black_box(cache.get(black_box(&key)))
        })
    });
}

criterion_group!(benches, bench_hot_key, bench_eviction_churn, bench_get);
criterion_main!(benches);
