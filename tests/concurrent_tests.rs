//! Concurrent Cache Correctness Tests
//!
//! Validates that the exclusive lock serializes every operation: each
//! increment observes a consistent counter and leaves a consistent state
//! for the next caller, even under heavy contention on a single key.

#![cfg(feature = "concurrent")]

use ratelimit_cache::config::RateLimitCacheConfig;
use ratelimit_cache::{CacheMetrics, ConcurrentRateLimitCache, RateEntry};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn make_cache(capacity: usize) -> ConcurrentRateLimitCache<String> {
    let config = RateLimitCacheConfig {
        capacity,
        window: Duration::ZERO,
    };
    ConcurrentRateLimitCache::init(config, None).unwrap()
}

#[test]
fn test_contended_increments_observe_distinct_counts() {
    // N threads increment the same key once each, with quota >= N. Mutual
    // exclusion is correct iff the observed counts are exactly 1..=N with
    // no duplicates and no gaps.
    const THREADS: u64 = 8;

    let cache = Arc::new(make_cache(64));
    let observed: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let observed = Arc::clone(&observed);
            thread::spawn(move || {
                let verdict = cache.increment("hot-key".to_string(), 100);
                assert!(verdict.allowed);
                observed.lock().unwrap().push(verdict.count);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let observed = observed.lock().unwrap();
    let distinct: HashSet<u64> = observed.iter().copied().collect();
    assert_eq!(observed.len() as u64, THREADS);
    assert_eq!(distinct.len() as u64, THREADS, "duplicate counts observed");
    for expected in 1..=THREADS {
        assert!(distinct.contains(&expected), "missing count {expected}");
    }

    assert_eq!(cache.get("hot-key"), Some(THREADS));
}

#[test]
fn test_contended_quota_denials_are_exact() {
    // With quota Q < total calls, exactly Q calls are allowed
    const THREADS: usize = 4;
    const CALLS_PER_THREAD: usize = 25;
    const QUOTA: u64 = 60;

    let cache = Arc::new(make_cache(8));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut allowed = 0u64;
                for _ in 0..CALLS_PER_THREAD {
                    if cache.increment("shared".to_string(), QUOTA).allowed {
                        allowed += 1;
                    }
                }
                allowed
            })
        })
        .collect();

    let total_allowed: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total_allowed, QUOTA);

    let metrics = cache.metrics();
    assert_eq!(
        metrics.get("denied"),
        Some(&((THREADS * CALLS_PER_THREAD) as f64 - QUOTA as f64))
    );
}

#[test]
fn test_mixed_operations_under_contention() {
    let cache = Arc::new(make_cache(50));
    let threads = 8;
    let ops_per_thread = 500;

    let mut pool = scoped_threadpool::Pool::new(threads);
    pool.scoped(|scope| {
        for t in 0..threads {
            let cache = Arc::clone(&cache);
            scope.execute(move || {
                for i in 0..ops_per_thread {
                    let key = format!("key_{}", (t as usize * 37 + i) % 100);
                    match i % 4 {
                        0 | 1 => {
                            cache.increment(key, 20);
                        }
                        2 => {
                            let _ = cache.get(&key);
                        }
                        3 => {
                            let _ = cache.remove(&key);
                        }
                        _ => unreachable!(),
                    }
                }
            });
        }
    });

    // Capacity invariant holds after the dust settles
    assert!(cache.len() <= 50);
}

#[test]
fn test_hook_fires_exactly_once_per_departure_under_contention() {
    let departures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&departures);
    let config = RateLimitCacheConfig {
        capacity: 4,
        window: Duration::ZERO,
    };
    let cache: Arc<ConcurrentRateLimitCache<String>> = Arc::new(
        ConcurrentRateLimitCache::init(
            config,
            Some(Box::new(move |key: &String, _: &RateEntry| {
                sink.lock().unwrap().push(key.clone());
            })),
        )
        .unwrap(),
    );

    let threads = 4usize;
    let keys_per_thread = 100usize;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..keys_per_thread {
                    cache.increment(format!("t{t}-k{i}"), 10);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every inserted key either departed through the hook exactly once or
    // is still resident; no key does both, none does neither.
    let departures = departures.lock().unwrap();
    let departed: HashSet<String> = departures.iter().cloned().collect();
    assert_eq!(
        departed.len(),
        departures.len(),
        "some key departed more than once"
    );
    assert_eq!(departures.len() + cache.len(), threads * keys_per_thread);
}
