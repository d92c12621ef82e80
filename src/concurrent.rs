//! Concurrent Rate-Limit Cache
//!
//! A thread-safe wrapper around the core cache, available with the
//! `concurrent` feature. One `parking_lot::Mutex` guards the whole
//! structure.
//!
//! ## Why a single Mutex instead of striping or an RwLock?
//!
//! Every operation on this cache, including the read-like
//! [`get`](ConcurrentRateLimitCache::get), reorders the recency list, so a
//! reader/writer split would be a false promise: a "read" under a shared
//! lock would mutate shared state. All operations therefore take the
//! exclusive lock, making each call linearizable with respect to it.
//!
//! Lock striping is also deliberately absent. Striped segments keep LRU
//! order *per segment*, which breaks the global invariant that the single
//! recency tail is the next eviction candidate; a striped limiter could
//! evict a recently active key while a colder key survives in another
//! segment. All operations here are O(1) and complete without blocking on
//! anything but the lock itself, so one exclusive lock is acceptable.
//!
//! # Example
//!
//! ```
//! use ratelimit_cache::config::RateLimitCacheConfig;
//! use ratelimit_cache::ConcurrentRateLimitCache;
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//!
//! let config = RateLimitCacheConfig {
//!     capacity: 1024,
//!     window: Duration::from_secs(60),
//! };
//! let cache = Arc::new(ConcurrentRateLimitCache::init(config, None).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 cache.increment(format!("client-{t}"), 1000);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(cache.len(), 4);
//! ```

use crate::cache::{EvictionHook, RateLimitSegment, Verdict};
use crate::config::RateLimitCacheConfig;
use crate::entry::RateEntry;
use crate::error::ConfigError;
use crate::metrics::CacheMetrics;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe rate-limit cache guarded by a single exclusive lock.
///
/// All methods take `&self` and may be called from any thread; share the
/// cache across request handlers with an [`Arc`](std::sync::Arc). Each call
/// observes a consistent snapshot and leaves a consistent state for the
/// next caller; no ordering is guaranteed across different keys beyond what
/// the lock serializes.
///
/// The eviction hook runs while the lock is held, on the thread that
/// triggered the eviction or removal; keep it short and never call back
/// into the cache from inside it.
pub struct ConcurrentRateLimitCache<K, S = DefaultHashBuilder> {
    inner: Mutex<RateLimitSegment<K, S>>,
}

impl<K: Hash + Eq> ConcurrentRateLimitCache<K, DefaultHashBuilder> {
    /// Creates a concurrent cache from a configuration and an optional
    /// eviction hook.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config.capacity` is zero.
    pub fn init(
        config: RateLimitCacheConfig,
        on_evicted: Option<EvictionHook<K>>,
    ) -> Result<Self, ConfigError> {
        Self::with_hasher(config, DefaultHashBuilder::default(), on_evicted)
    }
}

impl<K: Hash + Eq, S: BuildHasher> ConcurrentRateLimitCache<K, S> {
    /// Creates a concurrent cache with a caller-supplied hash builder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config.capacity` is zero.
    pub fn with_hasher(
        config: RateLimitCacheConfig,
        hash_builder: S,
        on_evicted: Option<EvictionHook<K>>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(RateLimitSegment::with_hasher(
                config,
                hash_builder,
                on_evicted,
            )?),
        })
    }

    /// Maximum number of distinct keys retained.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Configured reset window. Zero means resets are disabled.
    pub fn window(&self) -> Duration {
        self.inner.lock().window()
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Registers (or clears) the eviction hook.
    pub fn set_eviction_hook(&self, hook: Option<EvictionHook<K>>) {
        self.inner.lock().set_eviction_hook(hook);
    }

    /// Increments `key`'s counter and checks it against `quota`, under the
    /// exclusive lock. See
    /// [`RateLimitCache::increment`](crate::RateLimitCache::increment) for
    /// the full semantics, including eviction-before-lookup.
    pub fn increment(&self, key: K, quota: u64) -> Verdict
    where
        K: Clone,
    {
        self.inner.lock().increment(key, quota)
    }

    /// Looks up `key`'s counter without incrementing it. Takes the exclusive
    /// lock: even a read refreshes recency.
    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().get(key)
    }

    /// Removes `key`, firing the eviction hook and returning the removed
    /// entry. No-op when absent.
    pub fn remove<Q>(&self, key: &Q) -> Option<RateEntry>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Drops every tracked key without firing the hook.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K: Hash + Eq, S: BuildHasher> CacheMetrics for ConcurrentRateLimitCache<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "FIXED-WINDOW-LRU"
    }
}

impl<K, S> core::fmt::Debug for ConcurrentRateLimitCache<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentRateLimitCache").finish()
    }
}
