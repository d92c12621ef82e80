//! Bounded Fixed-Window Rate-Limit Cache
//!
//! This module provides the core cache: a fixed-capacity key→counter store
//! with LRU eviction and fixed-window counter resets, used to throttle
//! per-identity request rates in front of a service.
//!
//! # Algorithm
//!
//! Each tracked key carries a counter and the instant its current window
//! began. [`increment`](RateLimitCache::increment) bumps the counter and
//! compares it against the caller's quota: at or under quota the call is
//! allowed; over quota it is denied unless the configured window has elapsed,
//! in which case the counter resets to 1 and the call is allowed. Recency is
//! refreshed by every touch (increments and reads alike), and when the cache
//! is full the least recently touched key is evicted.
//!
//! Two deliberate quirks are carried over from the service this cache was
//! extracted from:
//!
//! 1. **Eviction precedes lookup.** A full cache sheds its LRU tail on every
//!    `increment` call, before checking whether the incoming key is already
//!    tracked. A call that touches an existing key can therefore evict a
//!    *different* key, and when the incoming key itself is the tail of a full
//!    cache, it is evicted and recreated with a fresh counter of 1.
//! 2. **Over-quota counters are not capped.** Denied calls keep incrementing
//!    the counter, so `count` can grow far past the quota within a window.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: increment / get / remove are all O(1)
//! - **Space Complexity**: O(capacity); each entry stores the key twice
//!   (index map and recency list) plus a counter and a timestamp
//!
//! # Thread Safety
//!
//! [`RateLimitCache`] is not thread-safe; every operation takes `&mut self`
//! because even reads reorder the recency list. For concurrent access use
//! [`ConcurrentRateLimitCache`](crate::ConcurrentRateLimitCache) (requires
//! the `concurrent` feature), which serializes all operations behind a
//! single exclusive lock.

use crate::config::RateLimitCacheConfig;
use crate::entry::RateEntry;
use crate::error::ConfigError;
use crate::list::RecencyList;
use crate::metrics::{CacheMetrics, RateLimitMetrics};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Callback invoked whenever an entry leaves the cache, whether by LRU
/// eviction or explicit removal. Receives the departing key and its final
/// counter state. Called synchronously on the thread performing the
/// operation, exactly once per departing entry.
pub type EvictionHook<K> = Box<dyn FnMut(&K, &RateEntry) + Send>;

/// Outcome of an [`increment`](RateLimitCache::increment) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// The key's counter after this call, including the increment that was
    /// just applied. May exceed the quota on denied calls.
    pub count: u64,
    /// Whether the caller should let the request through.
    pub allowed: bool,
}

/// Per-key bookkeeping: recency-list handle plus counter state.
struct Tracked {
    handle: usize,
    entry: RateEntry,
}

/// Internal segment containing the actual cache algorithm.
///
/// This is shared between [`RateLimitCache`] (single-threaded) and
/// `ConcurrentRateLimitCache` (multi-threaded). All algorithm logic is
/// implemented here to avoid duplication.
pub(crate) struct RateLimitSegment<K, S = DefaultHashBuilder> {
    config: RateLimitCacheConfig,
    list: RecencyList<K>,
    map: HashMap<K, Tracked, S>,
    metrics: RateLimitMetrics,
    on_evicted: Option<EvictionHook<K>>,
}

impl<K: Hash + Eq, S: BuildHasher> RateLimitSegment<K, S> {
    pub(crate) fn with_hasher(
        config: RateLimitCacheConfig,
        hash_builder: S,
        on_evicted: Option<EvictionHook<K>>,
    ) -> Result<Self, ConfigError> {
        if config.capacity == 0 {
            return Err(ConfigError::new("capacity must be positive"));
        }
        let map_capacity = config.capacity.next_power_of_two();
        Ok(RateLimitSegment {
            config,
            list: RecencyList::new(config.capacity),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics: RateLimitMetrics::new(),
            on_evicted,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn window(&self) -> Duration {
        self.config.window
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &RateLimitMetrics {
        &self.metrics
    }

    pub(crate) fn set_eviction_hook(&mut self, hook: Option<EvictionHook<K>>) {
        self.on_evicted = hook;
    }

    pub(crate) fn increment(&mut self, key: K, quota: u64) -> Verdict
    where
        K: Clone,
    {
        let now = Instant::now();
        self.metrics.record_request();

        // Capacity is enforced before the key lookup. With the cache full,
        // every call pays one eviction, even a call that is about to land on
        // an existing key; if the incoming key is itself the tail, it gets
        // evicted here and re-inserted fresh below.
        if self.map.len() >= self.config.capacity {
            self.evict_oldest();
        }

        if let Some(tracked) = self.map.get_mut(&key) {
            self.list.move_to_front(tracked.handle);
            tracked.entry.count += 1;

            let mut allowed = true;
            if tracked.entry.count > quota {
                if tracked.entry.window_expired(self.config.window, now) {
                    tracked.entry.reset(now);
                    self.metrics.record_reset();
                } else {
                    allowed = false;
                    self.metrics.record_denial();
                }
            }
            Verdict {
                count: tracked.entry.count,
                allowed,
            }
        } else {
            let handle = self.list.push_front(key.clone());
            self.map.insert(
                key,
                Tracked {
                    handle,
                    entry: RateEntry::new(now),
                },
            );
            self.metrics.record_insertion();
            Verdict {
                count: 1,
                allowed: true,
            }
        }
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let tracked = self.map.get(key)?;
        // A read still counts as a touch: recency follows any access.
        self.list.move_to_front(tracked.handle);
        Some(tracked.entry.count)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<RateEntry>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (key, tracked) = self.map.remove_entry(key)?;
        self.list.remove(tracked.handle);
        self.metrics.record_removal();
        if let Some(hook) = self.on_evicted.as_mut() {
            hook(&key, &tracked.entry);
        }
        Some(tracked.entry)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Evicts the least recently touched key. This is the only path through
    /// which capacity is enforced; it never blocks and never fails.
    fn evict_oldest(&mut self) {
        if let Some(key) = self.list.pop_back() {
            if let Some(tracked) = self.map.remove(&key) {
                self.metrics.record_eviction();
                if let Some(hook) = self.on_evicted.as_mut() {
                    hook(&key, &tracked.entry);
                }
            }
        }
    }
}

impl<K, S> core::fmt::Debug for RateLimitSegment<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RateLimitSegment")
            .field("capacity", &self.config.capacity)
            .field("window", &self.config.window)
            .field("len", &self.map.len())
            .finish()
    }
}

/// A bounded, recency-ordered, fixed-window rate-limit cache.
///
/// Maps opaque keys to request counters, evicting the least recently touched
/// key under capacity pressure and resetting over-quota counters once the
/// configured window elapses. Every operation is O(1) and total: "over
/// quota" is reported through [`Verdict::allowed`], never as an error.
///
/// # Examples
///
/// ```
/// use ratelimit_cache::config::RateLimitCacheConfig;
/// use ratelimit_cache::RateLimitCache;
/// use std::time::Duration;
///
/// let config = RateLimitCacheConfig {
///     capacity: 1024,
///     window: Duration::from_secs(60),
/// };
/// let mut cache = RateLimitCache::init(config, None).unwrap();
///
/// // Allow two requests per window for this client
/// assert!(cache.increment("10.0.0.1", 2).allowed);
/// assert!(cache.increment("10.0.0.1", 2).allowed);
///
/// // The third is denied, but the counter keeps growing
/// let verdict = cache.increment("10.0.0.1", 2);
/// assert!(!verdict.allowed);
/// assert_eq!(verdict.count, 3);
/// ```
///
/// With an eviction hook observing departing entries:
///
/// ```
/// use ratelimit_cache::config::RateLimitCacheConfig;
/// use ratelimit_cache::{RateEntry, RateLimitCache};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let evicted = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&evicted);
/// let config = RateLimitCacheConfig { capacity: 1, window: Duration::ZERO };
/// let mut cache = RateLimitCache::init(
///     config,
///     Some(Box::new(move |_key: &&str, _entry: &RateEntry| {
///         counter.fetch_add(1, Ordering::Relaxed);
///     })),
/// )
/// .unwrap();
///
/// cache.increment("a", 10);
/// cache.increment("b", 10); // evicts "a"
/// assert_eq!(evicted.load(Ordering::Relaxed), 1);
/// ```
pub struct RateLimitCache<K, S = DefaultHashBuilder> {
    segment: RateLimitSegment<K, S>,
}

impl<K, S> core::fmt::Debug for RateLimitCache<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.segment.fmt(f)
    }
}

impl<K: Hash + Eq> RateLimitCache<K, DefaultHashBuilder> {
    /// Creates a cache from a configuration and an optional eviction hook.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config.capacity` is zero. No cache
    /// instance exists afterwards; there is nothing to retry.
    pub fn init(
        config: RateLimitCacheConfig,
        on_evicted: Option<EvictionHook<K>>,
    ) -> Result<Self, ConfigError> {
        Self::with_hasher(config, DefaultHashBuilder::default(), on_evicted)
    }
}

impl<K: Hash + Eq, S: BuildHasher> RateLimitCache<K, S> {
    /// Creates a cache with a caller-supplied hash builder.
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
            segment: RateLimitSegment::with_hasher(config, hash_builder, on_evicted)?,
        })
    }

    /// Maximum number of distinct keys retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.segment.capacity()
    }

    /// Configured reset window. Zero means resets are disabled.
    #[inline]
    pub fn window(&self) -> Duration {
        self.segment.window()
    }

    /// Number of keys currently tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns true if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Registers (or clears) the eviction hook. The hook fires for capacity
    /// evictions and explicit removals, once per departing entry.
    pub fn set_eviction_hook(&mut self, hook: Option<EvictionHook<K>>) {
        self.segment.set_eviction_hook(hook);
    }

    /// Increments `key`'s counter and checks it against `quota`.
    ///
    /// Returns the updated counter and whether the request is allowed. A
    /// previously unseen key starts at `(1, allowed)`. An over-quota key is
    /// denied until its window expires, at which point the counter resets to
    /// 1 and the call is allowed; with a zero window it is denied forever
    /// (until evicted or removed). Denied calls still advance the counter.
    ///
    /// When the cache is already full this call first evicts the least
    /// recently touched key, possibly `key` itself (see the module docs).
    pub fn increment(&mut self, key: K, quota: u64) -> Verdict
    where
        K: Clone,
    {
        self.segment.increment(key, quota)
    }

    /// Looks up `key`'s current counter without incrementing it.
    ///
    /// Still counts as an access: a found key is moved to the front of the
    /// recency order. The counter and window are left untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Removes `key` from the cache, firing the eviction hook and returning
    /// the removed entry. No-op (and no hook) when the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<RateEntry>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Drops every tracked key. The eviction hook is *not* fired and
    /// metrics are not reset.
    pub fn clear(&mut self) {
        self.segment.clear();
    }
}

impl<K: Hash + Eq, S: BuildHasher> CacheMetrics for RateLimitCache<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
