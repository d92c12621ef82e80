//! Rate-Limit Entry Type
//!
//! Provides the [`RateEntry`] structure holding one tracked key's counter
//! state: the number of increments observed in the current window and the
//! instant the window began. The key itself lives in the cache's index map
//! (and, as a recency marker, in the internal recency list), so the entry
//! stays small and `Copy`.
//!
//! Entries are created on the first increment of a previously unseen key,
//! mutated on every later increment or window reset, and destroyed by
//! explicit removal or LRU eviction. Eviction hooks receive a reference to
//! the departing entry alongside its key.

use std::time::{Duration, Instant};

/// Per-key rate-limit state.
///
/// `count` may exceed the quota passed to
/// [`increment`](crate::RateLimitCache::increment): denied calls within the
/// window keep incrementing it, so consumers surfacing the counter (e.g. in
/// response headers) should expect values above the quota.
///
/// # Example
///
/// ```
/// use ratelimit_cache::config::RateLimitCacheConfig;
/// use ratelimit_cache::RateLimitCache;
/// use std::time::Duration;
///
/// let config = RateLimitCacheConfig { capacity: 8, window: Duration::ZERO };
/// let mut cache = RateLimitCache::init(config, None).unwrap();
/// cache.increment("client-1", 100);
/// let entry = cache.remove("client-1").unwrap();
/// assert_eq!(entry.count, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RateEntry {
    /// Number of increments observed in the current window.
    pub count: u64,
    /// When the current window began: entry creation or the most recent reset.
    pub window_start: Instant,
}

impl RateEntry {
    /// Creates a fresh entry for a key first seen at `now`.
    pub(crate) fn new(now: Instant) -> Self {
        RateEntry {
            count: 1,
            window_start: now,
        }
    }

    /// Whether the reset window has elapsed as of `now`.
    ///
    /// A zero `window` disables resets, so this is always false then.
    pub(crate) fn window_expired(&self, window: Duration, now: Instant) -> bool {
        !window.is_zero() && now.duration_since(self.window_start) > window
    }

    /// Starts a new window: counter back to 1, window anchored at `now`.
    pub(crate) fn reset(&mut self, now: Instant) {
        self.count = 1;
        self.window_start = now;
    }
}
