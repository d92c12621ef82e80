//! Cache Configuration Module
//!
//! Configuration for the rate-limit cache. The config struct has all public
//! fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No constructors or builder methods needed
//!
//! Validation happens in [`RateLimitCache::init`](crate::RateLimitCache::init),
//! which rejects a zero capacity with a [`ConfigError`](crate::error::ConfigError).
//!
//! # Sizing Guidelines
//!
//! `capacity` bounds the number of *distinct keys* tracked at once, not the
//! number of requests. Size it to the expected number of concurrently active
//! identities (clients, API keys, IPs):
//!
//! ```text
//! capacity ≈ active identities per window × safety factor (2-4)
//! ```
//!
//! An undersized cache still works, but keys pushed out by LRU eviction lose
//! their counters and re-enter with a fresh allowance.
//!
//! # Examples
//!
//! ```
//! use ratelimit_cache::config::RateLimitCacheConfig;
//! use ratelimit_cache::RateLimitCache;
//! use std::time::Duration;
//!
//! // Track up to 10k client IPs, resetting over-quota counters after 1 minute
//! let config = RateLimitCacheConfig {
//!     capacity: 10_000,
//!     window: Duration::from_secs(60),
//! };
//! let cache: RateLimitCache<String> = RateLimitCache::init(config, None).unwrap();
//!
//! // A zero window disables resets: once a key exceeds its quota it stays
//! // denied until evicted or removed
//! let config = RateLimitCacheConfig {
//!     capacity: 1_000,
//!     window: Duration::ZERO,
//! };
//! let cache: RateLimitCache<String> = RateLimitCache::init(config, None).unwrap();
//! ```

use core::fmt;
use std::time::Duration;

/// Configuration for a [`RateLimitCache`](crate::RateLimitCache).
///
/// # Fields
///
/// - `capacity`: Maximum number of distinct keys retained. Must be positive;
///   [`init`](crate::RateLimitCache::init) fails otherwise. When the cache is
///   full, the least recently touched key is evicted to make room.
/// - `window`: Duration after which an over-quota key's counter is eligible
///   for reset. [`Duration::ZERO`] disables resets entirely: a key that
///   exceeds its quota is denied until it is evicted or removed.
///
/// Note that the window only matters once a key is *over* quota: an
/// under-quota counter is never reset, it simply keeps counting.
#[derive(Clone, Copy)]
pub struct RateLimitCacheConfig {
    /// Maximum number of distinct keys the cache can hold. Must be > 0.
    pub capacity: usize,
    /// Reset window for over-quota counters. Zero disables resets.
    pub window: Duration,
}

impl fmt::Debug for RateLimitCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimitCacheConfig")
            .field("capacity", &self.capacity)
            .field("window", &self.window)
            .finish()
    }
}
