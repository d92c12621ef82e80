#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Type | Description | Use Case |
//! |------|-------------|----------|
//! | [`RateLimitCache`] | Single-threaded core | Behind your own lock, or single-threaded services |
//! | [`ConcurrentRateLimitCache`] | One exclusive lock around the core | Shared across request-handling threads (`concurrent` feature) |
//!
//! ## Operation Summary
//!
//! | Operation | Effect on counter | Effect on recency | Cost |
//! |-----------|-------------------|-------------------|------|
//! | `increment` | +1, reset on expired window | moves key to front; may evict LRU tail | O(1) |
//! | `get` | none | moves key to front | O(1) |
//! | `remove` | entry dropped, hook fires | key unlinked | O(1) |
//! | `len` / `is_empty` | none | none | O(1) |
//!
//! ## Example
//!
//! ```rust
//! use ratelimit_cache::config::RateLimitCacheConfig;
//! use ratelimit_cache::RateLimitCache;
//! use std::time::Duration;
//!
//! let config = RateLimitCacheConfig {
//!     capacity: 3,
//!     window: Duration::ZERO, // no resets: over quota stays denied
//! };
//! let mut cache = RateLimitCache::init(config, None).unwrap();
//!
//! assert!(cache.increment("a", 1).allowed);  // count 1
//! assert!(!cache.increment("a", 1).allowed); // count 2, over quota
//! assert_eq!(cache.get("a"), Some(2));       // read, no increment
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: The core fixed-window LRU rate-limit cache
//! - [`config`]: Configuration structure and sizing guidance
//! - [`entry`]: Per-key counter state exposed to eviction hooks
//! - [`error`]: The construction-time error type
//! - [`metrics`]: Counter metrics and the reporting trait
//! - [`concurrent`]: Thread-safe wrapper (requires the `concurrent` feature)

/// Per-key rate-limit state.
///
/// Provides the [`RateEntry`] structure holding a key's counter and the
/// instant its current window began. Entries are handed to eviction hooks
/// and returned from explicit removals.
pub mod entry;

/// Arena-backed doubly linked list tracking key recency.
///
/// Most recently touched key at the front, eviction candidate at the back.
/// Nodes live in a `Vec` slab addressed by stable `usize` handles, with a
/// free list recycling removed slots: O(1) push-front, move-to-front and
/// detach without raw pointers.
///
/// **Note**: internal infrastructure, not part of the public API.
pub(crate) mod list;

/// Cache configuration structure.
pub mod config;

/// Error type for invalid construction parameters.
pub mod error;

/// The core fixed-window LRU rate-limit cache.
///
/// Provides [`RateLimitCache`]: a fixed-capacity key→counter store that
/// evicts least-recently-used entries under pressure and resets per-key
/// counters after a configurable window.
pub mod cache;

/// Cache metrics.
///
/// Counters for requests, denials, insertions, evictions, removals and
/// window resets, reported through the [`CacheMetrics`] trait.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Provides a thread-safe wrapper that serializes every operation (reads
/// included, since reads reorder recency) behind a single exclusive lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

// Re-export the primary types
pub use cache::{EvictionHook, RateLimitCache, Verdict};
pub use config::RateLimitCacheConfig;
pub use entry::RateEntry;
pub use error::ConfigError;
pub use metrics::{CacheMetrics, RateLimitMetrics};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentRateLimitCache;
