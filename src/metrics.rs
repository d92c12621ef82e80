//! Cache Metrics System
//!
//! Counter-based metrics for the rate-limit cache, reported through a
//! BTreeMap for deterministic ordering.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for testing and comparisons
//! - **Stable serialization**: Exports have predictable key ordering
//!
//! The performance difference (O(log n) vs O(1)) is negligible with fewer
//! than a dozen metric keys.

use std::collections::BTreeMap;

/// Counters tracked by the rate-limit cache.
///
/// All counters are cumulative since construction;
/// [`clear`](crate::RateLimitCache::clear) does not reset them.
///
/// Note that `denied` counts increment calls that returned `allowed = false`;
/// an over-quota call that landed after its window expired resets the counter
/// and is counted as allowed (and as a `window_reset`).
#[derive(Debug, Default, Clone)]
pub struct RateLimitMetrics {
    /// Total number of `increment` calls.
    pub requests: u64,

    /// Number of `increment` calls that were denied (over quota, in window).
    pub denied: u64,

    /// Number of new keys inserted (first increment of an unseen key).
    pub insertions: u64,

    /// Number of entries evicted to enforce capacity.
    pub evictions: u64,

    /// Number of entries dropped through explicit `remove` calls.
    pub removals: u64,

    /// Number of over-quota counters reset after their window expired.
    pub window_resets: u64,
}

impl RateLimitMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an `increment` call.
    pub(crate) fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Records a denied verdict.
    pub(crate) fn record_denial(&mut self) {
        self.denied += 1;
    }

    /// Records insertion of a previously unseen key.
    pub(crate) fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a capacity eviction.
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Records a window reset of an over-quota counter.
    pub(crate) fn record_reset(&mut self) {
        self.window_resets += 1;
    }

    /// Number of `increment` calls that were allowed.
    pub fn allowed(&self) -> u64 {
        self.requests - self.denied
    }

    /// Fraction of `increment` calls that were denied, 0.0 when idle.
    pub fn denial_rate(&self) -> f64 {
        if self.requests > 0 {
            self.denied as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("allowed".to_string(), self.allowed() as f64);
        metrics.insert("denied".to_string(), self.denied as f64);
        metrics.insert("denial_rate".to_string(), self.denial_rate());
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("window_resets".to_string(), self.window_resets as f64);
        metrics
    }
}

/// Uniform metrics-reporting interface implemented by the cache types.
///
/// Uses BTreeMap to ensure deterministic ordering of metrics, which is
/// essential for reproducible test results and comparable log output.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification.
    fn algorithm_name(&self) -> &'static str;
}

impl CacheMetrics for RateLimitMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "FIXED-WINDOW-LRU"
    }
}
