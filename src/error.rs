//! Error types for the ratelimit-cache library.
//!
//! The cache has exactly one failure mode: invalid construction parameters.
//! Every other operation is total; "over quota" is reported as data in a
//! [`Verdict`](crate::Verdict), never as an error.

use core::fmt;

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by the fallible constructors [`RateLimitCache::init`](crate::RateLimitCache::init)
/// and [`RateLimitCache::with_hasher`](crate::RateLimitCache::with_hasher)
/// when the configured capacity is zero. Carries a human-readable description
/// of which parameter failed validation.
///
/// # Example
///
/// ```
/// use ratelimit_cache::config::RateLimitCacheConfig;
/// use ratelimit_cache::RateLimitCache;
/// use std::time::Duration;
///
/// let config = RateLimitCacheConfig {
///     capacity: 0,
///     window: Duration::from_secs(60),
/// };
/// let err = RateLimitCache::<String>::init(config, None).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::new("capacity must be positive");
        assert_eq!(err.message(), "capacity must be positive");
        assert_eq!(err.to_string(), "capacity must be positive");
    }
}
