//! Result caching for discovery requests
//!
//! The cache is an in-process, trait-based abstraction with two
//! implementations: a memory cache with TTL expiration and capacity
//! eviction, and a null cache that stores nothing but keeps request/miss
//! counters meaningful when caching is deliberately disabled.

mod key;
mod memory;
mod noop;
mod traits;

pub use key::{normalize_path, CacheKeyGenerator, KEY_LENGTH};
pub use memory::MemoryDiscoveryCache;
pub use noop::NullDiscoveryCache;
pub use traits::DiscoveryCache;

use regex::Regex;
use std::time::SystemTime;

use crate::discovery::DiscoveryResult;

/// A stored discovery result with expiry metadata
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub result: DiscoveryResult,
    pub inserted_at: SystemTime,
    pub expires_at: SystemTime,
    pub size_estimate: u64,
}

impl CachedResult {
    pub fn is_expired(&self, now: SystemTime) -> bool {
        now >= self.expires_at
    }
}

/// Running cache counters
///
/// `hit_rate` is `cache_hits / total_requests` whenever any requests have
/// been made, `0.0` otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub hit_rate: f64,
    /// Scan milliseconds avoided by serving results from the cache
    pub total_saved_ms: u64,
    pub cache_size: usize,
    pub oldest_entry: Option<SystemTime>,
    pub newest_entry: Option<SystemTime>,
}

impl CacheStats {
    pub fn record_hit(&mut self, saved_ms: u64) {
        self.total_requests += 1;
        self.cache_hits += 1;
        self.total_saved_ms += saved_ms;
        self.recalculate_hit_rate();
    }

    pub fn record_miss(&mut self) {
        self.total_requests += 1;
        self.cache_misses += 1;
        self.recalculate_hit_rate();
    }

    fn recalculate_hit_rate(&mut self) {
        self.hit_rate = if self.total_requests > 0 {
            self.cache_hits as f64 / self.total_requests as f64
        } else {
            0.0
        };
    }
}

/// Selector for bulk invalidation: either a key substring or a regex
#[derive(Debug, Clone)]
pub enum InvalidationPattern {
    Substring(String),
    Regex(Regex),
}

impl InvalidationPattern {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            InvalidationPattern::Substring(needle) => key.contains(needle.as_str()),
            InvalidationPattern::Regex(regex) => regex.is_match(key),
        }
    }
}

impl From<&str> for InvalidationPattern {
    fn from(value: &str) -> Self {
        InvalidationPattern::Substring(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_arithmetic() {
        let mut stats = CacheStats::default();
        assert_eq!(stats.hit_rate, 0.0);

        stats.record_hit(100);
        stats.record_hit(50);
        stats.record_miss();
        stats.record_miss();

        assert_eq!(stats.total_requests, 4);
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_misses, 2);
        assert_eq!(stats.hit_rate, 0.5);
        assert_eq!(stats.total_saved_ms, 150);
    }

    #[test]
    fn test_invalidation_pattern_matching() {
        let substring = InvalidationPattern::from("abc");
        assert!(substring.matches("xxabcxx"));
        assert!(!substring.matches("xyz"));

        let regex = InvalidationPattern::Regex(Regex::new("^a[0-9]+$").unwrap());
        assert!(regex.matches("a123"));
        assert!(!regex.matches("b123"));
    }
}
