//! Cache trait definition
//!
//! Cache operations never fail: at worst they no-op. That contract is
//! reflected in the signatures, which return values rather than `Result`.

use async_trait::async_trait;
use std::time::Duration;

use super::{CacheStats, InvalidationPattern};
use crate::discovery::DiscoveryResult;

/// Trait for discovery result caches
#[async_trait]
pub trait DiscoveryCache: Send + Sync {
    /// Look up a result by canonical key
    ///
    /// Every call counts as a request. A hit returns a copy of the stored
    /// result with `from_cache = true` and `duration_ms = 0`; an expired
    /// entry is purged and counted as a miss.
    async fn get(&self, key: &str) -> Option<DiscoveryResult>;

    /// Store a result under a key
    ///
    /// `ttl` overrides the configured default when given. The stored copy
    /// always has `from_cache = false`, since it records the original
    /// computation.
    async fn set(&self, key: &str, result: &DiscoveryResult, ttl: Option<Duration>);

    /// Delete every entry whose key matches the pattern; returns the number
    /// of entries removed
    async fn invalidate(&self, pattern: &InvalidationPattern) -> usize;

    /// Remove all entries
    async fn clear(&self);

    /// Immutable snapshot of the running counters
    async fn stats(&self) -> CacheStats;
}
