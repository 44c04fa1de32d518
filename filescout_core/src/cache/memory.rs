//! Memory-based discovery cache
//!
//! Entries live in a single in-process map with TTL expiration and
//! oldest-first capacity eviction. Expired entries are purged lazily on the
//! `get` that finds them; eviction removes roughly the oldest 10% of entries
//! (at least one) when the cache is at capacity.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

use super::traits::DiscoveryCache;
use super::{CacheStats, CachedResult, InvalidationPattern};
use crate::config::CacheSettings;
use crate::discovery::DiscoveryResult;

/// In-memory cache with TTL expiration and capacity eviction
pub struct MemoryDiscoveryCache {
    entries: Arc<RwLock<HashMap<String, CachedResult>>>,
    stats: Arc<RwLock<CacheStats>>,
    settings: CacheSettings,
}

impl MemoryDiscoveryCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(CacheStats::default())),
            settings,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CacheSettings::default())
    }

    fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.settings.ttl_ms)
    }

    /// Rough entry footprint: key plus the stored path strings
    fn estimate_size(key: &str, result: &DiscoveryResult) -> u64 {
        let paths: usize = result.files.iter().map(|f| f.len()).sum();
        (key.len() + paths + std::mem::size_of::<CachedResult>()) as u64
    }

    /// Evict the oldest ~10% of entries by insertion timestamp, minimum one
    fn evict_oldest(entries: &mut HashMap<String, CachedResult>, max_size: usize) {
        let evict_count = (max_size / 10).max(1);

        let mut by_age: Vec<(String, SystemTime)> = entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.inserted_at))
            .collect();
        by_age.sort_by_key(|(_, inserted_at)| *inserted_at);

        for (key, _) in by_age.into_iter().take(evict_count) {
            entries.remove(&key);
        }
    }

    /// Recompute size and timestamp bookkeeping by scanning all entries
    ///
    /// Linear, but the capacity bound keeps the map small.
    fn refresh_bookkeeping(entries: &HashMap<String, CachedResult>, stats: &mut CacheStats) {
        stats.cache_size = entries.len();
        stats.oldest_entry = entries.values().map(|e| e.inserted_at).min();
        stats.newest_entry = entries.values().map(|e| e.inserted_at).max();
    }
}

#[async_trait]
impl DiscoveryCache for MemoryDiscoveryCache {
    async fn get(&self, key: &str) -> Option<DiscoveryResult> {
        if !self.settings.enabled {
            self.stats.write().await.record_miss();
            return None;
        }

        // Lock order is entries before stats, everywhere.
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;
        let now = SystemTime::now();

        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let saved_ms = entry.result.duration_ms;
                let mut result = entry.result.clone();
                result.from_cache = true;
                result.duration_ms = 0;

                stats.record_hit(saved_ms);
                log::debug!("cache hit: {key}");
                Some(result)
            }
            Some(_) => {
                // Found but stale: purge lazily and fall through to a miss
                entries.remove(key);
                Self::refresh_bookkeeping(&entries, &mut stats);
                stats.record_miss();
                log::debug!("cache entry expired: {key}");
                None
            }
            None => {
                stats.record_miss();
                None
            }
        }
    }

    async fn set(&self, key: &str, result: &DiscoveryResult, ttl: Option<Duration>) {
        if !self.settings.enabled {
            return;
        }

        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;
        let now = SystemTime::now();

        if !entries.contains_key(key) && entries.len() >= self.settings.max_size {
            Self::evict_oldest(&mut entries, self.settings.max_size);
        }

        // The stored copy records the original computation
        let mut stored = result.clone();
        stored.from_cache = false;

        let size_estimate = Self::estimate_size(key, &stored);
        entries.insert(
            key.to_string(),
            CachedResult {
                result: stored,
                inserted_at: now,
                expires_at: now + ttl.unwrap_or_else(|| self.default_ttl()),
                size_estimate,
            },
        );

        Self::refresh_bookkeeping(&entries, &mut stats);
        log::debug!("cached result under key {key}");
    }

    async fn invalidate(&self, pattern: &InvalidationPattern) -> usize {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        let before = entries.len();
        entries.retain(|key, _| !pattern.matches(key));
        let removed = before - entries.len();

        Self::refresh_bookkeeping(&entries, &mut stats);
        if removed > 0 {
            log::debug!("invalidated {removed} cache entries");
        }
        removed
    }

    async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        entries.clear();
        let now = SystemTime::now();
        stats.cache_size = 0;
        stats.oldest_entry = Some(now);
        stats.newest_entry = Some(now);
    }

    async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }
}
