//! Null cache implementation
//!
//! Stores nothing: every `get` is a miss and every mutation is a no-op.
//! Request and miss counters still advance so statistics stay meaningful
//! when caching is deliberately disabled.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::traits::DiscoveryCache;
use super::{CacheStats, InvalidationPattern};
use crate::discovery::DiscoveryResult;

/// A cache that never stores anything
#[derive(Default)]
pub struct NullDiscoveryCache {
    stats: Arc<RwLock<CacheStats>>,
}

impl NullDiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiscoveryCache for NullDiscoveryCache {
    async fn get(&self, _key: &str) -> Option<DiscoveryResult> {
        self.stats.write().await.record_miss();
        None
    }

    async fn set(&self, _key: &str, _result: &DiscoveryResult, _ttl: Option<Duration>) {}

    async fn invalidate(&self, _pattern: &InvalidationPattern) -> usize {
        0
    }

    async fn clear(&self) {}

    async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }
}
