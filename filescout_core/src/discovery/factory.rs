//! Service factory with an owned shared instance
//!
//! Callers that want one service per process create a factory and hold it;
//! nothing here is process-global, so independent factories (one per test,
//! for example) never interfere with each other.

use std::sync::{Arc, Mutex};

use crate::config::EngineConfig;

use super::service::DiscoveryService;

/// Builds and hands out a shared `DiscoveryService`
#[derive(Default)]
pub struct ServiceFactory {
    instance: Mutex<Option<Arc<DiscoveryService>>>,
}

impl ServiceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared service, building it on first call
    ///
    /// Configuration passed to later calls is ignored; the first
    /// construction wins until `reset`.
    pub fn create(&self, config: EngineConfig) -> Arc<DiscoveryService> {
        let mut guard = self.instance.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .get_or_insert_with(|| Arc::new(DiscoveryService::new(config)))
            .clone()
    }

    /// The shared service if one has been created
    pub fn get_instance(&self) -> Option<Arc<DiscoveryService>> {
        self.instance
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_instance(&self) -> bool {
        self.instance
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Drop the shared service; the next `create` builds a fresh one
    pub fn reset(&self) {
        self.instance
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheSettings;

    #[test]
    fn test_create_returns_same_instance() {
        let factory = ServiceFactory::new();
        assert!(!factory.has_instance());

        let first = factory.create(EngineConfig::default());
        let second = factory.create(EngineConfig::default());
        assert!(Arc::ptr_eq(&first, &second));
        assert!(factory.has_instance());
    }

    #[test]
    fn test_later_config_is_ignored_until_reset() {
        let factory = ServiceFactory::new();
        let first = factory.create(EngineConfig::default());

        let altered = EngineConfig {
            cache: CacheSettings {
                enabled: false,
                ..CacheSettings::default()
            },
            ..EngineConfig::default()
        };
        let same = factory.create(altered.clone());
        assert!(Arc::ptr_eq(&first, &same));

        factory.reset();
        assert!(!factory.has_instance());

        let fresh = factory.create(altered);
        assert!(!Arc::ptr_eq(&first, &fresh));
    }

    #[test]
    fn test_get_instance_before_create() {
        let factory = ServiceFactory::new();
        assert!(factory.get_instance().is_none());

        factory.create(EngineConfig::default());
        assert!(factory.get_instance().is_some());
    }

    #[test]
    fn test_independent_factories_do_not_share() {
        let a = ServiceFactory::new();
        let b = ServiceFactory::new();

        let service_a = a.create(EngineConfig::default());
        assert!(!b.has_instance());

        let service_b = b.create(EngineConfig::default());
        assert!(!Arc::ptr_eq(&service_a, &service_b));
    }
}
