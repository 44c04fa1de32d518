//! FileScout Core Library
//!
//! This is the core library for the FileScout discovery engine, providing
//! pattern validation, purpose-based pattern resolution, cached file
//! discovery and deterministic cache keys.

pub mod cache;
pub mod config;
pub mod discovery;
pub mod error;
pub mod languages;
pub mod patterns;

// Re-export main types
pub use cache::{
    CacheKeyGenerator, CacheStats, DiscoveryCache, InvalidationPattern, MemoryDiscoveryCache,
    NullDiscoveryCache,
};
pub use config::{CacheSettings, ConfigManager, EngineConfig, TypePatternOverrides};
pub use discovery::{
    DiscoveryRequest, DiscoveryResult, DiscoveryService, DiscoveryStats, DiscoveryType,
    FileScanner, GlobScanner, ScanOptions, ScanOutcome, ServiceFactory, TestFramework,
};
pub use error::{DiscoveryError, Result};
pub use languages::Language;
pub use patterns::{PatternManager, PatternValidationResult, PatternValidator};
