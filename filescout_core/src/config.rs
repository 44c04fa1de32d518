//! Engine configuration
//!
//! Configuration is a fully enumerated structure rather than an open-ended
//! dictionary: unknown keys are rejected at load time. Loading is layered
//! (defaults, then a TOML file, then `FILESCOUT_`-prefixed environment
//! variables) with later layers winning.

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::discovery::DiscoveryType;

/// Top-level configuration for the discovery engine
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub patterns: PatternSettings,

    #[serde(default)]
    pub performance: PerformanceSettings,
}

/// Cache behaviour: global enable flag, entry TTL and capacity bound
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_ms: u64,
    pub max_size: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_ms: 60_000,
            max_size: 100,
        }
    }
}

/// Per-purpose pattern overrides supplied by configuration
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PatternSettings {
    #[serde(default)]
    pub project_analysis: TypePatternOverrides,

    #[serde(default)]
    pub test_generation: TypePatternOverrides,

    #[serde(default)]
    pub test_execution: TypePatternOverrides,

    #[serde(default)]
    pub config_discovery: TypePatternOverrides,
}

impl PatternSettings {
    /// The override block for a discovery purpose
    pub fn overrides_for(&self, discovery_type: DiscoveryType) -> &TypePatternOverrides {
        match discovery_type {
            DiscoveryType::ProjectAnalysis => &self.project_analysis,
            DiscoveryType::TestGeneration => &self.test_generation,
            DiscoveryType::TestExecution => &self.test_execution,
            DiscoveryType::ConfigDiscovery => &self.config_discovery,
        }
    }
}

/// Pattern overrides for a single discovery purpose
///
/// Includes may be replaced or extended; excludes are always additive across
/// sources, so `replace_excludes` is accepted for shape compatibility but
/// merged additively like `additional_excludes`.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TypePatternOverrides {
    #[serde(default)]
    pub additional_includes: Vec<String>,

    #[serde(default)]
    pub replace_includes: Vec<String>,

    #[serde(default)]
    pub additional_excludes: Vec<String>,

    #[serde(default)]
    pub replace_excludes: Vec<String>,
}

impl TypePatternOverrides {
    pub fn is_empty(&self) -> bool {
        self.additional_includes.is_empty()
            && self.replace_includes.is_empty()
            && self.additional_excludes.is_empty()
            && self.replace_excludes.is_empty()
    }

    /// All configuration-sourced excludes, in declaration order
    pub fn all_excludes(&self) -> Vec<String> {
        let mut excludes = self.replace_excludes.clone();
        excludes.extend(self.additional_excludes.iter().cloned());
        excludes
    }
}

/// Observability knobs for the discovery service
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PerformanceSettings {
    pub enable_stats: bool,
    pub log_slow_operations: bool,
    pub slow_threshold_ms: u64,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            enable_stats: true,
            log_slow_operations: true,
            slow_threshold_ms: 1_000,
        }
    }
}

/// Loads layered configuration from an optional TOML file and the environment
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a manager that loads from defaults and environment only
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a manager bound to a specific config file path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
        }
    }

    /// Load configuration with layered priority: ENV > file > defaults
    pub fn load(&self) -> Result<EngineConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(EngineConfig::default()));

        if let Some(path) = &self.config_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("FILESCOUT_").split("__"));

        figment.extract().context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_ms, 60_000);
        assert_eq!(config.cache.max_size, 100);
        assert!(config.performance.enable_stats);
        assert_eq!(config.performance.slow_threshold_ms, 1_000);
        assert!(config.patterns.test_generation.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filescout.toml");
        fs::write(
            &path,
            r#"
[cache]
enabled = false
ttl_ms = 5000
max_size = 10

[patterns.test_generation]
additional_includes = ["scripts/**/*"]
"#,
        )
        .unwrap();

        let config = ConfigManager::with_path(path).load().unwrap();
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_ms, 5_000);
        assert_eq!(config.cache.max_size, 10);
        assert_eq!(
            config.patterns.test_generation.additional_includes,
            vec!["scripts/**/*".to_string()]
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filescout.toml");
        fs::write(
            &path,
            r#"
[cache]
enabled = true
ttl_millis = 5000
"#,
        )
        .unwrap();

        let result = ConfigManager::with_path(path).load();
        assert!(result.is_err());
    }

    #[test]
    fn test_all_excludes_order() {
        let overrides = TypePatternOverrides {
            additional_excludes: vec!["b".to_string()],
            replace_excludes: vec!["a".to_string()],
            ..Default::default()
        };
        assert_eq!(overrides.all_excludes(), vec!["a", "b"]);
    }
}
