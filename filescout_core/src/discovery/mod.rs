//! Discovery requests, results and the service that executes them

mod factory;
mod scanner;
mod service;

pub use factory::ServiceFactory;
pub use scanner::{GlobScanner, FileScanner, ScanOptions, ScanOutcome};
pub use service::{DiscoveryService, TestFramework};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::TypePatternOverrides;
use crate::languages::Language;

/// Enumerated discovery purpose selecting the default pattern tables
///
/// Unknown purposes are a construction-time error: there is no way to hold a
/// `DiscoveryType` outside these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryType {
    ProjectAnalysis,
    TestGeneration,
    TestExecution,
    ConfigDiscovery,
}

impl DiscoveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryType::ProjectAnalysis => "project-analysis",
            DiscoveryType::TestGeneration => "test-generation",
            DiscoveryType::TestExecution => "test-execution",
            DiscoveryType::ConfigDiscovery => "config-discovery",
        }
    }
}

impl fmt::Display for DiscoveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "project-analysis" => Ok(DiscoveryType::ProjectAnalysis),
            "test-generation" => Ok(DiscoveryType::TestGeneration),
            "test-execution" => Ok(DiscoveryType::TestExecution),
            "config-discovery" => Ok(DiscoveryType::ConfigDiscovery),
            other => Err(format!("unknown discovery type: {other}")),
        }
    }
}

/// A single file discovery request
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryRequest {
    /// Directory the scan is rooted at
    pub base_dir: String,
    /// Purpose tag selecting the default pattern tables
    pub discovery_type: DiscoveryType,
    /// Include patterns; when empty, the purpose defaults apply
    pub include: Vec<String>,
    /// Exclude patterns, concatenated after the purpose defaults
    pub exclude: Vec<String>,
    /// Languages to restrict results to (empty = no restriction)
    pub languages: Vec<Language>,
    /// Return absolute paths instead of paths relative to `base_dir`
    pub absolute: bool,
    /// Include directories in results, not just files
    pub include_directories: bool,
    /// Per-request cache toggle; `None` inherits the global setting
    pub use_cache: Option<bool>,
    /// Per-request pattern overrides applied on top of configuration
    pub config_override: Option<TypePatternOverrides>,
}

impl DiscoveryRequest {
    /// Create a request with default options
    pub fn new(base_dir: impl Into<String>, discovery_type: DiscoveryType) -> Self {
        Self {
            base_dir: base_dir.into(),
            discovery_type,
            include: Vec::new(),
            exclude: Vec::new(),
            languages: Vec::new(),
            absolute: false,
            include_directories: false,
            use_cache: None,
            config_override: None,
        }
    }

    pub fn with_include(mut self, patterns: Vec<String>) -> Self {
        self.include = patterns;
        self
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn with_directories(mut self, include_directories: bool) -> Self {
        self.include_directories = include_directories;
        self
    }

    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    pub fn with_config_override(mut self, overrides: TypePatternOverrides) -> Self {
        self.config_override = Some(overrides);
        self
    }
}

/// Per-request scan counters
///
/// `included + excluded == total_scanned` always holds; `language_filtered`
/// counts the subset of `excluded` removed by the language post-filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryStats {
    pub total_scanned: usize,
    pub included: usize,
    pub excluded: usize,
    pub language_filtered: usize,
}

/// Result of a discovery request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Matched paths, in scan order
    pub files: Vec<String>,
    /// Whether this result was served from the cache
    pub from_cache: bool,
    /// Wall-clock duration of the scan in milliseconds (0 for cache hits)
    pub duration_ms: u64,
    pub stats: DiscoveryStats,
}

impl DiscoveryResult {
    /// An empty result with all-zero stats (used by the lenient entry point)
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_type_round_trip() {
        for (text, expected) in [
            ("project-analysis", DiscoveryType::ProjectAnalysis),
            ("test-generation", DiscoveryType::TestGeneration),
            ("test-execution", DiscoveryType::TestExecution),
            ("config-discovery", DiscoveryType::ConfigDiscovery),
        ] {
            let parsed: DiscoveryType = text.parse().unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.as_str(), text);
        }
    }

    #[test]
    fn test_unknown_discovery_type_is_rejected() {
        assert!("code-review".parse::<DiscoveryType>().is_err());
    }

    #[test]
    fn test_request_builder() {
        let request = DiscoveryRequest::new("/tmp/project", DiscoveryType::TestGeneration)
            .with_languages(vec![Language::TypeScript])
            .with_absolute(true)
            .with_cache(false);

        assert_eq!(request.base_dir, "/tmp/project");
        assert!(request.absolute);
        assert_eq!(request.use_cache, Some(false));
        assert!(request.include.is_empty());
    }
}
