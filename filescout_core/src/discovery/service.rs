//! Discovery service orchestration
//!
//! `find_files` runs the full pipeline: pattern validation, cache lookup,
//! directory check, pattern resolution, scan, language filter, cache store
//! and observability. Errors are returned as values; the lenient entry point
//! additionally collapses them into empty results for callers that predate
//! the typed error path.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{
    CacheKeyGenerator, CacheStats, DiscoveryCache, InvalidationPattern, MemoryDiscoveryCache,
    NullDiscoveryCache,
};
use crate::config::EngineConfig;
use crate::error::{DiscoveryError, Result};
use crate::languages::matches_languages;
use crate::patterns::{PatternManager, PatternValidator};

use super::scanner::{FileScanner, GlobScanner, ScanOptions};
use super::{DiscoveryRequest, DiscoveryResult, DiscoveryStats, DiscoveryType};

/// Test-framework presets with fixed include patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFramework {
    Jest,
    Vitest,
    Mocha,
    Pytest,
}

impl TestFramework {
    pub fn include_patterns(&self) -> &'static [&'static str] {
        match self {
            TestFramework::Jest => &[
                "**/*.test.{js,ts,jsx,tsx}",
                "**/*.spec.{js,ts,jsx,tsx}",
                "**/__tests__/**/*.{js,ts,jsx,tsx}",
            ],
            TestFramework::Vitest => &[
                "**/*.test.{js,mjs,cjs,ts,jsx,tsx}",
                "**/*.spec.{js,mjs,cjs,ts,jsx,tsx}",
            ],
            TestFramework::Mocha => &["test/**/*.{js,ts}", "**/*.spec.{js,ts}"],
            TestFramework::Pytest => &["**/test_*.py", "**/*_test.py"],
        }
    }
}

impl FromStr for TestFramework {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jest" => Ok(TestFramework::Jest),
            "vitest" => Ok(TestFramework::Vitest),
            "mocha" => Ok(TestFramework::Mocha),
            "pytest" => Ok(TestFramework::Pytest),
            other => Err(format!("unknown test framework: {other}")),
        }
    }
}

/// Orchestrates pattern resolution, scanning and caching
pub struct DiscoveryService {
    config: EngineConfig,
    patterns: PatternManager,
    cache: Arc<dyn DiscoveryCache>,
    scanner: Arc<dyn FileScanner>,
}

impl DiscoveryService {
    /// Build a service from configuration
    ///
    /// A disabled cache section yields the null cache so statistics still
    /// accumulate request/miss counts.
    pub fn new(config: EngineConfig) -> Self {
        let cache: Arc<dyn DiscoveryCache> = if config.cache.enabled {
            Arc::new(MemoryDiscoveryCache::new(config.cache.clone()))
        } else {
            Arc::new(NullDiscoveryCache::new())
        };

        Self {
            config,
            patterns: PatternManager::new(),
            cache,
            scanner: Arc::new(GlobScanner::new()),
        }
    }

    /// Swap the scan primitive (test seam)
    pub fn with_scanner(mut self, scanner: Arc<dyn FileScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    /// Swap the cache implementation (test seam)
    pub fn with_cache(mut self, cache: Arc<dyn DiscoveryCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Execute a discovery request, returning a typed error on failure
    pub async fn find_files(&self, request: &DiscoveryRequest) -> Result<DiscoveryResult> {
        let started = Instant::now();

        // 1. Pattern validation happens before any filesystem or cache work
        self.validate_request_patterns(request)?;

        // 2. Per-request toggle falls back to the global cache flag
        let use_cache = request.use_cache.unwrap_or(self.config.cache.enabled);
        let key = use_cache.then(|| CacheKeyGenerator::generate(request));

        // 3. Cache check
        if let Some(key) = &key {
            if let Some(hit) = self.cache.get(key).await {
                return Ok(hit);
            }
        }

        // 4. Directory check; no error escapes as a panic or raw io::Error
        self.check_base_dir(&request.base_dir).await?;

        // 5. Pattern resolution
        let (include, ignore) = self.resolve_patterns(request);

        // 6. Scan
        let outcome = self
            .scanner
            .scan(
                &include,
                &ScanOptions {
                    cwd: PathBuf::from(&request.base_dir),
                    ignore,
                    absolute: request.absolute,
                    only_files: !request.include_directories,
                },
            )
            .await?;

        // 7. Language post-filter, independent of include-pattern narrowing
        //
        // A scanner implementation may under-report candidates; clamp so the
        // excluded counter can never underflow.
        let total_scanned = outcome.total_candidates.max(outcome.files.len());
        let scanned_count = outcome.files.len();
        let files: Vec<String> = if request.languages.is_empty() {
            outcome.files
        } else {
            outcome
                .files
                .into_iter()
                .filter(|path| matches_languages(path, &request.languages))
                .collect()
        };
        let language_filtered = scanned_count - files.len();

        // 8. Assemble
        let included = files.len();
        let result = DiscoveryResult {
            files,
            from_cache: false,
            duration_ms: started.elapsed().as_millis() as u64,
            stats: DiscoveryStats {
                total_scanned,
                included,
                excluded: total_scanned - included,
                language_filtered,
            },
        };

        // 9. Cache store
        if let Some(key) = &key {
            self.cache.set(key, &result, None).await;
        }

        // 10. Observability; never affects the returned value
        if self.config.performance.log_slow_operations
            && result.duration_ms > self.config.performance.slow_threshold_ms
        {
            log::warn!(
                "slow discovery in {} ({}): {}ms",
                request.base_dir,
                request.discovery_type,
                result.duration_ms
            );
        }
        if self.config.performance.enable_stats {
            log::debug!(
                "discovery {} in {}: {:?} in {}ms",
                request.discovery_type,
                request.base_dir,
                result.stats,
                result.duration_ms
            );
        }

        Ok(result)
    }

    /// Legacy-compatible variant that collapses every error into a
    /// successful empty result
    ///
    /// Callers on this path cannot distinguish a missing directory from a
    /// directory with zero matches. Prefer `find_files`.
    pub async fn find_files_lenient(&self, request: &DiscoveryRequest) -> DiscoveryResult {
        match self.find_files(request).await {
            Ok(result) => result,
            Err(e) => {
                log::debug!("lenient discovery suppressed error: {e}");
                DiscoveryResult::empty()
            }
        }
    }

    /// Find test files in a directory, optionally using a framework preset
    ///
    /// Always requests absolute paths and enables caching. Without a preset,
    /// the test-execution defaults apply.
    pub async fn find_test_files(
        &self,
        directory: &str,
        framework: Option<TestFramework>,
    ) -> Result<DiscoveryResult> {
        let mut request = DiscoveryRequest::new(directory, DiscoveryType::TestExecution)
            .with_absolute(true)
            .with_cache(true);

        if let Some(framework) = framework {
            request = request.with_include(
                framework
                    .include_patterns()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            );
        }

        self.find_files(&request).await
    }

    /// Non-throwing existence check
    pub async fn file_exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Drop cache entries matching a pattern, or everything when `None`
    ///
    /// Returns the number of entries removed; a full clear reports zero.
    pub async fn invalidate_cache(&self, pattern: Option<InvalidationPattern>) -> usize {
        match pattern {
            Some(pattern) => self.cache.invalidate(&pattern).await,
            None => {
                self.cache.clear().await;
                0
            }
        }
    }

    /// Snapshot of the shared cache counters
    pub async fn get_cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    fn validate_request_patterns(&self, request: &DiscoveryRequest) -> Result<()> {
        let mut patterns = request.include.clone();
        patterns.extend(request.exclude.iter().cloned());

        let validation = PatternValidator::validate(&patterns);
        for warning in &validation.warnings {
            log::debug!(
                "pattern warning ({:?}): {} in '{}'",
                warning.code,
                warning.message,
                warning.pattern
            );
        }

        if let Some(error) = validation.errors.first() {
            return Err(DiscoveryError::InvalidPattern {
                pattern: error.pattern.clone(),
                message: error.message.clone(),
                position: error.position,
            });
        }
        Ok(())
    }

    async fn check_base_dir(&self, base_dir: &str) -> Result<()> {
        match tokio::fs::metadata(base_dir).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(DiscoveryError::directory_not_found(
                base_dir,
                "path exists but is not a directory",
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(
                DiscoveryError::directory_not_found(base_dir, "directory does not exist"),
            ),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(
                DiscoveryError::permission_denied(base_dir, "directory is not readable"),
            ),
            Err(e) => Err(DiscoveryError::directory_not_found(base_dir, e.to_string())),
        }
    }

    /// Resolve effective include and exclude pattern sets for a request
    ///
    /// Request includes win verbatim when supplied; request excludes are
    /// always appended to the resolved defaults, never replacing them.
    /// Language narrowing of results is handled by the post-filter, so
    /// include resolution here is language-agnostic.
    fn resolve_patterns(&self, request: &DiscoveryRequest) -> (Vec<String>, Vec<String>) {
        let overrides = request
            .config_override
            .as_ref()
            .unwrap_or_else(|| self.config.patterns.overrides_for(request.discovery_type));

        let include = if !request.include.is_empty() {
            request.include.clone()
        } else {
            self.patterns
                .get_include_patterns(request.discovery_type, &[], Some(overrides))
        };

        let mut ignore = self.patterns.get_exclude_patterns(
            request.discovery_type,
            &request.languages,
            Some(overrides),
        );
        ignore.extend(request.exclude.iter().cloned());

        (include, ignore)
    }
}
