//! Default pattern tables and merge rules
//!
//! Each discovery purpose has a fixed include/exclude table. Configuration
//! may replace or extend includes; excludes are always additive across
//! sources (global, per-type, language-derived, configuration).

use crate::config::TypePatternOverrides;
use crate::discovery::DiscoveryType;
use crate::languages::{extension_union, Language};

/// Excludes applied to every discovery purpose: VCS metadata, dependency
/// trees and build output
pub const GLOBAL_EXCLUDES: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/dist/**",
    "**/build/**",
    "**/out/**",
    "**/coverage/**",
    "**/.next/**",
    "**/.venv/**",
    "**/target/**",
];

/// How user patterns combine with defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOperation {
    /// User patterns win when non-empty, defaults otherwise
    Replace,
    /// Defaults first, then user patterns
    Add,
}

/// Resolves include/exclude pattern sets per discovery purpose
#[derive(Debug, Clone, Default)]
pub struct PatternManager;

impl PatternManager {
    pub fn new() -> Self {
        Self
    }

    /// Fixed include table for a discovery purpose
    pub fn default_includes(discovery_type: DiscoveryType) -> &'static [&'static str] {
        match discovery_type {
            DiscoveryType::ProjectAnalysis => &[
                "src/**/*",
                "lib/**/*",
                "app/**/*",
                "components/**/*",
                "pages/**/*",
                "utils/**/*",
            ],
            DiscoveryType::TestGeneration => &["src/**/*", "lib/**/*", "app/**/*"],
            DiscoveryType::TestExecution => &[
                "**/*.test.*",
                "**/*.spec.*",
                "**/__tests__/**/*",
                "**/test_*.py",
                "**/*_test.py",
            ],
            DiscoveryType::ConfigDiscovery => &[
                "package.json",
                "tsconfig.json",
                "jsconfig.json",
                "pyproject.toml",
                "setup.py",
                "setup.cfg",
                "requirements.txt",
                "jest.config.*",
                "vitest.config.*",
                "pytest.ini",
            ],
        }
    }

    /// Fixed exclude table for a discovery purpose (beyond the global list)
    pub fn default_excludes(discovery_type: DiscoveryType) -> &'static [&'static str] {
        match discovery_type {
            DiscoveryType::ProjectAnalysis => &["**/*.test.*", "**/*.spec.*", "**/*.config.*"],
            DiscoveryType::TestGeneration => &[
                "**/*.test.*",
                "**/*.spec.*",
                "**/__tests__/**",
                "**/*.d.ts",
                "**/index.ts",
                "**/index.js",
            ],
            DiscoveryType::TestExecution => &["**/*.d.ts"],
            DiscoveryType::ConfigDiscovery => &[],
        }
    }

    /// Resolve include patterns for a purpose
    ///
    /// Starts from the fixed table, applies configuration overrides (replace
    /// wins over add), then narrows patterns with a language extension group
    /// when languages are given.
    pub fn get_include_patterns(
        &self,
        discovery_type: DiscoveryType,
        languages: &[Language],
        overrides: Option<&TypePatternOverrides>,
    ) -> Vec<String> {
        let defaults: Vec<String> = Self::default_includes(discovery_type)
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut patterns = match overrides {
            Some(o) if !o.replace_includes.is_empty() => {
                Self::merge_user_patterns(&defaults, &o.replace_includes, MergeOperation::Replace)
            }
            Some(o) if !o.additional_includes.is_empty() => {
                Self::merge_user_patterns(&defaults, &o.additional_includes, MergeOperation::Add)
            }
            _ => defaults,
        };

        if !languages.is_empty() {
            let extensions = extension_union(languages).join(",");
            patterns = patterns
                .into_iter()
                .map(|pattern| rewrite_with_extensions(pattern, &extensions))
                .collect();
        }

        patterns
    }

    /// Resolve exclude patterns for a purpose
    ///
    /// Concatenates, in order: the global exclude list, the per-type table,
    /// language-derived excludes, and configuration-sourced excludes. All
    /// sources are additive.
    pub fn get_exclude_patterns(
        &self,
        discovery_type: DiscoveryType,
        languages: &[Language],
        overrides: Option<&TypePatternOverrides>,
    ) -> Vec<String> {
        let mut patterns: Vec<String> = GLOBAL_EXCLUDES.iter().map(|s| s.to_string()).collect();

        patterns.extend(
            Self::default_excludes(discovery_type)
                .iter()
                .map(|s| s.to_string()),
        );

        for language in languages {
            patterns.extend(language.exclude_patterns().iter().map(|s| s.to_string()));
        }

        if let Some(o) = overrides {
            patterns.extend(o.all_excludes());
        }

        patterns
    }

    /// Combine default and user pattern lists without mutating either input
    pub fn merge_user_patterns(
        defaults: &[String],
        user: &[String],
        operation: MergeOperation,
    ) -> Vec<String> {
        match operation {
            MergeOperation::Replace => {
                if user.is_empty() {
                    defaults.to_vec()
                } else {
                    user.to_vec()
                }
            }
            MergeOperation::Add => {
                let mut merged = defaults.to_vec();
                merged.extend(user.iter().cloned());
                merged
            }
        }
    }
}

/// Narrow a pattern with a language extension group
///
/// Only patterns ending in a bare `*` (no existing extension or brace group
/// in the final segment) are rewritten; anything already constrained is left
/// alone.
fn rewrite_with_extensions(pattern: String, extensions: &str) -> String {
    if pattern.contains('{') {
        return pattern;
    }

    let last_segment = pattern.rsplit('/').next().unwrap_or(&pattern);
    if last_segment == "*" {
        return format!("{pattern}.{{{extensions}}}");
    }

    pattern
}
