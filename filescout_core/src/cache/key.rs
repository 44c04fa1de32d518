//! Deterministic cache key derivation
//!
//! A key is a canonical projection of a discovery request: normalized base
//! directory, sorted and slash-normalized pattern lists, sorted languages,
//! and the options that affect output shape. Two requests differing only in
//! array ordering or path-separator style hash to the identical key.
//!
//! Keys are SHA-256 digests truncated to a short hex string. Truncation
//! trades a negligible collision probability for compact storage, which is
//! acceptable at single-process scale.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::config::TypePatternOverrides;
use crate::discovery::DiscoveryRequest;

/// Length in hex characters of a generated key
pub const KEY_LENGTH: usize = 16;

/// Stateless generator producing canonical keys for discovery requests
pub struct CacheKeyGenerator;

impl CacheKeyGenerator {
    /// Derive the canonical key for a request
    pub fn generate(request: &DiscoveryRequest) -> String {
        let mut include = normalize_patterns(&request.include);
        include.sort_unstable();
        let mut exclude = normalize_patterns(&request.exclude);
        exclude.sort_unstable();
        let mut languages: Vec<&str> = request.languages.iter().map(|l| l.as_str()).collect();
        languages.sort_unstable();
        languages.dedup();

        // serde_json maps are BTree-backed, so object keys serialize in
        // sorted order and the output is stable across field arrangement.
        let canonical = json!({
            "base_dir": normalize_path(&request.base_dir),
            "exclude": exclude,
            "include": include,
            "languages": languages,
            "options": {
                "absolute": request.absolute,
                "include_directories": request.include_directories,
            },
            // A per-request override swaps the resolved pattern sets, so it
            // must be part of the key; `null` (no override) and an empty
            // override are distinct because an empty one still suppresses
            // configuration-level overrides.
            "override": request.config_override.as_ref().map(canonical_overrides),
            "type": request.discovery_type.as_str(),
        });

        let digest = Sha256::digest(canonical.to_string().as_bytes());
        let mut key = hex::encode(digest);
        key.truncate(KEY_LENGTH);
        key
    }

    /// Diagnostic check that a request projects to a well-formed key
    ///
    /// The discovery type is statically one of the four purposes, so only
    /// the string-typed parts need checking here.
    pub fn validate(request: &DiscoveryRequest) -> std::result::Result<(), String> {
        if normalize_path(&request.base_dir).is_empty() {
            return Err("base_dir must not be empty".to_string());
        }

        // Raw patterns, not the normalized ones: normalization would have
        // rewritten every backslash before this check could see it.
        for pattern in request.include.iter().chain(request.exclude.iter()) {
            if pattern.contains('\\') {
                return Err(format!(
                    "pattern '{pattern}' contains backslashes; globs use forward slashes"
                ));
            }
        }

        Ok(())
    }
}

/// Normalize a path string: forward slashes, collapsed separators, no
/// trailing slash (the filesystem root stays `/`)
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_slash = false;

    for ch in path.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if previous_was_slash {
                continue;
            }
            previous_was_slash = true;
        } else {
            previous_was_slash = false;
        }
        normalized.push(ch);
    }

    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

fn normalize_patterns(patterns: &[String]) -> Vec<String> {
    patterns.iter().map(|p| p.replace('\\', "/")).collect()
}

/// Canonical projection of a pattern override block, list order ignored
fn canonical_overrides(overrides: &TypePatternOverrides) -> serde_json::Value {
    let sorted = |patterns: &[String]| {
        let mut normalized = normalize_patterns(patterns);
        normalized.sort_unstable();
        normalized
    };

    json!({
        "additional_excludes": sorted(&overrides.additional_excludes),
        "additional_includes": sorted(&overrides.additional_includes),
        "replace_excludes": sorted(&overrides.replace_excludes),
        "replace_includes": sorted(&overrides.replace_includes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::DiscoveryType;
    use crate::languages::Language;
    use proptest::prelude::*;

    fn base_request() -> DiscoveryRequest {
        DiscoveryRequest::new("/tmp/project", DiscoveryType::TestGeneration)
    }

    #[test]
    fn test_key_has_fixed_length() {
        let key = CacheKeyGenerator::generate(&base_request());
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_is_order_independent() {
        let a = base_request()
            .with_include(vec!["b/**".to_string(), "a/**".to_string()])
            .with_languages(vec![Language::Python, Language::TypeScript]);
        let b = base_request()
            .with_include(vec!["a/**".to_string(), "b/**".to_string()])
            .with_languages(vec![Language::TypeScript, Language::Python]);

        assert_eq!(
            CacheKeyGenerator::generate(&a),
            CacheKeyGenerator::generate(&b)
        );
    }

    #[test]
    fn test_key_normalizes_path_separators() {
        let forward = DiscoveryRequest::new("/tmp/project/src", DiscoveryType::ProjectAnalysis);
        let doubled = DiscoveryRequest::new("/tmp//project/src/", DiscoveryType::ProjectAnalysis);
        let windows = DiscoveryRequest::new("/tmp\\project\\src", DiscoveryType::ProjectAnalysis);

        let key = CacheKeyGenerator::generate(&forward);
        assert_eq!(key, CacheKeyGenerator::generate(&doubled));
        assert_eq!(key, CacheKeyGenerator::generate(&windows));
    }

    #[test]
    fn test_key_distinguishes_options() {
        let relative = base_request();
        let absolute = base_request().with_absolute(true);
        assert_ne!(
            CacheKeyGenerator::generate(&relative),
            CacheKeyGenerator::generate(&absolute)
        );
    }

    #[test]
    fn test_key_distinguishes_types() {
        let generation = DiscoveryRequest::new("/p", DiscoveryType::TestGeneration);
        let execution = DiscoveryRequest::new("/p", DiscoveryType::TestExecution);
        assert_ne!(
            CacheKeyGenerator::generate(&generation),
            CacheKeyGenerator::generate(&execution)
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
        assert_eq!(normalize_path("/a//b///c/"), "/a/b/c");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("a/"), "a");
    }

    #[test]
    fn test_key_distinguishes_config_overrides() {
        let plain = base_request();
        let overridden = base_request().with_config_override(TypePatternOverrides {
            replace_includes: vec!["config/**/*".to_string()],
            ..Default::default()
        });
        assert_ne!(
            CacheKeyGenerator::generate(&plain),
            CacheKeyGenerator::generate(&overridden)
        );

        // An empty override still suppresses configuration-level overrides,
        // so it must not collapse onto the no-override key
        let empty = base_request().with_config_override(TypePatternOverrides::default());
        assert_ne!(
            CacheKeyGenerator::generate(&plain),
            CacheKeyGenerator::generate(&empty)
        );
    }

    #[test]
    fn test_override_lists_are_order_independent() {
        let a = base_request().with_config_override(TypePatternOverrides {
            additional_includes: vec!["b/**".to_string(), "a/**".to_string()],
            ..Default::default()
        });
        let b = base_request().with_config_override(TypePatternOverrides {
            additional_includes: vec!["a/**".to_string(), "b/**".to_string()],
            ..Default::default()
        });
        assert_eq!(
            CacheKeyGenerator::generate(&a),
            CacheKeyGenerator::generate(&b)
        );
    }

    #[test]
    fn test_validate_flags_backslash_patterns() {
        let request = base_request().with_include(vec!["src\\**".to_string()]);
        assert!(CacheKeyGenerator::validate(&request).is_err());

        let clean = base_request().with_include(vec!["src/**".to_string()]);
        assert!(CacheKeyGenerator::validate(&clean).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_base_dir() {
        let mut request = base_request();
        request.base_dir = String::new();
        assert!(CacheKeyGenerator::validate(&request).is_err());
        assert!(CacheKeyGenerator::validate(&base_request()).is_ok());
    }

    proptest! {
        #[test]
        fn prop_key_ignores_pattern_ordering(
            mut patterns in proptest::collection::vec("[a-z]{1,8}(/\\*\\*)?", 1..6)
        ) {
            let forward = base_request().with_include(patterns.clone());
            patterns.reverse();
            let reversed = base_request().with_include(patterns);

            prop_assert_eq!(
                CacheKeyGenerator::generate(&forward),
                CacheKeyGenerator::generate(&reversed)
            );
        }
    }
}
