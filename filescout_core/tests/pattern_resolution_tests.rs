//! Pattern resolution as observed through a scripted scanner
//!
//! The mock scanner records the include and ignore sets the service hands
//! it, which is the only reliable way to assert on resolution order and
//! merge behaviour without depending on directory contents.

use std::sync::Arc;

use filescout_core::{
    DiscoveryRequest, DiscoveryService, DiscoveryType, EngineConfig, TypePatternOverrides,
};
use filescout_test_utils::{MockScanner, ProjectFixture};

fn service_with(scanner: Arc<MockScanner>) -> DiscoveryService {
    DiscoveryService::new(EngineConfig::default()).with_scanner(scanner)
}

#[tokio::test]
async fn test_default_includes_are_used_when_request_has_none() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::TestGeneration)
        .with_cache(false);
    service.find_files(&request).await.unwrap();

    let call = scanner.last_call().unwrap();
    assert_eq!(call.include, vec!["src/**/*", "lib/**/*", "app/**/*"]);
}

#[tokio::test]
async fn test_request_includes_replace_defaults_verbatim() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::TestGeneration)
        .with_include(vec!["scripts/**/*.sh".to_string()])
        .with_cache(false);
    service.find_files(&request).await.unwrap();

    let call = scanner.last_call().unwrap();
    assert_eq!(call.include, vec!["scripts/**/*.sh"]);
}

#[tokio::test]
async fn test_ignore_set_starts_global_and_ends_with_request_excludes() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::ProjectAnalysis)
        .with_exclude(vec!["**/legacy/**".to_string()])
        .with_cache(false);
    service.find_files(&request).await.unwrap();

    let call = scanner.last_call().unwrap();
    assert_eq!(call.options.ignore.first().unwrap(), "**/node_modules/**");
    assert_eq!(call.options.ignore.last().unwrap(), "**/legacy/**");
    // Per-type defaults sit between the global list and request excludes
    assert!(call.options.ignore.contains(&"**/*.test.*".to_string()));
}

#[tokio::test]
async fn test_request_override_takes_precedence_over_config() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());

    let mut config = EngineConfig::default();
    config.patterns.test_generation.replace_includes = vec!["config/**/*".to_string()];
    let service = DiscoveryService::new(config).with_scanner(scanner.clone());

    let overrides = TypePatternOverrides {
        replace_includes: vec!["request/**/*".to_string()],
        ..Default::default()
    };
    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::TestGeneration)
        .with_config_override(overrides)
        .with_cache(false);
    service.find_files(&request).await.unwrap();

    let call = scanner.last_call().unwrap();
    assert_eq!(call.include, vec!["request/**/*"]);
}

#[tokio::test]
async fn test_directories_flag_reaches_scanner() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::ProjectAnalysis)
        .with_directories(true)
        .with_absolute(true)
        .with_cache(false);
    service.find_files(&request).await.unwrap();

    let call = scanner.last_call().unwrap();
    assert!(!call.options.only_files);
    assert!(call.options.absolute);
}

#[tokio::test]
async fn test_scanner_outcome_drives_stats() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    scanner.push_outcome(filescout_core::ScanOutcome {
        files: vec!["src/a.ts".to_string(), "src/b.ts".to_string()],
        total_candidates: 5,
    });
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::ProjectAnalysis)
        .with_cache(false);
    let result = service.find_files(&request).await.unwrap();

    assert_eq!(result.stats.total_scanned, 5);
    assert_eq!(result.stats.included, 2);
    assert_eq!(result.stats.excluded, 3);
    assert_eq!(result.stats.language_filtered, 0);
}

#[tokio::test]
async fn test_override_request_misses_the_plain_cache_entry() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    scanner.push_files(&["src/a.ts"]);
    scanner.push_files(&["config/app.ts"]);
    let service = service_with(scanner.clone());

    let plain = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::TestGeneration)
        .with_cache(true);
    let first = service.find_files(&plain).await.unwrap();
    assert_eq!(first.files, vec!["src/a.ts"]);

    // Same request except for an override that swaps the include table;
    // it must scan again instead of reusing the plain entry
    let overridden = plain.clone().with_config_override(TypePatternOverrides {
        replace_includes: vec!["config/**/*".to_string()],
        ..Default::default()
    });
    let second = service.find_files(&overridden).await.unwrap();

    assert!(!second.from_cache);
    assert_eq!(second.files, vec!["config/app.ts"]);
    assert_eq!(scanner.scan_count(), 2);
    assert_eq!(
        scanner.last_call().unwrap().include,
        vec!["config/**/*"]
    );
}

#[tokio::test]
async fn test_underreported_candidates_do_not_underflow_stats() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    scanner.push_outcome(filescout_core::ScanOutcome {
        files: vec!["src/a.ts".to_string(), "src/b.ts".to_string()],
        total_candidates: 0,
    });
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::ProjectAnalysis)
        .with_cache(false);
    let result = service.find_files(&request).await.unwrap();

    assert_eq!(result.stats.total_scanned, 2);
    assert_eq!(result.stats.included, 2);
    assert_eq!(result.stats.excluded, 0);
}

#[tokio::test]
async fn test_cached_hit_skips_the_scanner() {
    let fixture = ProjectFixture::new().dir("src");
    let scanner = Arc::new(MockScanner::new());
    scanner.push_files(&["src/a.ts"]);
    let service = service_with(scanner.clone());

    let request = DiscoveryRequest::new(fixture.root_str(), DiscoveryType::ProjectAnalysis)
        .with_cache(true);

    service.find_files(&request).await.unwrap();
    let hit = service.find_files(&request).await.unwrap();

    assert!(hit.from_cache);
    assert_eq!(scanner.scan_count(), 1);
}
