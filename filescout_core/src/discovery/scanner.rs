//! Filesystem scanning behind a pluggable trait
//!
//! The discovery service only depends on the `FileScanner` trait; the
//! default implementation compiles include/exclude patterns into glob sets
//! and walks the tree with `walkdir`. Symbolic links are never followed and
//! hidden entries are pruned during the walk.

use async_trait::async_trait;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DiscoveryError, Result};

/// Options controlling a single scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory the scan is rooted at
    pub cwd: PathBuf,
    /// Exclude patterns applied to candidates
    pub ignore: Vec<String>,
    /// Emit absolute paths instead of paths relative to `cwd`
    pub absolute: bool,
    /// Skip directories in the output
    pub only_files: bool,
}

/// What a scan produced
///
/// `total_candidates` counts every entry that matched the include patterns
/// before excludes were applied; the engine needs it for scan statistics.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub files: Vec<String>,
    pub total_candidates: usize,
}

/// Pluggable glob-execution primitive
#[async_trait]
pub trait FileScanner: Send + Sync {
    async fn scan(&self, include: &[String], options: &ScanOptions) -> Result<ScanOutcome>;
}

/// Default scanner backed by `globset` and `walkdir`
#[derive(Debug, Clone, Default)]
pub struct GlobScanner;

impl GlobScanner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileScanner for GlobScanner {
    async fn scan(&self, include: &[String], options: &ScanOptions) -> Result<ScanOutcome> {
        let include = include.to_vec();
        let options = options.clone();

        // walkdir is synchronous; keep it off the async executor threads
        tokio::task::spawn_blocking(move || scan_sync(&include, &options))
            .await
            .map_err(|e| {
                DiscoveryError::invalid_pattern("<scan>", format!("scan task failed: {e}"))
            })?
    }
}

fn scan_sync(include: &[String], options: &ScanOptions) -> Result<ScanOutcome> {
    let include_set = build_globset(include)?;
    let exclude_set = build_globset(&options.ignore)?;
    let prune_set = build_prune_set(&options.ignore)?;

    let mut outcome = ScanOutcome::default();

    let walker = WalkDir::new(&options.cwd)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if is_hidden(entry.path()) {
                return false;
            }
            // Prune excluded subtrees instead of walking and discarding them
            if entry.file_type().is_dir() {
                if let Some(rel) = relative_slash_path(entry.path(), &options.cwd) {
                    if prune_set.is_match(&rel) {
                        return false;
                    }
                }
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("walk error under {:?}: {e}", options.cwd);
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }
        if options.only_files && !entry.file_type().is_file() {
            continue;
        }

        let rel = match relative_slash_path(entry.path(), &options.cwd) {
            Some(rel) => rel,
            None => continue,
        };

        if !include_set.is_match(&rel) {
            continue;
        }
        outcome.total_candidates += 1;

        if exclude_set.is_match(&rel) {
            continue;
        }

        if options.absolute {
            outcome
                .files
                .push(entry.path().to_string_lossy().into_owned());
        } else {
            outcome.files.push(rel);
        }
    }

    Ok(outcome)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| DiscoveryError::invalid_pattern(pattern, e.to_string()))?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| DiscoveryError::invalid_pattern("<globset>", e.to_string()))
}

/// Directory-pruning set derived from exclude patterns
///
/// `**/node_modules/**` excludes a directory's contents but never matches
/// the directory path itself, so the stripped form is added for pruning.
fn build_prune_set(ignore: &[String]) -> Result<GlobSet> {
    let stripped: Vec<String> = ignore
        .iter()
        .filter_map(|pattern| pattern.strip_suffix("/**").map(|s| s.to_string()))
        .collect();
    build_globset(&stripped)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Path relative to the scan root, with forward slashes
fn relative_slash_path(path: &Path, cwd: &Path) -> Option<String> {
    let rel = path.strip_prefix(cwd).ok()?;
    let text = rel.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        Some(text.into_owned())
    } else {
        Some(text.replace(std::path::MAIN_SEPARATOR, "/"))
    }
}
