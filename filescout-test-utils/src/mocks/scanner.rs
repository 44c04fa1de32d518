//! Mock scanner implementation for testing

use async_trait::async_trait;
use std::sync::Mutex;

use filescout_core::error::{DiscoveryError, Result};
use filescout_core::{FileScanner, ScanOptions, ScanOutcome};

/// Scripted scanner that returns canned outcomes and records calls
///
/// Responses are consumed in order; once the queue is empty, every scan
/// returns an empty outcome. All state sits behind a mutex so a single
/// mock can be shared across concurrent requests.
pub struct MockScanner {
    responses: Mutex<Vec<Result<ScanOutcome>>>,
    calls: Mutex<Vec<RecordedScan>>,
}

/// One recorded `scan` invocation
#[derive(Debug, Clone)]
pub struct RecordedScan {
    pub include: Vec<String>,
    pub options: ScanOptions,
}

impl MockScanner {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful outcome listing the given files
    ///
    /// The candidate count is set to the file count; use `push_outcome`
    /// when the two must differ.
    pub fn push_files(&self, files: &[&str]) {
        let files: Vec<String> = files.iter().map(|s| s.to_string()).collect();
        let total_candidates = files.len();
        self.push_outcome(ScanOutcome {
            files,
            total_candidates,
        });
    }

    /// Queue a successful outcome verbatim
    pub fn push_outcome(&self, outcome: ScanOutcome) {
        self.responses.lock().unwrap().push(Ok(outcome));
    }

    /// Queue a failure
    pub fn push_error(&self, error: DiscoveryError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    /// Number of times `scan` has been invoked
    pub fn scan_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded invocations, oldest first
    pub fn calls(&self) -> Vec<RecordedScan> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent invocation, if any
    pub fn last_call(&self) -> Option<RecordedScan> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileScanner for MockScanner {
    async fn scan(&self, include: &[String], options: &ScanOptions) -> Result<ScanOutcome> {
        self.calls.lock().unwrap().push(RecordedScan {
            include: include.to_vec(),
            options: options.clone(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ScanOutcome::default())
        } else {
            responses.remove(0)
        }
    }
}
