//! Test utilities for the FileScout discovery engine
//!
//! This crate provides mock implementations and fixture builders for
//! testing discovery functionality.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::ProjectFixture;
pub use mocks::{MockScanner, RecordedScan};
