//! Mock implementations for testing

mod scanner;

pub use scanner::{MockScanner, RecordedScan};
