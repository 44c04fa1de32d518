//! Pattern resolution and validation
//!
//! The validator checks pattern syntax before any filesystem work happens;
//! the manager resolves the effective include/exclude sets for a discovery
//! purpose, merging configuration overrides and language-derived patterns.

mod manager;
mod validator;

pub use manager::{MergeOperation, PatternManager, GLOBAL_EXCLUDES};
pub use validator::{
    IssueCode, MatchEstimate, PatternSuggestion, PatternValidationResult, PatternValidator,
    ValidationIssue,
};
