//! Syntactic validation of glob patterns
//!
//! Validation never touches the filesystem: it catches structurally broken
//! patterns (unbalanced delimiters, empty strings) as errors and flags risky
//! but legal patterns (backslashes, maximally broad globs) as warnings with
//! concrete rewrite suggestions.

use std::collections::HashMap;

/// Machine-readable issue codes attached to errors and warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    EmptyPattern,
    UnmatchedBrackets,
    UnmatchedBraces,
    WindowsPathSeparator,
    OverlyBroad,
    RedundantPattern,
}

/// A single validation finding for one pattern
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub pattern: String,
    pub code: IssueCode,
    pub message: String,
    pub position: Option<usize>,
}

/// A suggested rewrite of a risky or suboptimal pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSuggestion {
    pub original: String,
    pub suggested: String,
    pub reason: String,
}

/// Outcome of validating a batch of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<PatternSuggestion>,
}

/// Coarse estimate of how many files a pattern is likely to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEstimate {
    Low,
    Medium,
    High,
}

/// Stateless glob pattern validator
pub struct PatternValidator;

impl PatternValidator {
    /// Validate a batch of patterns, collecting errors, warnings and
    /// suggestions
    pub fn validate(patterns: &[String]) -> PatternValidationResult {
        let mut result = PatternValidationResult {
            valid: true,
            ..Default::default()
        };

        for pattern in patterns {
            Self::validate_one(pattern, &mut result);
        }

        result.valid = result.errors.is_empty();
        result
    }

    fn validate_one(pattern: &str, result: &mut PatternValidationResult) {
        if pattern.trim().is_empty() {
            result.errors.push(ValidationIssue {
                pattern: pattern.to_string(),
                code: IssueCode::EmptyPattern,
                message: "pattern is empty or whitespace-only".to_string(),
                position: None,
            });
            // Nothing further to check on an empty pattern
            return;
        }

        if let Some(position) = unmatched_delimiter(pattern, '[', ']') {
            result.errors.push(ValidationIssue {
                pattern: pattern.to_string(),
                code: IssueCode::UnmatchedBrackets,
                message: format!("unmatched bracket at position {position}"),
                position: Some(position),
            });
        }

        if let Some(position) = unmatched_delimiter(pattern, '{', '}') {
            result.errors.push(ValidationIssue {
                pattern: pattern.to_string(),
                code: IssueCode::UnmatchedBraces,
                message: format!("unmatched brace at position {position}"),
                position: Some(position),
            });
        }

        if pattern.contains('\\') {
            result.warnings.push(ValidationIssue {
                pattern: pattern.to_string(),
                code: IssueCode::WindowsPathSeparator,
                message: "pattern contains backslashes; globs use forward slashes".to_string(),
                position: pattern.find('\\'),
            });
            result.suggestions.push(PatternSuggestion {
                original: pattern.to_string(),
                suggested: pattern.replace('\\', "/"),
                reason: "use forward slashes for cross-platform matching".to_string(),
            });
        }

        if pattern == "**" || pattern == "**/*" {
            result.warnings.push(ValidationIssue {
                pattern: pattern.to_string(),
                code: IssueCode::OverlyBroad,
                message: "pattern matches every file in the tree".to_string(),
                position: None,
            });
            result.suggestions.push(PatternSuggestion {
                original: pattern.to_string(),
                suggested: "**/*.{js,ts,jsx,tsx}".to_string(),
                reason: "constrain the match with an extension group".to_string(),
            });
        }

        if pattern.contains("**/**") {
            result.warnings.push(ValidationIssue {
                pattern: pattern.to_string(),
                code: IssueCode::RedundantPattern,
                message: "consecutive recursive wildcards are redundant".to_string(),
                position: pattern.find("**/**"),
            });
            result.suggestions.push(PatternSuggestion {
                original: pattern.to_string(),
                suggested: pattern.replace("**/**", "**"),
                reason: "a single '**' already matches any depth".to_string(),
            });
        }
    }

    /// Estimate how broadly a single pattern matches
    pub fn estimate_match_count(pattern: &str) -> MatchEstimate {
        if pattern == "**" || pattern == "**/*" {
            return MatchEstimate::High;
        }

        if pattern != "*.*" && concrete_extension(pattern).is_some() {
            return MatchEstimate::Low;
        }

        // A directory constraint that is not rooted at '**' also narrows the
        // search space considerably.
        if pattern.contains('/') && !pattern.starts_with("**") {
            return MatchEstimate::Low;
        }

        MatchEstimate::Medium
    }

    /// Propose brace-combined replacements for patterns that share a base
    /// path and differ only by a trailing extension
    ///
    /// A suggestion is only emitted for groups with at least two members.
    pub fn suggest_optimizations(patterns: &[String]) -> Vec<PatternSuggestion> {
        let mut groups: HashMap<String, Vec<(String, String)>> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for pattern in patterns {
            if let Some(extension) = concrete_extension(pattern) {
                let base = pattern[..pattern.len() - extension.len() - 1].to_string();
                if !groups.contains_key(&base) {
                    order.push(base.clone());
                }
                groups
                    .entry(base)
                    .or_default()
                    .push((pattern.clone(), extension));
            }
        }

        order
            .into_iter()
            .filter_map(|base| {
                let members = groups.remove(&base)?;
                if members.len() < 2 {
                    return None;
                }

                let originals: Vec<String> = members.iter().map(|(p, _)| p.clone()).collect();
                let extensions: Vec<String> = members.into_iter().map(|(_, e)| e).collect();

                Some(PatternSuggestion {
                    original: originals.join(", "),
                    suggested: format!("{base}.{{{}}}", extensions.join(",")),
                    reason: "combine patterns sharing a base path into one brace group"
                        .to_string(),
                })
            })
            .collect()
    }
}

/// Position of the first unmatched delimiter, if any
///
/// Returns the index of the first orphan closer, or the first unmatched
/// opener when every closer pairs up but openers remain.
fn unmatched_delimiter(pattern: &str, open: char, close: char) -> Option<usize> {
    let mut openers: Vec<usize> = Vec::new();

    for (index, ch) in pattern.char_indices() {
        if ch == open {
            openers.push(index);
        } else if ch == close && openers.pop().is_none() {
            return Some(index);
        }
    }

    openers.first().copied()
}

/// The trailing literal extension of a pattern, if it has one
///
/// An extension counts as concrete when it is non-empty and free of
/// wildcards, braces and separators (`*.ts` yes, `*.{ts,js}` and `*.*` no).
fn concrete_extension(pattern: &str) -> Option<String> {
    let (_, extension) = pattern.rsplit_once('.')?;
    if extension.is_empty()
        || extension
            .chars()
            .any(|c| matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '/'))
    {
        return None;
    }
    Some(extension.to_string())
}
