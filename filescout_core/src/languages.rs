//! Supported language tags and their extension sets
//!
//! Languages drive two things: the post-scan language filter (a file survives
//! only if its extension belongs to one of the requested languages) and
//! language-derived exclude patterns (bytecode caches, minified output).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported programming language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
}

impl Language {
    /// File extensions (lowercase, without the dot) belonging to this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::Python => &["py"],
        }
    }

    /// Exclude patterns implied by this language
    ///
    /// Python contributes bytecode-cache directories, JavaScript contributes
    /// minified and vendored output. TypeScript has no excludes of its own;
    /// declaration files are a per-type concern, not a language one.
    pub fn exclude_patterns(&self) -> &'static [&'static str] {
        match self {
            Language::TypeScript => &[],
            Language::JavaScript => &["**/*.min.js", "**/vendor/**"],
            Language::Python => &["**/__pycache__/**", "**/*.pyc", "**/.pytest_cache/**"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Union of extension sets for a group of languages, deduplicated
pub fn extension_union(languages: &[Language]) -> Vec<&'static str> {
    let mut extensions: Vec<&'static str> = languages
        .iter()
        .flat_map(|lang| lang.extensions().iter().copied())
        .collect();
    extensions.sort_unstable();
    extensions.dedup();
    extensions
}

/// Check whether a path's extension belongs to any of the given languages
pub fn matches_languages(path: &str, languages: &[Language]) -> bool {
    let extension = match path.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return false,
    };

    languages
        .iter()
        .any(|lang| lang.extensions().contains(&extension.as_str()))
}
