//! Error types for the file discovery engine
//!
//! All public entry points return these as values; nothing in the engine
//! panics or throws past the service boundary. Scan-engine failures are
//! re-expressed as `InvalidPattern` with a diagnostic message.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Typed errors surfaced by the discovery service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    /// A glob pattern failed syntactic validation
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        position: Option<usize>,
    },

    /// The requested base directory does not exist (or is not a directory)
    #[error("directory not found: {path}: {message}")]
    DirectoryNotFound { path: PathBuf, message: String },

    /// The requested base directory exists but cannot be read
    #[error("permission denied: {path}: {message}")]
    PermissionDenied { path: PathBuf, message: String },
}

impl DiscoveryError {
    /// Shorthand for a pattern error without position information
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
            position: None,
        }
    }

    pub fn directory_not_found(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DirectoryNotFound {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn permission_denied(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            path: path.into(),
            message: message.into(),
        }
    }
}
