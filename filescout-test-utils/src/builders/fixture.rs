//! Temporary project trees for discovery tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with project files
///
/// The directory and everything under it is removed on drop. Paths are
/// given with forward slashes relative to the fixture root; parent
/// directories are created as needed.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create fixture directory"),
        }
    }

    /// Absolute path of the fixture root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Fixture root as a string, for `DiscoveryRequest::new`
    pub fn root_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Write a file with placeholder content
    pub fn file(self, path: &str) -> Self {
        self.file_with_content(path, b"fixture")
    }

    /// Write a file with the given content
    pub fn file_with_content(self, path: &str, content: &[u8]) -> Self {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture parents");
        }
        fs::write(&full, content).expect("failed to write fixture file");
        self
    }

    /// Create an empty directory
    pub fn dir(self, path: &str) -> Self {
        fs::create_dir_all(self.resolve(path)).expect("failed to create fixture directory");
        self
    }

    /// A small TypeScript project: sources, a test file and node_modules
    pub fn typescript_project() -> Self {
        Self::new()
            .file("src/index.ts")
            .file("src/utils/helpers.ts")
            .file("src/index.test.ts")
            .file("node_modules/pkg/index.js")
            .file("package.json")
    }

    /// A small Python project with pytest-style test files
    pub fn python_project() -> Self {
        Self::new()
            .file("src/main.py")
            .file("tests/test_main.py")
            .file("tests/conftest.py")
            .file("pyproject.toml")
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.dir.path().join(path)
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
