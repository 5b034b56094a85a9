//! Explicit project-root handle.
//!
//! The root is a value passed into builders and overlays, never ambient
//! process state. Every relative path in a descriptor resolves against it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Absolute project root against which descriptor paths resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Create a root from an absolute, non-empty path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRoot);
        }
        if !path.is_absolute() {
            return Err(ConfigError::RootNotAbsolute { path });
        }
        Ok(Self { path })
    }

    /// Derive the root from the current working directory.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::new(cwd)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a project-relative path. Platform join semantics: an absolute
    /// argument replaces the root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_root() {
        let err = ProjectRoot::new("relative/dir").unwrap_err();
        assert!(matches!(err, ConfigError::RootNotAbsolute { .. }));
    }

    #[test]
    fn rejects_empty_root() {
        let err = ProjectRoot::new("").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRoot));
    }

    #[test]
    fn resolves_relative_paths_against_root() {
        let root = ProjectRoot::new("/proj").unwrap();
        assert_eq!(root.resolve("src/index.js"), PathBuf::from("/proj/src/index.js"));
    }

    #[test]
    fn from_env_matches_current_dir() {
        let root = ProjectRoot::from_env().unwrap();
        assert_eq!(root.path(), std::env::current_dir().unwrap().as_path());
    }
}
