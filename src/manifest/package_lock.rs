//! package-lock.json reader
//!
//! Supports both lockfile generations:
//! - v2/v3: `packages` keyed by install path (`node_modules/<name>`)
//! - v1: flat `dependencies` keyed by package name

use crate::domain::ResolvedVersion;
use crate::error::InputError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Install path prefix of top-level packages in the `packages` map
const NODE_MODULES_PREFIX: &str = "node_modules/";

/// A single lockfile entry; everything but the version is ignored
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LockEntry {
    /// Pinned version
    #[serde(default)]
    pub version: Option<String>,
}

/// Parsed package-lock.json
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Lockfile {
    /// Current shape, keyed by install path
    #[serde(default)]
    packages: HashMap<String, LockEntry>,
    /// Legacy shape, keyed by package name
    #[serde(default)]
    dependencies: HashMap<String, LockEntry>,
}

impl Lockfile {
    /// Parse package-lock.json content
    pub fn parse(content: &str) -> Result<Self, InputError> {
        Self::parse_with_path(content, Path::new(super::LOCKFILE_FILENAME))
    }

    /// Read and parse a package-lock.json file
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InputError::read_error(path, e))?;
        Self::parse_with_path(&content, path)
    }

    fn parse_with_path(content: &str, path: &Path) -> Result<Self, InputError> {
        serde_json::from_str(content)
            .map_err(|e| InputError::json_parse_error(PathBuf::from(path), e.to_string()))
    }

    /// Version the reproducible install would place for `name`
    ///
    /// The path-keyed shape is consulted first, then the legacy flat shape.
    /// Absence from both is not an error.
    pub fn installed_version(&self, name: &str) -> ResolvedVersion {
        let current = self
            .packages
            .get(&format!("{}{}", NODE_MODULES_PREFIX, name))
            .and_then(|e| e.version.as_deref());
        if let Some(version) = current {
            return ResolvedVersion::version(version);
        }

        let legacy = self
            .dependencies
            .get(name)
            .and_then(|e| e.version.as_deref());
        if let Some(version) = legacy {
            return ResolvedVersion::version(version);
        }

        ResolvedVersion::NotInstalled
    }
}
