//! Resolved version values and their failure sentinels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of resolving a dependency to a concrete version
///
/// Resolution never raises; every failure collapses into one of the
/// sentinel variants and the caller decides whether to skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "version", rename_all = "snake_case")]
pub enum ResolvedVersion {
    /// A strictly valid semantic version
    Version(String),
    /// The dependency has no range in package.json
    ///
    /// A run only visits dependencies declared in the manifest, so the
    /// orchestrator never yields this; other callers of the resolver may.
    NotInManifest,
    /// The registry query failed
    LookupError,
    /// The registry answered, but nothing in the answer was a valid version
    NoValidVersion,
    /// The lockfile does not pin the dependency
    NotInstalled,
}

impl ResolvedVersion {
    /// Wraps a version string, returning a sentinel-free value
    pub fn version(version: impl Into<String>) -> Self {
        ResolvedVersion::Version(version.into())
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedVersion::Version(v) => write!(f, "{}", v),
            ResolvedVersion::NotInManifest => write!(f, "not found in package.json"),
            ResolvedVersion::LookupError => write!(f, "registry lookup error"),
            ResolvedVersion::NoValidVersion => write!(f, "no valid version found"),
            ResolvedVersion::NotInstalled => write!(f, "not installed"),
        }
    }
}
