//! Dependency declaration structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Manifest section a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// `dependencies`
    Runtime,
    /// `devDependencies`
    Development,
    /// `peerDependencies`
    Peer,
}

impl DependencyKind {
    /// Returns the package.json key for this kind
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Development => "devDependencies",
            DependencyKind::Peer => "peerDependencies",
        }
    }

    /// Returns the short label used in the report
    pub fn label(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "prod",
            DependencyKind::Development => "dev",
            DependencyKind::Peer => "peer",
        }
    }

    /// Returns all kinds in manifest precedence order
    pub fn all() -> &'static [DependencyKind] {
        &[
            DependencyKind::Runtime,
            DependencyKind::Development,
            DependencyKind::Peer,
        ]
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A dependency declared in package.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Version range as written in the manifest
    pub range: String,
    /// Section the dependency was declared in
    pub kind: DependencyKind,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(name: impl Into<String>, range: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
            kind,
        }
    }

    /// Creates a new runtime dependency
    pub fn runtime(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(name, range, DependencyKind::Runtime)
    }

    /// Creates a new development dependency
    pub fn development(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(name, range, DependencyKind::Development)
    }

    /// Creates a new peer dependency
    pub fn peer(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self::new(name, range, DependencyKind::Peer)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.range, self.kind)
    }
}
