//! Three-way comparison result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic distance between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Major version change (breaking)
    Major,
    /// Major change towards a prerelease
    Premajor,
    /// Minor version change (features)
    Minor,
    /// Minor change towards a prerelease
    Preminor,
    /// Patch version change (fixes)
    Patch,
    /// Patch change towards a prerelease
    Prepatch,
    /// Only the prerelease tag differs
    Prerelease,
}

impl DiffKind {
    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            DiffKind::Major => "major",
            DiffKind::Premajor => "premajor",
            DiffKind::Minor => "minor",
            DiffKind::Preminor => "preminor",
            DiffKind::Patch => "patch",
            DiffKind::Prepatch => "prepatch",
            DiffKind::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification of one dependency's locked, installable and latest versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Version pinned in the lockfile
    pub locked: String,
    /// Version a fresh install of the range would pick
    pub installable: String,
    /// Version published under the `latest` tag
    pub latest: String,
    /// Range declared in package.json
    pub range: String,
    /// `installable` differs from `locked`
    pub installable_changed: bool,
    /// `latest` differs from `locked`
    pub latest_changed: bool,
    /// Major component of `latest` differs from `locked`
    pub major_changed: bool,
    /// Distance to the version that drifted, if any
    pub diff: Option<DiffKind>,
}

impl Comparison {
    /// Returns true if either installable or latest drifted from the lockfile
    pub fn has_drift(&self) -> bool {
        self.installable_changed || self.latest_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(installable_changed: bool, latest_changed: bool) -> Comparison {
        Comparison {
            locked: "1.0.0".to_string(),
            installable: "1.0.0".to_string(),
            latest: "1.0.0".to_string(),
            range: "^1.0.0".to_string(),
            installable_changed,
            latest_changed,
            major_changed: false,
            diff: None,
        }
    }

    #[test]
    fn test_has_drift() {
        assert!(!comparison(false, false).has_drift());
        assert!(comparison(true, false).has_drift());
        assert!(comparison(false, true).has_drift());
    }

    #[test]
    fn test_diff_kind_labels() {
        assert_eq!(DiffKind::Major.to_string(), "major");
        assert_eq!(DiffKind::Prepatch.label(), "prepatch");
        let json = serde_json::to_string(&DiffKind::Preminor).unwrap();
        assert_eq!(json, "\"preminor\"");
    }
}
