//! Three-way drift classification
//!
//! Compares the locked, installable and latest versions of a dependency.
//! All three must be strictly valid semantic versions; anything else is
//! rejected so the caller can skip the dependency.

use crate::domain::{Comparison, DiffKind, VersionColumn};
use semver::Version;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised by classification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriftError {
    /// One of the inputs is not a valid semantic version
    #[error("invalid {column} version '{value}': {message}")]
    InvalidVersion {
        column: VersionColumn,
        value: String,
        message: String,
    },
}

/// Parse a version strictly, tagging failures with the column they came from
pub fn parse_version(column: VersionColumn, value: &str) -> Result<Version, DriftError> {
    Version::parse(value).map_err(|e| DriftError::InvalidVersion {
        column,
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Returns true if `value` passes the strict semantic version check
pub fn is_valid_version(value: &str) -> bool {
    Version::parse(value).is_ok()
}

/// Classify a dependency from its three versions and declared range
pub fn classify(
    locked: &str,
    installable: &str,
    latest: &str,
    range: &str,
) -> Result<Comparison, DriftError> {
    let locked_version = parse_version(VersionColumn::Locked, locked)?;
    let installable_version = parse_version(VersionColumn::Installable, installable)?;
    let latest_version = parse_version(VersionColumn::Latest, latest)?;

    let locked = locked_version.to_string();
    let installable = installable_version.to_string();
    let latest = latest_version.to_string();

    let installable_changed = installable != locked;
    let latest_changed = locked != latest;
    let major_changed = locked_version.major != latest_version.major;

    let diff = if latest_changed {
        diff(&locked_version, &latest_version)
    } else if installable_changed {
        diff(&locked_version, &installable_version)
    } else {
        None
    };

    Ok(Comparison {
        locked,
        installable,
        latest,
        range: range.to_string(),
        installable_changed,
        latest_changed,
        major_changed,
        diff,
    })
}

/// Semantic distance between two versions, in npm `semver.diff` terms
///
/// Versions with equal precedence (differing only in build metadata) have
/// no distance.
pub fn diff(a: &Version, b: &Version) -> Option<DiffKind> {
    let ordering = a.cmp_precedence(b);
    if ordering == Ordering::Equal {
        return None;
    }

    let (high, low) = if ordering == Ordering::Greater {
        (a, b)
    } else {
        (b, a)
    };
    let high_has_pre = !high.pre.is_empty();
    let low_has_pre = !low.pre.is_empty();

    // Releasing a prerelease finalizes the component it was leading up to
    if low_has_pre && !high_has_pre {
        if low.patch == 0 && low.minor == 0 {
            return Some(DiffKind::Major);
        }
        if (low.major, low.minor, low.patch) == (high.major, high.minor, high.patch) {
            if low.minor != 0 && low.patch == 0 {
                return Some(DiffKind::Minor);
            }
            return Some(DiffKind::Patch);
        }
    }

    let kind = if a.major != b.major {
        pick(high_has_pre, DiffKind::Premajor, DiffKind::Major)
    } else if a.minor != b.minor {
        pick(high_has_pre, DiffKind::Preminor, DiffKind::Minor)
    } else if a.patch != b.patch {
        pick(high_has_pre, DiffKind::Prepatch, DiffKind::Patch)
    } else {
        DiffKind::Prerelease
    };
    Some(kind)
}

fn pick(prerelease: bool, pre: DiffKind, release: DiffKind) -> DiffKind {
    if prerelease {
        pre
    } else {
        release
    }
}
