//! Version resolution against a registry
//!
//! Reduces a registry answer for `name@spec` to a single concrete version.
//! Failures never propagate: they become `ResolvedVersion` sentinels and a
//! warning on stderr.

use crate::domain::ResolvedVersion;
use crate::drift::is_valid_version;
use crate::progress::Progress;
use crate::registry::{effective_range, RegistryAdapter};
use semver::Version;
use tracing::{debug, warn};

/// Dist-tag queried for the newest published version
pub const LATEST_TAG: &str = "latest";

/// Resolves ranges and tags to concrete versions
pub struct Resolver<'a> {
    adapter: &'a dyn RegistryAdapter,
    progress: &'a Progress,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a registry adapter
    ///
    /// Warnings are written with `progress` suspended.
    pub fn new(adapter: &'a dyn RegistryAdapter, progress: &'a Progress) -> Self {
        Self { adapter, progress }
    }

    /// Resolve `spec` (a range or a dist-tag) for `name`
    pub async fn resolve(&self, name: &str, spec: &str) -> ResolvedVersion {
        let answer = match self.adapter.query(name, spec).await {
            Ok(answer) => answer,
            Err(e) => {
                self.progress
                    .suspend(|| warn!("{}@{}: registry lookup failed: {}", name, spec, e));
                return ResolvedVersion::LookupError;
            }
        };

        let resolved = select_version(spec, answer.into_versions());
        if resolved == ResolvedVersion::NoValidVersion {
            self.progress
                .suspend(|| warn!("{}@{}: no valid version found", name, spec));
        } else {
            debug!("{}@{} resolved to {}", name, spec, resolved);
        }
        resolved
    }
}

/// Pick one version out of the candidates a registry answered with
///
/// Candidates that are not strictly valid semantic versions are discarded.
/// The highest candidate satisfying `spec` wins; when `spec` is not a range
/// (a dist-tag) or nothing satisfies it, the lexically last candidate is
/// returned instead.
pub fn select_version(spec: &str, candidates: Vec<String>) -> ResolvedVersion {
    let valid: Vec<String> = candidates
        .into_iter()
        .filter(|v| is_valid_version(v))
        .collect();

    if valid.is_empty() {
        return ResolvedVersion::NoValidVersion;
    }

    if let Some(best) = max_satisfying(&valid, spec) {
        return ResolvedVersion::Version(best);
    }

    match valid.into_iter().max() {
        Some(last) => ResolvedVersion::Version(last),
        None => ResolvedVersion::NoValidVersion,
    }
}

/// Highest version in `versions` satisfying the npm range `spec`
fn max_satisfying(versions: &[String], spec: &str) -> Option<String> {
    let range = node_semver::Range::parse(effective_range(spec)).ok()?;

    let mut best: Option<(Version, &String)> = None;
    for raw in versions {
        let Ok(candidate) = node_semver::Version::parse(raw.as_str()) else {
            continue;
        };
        if !range.satisfies(&candidate) {
            continue;
        }
        let Ok(parsed) = Version::parse(raw) else {
            continue;
        };
        let better = match best {
            Some((ref current, _)) => parsed.cmp_precedence(current).is_gt(),
            None => true,
        };
        if better {
            best = Some((parsed, raw));
        }
    }

    best.map(|(_, raw)| raw.clone())
}
