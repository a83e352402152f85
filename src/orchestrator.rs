//! Drift check orchestrator
//!
//! This module provides:
//! - Workflow coordination: load → resolve → classify
//! - Per-dependency isolation: a dependency that cannot be resolved or
//!   classified is skipped with a warning and the run continues
//!
//! Dependencies are visited one at a time in manifest order.

use crate::config::Settings;
use crate::domain::{
    present, ClassifiedDependency, Comparison, Dependency, Report, ResolvedVersion, SkipReason,
    SkippedDependency, VersionColumn,
};
use crate::drift::classify;
use crate::error::{AppError, RegistryError};
use crate::manifest::{load_inputs, ProjectInputs};
use crate::progress::Progress;
use crate::registry::{create_adapter, RegistryAdapter};
use crate::resolver::{Resolver, LATEST_TAG};
use std::path::Path;
use tracing::{debug, warn};

/// Orchestrator for a drift check
pub struct Orchestrator {
    /// Registry queried for installable and latest versions
    adapter: Box<dyn RegistryAdapter>,
    /// Whether to draw progress on stderr
    show_progress: bool,
}

/// Result of running the orchestrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorResult {
    /// Dependencies with all three versions resolved, in manifest order
    pub classified: Vec<ClassifiedDependency>,
    /// Dependencies left out, with the reason
    pub skipped: Vec<SkippedDependency>,
}

impl OrchestratorResult {
    /// Rows to display for the given show-all setting
    pub fn report(&self, show_all: bool) -> Report {
        present(&self.classified, show_all)
    }
}

impl Orchestrator {
    /// Create an orchestrator using the adapter selected by the settings
    pub fn new(settings: &Settings) -> Result<Self, RegistryError> {
        Ok(Self::with_adapter(create_adapter(settings)?).with_progress(settings.show_progress))
    }

    /// Create an orchestrator over a specific adapter (for testing)
    pub fn with_adapter(adapter: Box<dyn RegistryAdapter>) -> Self {
        Self {
            adapter,
            show_progress: false,
        }
    }

    /// Enable or disable progress display
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load the project in `dir` and check it
    ///
    /// Missing or unparseable inputs fail the whole run before any registry
    /// query is made.
    pub async fn run_in_dir(&self, dir: &Path) -> Result<OrchestratorResult, AppError> {
        let mut progress = Progress::new(self.show_progress);
        progress.loading("Reading package.json and package-lock.json...");
        let inputs = load_inputs(dir);
        progress.clear();

        Ok(self.run(&inputs?).await)
    }

    /// Check every declared dependency of already loaded inputs
    pub async fn run(&self, inputs: &ProjectInputs) -> OrchestratorResult {
        let dependencies = inputs.manifest.dependencies();
        let mut result = OrchestratorResult::default();

        let mut progress = Progress::new(self.show_progress);
        progress.counting(dependencies.len() as u64, "Checking dependencies");

        {
            let resolver = Resolver::new(self.adapter.as_ref(), &progress);
            for dependency in dependencies {
                progress.current(&dependency.name);

                match self.check(&resolver, inputs, dependency).await {
                    Ok(comparison) => {
                        debug!("{} classified", dependency);
                        result
                            .classified
                            .push(ClassifiedDependency::new(dependency.clone(), comparison));
                    }
                    Err(reason) => {
                        progress.suspend(|| warn!("skipping {}: {}", dependency.name, reason));
                        result
                            .skipped
                            .push(SkippedDependency::new(dependency.clone(), reason));
                    }
                }

                progress.advance();
            }
        }

        progress.clear();
        result
    }

    /// Resolve and classify one dependency
    ///
    /// Stops at the first column that does not resolve to a version.
    async fn check(
        &self,
        resolver: &Resolver<'_>,
        inputs: &ProjectInputs,
        dependency: &Dependency,
    ) -> Result<Comparison, SkipReason> {
        let locked = require(
            VersionColumn::Locked,
            inputs.lockfile.installed_version(&dependency.name),
        )?;

        let installable = require(
            VersionColumn::Installable,
            resolver.resolve(&dependency.name, &dependency.range).await,
        )?;

        let latest = require(
            VersionColumn::Latest,
            resolver.resolve(&dependency.name, LATEST_TAG).await,
        )?;

        classify(&locked, &installable, &latest, &dependency.range).map_err(|e| {
            SkipReason::Invalid {
                message: e.to_string(),
            }
        })
    }
}

fn require(column: VersionColumn, value: ResolvedVersion) -> Result<String, SkipReason> {
    match value {
        ResolvedVersion::Version(version) => Ok(version),
        other => Err(SkipReason::Unresolved {
            column,
            value: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiffKind;
    use crate::manifest::{Lockfile, Manifest};
    use crate::registry::RegistryAnswer;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Registry double answering from a fixed table keyed by `name@spec`
    struct CannedRegistry {
        answers: HashMap<String, RegistryAnswer>,
    }

    impl CannedRegistry {
        fn new(entries: &[(&str, &str)]) -> Self {
            let answers = entries
                .iter()
                .map(|(query, version)| {
                    (query.to_string(), RegistryAnswer::Single(version.to_string()))
                })
                .collect();
            Self { answers }
        }
    }

    #[async_trait]
    impl RegistryAdapter for CannedRegistry {
        fn registry_name(&self) -> &'static str {
            "canned"
        }

        async fn query(&self, package: &str, spec: &str) -> Result<RegistryAnswer, RegistryError> {
            self.answers
                .get(&format!("{}@{}", package, spec))
                .cloned()
                .ok_or_else(|| RegistryError::package_not_found(package, "canned"))
        }
    }

    fn inputs(manifest: &str, lockfile: &str) -> ProjectInputs {
        ProjectInputs {
            manifest: Manifest::parse(manifest).unwrap(),
            lockfile: Lockfile::parse(lockfile).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_no_drift() {
        let inputs = inputs(
            r#"{"dependencies": {"left-pad": "1.0.0"}}"#,
            r#"{"packages": {"node_modules/left-pad": {"version": "1.0.0"}}}"#,
        );
        let registry = CannedRegistry::new(&[("left-pad@1.0.0", "1.0.0"), ("left-pad@latest", "1.0.0")]);

        let result = Orchestrator::with_adapter(Box::new(registry)).run(&inputs).await;

        assert_eq!(result.classified.len(), 1);
        assert!(result.skipped.is_empty());
        assert!(result.report(false).has_no_differences());
        assert_eq!(result.report(true).rows.len(), 1);
    }

    #[tokio::test]
    async fn test_major_drift() {
        let inputs = inputs(
            r#"{"dependencies": {"foo": "^1.0.0"}}"#,
            r#"{"packages": {"node_modules/foo": {"version": "1.0.0"}}}"#,
        );
        let registry = CannedRegistry::new(&[("foo@^1.0.0", "1.0.0"), ("foo@latest", "2.0.0")]);

        let result = Orchestrator::with_adapter(Box::new(registry)).run(&inputs).await;
        let report = result.report(false);

        assert_eq!(report.rows.len(), 1);
        let comparison = &report.rows[0].comparison;
        assert!(!comparison.installable_changed);
        assert!(comparison.latest_changed);
        assert!(comparison.major_changed);
        assert_eq!(comparison.diff, Some(DiffKind::Major));
    }

    #[tokio::test]
    async fn test_not_installed_is_skipped_without_queries() {
        let inputs = inputs(r#"{"dependencies": {"ghost": "^1.0.0"}}"#, "{}");
        let registry = CannedRegistry::new(&[]);

        let result = Orchestrator::with_adapter(Box::new(registry)).run(&inputs).await;

        assert!(result.classified.is_empty());
        assert_eq!(
            result.skipped[0].reason,
            SkipReason::Unresolved {
                column: VersionColumn::Locked,
                value: ResolvedVersion::NotInstalled,
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_error_is_skipped() {
        let inputs = inputs(
            r#"{"dependencies": {"foo": "^1.0.0", "bar": "^2.0.0"}}"#,
            r#"{"packages": {
                "node_modules/foo": {"version": "1.0.0"},
                "node_modules/bar": {"version": "2.0.0"}
            }}"#,
        );
        let registry = CannedRegistry::new(&[("bar@^2.0.0", "2.1.0"), ("bar@latest", "2.1.0")]);

        let result = Orchestrator::with_adapter(Box::new(registry)).run(&inputs).await;

        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].dependency.name, "foo");
        assert_eq!(
            result.skipped[0].reason,
            SkipReason::Unresolved {
                column: VersionColumn::Installable,
                value: ResolvedVersion::LookupError,
            }
        );
        assert_eq!(result.classified.len(), 1);
        assert_eq!(result.classified[0].dependency.name, "bar");
        assert!(result.classified[0].comparison.installable_changed);
    }

    #[tokio::test]
    async fn test_invalid_locked_version_is_skipped() {
        let inputs = inputs(
            r#"{"dependencies": {"local": "file:../local"}}"#,
            r#"{"packages": {"node_modules/local": {"version": "file:../local"}}}"#,
        );
        let registry = CannedRegistry::new(&[
            ("local@file:../local", "1.0.0"),
            ("local@latest", "1.0.0"),
        ]);

        let result = Orchestrator::with_adapter(Box::new(registry)).run(&inputs).await;

        assert!(result.classified.is_empty());
        assert_eq!(result.skipped.len(), 1);
        assert!(matches!(result.skipped[0].reason, SkipReason::Invalid { .. }));
        assert!(result.skipped[0].reason.to_string().contains("invalid locked version"));
    }

    #[tokio::test]
    async fn test_manifest_order_is_kept() {
        let inputs = inputs(
            r#"{
                "dependencies": {"b": "1.0.0"},
                "devDependencies": {"a": "1.0.0"}
            }"#,
            r#"{"dependencies": {"a": {"version": "1.0.0"}, "b": {"version": "1.0.0"}}}"#,
        );
        let registry = CannedRegistry::new(&[
            ("a@1.0.0", "1.0.0"),
            ("a@latest", "1.1.0"),
            ("b@1.0.0", "1.0.0"),
            ("b@latest", "1.0.1"),
        ]);

        let result = Orchestrator::with_adapter(Box::new(registry)).run(&inputs).await;
        let names: Vec<_> = result
            .classified
            .iter()
            .map(|c| c.dependency.name.as_str())
            .collect();

        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_run_in_dir_missing_lockfile() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        let orchestrator = Orchestrator::with_adapter(Box::new(CannedRegistry::new(&[])));
        let err = orchestrator.run_in_dir(dir.path()).await.unwrap_err();

        assert!(matches!(err, AppError::Input(_)));
    }
}
