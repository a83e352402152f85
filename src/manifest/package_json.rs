//! package.json reader
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//!
//! Sections are merged in that order and a name keeps the section it was
//! first seen in.

use crate::domain::{Dependency, DependencyKind};
use crate::error::InputError;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Declared dependencies of a package.json, in merged insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Parse package.json content
    pub fn parse(content: &str) -> Result<Self, InputError> {
        Self::parse_with_path(content, Path::new(super::MANIFEST_FILENAME))
    }

    /// Read and parse a package.json file
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InputError::read_error(path, e))?;
        Self::parse_with_path(&content, path)
    }

    fn parse_with_path(content: &str, path: &Path) -> Result<Self, InputError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| InputError::json_parse_error(PathBuf::from(path), e.to_string()))?;

        if !json.is_object() {
            return Err(InputError::json_parse_error(
                path,
                "expected a JSON object at the top level",
            ));
        }

        let mut seen = HashSet::new();
        let mut dependencies = Vec::new();

        for kind in DependencyKind::all() {
            if let Some(section) = json.get(kind.manifest_key()).and_then(|v| v.as_object()) {
                collect_section(section, *kind, &mut seen, &mut dependencies);
            }
        }

        Ok(Self { dependencies })
    }

    /// Returns the merged dependency list
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Number of merged dependencies
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

fn collect_section(
    section: &Map<String, Value>,
    kind: DependencyKind,
    seen: &mut HashSet<String>,
    output: &mut Vec<Dependency>,
) {
    for (name, value) in section {
        let Some(range) = value.as_str() else {
            warn!(
                "ignoring {} in {}: version range is not a string",
                name,
                kind.manifest_key()
            );
            continue;
        };
        if seen.insert(name.clone()) {
            output.push(Dependency::new(name.clone(), range, kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_sections() {
        let content = r#"{
            "dependencies": { "react": "^18.2.0" },
            "devDependencies": { "typescript": "~5.0.0" },
            "peerDependencies": { "react-dom": ">=18" }
        }"#;

        let manifest = Manifest::parse(content).unwrap();
        assert_eq!(manifest.len(), 3);
        assert_eq!(
            manifest.dependencies(),
            &[
                Dependency::runtime("react", "^18.2.0"),
                Dependency::development("typescript", "~5.0.0"),
                Dependency::peer("react-dom", ">=18"),
            ]
        );
    }

    #[test]
    fn test_parse_preserves_insertion_order() {
        let content = r#"{
            "dependencies": { "zod": "^3.0.0", "axios": "^1.0.0", "lodash": "^4.0.0" }
        }"#;

        let manifest = Manifest::parse(content).unwrap();
        let names: Vec<_> = manifest.dependencies().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zod", "axios", "lodash"]);
    }

    #[test]
    fn test_first_section_wins_for_duplicates() {
        let content = r#"{
            "dependencies": { "react": "^18.0.0" },
            "devDependencies": { "react": "^17.0.0" },
            "peerDependencies": { "react": "*" }
        }"#;

        let manifest = Manifest::parse(content).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.dependencies()[0].kind, DependencyKind::Runtime);
        assert_eq!(manifest.dependencies()[0].range, "^18.0.0");
    }

    #[test]
    fn test_non_string_ranges_are_ignored() {
        let content = r#"{
            "dependencies": { "weird": { "version": "1.0.0" }, "ok": "1.0.0" }
        }"#;

        let manifest = Manifest::parse(content).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.dependencies()[0].name, "ok");
    }

    #[test]
    fn test_missing_sections() {
        let manifest = Manifest::parse(r#"{ "name": "empty" }"#).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = Manifest::parse("{ not json").unwrap_err();
        assert!(matches!(err, InputError::JsonParseError { .. }));
    }

    #[test]
    fn test_non_object_root() {
        let err = Manifest::parse("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }
}
