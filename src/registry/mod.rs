//! Registry adapters for answering version queries
//!
//! This module provides:
//! - HTTP client shared foundation
//! - npm Registry adapter (HTTP packument lookups)
//! - npm CLI adapter (`npm view`, honours the project's npm configuration)

mod client;
mod npm;
mod npm_cli;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use npm::{NpmAdapter, DEFAULT_REGISTRY_URL};
pub use npm_cli::NpmCliAdapter;

use crate::config::Settings;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Answer to a `name@spec` query
///
/// A spec resolving to exactly one version yields `Single`; anything else,
/// including no match at all, yields `Many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryAnswer {
    Single(String),
    Many(Vec<String>),
}

impl RegistryAnswer {
    /// Build an answer from a list of versions
    pub fn from_versions(mut versions: Vec<String>) -> Self {
        if versions.len() == 1 {
            RegistryAnswer::Single(versions.remove(0))
        } else {
            RegistryAnswer::Many(versions)
        }
    }

    /// Normalize to a list of candidate versions
    pub fn into_versions(self) -> Vec<String> {
        match self {
            RegistryAnswer::Single(v) => vec![v],
            RegistryAnswer::Many(vs) => vs,
        }
    }
}

/// Range npm installs from when a dependency declares an empty spec
pub const ANY_RANGE: &str = "*";

/// Range to match versions against for a declared spec
///
/// npm reads a blank spec (`"foo": ""`) as `*`.
pub fn effective_range(spec: &str) -> &str {
    if spec.trim().is_empty() {
        ANY_RANGE
    } else {
        spec
    }
}

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Ask which published versions `spec` (a range or a dist-tag) designates
    async fn query(&self, package: &str, spec: &str) -> Result<RegistryAnswer, RegistryError>;
}

/// Create the registry adapter selected by the settings
pub fn create_adapter(settings: &Settings) -> Result<Box<dyn RegistryAdapter>, RegistryError> {
    if settings.use_npm_cli {
        return Ok(Box::new(NpmCliAdapter::new(&settings.dir, settings.timeout)));
    }

    let client = HttpClient::with_timeout(settings.timeout)?;
    Ok(Box::new(NpmAdapter::with_base_url(
        client,
        &settings.registry_url,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_range() {
        assert_eq!(effective_range(""), "*");
        assert_eq!(effective_range("  "), "*");
        assert_eq!(effective_range("^1.0.0"), "^1.0.0");
    }

    #[test]
    fn test_from_versions() {
        assert_eq!(
            RegistryAnswer::from_versions(vec!["1.0.0".to_string()]),
            RegistryAnswer::Single("1.0.0".to_string())
        );
        assert_eq!(
            RegistryAnswer::from_versions(vec![]),
            RegistryAnswer::Many(vec![])
        );
        assert_eq!(
            RegistryAnswer::from_versions(vec!["1.0.0".to_string(), "1.1.0".to_string()]),
            RegistryAnswer::Many(vec!["1.0.0".to_string(), "1.1.0".to_string()])
        );
    }

    #[test]
    fn test_into_versions() {
        assert_eq!(
            RegistryAnswer::Single("2.0.0".to_string()).into_versions(),
            vec!["2.0.0".to_string()]
        );
        assert!(RegistryAnswer::Many(vec![]).into_versions().is_empty());
    }

    #[test]
    fn test_create_adapter_http() {
        let settings = Settings::for_dir(".");
        let adapter = create_adapter(&settings).unwrap();
        assert_eq!(adapter.registry_name(), "npm");
    }

    #[test]
    fn test_create_adapter_npm_cli() {
        let mut settings = Settings::for_dir(".");
        settings.use_npm_cli = true;
        let adapter = create_adapter(&settings).unwrap();
        assert_eq!(adapter.registry_name(), "npm-cli");
    }
}
