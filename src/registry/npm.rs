//! npm Registry adapter
//!
//! Answers version queries from the package document served by the registry.
//! API endpoint: {registry}/{package}

use crate::error::RegistryError;
use crate::registry::{effective_range, HttpClient, RegistryAdapter, RegistryAnswer};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// npm registry base URL
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package document (packument)
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Packument {
    /// Tag name to version, e.g. `latest` -> `4.17.21`
    #[serde(default, rename = "dist-tags")]
    pub dist_tags: HashMap<String, String>,
    /// Published versions, in the order the registry lists them
    #[serde(default)]
    pub versions: Map<String, Value>,
}

impl NpmAdapter {
    /// Create a new npm adapter against the public registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_REGISTRY_URL)
    }

    /// Create a new npm adapter against a custom registry
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package: &str) -> String {
        if package.starts_with('@') {
            package.replace('/', "%2F")
        } else {
            package.to_string()
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, Self::encode_package_name(package))
    }
}

/// Answer a `name@spec` query from a packument
///
/// A spec naming a dist-tag answers that tag's version; otherwise every
/// listed version satisfying the range is returned. A blank spec matches
/// every version.
pub(crate) fn answer_from_packument(
    package: &str,
    spec: &str,
    packument: &Packument,
) -> Result<RegistryAnswer, RegistryError> {
    if let Some(version) = packument.dist_tags.get(spec) {
        return Ok(RegistryAnswer::Single(version.clone()));
    }

    let range = node_semver::Range::parse(effective_range(spec))
        .map_err(|_| RegistryError::invalid_spec(package, spec))?;

    let matching = packument
        .versions
        .keys()
        .filter(|v| {
            node_semver::Version::parse(v.as_str())
                .map(|parsed| range.satisfies(&parsed))
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    Ok(RegistryAnswer::from_versions(matching))
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn query(&self, package: &str, spec: &str) -> Result<RegistryAnswer, RegistryError> {
        let url = self.build_url(package);
        let packument: Packument = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        answer_from_packument(package, spec, &packument)
    }
}
