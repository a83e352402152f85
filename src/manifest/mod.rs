//! Manifest and lockfile loading
//!
//! This module provides functionality to:
//! - Locate package.json and package-lock.json in a project directory
//! - Parse declared dependencies from package.json
//! - Look up pinned versions in package-lock.json (v1 and v2/v3 shapes)

mod package_json;
mod package_lock;

pub use package_json::Manifest;
pub use package_lock::{LockEntry, Lockfile};

use crate::error::InputError;
use std::path::Path;

/// Manifest filename
pub const MANIFEST_FILENAME: &str = "package.json";

/// Lockfile filename
pub const LOCKFILE_FILENAME: &str = "package-lock.json";

/// Manifest and lockfile of one project, loaded once and never mutated
#[derive(Debug, Clone)]
pub struct ProjectInputs {
    /// Parsed package.json
    pub manifest: Manifest,
    /// Parsed package-lock.json
    pub lockfile: Lockfile,
}

/// Load both input files from `dir`
///
/// Both files must exist; their presence is checked before either is parsed.
pub fn load_inputs(dir: &Path) -> Result<ProjectInputs, InputError> {
    let manifest_path = dir.join(MANIFEST_FILENAME);
    let lockfile_path = dir.join(LOCKFILE_FILENAME);

    if !manifest_path.is_file() {
        return Err(InputError::not_found("manifest", manifest_path));
    }
    if !lockfile_path.is_file() {
        return Err(InputError::not_found("lockfile", lockfile_path));
    }

    let manifest = Manifest::from_path(&manifest_path)?;
    let lockfile = Lockfile::from_path(&lockfile_path)?;

    Ok(ProjectInputs {
        manifest,
        lockfile,
    })
}
