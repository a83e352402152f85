//! Core domain models for lockdrift
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency declarations and their manifest section
//! - Resolved versions and their failure sentinels
//! - Three-way comparison results
//! - Report rows and skipped dependencies

mod comparison;
mod dependency;
mod report;
mod resolved;

pub use comparison::{Comparison, DiffKind};
pub use dependency::{Dependency, DependencyKind};
pub use report::{
    present, ClassifiedDependency, Report, SkipReason, SkippedDependency, VersionColumn,
    NO_DIFFERENCES,
};
pub use resolved::ResolvedVersion;
