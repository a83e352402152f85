//! Drift classification between locked, installable and latest versions

mod classifier;

pub use classifier::{classify, diff, is_valid_version, parse_version, DriftError};
