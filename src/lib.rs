//! lockdrift - npm dependency drift library
//!
//! This library compares three versions of every dependency declared in
//! package.json:
//! - locked: pinned in package-lock.json
//! - installable: what a fresh install of the declared range would pick
//! - latest: the version published under the `latest` tag

pub mod cli;
pub mod config;
pub mod domain;
pub mod drift;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolver;
