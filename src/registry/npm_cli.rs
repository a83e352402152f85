//! npm CLI adapter
//!
//! Delegates version queries to `npm view <name>@<spec> version --json`,
//! run inside the project directory so its .npmrc, auth and registry
//! settings apply.

use crate::error::RegistryError;
use crate::registry::{RegistryAdapter, RegistryAnswer};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const REGISTRY_NAME: &str = "npm-cli";

/// Adapter that shells out to the npm executable
pub struct NpmCliAdapter {
    program: String,
    working_dir: PathBuf,
    timeout: Duration,
}

impl NpmCliAdapter {
    /// Create an adapter running `npm` in `working_dir`
    pub fn new(working_dir: &Path, timeout: Duration) -> Self {
        Self {
            program: "npm".to_string(),
            working_dir: working_dir.to_path_buf(),
            timeout,
        }
    }

    /// Use a different executable in place of `npm`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command_line(&self, target: &str) -> String {
        format!("{} view {} version --json", self.program, target)
    }
}

#[async_trait]
impl RegistryAdapter for NpmCliAdapter {
    fn registry_name(&self) -> &'static str {
        REGISTRY_NAME
    }

    async fn query(&self, package: &str, spec: &str) -> Result<RegistryAnswer, RegistryError> {
        let target = format!("{}@{}", package, spec);
        let command_line = self.command_line(&target);
        debug!("running {}", command_line);

        let mut command = Command::new(&self.program);
        command
            .args(["view", target.as_str(), "version", "--json"])
            .current_dir(&self.working_dir)
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => return Err(RegistryError::timeout(package, REGISTRY_NAME)),
            Ok(Err(e)) => {
                return Err(RegistryError::command_failed(
                    package,
                    command_line,
                    e.to_string(),
                ))
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| output.status.to_string());
            return Err(RegistryError::command_failed(package, command_line, message));
        }

        parse_view_output(package, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Interpret what `npm view ... version --json` printed
///
/// npm prints a bare JSON string for one match, an array for several and
/// nothing at all when the spec matches no version. Plain text output (one
/// version per line) is accepted too.
pub(crate) fn parse_view_output(package: &str, stdout: &str) -> Result<RegistryAnswer, RegistryError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(RegistryAnswer::Many(Vec::new()));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(version)) => Ok(RegistryAnswer::Single(version)),
        Ok(Value::Array(items)) => Ok(RegistryAnswer::Many(
            items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        )),
        Ok(other) => Err(RegistryError::invalid_response(
            package,
            REGISTRY_NAME,
            format!("unexpected output: {}", other),
        )),
        Err(_) => {
            let versions = trimmed
                .lines()
                .map(|l| l.trim().trim_matches(|c| c == '\'' || c == '"'))
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            Ok(RegistryAnswer::from_versions(versions))
        }
    }
}
