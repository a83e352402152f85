//! Runtime settings assembled from the command line and the environment
//!
//! Registry URL is taken from (in priority order):
//! - `--registry` (or `NPM_CONFIG_REGISTRY`)
//! - `npm_config_registry`, as exported by npm to lifecycle scripts
//! - `registry=` in the project's .npmrc
//! - the public npm registry

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::output::{OutputConfig, OutputFormat};
use crate::registry::{DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lower-case variant npm sets when running package scripts
const NPM_CONFIG_REGISTRY_LOWER: &str = "npm_config_registry";

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project directory holding package.json and package-lock.json
    pub dir: PathBuf,
    /// Registry base URL, without trailing slash
    pub registry_url: String,
    /// Per-query timeout
    pub timeout: Duration,
    /// Query through the npm executable instead of HTTP
    pub use_npm_cli: bool,
    /// Show every classified dependency, not only drifted ones
    pub show_all: bool,
    /// Emit JSON instead of a table
    pub json: bool,
    /// Style the table with colors
    pub color: bool,
    /// Draw progress on stderr
    pub show_progress: bool,
    /// Debug diagnostics and a trailing count line
    pub verbose: bool,
}

impl Settings {
    /// Defaults for a project directory, as if no flags were given
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_npm_cli: false,
            show_all: false,
            json: false,
            color: false,
            show_progress: false,
            verbose: false,
        }
    }

    /// Build settings from parsed CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        if !args.dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: args.dir.clone(),
            });
        }

        let registry_url = resolve_registry_url(
            args.registry.as_deref(),
            std::env::var(NPM_CONFIG_REGISTRY_LOWER).ok().as_deref(),
            read_npmrc_registry(&args.dir).as_deref(),
        )?;

        let color = !args.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();

        Ok(Self {
            dir: args.dir.clone(),
            registry_url,
            timeout: args.timeout,
            use_npm_cli: args.npm_cli,
            show_all: args.all,
            json: args.json,
            color,
            show_progress: !args.quiet && !args.json && std::io::stderr().is_terminal(),
            verbose: args.verbose,
        })
    }

    /// Output configuration derived from these settings
    pub fn output_config(&self) -> OutputConfig {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        };
        OutputConfig {
            format,
            color: self.color,
            show_all: self.show_all,
        }
    }
}

/// Pick the registry URL from the first source that has one
pub fn resolve_registry_url(
    flag: Option<&str>,
    env: Option<&str>,
    npmrc: Option<&str>,
) -> Result<String, ConfigError> {
    let raw = [flag, env, npmrc]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(DEFAULT_REGISTRY_URL);

    normalize_registry_url(raw)
}

/// Validate the scheme and strip trailing slashes
pub fn normalize_registry_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ConfigError::InvalidRegistryUrl {
            value: value.to_string(),
        });
    }

    let url = trimmed.trim_end_matches('/');
    let host = url.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if host.is_empty() {
        return Err(ConfigError::InvalidRegistryUrl {
            value: value.to_string(),
        });
    }

    Ok(url.to_string())
}

/// Read the `registry=` setting from .npmrc in `dir`
fn read_npmrc_registry(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(dir.join(".npmrc")).ok()?;

    for line in content.lines() {
        let line = line.trim();
        // Skip comments
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() == "registry" {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_registry() {
        assert_eq!(
            resolve_registry_url(None, None, None).unwrap(),
            "https://registry.npmjs.org"
        );
    }

    #[test]
    fn test_registry_precedence() {
        let flag = Some("https://flag.example.com");
        let env = Some("https://env.example.com");
        let npmrc = Some("https://npmrc.example.com");

        assert_eq!(
            resolve_registry_url(flag, env, npmrc).unwrap(),
            "https://flag.example.com"
        );
        assert_eq!(
            resolve_registry_url(None, env, npmrc).unwrap(),
            "https://env.example.com"
        );
        assert_eq!(
            resolve_registry_url(None, None, npmrc).unwrap(),
            "https://npmrc.example.com"
        );
    }

    #[test]
    fn test_blank_sources_are_skipped() {
        assert_eq!(
            resolve_registry_url(Some("  "), None, Some("http://localhost:4873")).unwrap(),
            "http://localhost:4873"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            normalize_registry_url("https://npm.example.com/repo/").unwrap(),
            "https://npm.example.com/repo"
        );
    }

    #[test]
    fn test_invalid_scheme() {
        let err = normalize_registry_url("ftp://npm.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegistryUrl { .. }));
        assert!(normalize_registry_url("npm.example.com").is_err());
        assert!(normalize_registry_url("https://").is_err());
    }

    #[test]
    fn test_read_npmrc_registry() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".npmrc"),
            "# company mirror\n; legacy\nsave-exact=true\nregistry = \"https://npm.corp.example/\"\n",
        )
        .unwrap();

        assert_eq!(
            read_npmrc_registry(dir.path()),
            Some("https://npm.corp.example/".to_string())
        );
    }

    #[test]
    fn test_read_npmrc_ignores_scoped_registry() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".npmrc"),
            "@corp:registry=https://npm.corp.example/\n",
        )
        .unwrap();

        assert_eq!(read_npmrc_registry(dir.path()), None);
    }

    #[test]
    fn test_read_npmrc_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_npmrc_registry(dir.path()), None);
    }

    #[test]
    fn test_from_cli_missing_directory() {
        let args = CliArgs::parse_from(["lockdrift", "-d", "/definitely/not/here"]);
        let err = Settings::from_cli(&args).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_from_cli_flags() {
        let dir = TempDir::new().unwrap();
        let dir_arg = dir.path().to_string_lossy().to_string();
        let args = CliArgs::parse_from([
            "lockdrift",
            "-d",
            &dir_arg,
            "--all",
            "--json",
            "--npm-cli",
            "--timeout",
            "5",
            "--registry",
            "http://localhost:4873/",
        ]);

        let settings = Settings::from_cli(&args).unwrap();
        assert!(settings.show_all);
        assert!(settings.json);
        assert!(settings.use_npm_cli);
        assert!(!settings.show_progress);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.registry_url, "http://localhost:4873");
        assert_eq!(settings.output_config().format, OutputFormat::Json);
    }

    #[test]
    fn test_for_dir_defaults() {
        let settings = Settings::for_dir("/tmp/project");
        assert_eq!(settings.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.output_config().format, OutputFormat::Table);
    }
}
