//! Application error types using thiserror
//!
//! Error hierarchy:
//! - InputError: Issues with the manifest and lockfile on disk
//! - RegistryError: Issues with package registry communication
//! - ConfigError: Issues with CLI / environment configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest or lockfile related errors
    #[error(transparent)]
    Input(#[from] InputError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to reading the manifest and lockfile
#[derive(Error, Debug)]
pub enum InputError {
    /// Required input file not found
    #[error("{kind} not found: {path}")]
    NotFound { kind: &'static str, path: PathBuf },

    /// Failed to read input file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// External query command exited unsuccessfully
    #[error("`{command}` failed for '{package}': {message}")]
    CommandFailed {
        package: String,
        command: String,
        message: String,
    },

    /// The version specifier is neither a dist-tag nor a valid range
    #[error("invalid version specifier '{spec}' for '{package}'")]
    InvalidSpec { package: String, spec: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Registry URL is not an http(s) URL
    #[error("invalid registry URL '{value}': expected an http:// or https:// URL")]
    InvalidRegistryUrl { value: String },

    /// Timeout must be positive
    #[error("invalid timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },

    /// Target directory does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

impl InputError {
    /// Creates a new NotFound error
    pub fn not_found(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        InputError::NotFound {
            kind,
            path: path.into(),
        }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InputError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InputError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(
        package: impl Into<String>,
        command: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::CommandFailed {
            package: package.into(),
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidSpec error
    pub fn invalid_spec(package: impl Into<String>, spec: impl Into<String>) -> Self {
        RegistryError::InvalidSpec {
            package: package.into(),
            spec: spec.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_not_found() {
        let err = InputError::not_found("lockfile", "/path/to/package-lock.json");
        let msg = format!("{}", err);
        assert!(msg.contains("lockfile not found"));
        assert!(msg.contains("package-lock.json"));
    }

    #[test]
    fn test_input_error_json_parse() {
        let err = InputError::json_parse_error("/path/to/package.json", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse JSON"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_input_error_read() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = InputError::read_error("/path/to/package.json", io);
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-package", "npm");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'nonexistent-package' not found"));
        assert!(msg.contains("npm"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("lodash", "npm", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("react", "npm");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("react"));
    }

    #[test]
    fn test_registry_error_command_failed() {
        let err = RegistryError::command_failed("react", "npm view", "exit status 1");
        let msg = format!("{}", err);
        assert!(msg.contains("`npm view` failed"));
        assert!(msg.contains("exit status 1"));
    }

    #[test]
    fn test_registry_error_invalid_spec() {
        let err = RegistryError::invalid_spec("react", "not a range");
        assert!(err.to_string().contains("invalid version specifier 'not a range'"));
    }

    #[test]
    fn test_config_error_invalid_registry() {
        let err = ConfigError::InvalidRegistryUrl {
            value: "ftp://example.com".to_string(),
        };
        assert!(err.to_string().contains("invalid registry URL"));
    }

    #[test]
    fn test_app_error_from_input_error() {
        let app_err: AppError = InputError::not_found("manifest", "/path").into();
        assert!(app_err.to_string().contains("manifest not found"));
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let app_err: AppError = RegistryError::package_not_found("pkg", "npm").into();
        assert!(app_err.to_string().contains("package 'pkg' not found"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::InvalidTimeout {
            value: "0".to_string(),
        }
        .into();
        assert!(app_err.to_string().contains("invalid timeout"));
    }
}
