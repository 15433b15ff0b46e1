//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ProbeError: failures of local probes (git, apt, filesystem)
//! - ReleaseError: failures of the GitHub release lookup
//! - ConfigError: issues with the settings file or CLI configuration
//!
//! None of the probe errors are fatal: the aggregator folds them into
//! the per-component status. Only ConfigError aborts startup.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Local probe related errors
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Release lookup related errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from local probes shelling out to system tools
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probed tool is not installed at all
    #[error("required tool '{command}' is not available")]
    CommandUnavailable { command: String },

    /// The tool ran but exited with a failure
    #[error("'{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The tool produced output we could not interpret
    #[error("unexpected output from '{command}': {message}")]
    UnexpectedOutput { command: String, message: String },

    /// Filesystem access failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the GitHub release lookup
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Lookup invoked while the precondition does not hold
    #[error("release lookup is not available")]
    LookupUnavailable,

    /// Repository or release endpoint not found
    #[error("no release found for '{repo}'")]
    NotFound { repo: String },

    /// Network request failed
    #[error("failed to fetch releases for '{repo}': {message}")]
    NetworkError { repo: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded while fetching releases for '{repo}'")]
    RateLimitExceeded { repo: String },

    /// Invalid response from the API
    #[error("invalid release response for '{repo}': {message}")]
    InvalidResponse { repo: String, message: String },

    /// Timeout
    #[error("timeout while fetching releases for '{repo}'")]
    Timeout { repo: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file named on the command line does not exist
    #[error("settings file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the settings file
    #[error("failed to read settings file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse settings file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A --only/--exclude flag names a component that is not tracked
    #[error("unknown component '{name}'")]
    UnknownComponent { name: String },
}

impl ProbeError {
    /// Creates a CommandUnavailable error
    pub fn command_unavailable(command: impl Into<String>) -> Self {
        ProbeError::CommandUnavailable {
            command: command.into(),
        }
    }

    /// Creates a CommandFailed error
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        ProbeError::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates an Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.into(),
            source,
        }
    }
}

impl ReleaseError {
    /// Creates a NetworkError
    pub fn network_error(repo: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::NetworkError {
            repo: repo.into(),
            message: message.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(repo: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::InvalidResponse {
            repo: repo.into(),
            message: message.into(),
        }
    }
}
