//! Settings file handling
//!
//! klupd works without any configuration; an optional TOML file
//! (default `~/.config/klupd.toml`) overrides the base directory, the
//! systemd unit directory, release channel behavior, and per-component
//! paths and refs. Command-line flags win over the file.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default location of the systemd service unit directory
pub const DEFAULT_SYSTEMD_DIR: &str = "/etc/systemd/system";

/// Settings merged from the optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base directory containing the component checkouts
    pub home: Option<PathBuf>,
    /// Directory scanned for service unit files
    pub systemd_dir: Option<PathBuf>,
    /// Consider pre-releases when looking up web client releases
    pub include_prereleases: bool,
    /// Per-component overrides, keyed by component name
    pub components: BTreeMap<String, ComponentOverride>,
}

/// Overridable fields of a single component descriptor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentOverride {
    pub dir: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub version_file: Option<PathBuf>,
    pub release_repo: Option<String>,
}

impl Settings {
    /// Loads settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads settings from an explicit path, or from the default
    /// location if it exists.
    ///
    /// An explicit path must exist; the absence of the default file is
    /// not an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.is_file() => Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Returns `~/.config/klupd.toml`, when a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/klupd.toml"))
    }

    /// Resolves the base directory for component checkouts
    pub fn home_dir(&self) -> PathBuf {
        if let Some(home) = &self.home {
            return home.clone();
        }
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolves the systemd unit directory
    pub fn systemd_dir(&self) -> PathBuf {
        self.systemd_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEMD_DIR))
    }

    /// Returns the override block for a component, or an empty one
    pub fn component(&self, name: &str) -> &ComponentOverride {
        static EMPTY: ComponentOverride = ComponentOverride {
            dir: None,
            env_dir: None,
            remote: None,
            branch: None,
            version_file: None,
            release_repo: None,
        };
        self.components.get(name).unwrap_or(&EMPTY)
    }
}
