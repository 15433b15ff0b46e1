//! Probes for local and upstream version markers
//!
//! This module provides:
//! - Collaborator traits consumed by the aggregator
//! - Git queries via the git binary
//! - GitHub release lookup over HTTP
//! - Upgradable package listing via apt
//! - Systemd unit-file counting
//! - Sentinel version-file reading

mod apt;
mod git;
mod http;
mod release;
mod systemd;
mod version_file;

pub use apt::AptIndex;
pub use git::GitProbe;
pub use http::HttpClient;
pub use release::{GithubReleases, ReleaseInfo};
pub use systemd::UnitDir;
pub use version_file::read_first_line;

use crate::error::{ProbeError, ReleaseError};
use async_trait::async_trait;
use std::path::Path;

/// Source-control queries against a component checkout
#[async_trait]
pub trait VcsProbe: Send + Sync {
    /// Returns true if the directory is a git working copy
    fn is_repo(&self, dir: &Path) -> bool;

    /// Fetches the tracked branch from the remote (network side effect)
    async fn fetch(&self, dir: &Path, remote: &str, branch: &str) -> Result<(), ProbeError>;

    /// Returns the tag-qualified description of a ref: the nearest tag
    /// plus commit distance, without the trailing hash
    async fn describe(&self, dir: &Path, refname: &str) -> Result<String, ProbeError>;
}

/// Latest-release lookup for web clients
#[async_trait]
pub trait ReleaseLookup: Send + Sync {
    /// Whether the lookup precondition holds; false forces the remote
    /// half of the version pair to stay empty
    fn available(&self) -> bool;

    /// Returns the newest published release of a GitHub repository
    async fn latest(&self, release_repo: &str) -> Result<ReleaseInfo, ReleaseError>;
}

/// System package index queries
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Lists the names of packages with a pending upgrade
    async fn upgradable(&self) -> Result<Vec<String>, ProbeError>;
}

/// Installed-unit probe against the service unit directory
pub trait ServiceProbe: Send + Sync {
    /// Counts unit files matching `<stem>.service` or
    /// `<stem>-<suffix>.service`
    fn count_units(&self, stem: &str) -> usize;
}
