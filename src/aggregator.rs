//! Version aggregation over the tracked component set
//!
//! This module provides the core of klupd:
//! - `check_component`: probe one descriptor into a `ComponentReport`
//! - `aggregate`: run every check in declaration order and collect the
//!   update action set for the pass
//!
//! Checks run sequentially; an individual probe failure degrades that
//! component to an unknown status and never aborts the pass.

use crate::config::Settings;
use crate::domain::{
    ComponentDescriptor, ComponentKind, ComponentReport, InstallRule, InstallState, StatusReport,
    UnknownReason, UpdateStatus, VersionPair,
};
use crate::error::ProbeError;
use crate::probe::{
    read_first_line, AptIndex, GitProbe, GithubReleases, PackageIndex, ReleaseLookup, ServiceProbe,
    UnitDir, VcsProbe,
};
use crate::progress::Progress;
use std::path::Path;

/// Version aggregator holding the probe collaborators
pub struct Aggregator {
    vcs: Box<dyn VcsProbe>,
    releases: Box<dyn ReleaseLookup>,
    packages: Box<dyn PackageIndex>,
    services: Box<dyn ServiceProbe>,
    offline: bool,
}

impl Aggregator {
    /// Creates an aggregator with the production probes
    pub fn new(settings: &Settings, offline: bool) -> Self {
        let releases: Box<dyn ReleaseLookup> = if offline {
            Box::new(GithubReleases::offline())
        } else {
            Box::new(GithubReleases::new(settings.include_prereleases))
        };

        Self {
            vcs: Box::new(GitProbe::new()),
            releases,
            packages: Box::new(AptIndex::new()),
            services: Box::new(UnitDir::new(settings.systemd_dir())),
            offline,
        }
    }

    /// Creates an aggregator with custom probes (used by tests)
    pub fn with_probes(
        vcs: Box<dyn VcsProbe>,
        releases: Box<dyn ReleaseLookup>,
        packages: Box<dyn PackageIndex>,
        services: Box<dyn ServiceProbe>,
    ) -> Self {
        Self {
            vcs,
            releases,
            packages,
            services,
            offline: false,
        }
    }

    /// Runs a full aggregation pass over the descriptors, in order
    pub async fn aggregate(&self, descriptors: &[ComponentDescriptor]) -> StatusReport {
        self.aggregate_with_progress(descriptors, false).await
    }

    /// Runs a full aggregation pass with an optional progress display
    pub async fn aggregate_with_progress(
        &self,
        descriptors: &[ComponentDescriptor],
        show_progress: bool,
    ) -> StatusReport {
        let mut progress = Progress::new(show_progress);
        progress.start(descriptors.len() as u64, "Checking components");

        let mut report = StatusReport::new();
        for descriptor in descriptors {
            progress.set_message(&descriptor.name);
            report.add(self.check_component(descriptor).await);
            progress.inc();
        }

        progress.finish_and_clear();
        report
    }

    /// Probes one component and derives its update status
    pub async fn check_component(&self, descriptor: &ComponentDescriptor) -> ComponentReport {
        match &descriptor.kind {
            ComponentKind::GitRepo {
                dir,
                remote,
                branch,
                ..
            } => self.check_git_repo(descriptor, dir, remote, branch).await,
            ComponentKind::WebClient {
                version_file,
                release_repo,
                ..
            } => {
                self.check_web_client(descriptor, version_file, release_repo)
                    .await
            }
            ComponentKind::SystemPackages => self.check_system_packages(descriptor).await,
        }
    }

    async fn check_git_repo(
        &self,
        descriptor: &ComponentDescriptor,
        dir: &Path,
        remote: &str,
        branch: &str,
    ) -> ComponentReport {
        let install = self.install_state(descriptor);

        if !self.vcs.is_repo(dir) {
            return ComponentReport {
                name: descriptor.name.clone(),
                action: descriptor.action.clone(),
                install,
                versions: VersionPair::none(),
                status: UpdateStatus::Unknown,
                reason: Some(install.as_unknown_reason()),
                remote_published: None,
            };
        }

        // A failed fetch leaves the tracking refs stale but readable;
        // the comparison then runs against the last fetched state.
        if !self.offline {
            let _ = self.vcs.fetch(dir, remote, branch).await;
        }

        let mut failure: Option<ProbeError> = None;
        let local = match self.vcs.describe(dir, "HEAD").await {
            Ok(version) => Some(version),
            Err(e) => {
                failure = Some(e);
                None
            }
        };

        let remote_ref = format!("{}/{}", remote, branch);
        let remote_version = match self.vcs.describe(dir, &remote_ref).await {
            Ok(version) => Some(version),
            Err(e) => {
                failure.get_or_insert(e);
                None
            }
        };

        let versions = VersionPair::new(local, remote_version);
        let status = UpdateStatus::derive(&versions);
        let reason = match status {
            UpdateStatus::Unknown => Some(match failure {
                Some(e) => unknown_reason_for(&e),
                None => install.as_unknown_reason(),
            }),
            _ => None,
        };

        ComponentReport {
            name: descriptor.name.clone(),
            action: descriptor.action.clone(),
            install,
            versions,
            status,
            reason,
            remote_published: None,
        }
    }

    async fn check_web_client(
        &self,
        descriptor: &ComponentDescriptor,
        version_file: &Path,
        release_repo: &str,
    ) -> ComponentReport {
        let install = self.install_state(descriptor);

        // The local half only depends on the file; it renders even
        // when the remote lookup is unavailable.
        let local = read_first_line(version_file);

        if !self.releases.available() {
            return ComponentReport {
                name: descriptor.name.clone(),
                action: descriptor.action.clone(),
                install,
                versions: VersionPair::new(local, None),
                status: UpdateStatus::Unknown,
                reason: Some(UnknownReason::ToolMissing),
                remote_published: None,
            };
        }

        let mut remote_published = None;
        let mut failure = None;
        let remote = match self.releases.latest(release_repo).await {
            Ok(release) => {
                remote_published = release.published_at;
                Some(release.tag)
            }
            Err(e) => {
                failure = Some(e);
                None
            }
        };

        let versions = VersionPair::new(local, remote);
        let status = UpdateStatus::derive(&versions);
        let reason = match status {
            UpdateStatus::Unknown => Some(match failure {
                Some(e) => UnknownReason::ProbeFailed(e.to_string()),
                None => install.as_unknown_reason(),
            }),
            _ => None,
        };

        ComponentReport {
            name: descriptor.name.clone(),
            action: descriptor.action.clone(),
            install,
            versions,
            status,
            reason,
            remote_published,
        }
    }

    async fn check_system_packages(&self, descriptor: &ComponentDescriptor) -> ComponentReport {
        match self.packages.upgradable().await {
            Ok(packages) => {
                let status = if packages.is_empty() {
                    UpdateStatus::UpToDate
                } else {
                    UpdateStatus::UpdateAvailable
                };
                ComponentReport {
                    name: descriptor.name.clone(),
                    action: descriptor.action.clone(),
                    install: InstallState::Installed,
                    versions: VersionPair::new(Some(format!("{} upgradable", packages.len())), None),
                    status,
                    reason: None,
                    remote_published: None,
                }
            }
            Err(e) => ComponentReport {
                name: descriptor.name.clone(),
                action: descriptor.action.clone(),
                install: InstallState::Installed,
                versions: VersionPair::none(),
                status: UpdateStatus::Unknown,
                reason: Some(unknown_reason_for(&e)),
                remote_published: None,
            },
        }
    }

    /// Applies the component's own artifact-counting rule
    fn install_state(&self, descriptor: &ComponentDescriptor) -> InstallState {
        let unit_count = descriptor
            .service_pattern
            .as_deref()
            .map(|stem| self.services.count_units(stem))
            .unwrap_or(0);

        match descriptor.install_rule {
            InstallRule::Always => InstallState::Installed,
            InstallRule::ServiceOnly => {
                if unit_count > 0 {
                    InstallState::Installed
                } else {
                    InstallState::NotInstalled
                }
            }
            InstallRule::RepoEnvService => {
                let ComponentKind::GitRepo { dir, env_dir, .. } = &descriptor.kind else {
                    return InstallState::NotInstalled;
                };
                let mut artifacts = vec![dir.is_dir(), unit_count > 0];
                if let Some(env_dir) = env_dir {
                    artifacts.push(env_dir.is_dir());
                }
                install_state_from(&artifacts)
            }
            InstallRule::DirWithVersionFile => {
                let ComponentKind::WebClient {
                    dir, version_file, ..
                } = &descriptor.kind
                else {
                    return InstallState::NotInstalled;
                };
                install_state_from(&[dir.is_dir(), version_file.is_file()])
            }
        }
    }
}

/// Folds per-artifact presence into an install state
fn install_state_from(artifacts: &[bool]) -> InstallState {
    if artifacts.iter().all(|present| *present) {
        InstallState::Installed
    } else if artifacts.iter().any(|present| *present) {
        InstallState::Incomplete
    } else {
        InstallState::NotInstalled
    }
}

/// Maps a probe error to the reason carried by an unknown status
fn unknown_reason_for(error: &ProbeError) -> UnknownReason {
    match error {
        ProbeError::CommandUnavailable { .. } => UnknownReason::ToolMissing,
        other => UnknownReason::ProbeFailed(other.to_string()),
    }
}
