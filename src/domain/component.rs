//! Tracked component descriptors
//!
//! A descriptor is static per-component metadata driving how its
//! version is probed. The default set mirrors a stock Klipper
//! installation; the settings file can override paths and refs.

use crate::config::Settings;
use crate::domain::ActionId;
use std::path::PathBuf;

/// How a component's local and remote versions are probed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    /// Git working copy compared against its remote tracking branch
    GitRepo {
        /// Local checkout
        dir: PathBuf,
        /// Python virtualenv belonging to the checkout, if any
        env_dir: Option<PathBuf>,
        /// Remote name, usually "origin"
        remote: String,
        /// Tracked branch
        branch: String,
    },
    /// Static web client with a sentinel version file, released on GitHub
    WebClient {
        /// Deployment directory
        dir: PathBuf,
        /// Sentinel file whose first line is the deployed version
        version_file: PathBuf,
        /// GitHub "owner/name" repository to query for releases
        release_repo: String,
    },
    /// System package pseudo-component (upgradable package listing)
    SystemPackages,
}

/// Which on-disk artifacts mark the component as installed.
///
/// The rules intentionally differ per component; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallRule {
    /// Checkout dir, virtualenv dir and at least one service unit
    RepoEnvService,
    /// At least one matching service unit, nothing else
    ServiceOnly,
    /// Deployment dir with its version file inside
    DirWithVersionFile,
    /// Always present (system pseudo-component)
    Always,
}

/// Static record describing one tracked component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// Unique component name
    pub name: String,
    /// Probe strategy and its parameters
    pub kind: ComponentKind,
    /// Service unit name stem; "klipper" matches klipper.service and
    /// klipper-1.service
    pub service_pattern: Option<String>,
    /// Artifact rule deciding the install state
    pub install_rule: InstallRule,
    /// Action collected when an update is available
    pub action: ActionId,
}

impl ComponentDescriptor {
    /// Creates a descriptor with the default install rule for its kind
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        let name = name.into();
        let install_rule = match &kind {
            ComponentKind::GitRepo { .. } => InstallRule::RepoEnvService,
            ComponentKind::WebClient { .. } => InstallRule::DirWithVersionFile,
            ComponentKind::SystemPackages => InstallRule::Always,
        };
        let action = ActionId::update(&name);
        Self {
            name,
            kind,
            service_pattern: None,
            install_rule,
            action,
        }
    }

    /// Sets the service unit name stem
    pub fn with_service_pattern(mut self, stem: impl Into<String>) -> Self {
        self.service_pattern = Some(stem.into());
        self
    }

    /// Overrides the install rule
    pub fn with_install_rule(mut self, rule: InstallRule) -> Self {
        self.install_rule = rule;
        self
    }
}

/// Builds the default descriptor set, in display and check order,
/// with per-component settings overrides applied.
pub fn default_descriptors(settings: &Settings) -> Vec<ComponentDescriptor> {
    let home = settings.home_dir();

    let git = |name: &str, dir: &str, env_dir: Option<&str>| {
        let o = settings.component(name);
        ComponentKind::GitRepo {
            dir: o.dir.clone().unwrap_or_else(|| home.join(dir)),
            env_dir: o
                .env_dir
                .clone()
                .or_else(|| env_dir.map(|e| home.join(e))),
            remote: o.remote.clone().unwrap_or_else(|| "origin".to_string()),
            branch: o.branch.clone().unwrap_or_else(|| "master".to_string()),
        }
    };

    let web = |name: &str, dir: &str, release_repo: &str| {
        let o = settings.component(name);
        let dir = o.dir.clone().unwrap_or_else(|| home.join(dir));
        ComponentKind::WebClient {
            version_file: o
                .version_file
                .clone()
                .unwrap_or_else(|| dir.join(".version")),
            dir,
            release_repo: o
                .release_repo
                .clone()
                .unwrap_or_else(|| release_repo.to_string()),
        }
    };

    vec![
        ComponentDescriptor::new("klipper", git("klipper", "klipper", Some("klippy-env")))
            .with_service_pattern("klipper"),
        ComponentDescriptor::new("moonraker", git("moonraker", "moonraker", Some("moonraker-env")))
            .with_service_pattern("moonraker"),
        ComponentDescriptor::new("klipperscreen", git("klipperscreen", "KlipperScreen", None))
            .with_service_pattern("KlipperScreen")
            .with_install_rule(InstallRule::ServiceOnly),
        ComponentDescriptor::new("mainsail", web("mainsail", "mainsail", "mainsail-crew/mainsail")),
        ComponentDescriptor::new("fluidd", web("fluidd", "fluidd", "fluidd-core/fluidd")),
        ComponentDescriptor::new("system", ComponentKind::SystemPackages),
    ]
}
