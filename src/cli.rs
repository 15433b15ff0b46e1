//! CLI argument parsing module for klupd

use crate::config::Settings;
use crate::domain::ComponentDescriptor;
use crate::error::ConfigError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Update status checker for a Klipper stack
#[derive(Parser, Debug, Clone)]
#[command(
    name = "klupd",
    version,
    about = "Update status checker for Klipper, Moonraker and their web clients"
)]
pub struct CliArgs {
    /// Path to the settings file (default: ~/.config/klupd.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base directory containing the component checkouts
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Systemd unit directory scanned for service files
    #[arg(long)]
    pub systemd_dir: Option<PathBuf>,

    /// Skip all network access; remote versions become unknown
    #[arg(long)]
    pub offline: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    // Component filters
    /// Skip specific components (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Check only specific components (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,
}

impl CliArgs {
    /// Folds CLI path overrides into the settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if self.home.is_some() {
            settings.home = self.home.clone();
        }
        if self.systemd_dir.is_some() {
            settings.systemd_dir = self.systemd_dir.clone();
        }
    }

    /// Applies the --only/--exclude filters to the descriptor set.
    ///
    /// A filter naming an untracked component is a configuration
    /// error; silently checking nothing would read as "all good".
    pub fn select(
        &self,
        descriptors: Vec<ComponentDescriptor>,
    ) -> Result<Vec<ComponentDescriptor>, ConfigError> {
        for name in self.only.iter().chain(self.exclude.iter()) {
            if !descriptors.iter().any(|d| &d.name == name) {
                return Err(ConfigError::UnknownComponent { name: name.clone() });
            }
        }

        Ok(descriptors
            .into_iter()
            .filter(|d| self.only.is_empty() || self.only.contains(&d.name))
            .filter(|d| !self.exclude.contains(&d.name))
            .collect())
    }
}
