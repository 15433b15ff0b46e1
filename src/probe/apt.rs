//! Upgradable package listing via apt

use crate::error::ProbeError;
use crate::probe::PackageIndex;
use async_trait::async_trait;
use tokio::process::Command;

/// System package index probe shelling out to apt
#[derive(Debug, Default)]
pub struct AptIndex;

impl AptIndex {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PackageIndex for AptIndex {
    async fn upgradable(&self) -> Result<Vec<String>, ProbeError> {
        let output = Command::new("apt")
            .args(["list", "--upgradable"])
            .env("LC_ALL", "C")
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::command_unavailable("apt")
                } else {
                    ProbeError::command_failed("apt list --upgradable", e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(ProbeError::command_failed(
                "apt list --upgradable",
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(parse_upgradable(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extracts package names from `apt list --upgradable` output.
///
/// Lines look like
/// `git/stable 1:2.40.1-1 amd64 [upgradable from: 1:2.39.2-1]`;
/// the header line and anything else is ignored.
pub(crate) fn parse_upgradable(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.contains("[upgradable from:"))
        .filter_map(|line| line.split('/').next())
        .map(str::to_string)
        .collect()
}
