//! Git queries via the git binary

use crate::error::ProbeError;
use crate::probe::VcsProbe;
use async_trait::async_trait;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// Source-control probe shelling out to git
#[derive(Debug, Default)]
pub struct GitProbe;

impl GitProbe {
    pub fn new() -> Self {
        Self
    }

    async fn run_git(&self, dir: &Path, args: &[&str]) -> Result<Output, ProbeError> {
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::command_unavailable("git")
                } else {
                    ProbeError::command_failed(format!("git {}", args.join(" ")), e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(ProbeError::command_failed(
                format!("git {}", args.join(" ")),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(output)
    }
}

#[async_trait]
impl VcsProbe for GitProbe {
    fn is_repo(&self, dir: &Path) -> bool {
        dir.join(".git").exists()
    }

    async fn fetch(&self, dir: &Path, remote: &str, branch: &str) -> Result<(), ProbeError> {
        self.run_git(dir, &["fetch", "--quiet", remote, branch])
            .await?;
        Ok(())
    }

    async fn describe(&self, dir: &Path, refname: &str) -> Result<String, ProbeError> {
        let output = self
            .run_git(dir, &["describe", refname, "--always", "--tags"])
            .await?;
        let raw = String::from_utf8_lossy(&output.stdout);
        Ok(short_describe(&raw))
    }
}

/// Reduces a describe output to `<tag>-<count>`, dropping the hash.
///
/// `v0.12.0-115-g1a2b3c4` becomes `v0.12.0-115`; a bare tag or a raw
/// hash (the `--always` fallback) passes through unchanged.
pub(crate) fn short_describe(raw: &str) -> String {
    raw.trim()
        .splitn(3, '-')
        .take(2)
        .collect::<Vec<_>>()
        .join("-")
}
