//! GitHub release lookup for web clients
//!
//! Mainsail and Fluidd ship as static bundles whose deployed version
//! sits in a sentinel file; the upstream version is the tag of the
//! newest published GitHub release.

use crate::error::ReleaseError;
use crate::probe::{HttpClient, ReleaseLookup};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// GitHub API base URL
const GITHUB_API_URL: &str = "https://api.github.com/repos";

/// Releases fetched per page when pre-releases are considered
const RELEASE_PAGE_SIZE: usize = 10;

/// Newest published release of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release tag, e.g. `v2.12.0`
    pub tag: String,
    /// Publication time, when the API provides one
    pub published_at: Option<DateTime<Utc>>,
}

/// GitHub release response
#[derive(Debug, Clone, Deserialize)]
struct GithubRelease {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
    published_at: Option<String>,
}

impl From<GithubRelease> for ReleaseInfo {
    fn from(release: GithubRelease) -> Self {
        ReleaseInfo {
            tag: release.tag_name,
            published_at: release
                .published_at
                .and_then(|t| t.parse::<DateTime<Utc>>().ok()),
        }
    }
}

/// Release lookup backed by the GitHub API.
///
/// Carries no client in offline mode; `available()` is the detectable
/// precondition the aggregator checks before asking for a remote
/// version.
pub struct GithubReleases {
    client: Option<HttpClient>,
    include_prereleases: bool,
}

impl GithubReleases {
    /// Creates a lookup with a fresh HTTP client
    pub fn new(include_prereleases: bool) -> Self {
        Self {
            client: HttpClient::new().ok(),
            include_prereleases,
        }
    }

    /// Creates a lookup whose precondition never holds
    pub fn offline() -> Self {
        Self {
            client: None,
            include_prereleases: false,
        }
    }

    fn latest_url(repo: &str) -> String {
        format!("{}/{}/releases/latest", GITHUB_API_URL, repo)
    }

    fn list_url(repo: &str) -> String {
        format!(
            "{}/{}/releases?per_page={}",
            GITHUB_API_URL, repo, RELEASE_PAGE_SIZE
        )
    }
}

#[async_trait]
impl ReleaseLookup for GithubReleases {
    fn available(&self) -> bool {
        self.client.is_some()
    }

    async fn latest(&self, release_repo: &str) -> Result<ReleaseInfo, ReleaseError> {
        let client = self
            .client
            .as_ref()
            .ok_or(ReleaseError::LookupUnavailable)?;

        if self.include_prereleases {
            let url = Self::list_url(release_repo);
            let releases: Vec<GithubRelease> = client.get_json(&url, release_repo).await?;
            let release =
                pick_release(releases, true).ok_or_else(|| ReleaseError::NotFound {
                    repo: release_repo.to_string(),
                })?;
            Ok(release.into())
        } else {
            let url = Self::latest_url(release_repo);
            let release: GithubRelease = client.get_json(&url, release_repo).await?;
            Ok(release.into())
        }
    }
}

/// Picks the newest listed release, skipping drafts and, unless asked
/// for, pre-releases. The API returns releases newest first.
fn pick_release(releases: Vec<GithubRelease>, include_prereleases: bool) -> Option<GithubRelease> {
    releases
        .into_iter()
        .find(|r| !r.draft && (include_prereleases || !r.prerelease))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str, draft: bool, prerelease: bool) -> GithubRelease {
        GithubRelease {
            tag_name: tag.to_string(),
            draft,
            prerelease,
            published_at: Some("2026-07-01T12:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            GithubReleases::latest_url("mainsail-crew/mainsail"),
            "https://api.github.com/repos/mainsail-crew/mainsail/releases/latest"
        );
        assert_eq!(
            GithubReleases::list_url("fluidd-core/fluidd"),
            "https://api.github.com/repos/fluidd-core/fluidd/releases?per_page=10"
        );
    }

    #[test]
    fn test_pick_release_skips_drafts() {
        let picked = pick_release(
            vec![release("v2.0.0", true, false), release("v1.9.0", false, false)],
            false,
        );
        assert_eq!(picked.unwrap().tag_name, "v1.9.0");
    }

    #[test]
    fn test_pick_release_skips_prereleases_by_default() {
        let picked = pick_release(
            vec![
                release("v2.0.0-rc1", false, true),
                release("v1.9.0", false, false),
            ],
            false,
        );
        assert_eq!(picked.unwrap().tag_name, "v1.9.0");
    }

    #[test]
    fn test_pick_release_includes_prereleases_when_asked() {
        let picked = pick_release(
            vec![
                release("v2.0.0-rc1", false, true),
                release("v1.9.0", false, false),
            ],
            true,
        );
        assert_eq!(picked.unwrap().tag_name, "v2.0.0-rc1");
    }

    #[test]
    fn test_release_info_parses_timestamp() {
        let info: ReleaseInfo = release("v2.12.0", false, false).into();
        assert_eq!(info.tag, "v2.12.0");
        assert!(info.published_at.is_some());
    }

    #[test]
    fn test_offline_lookup_is_unavailable() {
        let lookup = GithubReleases::offline();
        assert!(!lookup.available());
    }
}
