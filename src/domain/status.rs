//! Version comparison results for a single component

use serde::Serialize;
use std::fmt;

/// Local and remote version identifiers probed for one component.
///
/// Either half may be missing: a component that is not installed has no
/// local identifier, and a failed or unavailable lookup leaves the
/// remote half empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionPair {
    /// Version or commit identifier found on this machine
    pub local: Option<String>,
    /// Version or commit identifier of the upstream tip
    pub remote: Option<String>,
}

impl VersionPair {
    /// Creates a pair from both halves
    pub fn new(local: Option<String>, remote: Option<String>) -> Self {
        Self { local, remote }
    }

    /// Creates a pair with both halves missing
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true when both identifiers were obtained
    pub fn comparable(&self) -> bool {
        self.local.is_some() && self.remote.is_some()
    }
}

/// Update status derived from a [`VersionPair`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    /// Local and remote identifiers are present and equal
    UpToDate,
    /// Local and remote identifiers are present and differ
    UpdateAvailable,
    /// The pair is not comparable
    Unknown,
}

impl UpdateStatus {
    /// Derives the status from a version pair.
    ///
    /// `UpdateAvailable` when both identifiers are present and differ,
    /// `Unknown` when either is missing, `UpToDate` otherwise.
    pub fn derive(pair: &VersionPair) -> Self {
        match (&pair.local, &pair.remote) {
            (Some(local), Some(remote)) if local != remote => UpdateStatus::UpdateAvailable,
            (Some(_), Some(_)) => UpdateStatus::UpToDate,
            _ => UpdateStatus::Unknown,
        }
    }
}

/// Why a component's status could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownReason {
    /// Expected artifacts are absent from disk
    NotInstalled,
    /// Some but not all expected artifacts were found
    Incomplete,
    /// The lookup precondition does not hold (offline, tool absent)
    ToolMissing,
    /// A probe ran but failed
    ProbeFailed(String),
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownReason::NotInstalled => write!(f, "not installed"),
            UnknownReason::Incomplete => write!(f, "incomplete"),
            UnknownReason::ToolMissing => write!(f, "tool missing"),
            UnknownReason::ProbeFailed(msg) => write!(f, "probe failed: {}", msg),
        }
    }
}

/// How much of the component's expected install artifacts are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallState {
    /// All expected artifacts found
    Installed,
    /// Some but not all expected artifacts found
    Incomplete,
    /// No expected artifacts found
    NotInstalled,
}

impl InstallState {
    /// Maps the install state to the reason an unknown status carries
    pub fn as_unknown_reason(&self) -> UnknownReason {
        match self {
            InstallState::Incomplete => UnknownReason::Incomplete,
            _ => UnknownReason::NotInstalled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(local: Option<&str>, remote: Option<&str>) -> VersionPair {
        VersionPair::new(local.map(String::from), remote.map(String::from))
    }

    #[test]
    fn test_comparable_requires_both_halves() {
        assert!(pair(Some("v1.2-0"), Some("v1.2-3")).comparable());
        assert!(!pair(Some("v1.2-0"), None).comparable());
        assert!(!pair(None, Some("v1.2-3")).comparable());
        assert!(!VersionPair::none().comparable());
    }

    #[test]
    fn test_derive_update_available_on_mismatch() {
        let status = UpdateStatus::derive(&pair(Some("v1.2-0"), Some("v1.2-3")));
        assert_eq!(status, UpdateStatus::UpdateAvailable);
    }

    #[test]
    fn test_derive_up_to_date_on_equal() {
        let status = UpdateStatus::derive(&pair(Some("v1.2-3"), Some("v1.2-3")));
        assert_eq!(status, UpdateStatus::UpToDate);
    }

    #[test]
    fn test_derive_unknown_when_half_missing() {
        assert_eq!(
            UpdateStatus::derive(&pair(Some("v1.2-0"), None)),
            UpdateStatus::Unknown
        );
        assert_eq!(
            UpdateStatus::derive(&pair(None, Some("v1.2-3"))),
            UpdateStatus::Unknown
        );
        assert_eq!(
            UpdateStatus::derive(&VersionPair::none()),
            UpdateStatus::Unknown
        );
    }

    #[test]
    fn test_unknown_reason_display() {
        assert_eq!(format!("{}", UnknownReason::NotInstalled), "not installed");
        assert_eq!(format!("{}", UnknownReason::Incomplete), "incomplete");
        assert_eq!(format!("{}", UnknownReason::ToolMissing), "tool missing");
        assert_eq!(
            format!("{}", UnknownReason::ProbeFailed("timeout".to_string())),
            "probe failed: timeout"
        );
    }

    #[test]
    fn test_install_state_to_unknown_reason() {
        assert_eq!(
            InstallState::NotInstalled.as_unknown_reason(),
            UnknownReason::NotInstalled
        );
        assert_eq!(
            InstallState::Incomplete.as_unknown_reason(),
            UnknownReason::Incomplete
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&UpdateStatus::UpdateAvailable).unwrap();
        assert_eq!(json, r#""update_available""#);
    }
}
