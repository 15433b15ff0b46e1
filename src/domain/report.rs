//! Report structures produced by an aggregation pass

use super::{ActionId, InstallState, UnknownReason, UpdateActionSet, UpdateStatus, VersionPair};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of checking one component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentReport {
    /// Component name
    pub name: String,
    /// Action an "update all" pass would run for this component
    pub action: ActionId,
    /// Install artifact state
    pub install: InstallState,
    /// Probed version identifiers
    pub versions: VersionPair,
    /// Derived update status
    pub status: UpdateStatus,
    /// Present iff the status is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnknownReason>,
    /// Publication time of the remote release, when the lookup provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_published: Option<DateTime<Utc>>,
}

/// Result of a full aggregation pass.
///
/// Components appear in check order; the action set is rebuilt from
/// empty for every pass and owned by the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// Per-component outcomes in check order
    pub components: Vec<ComponentReport>,
    /// Actions an "update all" pass would run, in check order
    pub actions: UpdateActionSet,
}

impl StatusReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component outcome, collecting its action iff an
    /// update is available.
    pub fn add(&mut self, report: ComponentReport) {
        if report.status == UpdateStatus::UpdateAvailable {
            self.actions.push(report.action.clone());
        }
        self.components.push(report);
    }

    /// Returns the number of components with an update available
    pub fn update_count(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.status == UpdateStatus::UpdateAvailable)
            .count()
    }

    /// Returns true if any component has an update available
    pub fn has_updates(&self) -> bool {
        self.update_count() > 0
    }

    /// Returns messages of probes that ran but failed, for verbose display
    pub fn errors(&self) -> Vec<String> {
        self.components
            .iter()
            .filter_map(|c| match &c.reason {
                Some(UnknownReason::ProbeFailed(msg)) => {
                    Some(format!("{}: {}", c.name, msg))
                }
                _ => None,
            })
            .collect()
    }
}
