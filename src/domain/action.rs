//! Update action identifiers collected for a later "update all" pass

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token naming the update routine to run for a component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Creates an action id from a raw token
    pub fn new(id: impl Into<String>) -> Self {
        ActionId(id.into())
    }

    /// Creates the conventional update action for a component name
    pub fn update(component: &str) -> Self {
        ActionId(format!("update_{}", component))
    }

    /// Returns the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of update actions, deduplicated by construction.
///
/// Rebuilt from empty on every aggregation pass and returned by value;
/// insertion order equals check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UpdateActionSet {
    actions: Vec<ActionId>,
}

impl UpdateActionSet {
    /// Creates an empty action set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action unless it is already present.
    ///
    /// Returns true when the action was added.
    pub fn push(&mut self, action: ActionId) -> bool {
        if self.actions.contains(&action) {
            return false;
        }
        self.actions.push(action);
        true
    }

    /// Returns true if the set contains the given action
    pub fn contains(&self, action: &ActionId) -> bool {
        self.actions.contains(action)
    }

    /// Returns the number of collected actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions were collected
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates the actions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.iter()
    }
}

impl<'a> IntoIterator for &'a UpdateActionSet {
    type Item = &'a ActionId;
    type IntoIter = std::slice::Iter<'a, ActionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_id_update() {
        assert_eq!(ActionId::update("klipper").as_str(), "update_klipper");
    }

    #[test]
    fn test_action_id_display() {
        assert_eq!(format!("{}", ActionId::new("update_system")), "update_system");
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut set = UpdateActionSet::new();
        set.push(ActionId::update("klipper"));
        set.push(ActionId::update("mainsail"));
        set.push(ActionId::update("system"));

        let collected: Vec<&str> = set.iter().map(|a| a.as_str()).collect();
        assert_eq!(
            collected,
            vec!["update_klipper", "update_mainsail", "update_system"]
        );
    }

    #[test]
    fn test_push_deduplicates() {
        let mut set = UpdateActionSet::new();
        assert!(set.push(ActionId::update("klipper")));
        assert!(!set.push(ActionId::update("klipper")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_contains() {
        let mut set = UpdateActionSet::new();
        set.push(ActionId::update("fluidd"));
        assert!(set.contains(&ActionId::update("fluidd")));
        assert!(!set.contains(&ActionId::update("mainsail")));
    }

    #[test]
    fn test_empty_set() {
        let set = UpdateActionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_serialize_as_flat_list() {
        let mut set = UpdateActionSet::new();
        set.push(ActionId::update("klipper"));
        set.push(ActionId::update("system"));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["update_klipper","update_system"]"#);
    }
}
