//! Action-related types.

use serde::{Deserialize, Serialize};

/// How a host should present an action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionRole {
    /// Regular choice.
    #[default]
    Default,
    /// Backs out of the menu.
    Cancel,
    /// Irreversible choice, usually drawn in red.
    Destructive,
}

/// Host-facing description of a selectable action.
///
/// This is the data half of a menu action: everything a host needs to draw
/// the entry and report back which one was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    /// Identifier passed back to `select`.
    pub id: String,

    /// Display text.
    pub title: String,

    /// Presentation role.
    #[serde(default)]
    pub role: ActionRole,
}

impl ActionInfo {
    /// Create a new action description with the default role.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            role: ActionRole::Default,
        }
    }

    /// Check if this action backs out of the menu.
    pub fn is_cancel(&self) -> bool {
        self.role == ActionRole::Cancel
    }
}
