//! What a host needs to draw the current dialog.

use serde::{Deserialize, Serialize};

use crate::action::ActionInfo;

/// Which of the two menu stages is active.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Initial,
    Secondary,
}

/// A rendered dialog, derived fresh from menu state on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSnapshot {
    /// Title chrome. `None` when the stage's title is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Selectable actions, in display order.
    pub actions: Vec<ActionInfo>,

    /// The stage the content was rendered from.
    pub stage: Stage,

    /// Whether the host should have the dialog on screen.
    pub visible: bool,
}

impl DialogSnapshot {
    /// Titles of all actions, in display order.
    pub fn action_titles(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.title.as_str()).collect()
    }
}
