//! Terminal host: draws dialogs as text and parses typed commands.
//!
//! This is the only place that knows what a dialog looks like. The menu
//! crate hands over a `DialogSnapshot`; everything here is presentation.

use std::str::FromStr;

use clap::ValueEnum;
use duet_core::{ActionRole, DialogSnapshot};

use crate::menus::MenuKind;

// =============================================================================
// Rendering
// =============================================================================

/// Draw a dialog as numbered lines. The title line is omitted when empty.
pub fn render_dialog(snapshot: &DialogSnapshot) -> String {
    let mut out = String::new();
    if let Some(title) = &snapshot.title {
        out.push_str(&format!("== {} ==\n", title));
    }
    if snapshot.actions.is_empty() {
        out.push_str("  (no actions)\n");
    }
    for (index, action) in snapshot.actions.iter().enumerate() {
        let marker = match action.role {
            ActionRole::Default => "",
            ActionRole::Cancel => " [cancel]",
            ActionRole::Destructive => " [!]",
        };
        out.push_str(&format!("  {}) {}{}\n", index + 1, action.title, marker));
    }
    out
}

pub const HELP: &str = "\
commands:
  o            open the menu
  <n>          select action n
  d            dismiss (tap outside)
  m <menu>     switch to numbers | animals | empty | cars
  j            print the dialog as JSON
  h            help
  q            quit";

// =============================================================================
// Commands
// =============================================================================

/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open,
    Dismiss,
    /// 1-based action index.
    Select(usize),
    Switch(MenuKind),
    Json,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown menu '{0}'")]
    UnknownMenu(String),

    #[error("Unknown command '{0}' (h for help)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let head = parts.next().ok_or(CommandError::Empty)?;

        if let Ok(index) = head.parse::<usize>() {
            return Ok(Command::Select(index));
        }

        match head {
            "o" | "open" => Ok(Command::Open),
            "d" | "dismiss" => Ok(Command::Dismiss),
            "j" | "json" => Ok(Command::Json),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" => Ok(Command::Quit),
            "m" | "menu" => {
                let name = parts.next().unwrap_or_default();
                <MenuKind as ValueEnum>::from_str(name, true)
                    .map(Command::Switch)
                    .map_err(|_| CommandError::UnknownMenu(name.to_string()))
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
