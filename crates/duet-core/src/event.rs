//! The value that crosses from the initial stage to the secondary stage.

use serde::{Deserialize, Serialize};

/// Data handed from the initial stage to the secondary stage.
///
/// `P` is the payload type a menu chooses for itself. Demo menus use small
/// closed enums; a menu that never carries data can use `()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Event<P> {
    /// The secondary stage opens with a payload.
    WithValue(P),

    /// The secondary stage opens without any data.
    Empty,

    /// Nothing has been passed yet.
    None,
}

impl<P> Event<P> {
    /// Returns the payload, if any.
    pub fn value(&self) -> Option<&P> {
        match self {
            Event::WithValue(value) => Some(value),
            Event::Empty | Event::None => None,
        }
    }

    /// Check if no event has been produced yet.
    pub fn is_none(&self) -> bool {
        matches!(self, Event::None)
    }

    /// Check if this event opens the secondary stage (`WithValue` or `Empty`).
    pub fn is_passed(&self) -> bool {
        !self.is_none()
    }
}

impl<P> Default for Event<P> {
    fn default() -> Self {
        Event::None
    }
}

impl<P> From<P> for Event<P> {
    fn from(value: P) -> Self {
        Event::WithValue(value)
    }
}
