//! Demo frontend for Duet.
//!
//! This crate provides:
//! - The demo menus (numbers, animals, empty, cars)
//! - A text host that draws dialogs and parses commands
//! - `DemoApp`, the IO-free application state driven by the `duet` binary

pub mod app;
pub mod host;
pub mod menus;

// Re-export commonly used types
pub use app::{DemoApp, Reply};
pub use host::{render_dialog, Command, CommandError, HELP};
pub use menus::{Animal, DemoPayload, MenuKind};
