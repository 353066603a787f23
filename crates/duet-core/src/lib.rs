//! Core types for the Duet two-stage menu.
//!
//! This crate contains shared data structures that are used across all Duet crates:
//! - The event handed from the initial stage to the secondary stage
//! - Action and dialog descriptions handed to hosts
//! - Configuration types
//! - Error types

mod action;
mod config;
mod dialog;
mod error;
mod event;

pub use action::{ActionInfo, ActionRole};
pub use config::{config_dir, config_path, load_config, load_config_from, MenuConfig};
pub use dialog::{DialogSnapshot, Stage};
pub use error::{ConfigError, ContractViolation, MenuError};
pub use event::Event;
