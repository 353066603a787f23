//! Error types for Duet.

use thiserror::Error;

use crate::dialog::Stage;

/// Host input errors - surfaced to the caller of `select`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// No action with this id in the current rendering.
    #[error("Unknown action '{id}' on {stage:?} stage")]
    UnknownAction { id: String, stage: Stage },

    /// Selection attempted while no dialog is on screen.
    #[error("Menu is not visible")]
    NotVisible,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A stage provider broke its side of the coordinator contract.
///
/// These never fail an operation. They are logged and recorded so tests can
/// catch providers that call the wrong operation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContractViolation {
    /// `pass` called while the secondary stage was active.
    #[error("pass() called from the secondary stage")]
    PassFromSecondary,

    /// `complete` called while the initial stage was active.
    #[error("complete() called from the initial stage")]
    CompleteFromInitial,
}
