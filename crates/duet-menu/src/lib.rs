//! Two-stage menu mechanism for Duet.
//!
//! This crate provides:
//! - `Coordinator` - per-menu mediator holding the passed event and transition signals
//! - `StageProvider` - the contract a stage's content implements, plus `NoopStage`
//! - `MenuAction` - a selectable action bound to a coordinator operation
//! - `MenuConstruct` - the state machine deciding visibility and stage
//! - `contract` - checks that secondary stages always complete

pub mod action;
pub mod construct;
pub mod contract;
pub mod coordinator;
pub mod provider;

pub use action::{ActionHandler, MenuAction};
pub use construct::{MenuBuilder, MenuConstruct, MenuId, MenuPhase};
pub use coordinator::Coordinator;
pub use provider::{FnStage, NoopStage, StageProvider};

// Re-export duet_core types for convenience
pub use duet_core::{
    ActionInfo, ActionRole, ContractViolation, DialogSnapshot, Event, MenuConfig, MenuError, Stage,
};

/// Bound for data a menu passes from its initial stage to its secondary stage.
pub trait Payload: Clone + std::fmt::Debug + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + std::fmt::Debug + Send + Sync + 'static {}
