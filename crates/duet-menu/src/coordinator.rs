//! Per-menu coordinator with edge-triggered transition signals.
//!
//! Mutation = notification. `pass` and `complete` bump a sequence number on a
//! `tokio::sync::watch` channel, so observers see one edge per call and never
//! a level. A receiver created by `subscribe_*` has already seen the current
//! sequence number, so the un-set initial state never fires.

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;

use duet_core::{ContractViolation, Event, Stage};

use crate::Payload;

// =============================================================================
// Coordinator
// =============================================================================

/// Mediator between the two stages of one menu construct.
///
/// Holds the event passed by the initial stage and raises the signals the
/// construct reacts to. One coordinator belongs to exactly one construct.
///
/// ## Caller Obligations
///
/// - `pass` is only called by initial-stage actions.
/// - `complete` is called exactly once by every secondary-stage action,
///   cancel included.
///
/// Breaking either rule is not an error. In debug builds it is logged and
/// recorded in [`Coordinator::violations`].
pub struct Coordinator<P> {
    pending: RwLock<Event<P>>,
    active_stage: RwLock<Stage>,
    secondary_tx: watch::Sender<u64>,
    reset_tx: watch::Sender<u64>,
    violations: Mutex<Vec<ContractViolation>>,
}

impl<P: Payload> Coordinator<P> {
    /// Create a coordinator with no pending event.
    pub fn new() -> Self {
        Self::with_event(Event::None)
    }

    /// Create a coordinator already holding `event`.
    ///
    /// Useful for rendering a secondary stage in isolation.
    pub fn with_event(event: Event<P>) -> Self {
        let (secondary_tx, _) = watch::channel(0);
        let (reset_tx, _) = watch::channel(0);
        Self {
            pending: RwLock::new(event),
            active_stage: RwLock::new(Stage::Initial),
            secondary_tx,
            reset_tx,
            violations: Mutex::new(Vec::new()),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Record `event` and request the secondary stage.
    ///
    /// Calling again before the transition completes overwrites the event.
    pub fn pass(&self, event: impl Into<Event<P>>) {
        let event = event.into();
        self.check_stage(Stage::Initial, ContractViolation::PassFromSecondary);
        tracing::debug!("pass: {:?}", event);
        *self.pending.write() = event;
        self.secondary_tx.send_modify(|seq| *seq += 1);
    }

    /// Request the secondary stage without passing any data.
    pub fn pass_empty(&self) {
        self.pass(Event::Empty);
    }

    /// Request a reset back to the initial stage.
    pub fn complete(&self) {
        self.check_stage(Stage::Secondary, ContractViolation::CompleteFromInitial);
        tracing::debug!("complete");
        self.reset_tx.send_modify(|seq| *seq += 1);
    }

    // =========================================================================
    // Read Methods
    // =========================================================================

    /// The last event passed by the initial stage.
    ///
    /// This is never cleared on reset; the next `pass` overwrites it.
    pub fn pending_event(&self) -> Event<P> {
        self.pending.read().clone()
    }

    /// Read the pending event with a closure, without cloning it.
    pub fn with_pending_event<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Event<P>) -> R,
    {
        f(&self.pending.read())
    }

    /// Number of `pass` calls so far.
    pub fn pass_count(&self) -> u64 {
        *self.secondary_tx.borrow()
    }

    /// Number of `complete` calls so far.
    pub fn complete_count(&self) -> u64 {
        *self.reset_tx.borrow()
    }

    /// Contract violations recorded so far (debug builds only).
    pub fn violations(&self) -> Vec<ContractViolation> {
        self.violations.lock().clone()
    }

    /// The stage whose actions are currently being run.
    pub fn active_stage(&self) -> Stage {
        *self.active_stage.read()
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribe to secondary-stage requests.
    ///
    /// The current sequence number is marked seen, so only future `pass`
    /// calls are reported as changes.
    pub fn subscribe_secondary(&self) -> watch::Receiver<u64> {
        self.secondary_tx.subscribe()
    }

    /// Subscribe to reset requests. Same edge semantics as `subscribe_secondary`.
    pub fn subscribe_reset(&self) -> watch::Receiver<u64> {
        self.reset_tx.subscribe()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    pub(crate) fn set_active_stage(&self, stage: Stage) {
        *self.active_stage.write() = stage;
    }

    fn check_stage(&self, expected: Stage, violation: ContractViolation) {
        if cfg!(debug_assertions) && self.active_stage() != expected {
            tracing::warn!("Coordinator contract violation: {}", violation);
            self.violations.lock().push(violation);
        }
    }
}

impl<P: Payload> Default for Coordinator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> std::fmt::Debug for Coordinator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("pending", &*self.pending.read())
            .field("active_stage", &self.active_stage())
            .field("pass_count", &self.pass_count())
            .field("complete_count", &self.complete_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
