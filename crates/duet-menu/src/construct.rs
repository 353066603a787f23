//! The menu construct: visibility, stage selection and the settle timer.
//!
//! The construct owns one coordinator and reacts to its signals:
//!
//! - secondary requested: flip to the secondary stage, dismiss, and present
//!   again once the settle delay has elapsed
//! - reset requested: back to the initial stage and hidden, immediately
//!
//! Content is never stored. `snapshot()` renders whichever provider the stage
//! flag selects, every time it is called.
//!
//! ## Settle Timer
//!
//! The delayed presentation runs as a tokio task holding only a `Weak`
//! reference and the generation it was scheduled under. Any superseding
//! transition bumps the generation, and dropping the construct aborts the
//! task, so a late timer never touches a replaced or discarded construct.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use duet_core::{DialogSnapshot, MenuConfig, MenuError, Stage};

use crate::action::MenuAction;
use crate::coordinator::Coordinator;
use crate::provider::{NoopStage, StageProvider};
use crate::Payload;

// =============================================================================
// Identity & Phase
// =============================================================================

/// Identifies one construct in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(Uuid);

impl MenuId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu:{}", self.0.simple())
    }
}

/// Where the construct is in its cycle. Derived from state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPhase {
    /// No dialog on screen.
    Hidden,
    /// Initial stage on screen.
    ShowingInitial,
    /// Initial dialog dismissed, waiting for the settle delay.
    TransitioningToSecondary,
    /// Secondary stage on screen.
    ShowingSecondary,
}

// =============================================================================
// Shared State
// =============================================================================

#[derive(Debug, Default)]
struct ConstructState {
    visible: bool,
    on_secondary_stage: bool,
    generation: u64,
    settle: Option<JoinHandle<()>>,
}

impl ConstructState {
    /// Invalidate any pending settle timer.
    fn supersede(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.settle.take() {
            handle.abort();
        }
    }
}

struct Shared<P> {
    id: MenuId,
    config: MenuConfig,
    initial: Box<dyn StageProvider<P>>,
    secondary: Box<dyn StageProvider<P>>,
    coordinator: Coordinator<P>,
    state: Mutex<ConstructState>,
    visible_tx: watch::Sender<bool>,
    secondary_rx: Mutex<watch::Receiver<u64>>,
    reset_rx: Mutex<watch::Receiver<u64>>,
}

impl<P: Payload> Shared<P> {
    /// Write the visibility flag and broadcast it.
    ///
    /// Called with the state lock held so broadcasts keep transition order.
    fn set_visible_locked(&self, state: &mut ConstructState, visible: bool) {
        state.visible = visible;
        self.visible_tx.send_replace(visible);
    }

    /// Final step of the secondary transition, run by the settle timer.
    fn finish_transition(&self, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!("{}: stale settle timer ignored", self.id);
            return;
        }
        state.settle = None;
        if !state.on_secondary_stage {
            return;
        }
        self.set_visible_locked(&mut state, true);
        tracing::debug!("{}: presenting secondary stage", self.id);
    }
}

// =============================================================================
// MenuConstruct
// =============================================================================

/// A two-stage menu.
///
/// ## Usage
///
/// ```ignore
/// let menu = MenuConstruct::builder(NumbersStage).secondary(CountStage).build();
///
/// menu.set_visible(true);          // initial stage on screen
/// menu.select("two")?;             // passes 4, dismisses, presents after the delay
/// // ... settle delay elapses ...
/// menu.select("3")?;               // completes, back to hidden + initial stage
/// ```
pub struct MenuConstruct<P: Payload> {
    shared: Arc<Shared<P>>,
}

impl<P: Payload> MenuConstruct<P> {
    /// Single-stage menu. The secondary stage is `NoopStage`.
    pub fn new(initial: impl StageProvider<P> + 'static) -> Self {
        Self::builder(initial).build()
    }

    /// Start building a menu from its initial stage.
    pub fn builder(initial: impl StageProvider<P> + 'static) -> MenuBuilder<P> {
        MenuBuilder {
            initial: Box::new(initial),
            secondary: None,
            config: MenuConfig::default(),
        }
    }

    // =========================================================================
    // Host Binding
    // =========================================================================

    /// Write the visibility binding.
    ///
    /// `true` presents whichever stage the stage flag selects. `false` is an
    /// external dismissal, see [`MenuConstruct::dismiss`].
    pub fn set_visible(&self, visible: bool) {
        if !visible {
            self.dismiss();
            return;
        }

        let shared = &self.shared;
        let mut state = shared.state.lock();
        if state.visible {
            return;
        }
        state.supersede();
        shared.set_visible_locked(&mut state, true);
        tracing::debug!(
            "{}: shown on {:?} stage",
            shared.id,
            stage_of(state.on_secondary_stage)
        );
    }

    /// External dismissal (e.g. the user taps outside the dialog).
    ///
    /// Like a platform dialog, this runs the visible stage's cancel action if
    /// it has one. Otherwise the dialog closes and the construct falls back to
    /// the initial stage, since nothing else could complete the secondary one.
    /// A pending settle timer is cancelled.
    pub fn dismiss(&self) {
        if self.is_visible() {
            let stage = self.stage();
            let cancel = self
                .render_stage(stage)
                .into_iter()
                .find(|a| a.info().is_cancel());
            if let Some(cancel) = cancel {
                tracing::debug!("{}: dismissal routed to '{}'", self.shared.id, cancel.id());
                self.dispatch(stage, &cancel);
                return;
            }
        }

        let shared = &self.shared;
        let mut state = shared.state.lock();
        state.supersede();
        if state.visible {
            shared.set_visible_locked(&mut state, false);
        }
        if state.on_secondary_stage {
            state.on_secondary_stage = false;
            shared.coordinator.set_active_stage(Stage::Initial);
            tracing::debug!("{}: dismissed, back to initial stage", shared.id);
        } else {
            tracing::debug!("{}: dismissed", shared.id);
        }
    }

    /// Subscribe to the visibility binding.
    pub fn subscribe_visibility(&self) -> watch::Receiver<bool> {
        self.shared.visible_tx.subscribe()
    }

    // =========================================================================
    // User Actions
    // =========================================================================

    /// Select an action from the visible dialog by id.
    ///
    /// Runs the action's handler, closes the dialog as a host would on any
    /// selection, then applies whatever transition the handler requested.
    pub fn select(&self, action_id: &str) -> Result<(), MenuError> {
        if !self.is_visible() {
            return Err(MenuError::NotVisible);
        }

        let stage = self.stage();
        let action = self
            .render_stage(stage)
            .into_iter()
            .find(|a| a.id() == action_id)
            .ok_or_else(|| MenuError::UnknownAction {
                id: action_id.to_string(),
                stage,
            })?;

        tracing::debug!("{}: selected '{}' on {:?} stage", self.shared.id, action_id, stage);
        self.dispatch(stage, &action);
        Ok(())
    }

    /// Apply pending coordinator signals.
    ///
    /// `select` and `dismiss` call this already. Hosts that drive the
    /// coordinator directly call it afterwards.
    pub fn process_signals(&self) {
        let shared = &self.shared;

        let secondary = consume_edge(&shared.secondary_rx);
        if secondary {
            self.begin_transition();
        }

        let reset = consume_edge(&shared.reset_rx);
        if reset {
            let mut state = shared.state.lock();
            state.supersede();
            state.on_secondary_stage = false;
            shared.set_visible_locked(&mut state, false);
            shared.coordinator.set_active_stage(Stage::Initial);
            tracing::debug!("{}: reset to initial stage", shared.id);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the dialog for the current stage.
    pub fn snapshot(&self) -> DialogSnapshot {
        let (stage, visible) = {
            let state = self.shared.state.lock();
            (stage_of(state.on_secondary_stage), state.visible)
        };
        DialogSnapshot {
            title: self.title_for(stage),
            actions: self
                .render_stage(stage)
                .iter()
                .map(|a| a.info().clone())
                .collect(),
            stage,
            visible,
        }
    }

    /// Title of the current stage, `None` when empty.
    pub fn title(&self) -> Option<String> {
        self.title_for(self.stage())
    }

    // =========================================================================
    // Read Methods
    // =========================================================================

    pub fn id(&self) -> MenuId {
        self.shared.id
    }

    pub fn config(&self) -> &MenuConfig {
        &self.shared.config
    }

    /// The coordinator owned by this construct.
    pub fn coordinator(&self) -> &Coordinator<P> {
        &self.shared.coordinator
    }

    pub fn is_visible(&self) -> bool {
        self.shared.state.lock().visible
    }

    /// The stage the stage flag selects.
    pub fn stage(&self) -> Stage {
        stage_of(self.shared.state.lock().on_secondary_stage)
    }

    pub fn phase(&self) -> MenuPhase {
        let state = self.shared.state.lock();
        match (state.visible, state.on_secondary_stage) {
            (true, false) => MenuPhase::ShowingInitial,
            (true, true) => MenuPhase::ShowingSecondary,
            (false, true) if state.settle.is_some() => MenuPhase::TransitioningToSecondary,
            (false, _) => MenuPhase::Hidden,
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn provider(&self, stage: Stage) -> &dyn StageProvider<P> {
        match stage {
            Stage::Initial => self.shared.initial.as_ref(),
            Stage::Secondary => self.shared.secondary.as_ref(),
        }
    }

    fn render_stage(&self, stage: Stage) -> Vec<MenuAction<P>> {
        self.provider(stage).render(&self.shared.coordinator)
    }

    fn title_for(&self, stage: Stage) -> Option<String> {
        let title = self.provider(stage).title();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    /// Run an action the way a host does: handler first, then the dialog closes.
    fn dispatch(&self, stage: Stage, action: &MenuAction<P>) {
        let shared = &self.shared;
        shared.coordinator.set_active_stage(stage);
        action.run(&shared.coordinator);

        {
            let mut state = shared.state.lock();
            if state.visible {
                shared.set_visible_locked(&mut state, false);
            }
        }

        self.process_signals();
    }

    /// Dismiss, flip to the secondary stage, and schedule the presentation.
    fn begin_transition(&self) {
        let shared = &self.shared;
        let delay = shared.config.settle_delay();

        let mut state = shared.state.lock();
        state.supersede();
        state.on_secondary_stage = true;
        shared.set_visible_locked(&mut state, false);
        shared.coordinator.set_active_stage(Stage::Secondary);
        let generation = state.generation;

        if delay.is_zero() {
            drop(state);
            shared.finish_transition(generation);
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let weak: Weak<Shared<P>> = Arc::downgrade(shared);
                state.settle = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(shared) = weak.upgrade() {
                        shared.finish_transition(generation);
                    }
                }));
                tracing::debug!(
                    "{}: secondary stage scheduled in {:?} (generation {})",
                    shared.id,
                    delay,
                    generation
                );
            }
            Err(_) => {
                tracing::warn!(
                    "{}: no tokio runtime for the settle delay, presenting immediately",
                    shared.id
                );
                drop(state);
                shared.finish_transition(generation);
            }
        }
    }
}

impl<P: Payload> Drop for MenuConstruct<P> {
    fn drop(&mut self) {
        self.shared.state.lock().supersede();
        tracing::debug!("{}: torn down", self.shared.id);
    }
}

impl<P: Payload> fmt::Debug for MenuConstruct<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuConstruct")
            .field("id", &self.shared.id)
            .field("phase", &self.phase())
            .field("coordinator", &self.shared.coordinator)
            .finish()
    }
}

fn stage_of(on_secondary_stage: bool) -> Stage {
    if on_secondary_stage {
        Stage::Secondary
    } else {
        Stage::Initial
    }
}

/// Consume one edge from a signal receiver. Coalesced edges count once.
fn consume_edge(rx: &Mutex<watch::Receiver<u64>>) -> bool {
    let mut rx = rx.lock();
    match rx.has_changed() {
        Ok(true) => {
            rx.borrow_and_update();
            true
        }
        _ => false,
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`MenuConstruct`].
pub struct MenuBuilder<P> {
    initial: Box<dyn StageProvider<P>>,
    secondary: Option<Box<dyn StageProvider<P>>>,
    config: MenuConfig,
}

impl<P: Payload> MenuBuilder<P> {
    /// Secondary stage content. Defaults to `NoopStage`.
    pub fn secondary(mut self, provider: impl StageProvider<P> + 'static) -> Self {
        self.secondary = Some(Box::new(provider));
        self
    }

    pub fn config(mut self, config: MenuConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> MenuConstruct<P> {
        let coordinator = Coordinator::new();
        let secondary_rx = coordinator.subscribe_secondary();
        let reset_rx = coordinator.subscribe_reset();
        let (visible_tx, _) = watch::channel(false);
        let id = MenuId::new();

        tracing::info!(
            "{}: created ({} stage, settle {:?})",
            id,
            if self.secondary.is_some() { "two" } else { "single" },
            self.config.settle_delay()
        );

        MenuConstruct {
            shared: Arc::new(Shared {
                id,
                config: self.config,
                initial: self.initial,
                secondary: self
                    .secondary
                    .unwrap_or_else(|| Box::new(NoopStage) as Box<dyn StageProvider<P>>),
                coordinator,
                state: Mutex::new(ConstructState::default()),
                visible_tx,
                secondary_rx: Mutex::new(secondary_rx),
                reset_rx: Mutex::new(reset_rx),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
