//! Selectable actions rendered by stage providers.

use std::sync::Arc;

use duet_core::{ActionInfo, ActionRole, Event};

use crate::coordinator::Coordinator;
use crate::Payload;

/// Handler run when an action is selected.
pub type ActionHandler<P> = Arc<dyn Fn(&Coordinator<P>) + Send + Sync>;

/// A selectable action: host-facing description plus the handler to run.
pub struct MenuAction<P> {
    info: ActionInfo,
    handler: ActionHandler<P>,
}

impl<P: Payload> MenuAction<P> {
    /// Create an action with a custom handler.
    pub fn new<F>(id: impl Into<String>, title: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Coordinator<P>) + Send + Sync + 'static,
    {
        Self {
            info: ActionInfo::new(id, title),
            handler: Arc::new(handler),
        }
    }

    /// Initial-stage action that opens the secondary stage with `event`.
    pub fn passing(id: impl Into<String>, title: impl Into<String>, event: impl Into<Event<P>>) -> Self {
        let event = event.into();
        Self::new(id, title, move |c| c.pass(event.clone()))
    }

    /// Initial-stage action that opens the secondary stage with no data.
    pub fn passing_empty(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, |c| c.pass_empty())
    }

    /// Secondary-stage action that completes the menu.
    pub fn completing(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, |c| c.complete())
    }

    /// Secondary-stage cancel action. Completes the menu like any other choice.
    pub fn cancel() -> Self {
        Self::completing("cancel", "Cancel").with_role(ActionRole::Cancel)
    }

    /// Action that only closes the dialog. For single-stage menus.
    pub fn dismissing(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, |_| {})
    }

    /// Set the presentation role.
    pub fn with_role(mut self, role: ActionRole) -> Self {
        self.info.role = role;
        self
    }

    /// Host-facing description.
    pub fn info(&self) -> &ActionInfo {
        &self.info
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }

    pub fn role(&self) -> ActionRole {
        self.info.role
    }

    /// Run the handler against `coordinator`.
    pub fn run(&self, coordinator: &Coordinator<P>) {
        (self.handler)(coordinator)
    }
}

impl<P> Clone for MenuAction<P> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<P> std::fmt::Debug for MenuAction<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuAction")
            .field("id", &self.info.id)
            .field("title", &self.info.title)
            .field("role", &self.info.role)
            .finish()
    }
}
