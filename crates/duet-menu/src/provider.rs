//! Stage content providers.

use std::marker::PhantomData;

use crate::action::MenuAction;
use crate::coordinator::Coordinator;
use crate::Payload;

/// Content of one menu stage.
///
/// Rendering is a pure function of the coordinator's state. Providers hold
/// no state of their own and never cache what they render; the construct
/// calls `render` again every time it needs the dialog.
pub trait StageProvider<P>: Send + Sync {
    /// Dialog title. An empty title hides the title chrome.
    fn title(&self) -> String {
        String::new()
    }

    /// Selectable actions for the current coordinator state.
    fn render(&self, coordinator: &Coordinator<P>) -> Vec<MenuAction<P>>;
}

/// Stage with no title and no actions.
///
/// The secondary stage of a single-stage menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStage;

impl<P: Payload> StageProvider<P> for NoopStage {
    fn render(&self, _coordinator: &Coordinator<P>) -> Vec<MenuAction<P>> {
        Vec::new()
    }
}

/// Stage built from a title and a render closure.
pub struct FnStage<P, F> {
    title: String,
    render: F,
    _payload: PhantomData<fn() -> P>,
}

impl<P, F> FnStage<P, F>
where
    P: Payload,
    F: Fn(&Coordinator<P>) -> Vec<MenuAction<P>> + Send + Sync,
{
    pub fn new(title: impl Into<String>, render: F) -> Self {
        Self {
            title: title.into(),
            render,
            _payload: PhantomData,
        }
    }
}

impl<P, F> StageProvider<P> for FnStage<P, F>
where
    P: Payload,
    F: Fn(&Coordinator<P>) -> Vec<MenuAction<P>> + Send + Sync,
{
    fn title(&self) -> String {
        self.title.clone()
    }

    fn render(&self, coordinator: &Coordinator<P>) -> Vec<MenuAction<P>> {
        (self.render)(coordinator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_core::Event;

    #[test]
    fn test_noop_stage_is_empty() {
        let coordinator = Coordinator::<u32>::new();
        let stage = NoopStage;

        assert_eq!(StageProvider::<u32>::title(&stage), "");
        assert!(stage.render(&coordinator).is_empty());
    }

    #[test]
    fn test_fn_stage_renders_from_event() {
        let stage = FnStage::new("Pick", |c: &Coordinator<u32>| {
            let n = c.pending_event().value().copied().unwrap_or(0);
            (1..=n)
                .map(|i| MenuAction::completing(i.to_string(), i.to_string()))
                .collect()
        });

        let coordinator = Coordinator::with_event(Event::WithValue(3u32));
        assert_eq!(stage.title(), "Pick");
        assert_eq!(stage.render(&coordinator).len(), 3);

        let unset = Coordinator::<u32>::new();
        assert!(stage.render(&unset).is_empty());
    }
}
