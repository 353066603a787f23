//! Secondary stage opened without data.

use duet_menu::{Coordinator, MenuAction, StageProvider};

use super::DemoPayload;

/// Initial stage with a single action that passes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStage;

impl StageProvider<DemoPayload> for EmptyStage {
    fn render(&self, _coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        vec![MenuAction::passing_empty("open", "Open 2ndary")]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MessageStage;

impl StageProvider<DemoPayload> for MessageStage {
    fn title(&self) -> String {
        "Nothing was passed".to_string()
    }

    fn render(&self, _coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        vec![
            MenuAction::new("message", "Say hello", |c: &Coordinator<DemoPayload>| {
                tracing::info!("Hello from the secondary stage");
                c.complete();
            }),
            MenuAction::cancel(),
        ]
    }
}
