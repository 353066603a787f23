//! Numeric range picker.

use duet_menu::{Coordinator, MenuAction, StageProvider};

use super::DemoPayload;

/// Initial stage: each number passes twice its value forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberStage;

impl StageProvider<DemoPayload> for NumberStage {
    fn title(&self) -> String {
        "Pick a number".to_string()
    }

    fn render(&self, _coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        (1..=3u32)
            .map(|n| MenuAction::passing(n.to_string(), n.to_string(), DemoPayload::Count(n * 2)))
            .collect()
    }
}

/// Secondary stage: one entry per counted item, plus cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountStage;

impl StageProvider<DemoPayload> for CountStage {
    fn title(&self) -> String {
        "Pick one".to_string()
    }

    fn render(&self, coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        let count = coordinator.with_pending_event(|event| match event.value() {
            Some(DemoPayload::Count(count)) => *count,
            _ => 0,
        });

        let mut actions: Vec<_> = (1..=count)
            .map(|n| {
                MenuAction::new(n.to_string(), n.to_string(), move |c: &Coordinator<DemoPayload>| {
                    tracing::info!("Picked {} of {}", n, count);
                    c.complete();
                })
            })
            .collect();
        actions.push(MenuAction::cancel());
        actions
    }
}
