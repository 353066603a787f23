//! Single-stage car type picker.

use duet_menu::{ActionRole, Coordinator, MenuAction, StageProvider};

use super::DemoPayload;

static CAR_TYPES: [&str; 3] = ["Sedan", "SUV", "Truck"];

/// Picking a car just closes the dialog. There is no secondary stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarStage;

impl StageProvider<DemoPayload> for CarStage {
    fn title(&self) -> String {
        "Pick a car type".to_string()
    }

    fn render(&self, _coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        let mut actions: Vec<MenuAction<DemoPayload>> = CAR_TYPES
            .iter()
            .map(|car| {
                MenuAction::new(car.to_lowercase(), *car, move |_: &Coordinator<DemoPayload>| {
                    tracing::info!("Picked {}", car);
                })
            })
            .collect();
        actions.push(MenuAction::dismissing("cancel", "Cancel").with_role(ActionRole::Cancel));
        actions
    }
}
