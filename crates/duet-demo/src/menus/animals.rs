//! Animal category → breed picker.

use serde::{Deserialize, Serialize};

use duet_menu::{Coordinator, MenuAction, StageProvider};

use super::DemoPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Cat,
    Dog,
}

impl Animal {
    pub fn name(self) -> &'static str {
        match self {
            Animal::Cat => "Cat",
            Animal::Dog => "Dog",
        }
    }

    fn breeds(self) -> &'static [&'static str] {
        match self {
            Animal::Cat => &["Long hair", "Short hair", "Coon"],
            Animal::Dog => &["Labrador", "Poodle", "Beagle"],
        }
    }
}

/// Initial stage: one action per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimalStage;

impl StageProvider<DemoPayload> for AnimalStage {
    fn title(&self) -> String {
        "Pick a category".to_string()
    }

    fn render(&self, _coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        [Animal::Cat, Animal::Dog]
            .into_iter()
            .map(|animal| {
                MenuAction::passing(
                    animal.name().to_lowercase(),
                    animal.name(),
                    DemoPayload::Animal(animal),
                )
            })
            .collect()
    }
}

/// Secondary stage: breeds of the passed category.
///
/// Renders nothing when the event carries no category.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreedStage;

impl StageProvider<DemoPayload> for BreedStage {
    fn title(&self) -> String {
        "You pick an animal".to_string()
    }

    fn render(&self, coordinator: &Coordinator<DemoPayload>) -> Vec<MenuAction<DemoPayload>> {
        let animal = match coordinator.pending_event().value() {
            Some(DemoPayload::Animal(animal)) => *animal,
            _ => return Vec::new(),
        };

        let mut actions: Vec<MenuAction<DemoPayload>> = animal
            .breeds()
            .iter()
            .map(|breed| {
                let id = breed.to_lowercase().replace(' ', "_");
                MenuAction::new(id, *breed, move |c: &Coordinator<DemoPayload>| {
                    tracing::info!("Picked {} ({})", breed, animal.name());
                    c.complete();
                })
            })
            .collect();
        actions.push(MenuAction::cancel());
        actions
    }
}
