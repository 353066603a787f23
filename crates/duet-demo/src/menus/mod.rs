//! Demo menus.
//!
//! Four independent menus sharing one payload type:
//! - `numbers` - pick a number, then pick from that many entries
//! - `animals` - pick a category, then a breed
//! - `empty` - open the secondary stage without passing data
//! - `cars` - single stage, no secondary

mod animals;
mod cars;
mod empty;
mod numbers;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use duet_menu::{MenuConfig, MenuConstruct};

pub use animals::{Animal, AnimalStage, BreedStage};
pub use cars::CarStage;
pub use empty::{EmptyStage, MessageStage};
pub use numbers::{CountStage, NumberStage};

/// Data the demo menus pass between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoPayload {
    /// How many entries the secondary stage offers.
    Count(u32),
    /// Which breeds the secondary stage offers.
    Animal(Animal),
}

/// Which demo menu to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MenuKind {
    Numbers,
    Animals,
    Empty,
    Cars,
}

impl MenuKind {
    /// Build a fresh construct for this menu.
    pub fn build(self, config: MenuConfig) -> MenuConstruct<DemoPayload> {
        match self {
            MenuKind::Numbers => MenuConstruct::builder(NumberStage)
                .secondary(CountStage)
                .config(config)
                .build(),
            MenuKind::Animals => MenuConstruct::builder(AnimalStage)
                .secondary(BreedStage)
                .config(config)
                .build(),
            MenuKind::Empty => MenuConstruct::builder(EmptyStage)
                .secondary(MessageStage)
                .config(config)
                .build(),
            MenuKind::Cars => MenuConstruct::builder(CarStage).config(config).build(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MenuKind::Numbers => "numbers",
            MenuKind::Animals => "animals",
            MenuKind::Empty => "empty",
            MenuKind::Cars => "cars",
        }
    }
}
