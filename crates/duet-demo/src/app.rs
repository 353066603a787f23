//! Demo application state, independent of terminal IO.
//!
//! `DemoApp` owns the current menu construct and applies typed commands to
//! it. Switching menus drops the old construct and builds a fresh one, so
//! every menu starts its life with its own coordinator.

use anyhow::{anyhow, Result};

use duet_menu::{MenuConfig, MenuConstruct, MenuError};

use crate::host::{Command, HELP};
use crate::menus::{DemoPayload, MenuKind};

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print. Visibility changes are reported separately.
    Quiet,
    /// Print this text.
    Print(String),
    /// A new construct replaced the old one; re-subscribe to it.
    Switched(MenuKind),
    Quit,
}

pub struct DemoApp {
    kind: MenuKind,
    config: MenuConfig,
    menu: MenuConstruct<DemoPayload>,
}

impl DemoApp {
    pub fn new(kind: MenuKind, config: MenuConfig) -> Self {
        let menu = kind.build(config.clone());
        Self { kind, config, menu }
    }

    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    pub fn menu(&self) -> &MenuConstruct<DemoPayload> {
        &self.menu
    }

    /// Apply one command to the current menu.
    pub fn handle(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Open => {
                self.menu.set_visible(true);
                Ok(Reply::Quiet)
            }
            Command::Dismiss => {
                self.menu.dismiss();
                Ok(Reply::Quiet)
            }
            Command::Select(index) => {
                let snapshot = self.menu.snapshot();
                if !snapshot.visible {
                    return Err(MenuError::NotVisible.into());
                }
                let action = index
                    .checked_sub(1)
                    .and_then(|i| snapshot.actions.get(i))
                    .ok_or_else(|| anyhow!("No action {} (dialog has {})", index, snapshot.actions.len()))?;
                self.menu.select(&action.id)?;
                Ok(Reply::Quiet)
            }
            Command::Switch(kind) => {
                tracing::info!("Switching to {} menu", kind.name());
                self.kind = kind;
                self.menu = kind.build(self.config.clone());
                Ok(Reply::Switched(kind))
            }
            Command::Json => Ok(Reply::Print(serde_json::to_string_pretty(
                &self.menu.snapshot(),
            )?)),
            Command::Help => Ok(Reply::Print(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_menu::{Event, MenuPhase, Stage};
    use std::time::Duration;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(501)).await;
    }

    fn titles(app: &DemoApp) -> Vec<String> {
        app.menu()
            .snapshot()
            .actions
            .iter()
            .map(|a| a.title.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_numbers_scenario() {
        let mut app = DemoApp::new(MenuKind::Numbers, MenuConfig::default());

        app.handle(Command::Open).unwrap();
        assert_eq!(titles(&app), vec!["1", "2", "3"]);

        // "2" maps to 4
        app.handle(Command::Select(2)).unwrap();
        assert_eq!(app.menu().phase(), MenuPhase::TransitioningToSecondary);
        settle().await;

        assert_eq!(app.menu().phase(), MenuPhase::ShowingSecondary);
        assert_eq!(titles(&app), vec!["1", "2", "3", "4", "Cancel"]);

        app.handle(Command::Select(3)).unwrap();
        assert_eq!(app.menu().phase(), MenuPhase::Hidden);
        assert_eq!(app.menu().stage(), Stage::Initial);
        assert!(app.menu().coordinator().violations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_animals_scenario() {
        let mut app = DemoApp::new(MenuKind::Animals, MenuConfig::default());

        // Every breed, and cancel, takes the menu back to the start
        for index in 1..=4 {
            app.handle(Command::Open).unwrap();
            app.handle(Command::Select(1)).unwrap();
            settle().await;

            let snapshot = app.menu().snapshot();
            assert_eq!(snapshot.title.as_deref(), Some("You pick an animal"));
            assert_eq!(
                snapshot.action_titles(),
                vec!["Long hair", "Short hair", "Coon", "Cancel"]
            );

            app.handle(Command::Select(index)).unwrap();
            assert_eq!(app.menu().phase(), MenuPhase::Hidden);
            assert_eq!(app.menu().stage(), Stage::Initial);
        }
        assert_eq!(app.menu().coordinator().complete_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animals_without_category_can_start_over() {
        let mut app = DemoApp::new(MenuKind::Animals, MenuConfig::default());

        app.handle(Command::Open).unwrap();
        app.menu().coordinator().pass_empty();
        app.menu().process_signals();
        settle().await;

        // No category, so no breeds and no cancel either
        assert_eq!(app.menu().phase(), MenuPhase::ShowingSecondary);
        assert!(titles(&app).is_empty());

        app.handle(Command::Dismiss).unwrap();
        app.handle(Command::Open).unwrap();
        assert_eq!(app.menu().phase(), MenuPhase::ShowingInitial);
        assert_eq!(titles(&app), vec!["Cat", "Dog"]);

        app.handle(Command::Select(2)).unwrap();
        settle().await;
        assert_eq!(
            titles(&app),
            vec!["Labrador", "Poodle", "Beagle", "Cancel"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_scenario() {
        let mut app = DemoApp::new(MenuKind::Empty, MenuConfig::default());

        app.handle(Command::Open).unwrap();
        assert_eq!(app.menu().title(), None);
        assert_eq!(titles(&app), vec!["Open 2ndary"]);

        app.handle(Command::Select(1)).unwrap();
        settle().await;
        assert_eq!(app.menu().coordinator().pending_event(), Event::Empty);
        assert_eq!(titles(&app), vec!["Say hello", "Cancel"]);

        app.handle(Command::Select(1)).unwrap();
        assert_eq!(app.menu().phase(), MenuPhase::Hidden);
        assert_eq!(app.menu().stage(), Stage::Initial);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cars_scenario() {
        let mut app = DemoApp::new(MenuKind::Cars, MenuConfig::default());

        app.handle(Command::Open).unwrap();
        assert_eq!(titles(&app), vec!["Sedan", "SUV", "Truck", "Cancel"]);

        app.handle(Command::Select(2)).unwrap();
        settle().await;
        assert_eq!(app.menu().phase(), MenuPhase::Hidden);
        assert_eq!(app.menu().coordinator().pass_count(), 0);

        // Tapping outside closes it directly too
        app.handle(Command::Open).unwrap();
        app.handle(Command::Dismiss).unwrap();
        assert_eq!(app.menu().phase(), MenuPhase::Hidden);
        assert_eq!(app.menu().stage(), Stage::Initial);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_builds_fresh_menu() {
        let mut app = DemoApp::new(MenuKind::Numbers, MenuConfig::default());
        let visibility = app.menu().subscribe_visibility();

        app.handle(Command::Open).unwrap();
        app.handle(Command::Select(1)).unwrap();

        // Old construct is dropped mid-transition
        let reply = app.handle(Command::Switch(MenuKind::Animals)).unwrap();
        assert_eq!(reply, Reply::Switched(MenuKind::Animals));
        settle().await;

        assert!(!*visibility.borrow());
        assert_eq!(app.kind(), MenuKind::Animals);
        assert_eq!(app.menu().phase(), MenuPhase::Hidden);
        assert!(app.menu().coordinator().pending_event().is_none());
    }

    #[test]
    fn test_select_errors() {
        let mut app = DemoApp::new(MenuKind::Cars, MenuConfig::default());
        assert!(app.handle(Command::Select(1)).is_err());

        app.handle(Command::Open).unwrap();
        assert!(app.handle(Command::Select(0)).is_err());
        assert!(app.handle(Command::Select(9)).is_err());
        assert!(app.menu().is_visible());
    }

    #[test]
    fn test_json_reply() {
        let mut app = DemoApp::new(MenuKind::Cars, MenuConfig::default());
        app.handle(Command::Open).unwrap();

        let Reply::Print(json) = app.handle(Command::Json).unwrap() else {
            panic!("expected printed JSON");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Pick a car type");
        assert_eq!(value["stage"], "initial");
        assert_eq!(value["actions"][3]["role"], "cancel");
    }
}
