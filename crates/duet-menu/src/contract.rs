//! Checks for the secondary-stage contract.
//!
//! Every action a secondary stage renders must call `complete()` exactly once,
//! cancel included. An action that forgets leaves the construct on the
//! secondary stage for the next invocation.

use duet_core::{ActionInfo, Event, Stage};

use crate::coordinator::Coordinator;
use crate::provider::StageProvider;
use crate::Payload;

/// Actions rendered for `event` that do not call `complete()` exactly once.
///
/// Each action runs against its own fresh coordinator so actions cannot
/// mask each other.
pub fn missing_completions<P: Payload>(
    provider: &dyn StageProvider<P>,
    event: Event<P>,
) -> Vec<ActionInfo> {
    let rendered = provider.render(&Coordinator::with_event(event.clone()));

    rendered
        .iter()
        .filter(|action| {
            let coordinator = Coordinator::with_event(event.clone());
            coordinator.set_active_stage(Stage::Secondary);
            action.run(&coordinator);
            coordinator.complete_count() != 1
        })
        .map(|action| action.info().clone())
        .collect()
}

/// Check every event in `events`. Returns the offending action titles.
pub fn audit_secondary<P: Payload>(
    provider: &dyn StageProvider<P>,
    events: impl IntoIterator<Item = Event<P>>,
) -> Result<(), Vec<String>> {
    let offenders: Vec<String> = events
        .into_iter()
        .flat_map(|event| {
            let label = format!("{:?}", event);
            missing_completions(provider, event)
                .into_iter()
                .map(move |info| format!("{} ({})", info.title, label))
        })
        .collect();

    if offenders.is_empty() {
        Ok(())
    } else {
        tracing::warn!("Secondary stage actions missing complete(): {:?}", offenders);
        Err(offenders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MenuAction;
    use crate::provider::FnStage;

    #[test]
    fn test_complete_stage_passes() {
        let stage: &dyn StageProvider<u32> = &FnStage::new("", |_: &Coordinator<u32>| {
            vec![MenuAction::completing("a", "A"), MenuAction::cancel()]
        });
        assert!(missing_completions(stage, Event::Empty).is_empty());
        assert!(audit_secondary(stage, [Event::Empty, Event::WithValue(1)]).is_ok());
    }

    #[test]
    fn test_missing_and_double_completion_detected() {
        let stage: &dyn StageProvider<u32> = &FnStage::new("", |_: &Coordinator<u32>| {
            vec![
                MenuAction::dismissing("forgot", "Forgot"),
                MenuAction::new("twice", "Twice", |c: &Coordinator<u32>| {
                    c.complete();
                    c.complete();
                }),
                MenuAction::cancel(),
            ]
        });

        let missing = missing_completions(stage, Event::Empty);
        let ids: Vec<&str> = missing.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["forgot", "twice"]);

        let err = audit_secondary(stage, [Event::Empty]).unwrap_err();
        assert_eq!(err, vec!["Forgot (Empty)", "Twice (Empty)"]);
    }
}
