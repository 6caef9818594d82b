//! Property tests for the state machine over random playthroughs.

use gb_core::{Choice, Effect, Scene, Story, StoryConfig};
use gb_engine::{GameMachine, MAX_HP};
use proptest::prelude::*;

/// A small graph with healing, heavy damage, and loops.
fn brutal_story() -> Story {
    Story::from_scenes(
        vec![
            Scene::new("start", "A swamp.")
                .with_choice(Choice::new("Wade", "bog").with_effect(Effect::damage(35)))
                .with_choice(Choice::new("Drink", "start").with_effect(Effect::damage(-25)))
                .with_choice(Choice::new("Search", "hollow").with_effect(Effect::item("Salt")))
                .with_choice(Choice::new("Quit", "badEnding")),
            Scene::new("bog", "Sucking mud.")
                .with_effect(Effect::damage(15))
                .with_choice(Choice::new("Push on", "bog"))
                .with_choice(Choice::new("Back", "start"))
                .with_choice(Choice::new("Dive", "badEnding").with_effect(Effect::damage(90))),
            Scene::new("hollow", "A dry hollow.")
                .with_choice(Choice::new("Salt the ground", "goodEnding").requiring("Salt"))
                .with_choice(Choice::new("Leave", "start").hidden_by("Salt"))
                .with_choice(Choice::new("Rest", "hollow").with_effect(Effect::damage(-100)))
                .with_choice(Choice::new("Wander", "bog")),
            Scene::new("goodEnding", "Saved.").ending(),
            Scene::new("badEnding", "Lost.").ending(),
            Scene::new("gameOver_hp", "Fallen.").ending(),
        ],
        StoryConfig::default(),
    )
    .expect("story is valid")
}

fn check_invariants(m: &GameMachine) -> Result<(), TestCaseError> {
    let state = m.snapshot();
    prop_assert!((0..=MAX_HP).contains(&state.hp), "hp out of range: {}", state.hp);
    prop_assert!(!(state.is_game_over && state.is_victory));
    if state.hp == 0 && !state.is_victory {
        prop_assert!(state.is_game_over);
        prop_assert_eq!(state.current_scene_id.as_str(), m.story().defeat_id());
    }
    Ok(())
}

fn play(story: Story, picks: &[usize]) -> Result<(), TestCaseError> {
    let mut m = GameMachine::new(story);
    m.start_game("Maria");
    check_invariants(&m)?;
    for &pick in picks {
        let visible = m.available_choices().len();
        if m.is_finished() || visible == 0 {
            break;
        }
        m.choose(pick % visible)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        check_invariants(&m)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn bundled_story_keeps_invariants(picks in prop::collection::vec(0usize..8, 0..20)) {
        play(Story::bundled().expect("bundled story is valid"), &picks)?;
    }

    #[test]
    fn brutal_story_keeps_invariants(picks in prop::collection::vec(0usize..8, 0..40)) {
        play(brutal_story(), &picks)?;
    }

    #[test]
    fn finished_games_reject_everything(picks in prop::collection::vec(0usize..8, 0..40)) {
        let mut m = GameMachine::new(brutal_story());
        m.start_game("Maria");
        for &pick in &picks {
            let visible = m.available_choices().len();
            if m.is_finished() || visible == 0 {
                break;
            }
            m.choose(pick % visible).map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        if m.is_finished() {
            let before = m.snapshot().clone();
            prop_assert!(m.choose(0).is_err());
            prop_assert_eq!(m.snapshot(), &before);
        }
    }
}
