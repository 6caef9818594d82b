//! Pure transition rules.

use gb_core::{Choice, Effect, Story};

use crate::player::PlayerState;

/// Apply an arrival effect: append the item, then subtract the damage.
pub fn apply_effect(state: &mut PlayerState, effect: &Effect) {
    if let Some(item) = &effect.add_item {
        state.add_item(item.clone());
    }
    if let Some(damage) = effect.take_damage {
        state.take_damage(damage);
    }
}

/// Compute the state after taking `choice` from `state`.
///
/// In order: the current scene's arrival effect is applied (again, on every
/// choice taken from that scene), then the choice's own effect, then the
/// player moves to `choice.to`. Reaching an ending sets the victory or game
/// over flag. Finally [`settle`] sends a player with no hit points left to
/// the defeat scene.
///
/// Gating and membership are not checked here; see
/// [`GameMachine::apply_choice`](crate::GameMachine::apply_choice).
pub fn transition(story: &Story, state: &PlayerState, choice: &Choice) -> PlayerState {
    let mut next = state.clone();

    if let Some(effect) = story
        .scene(&state.current_scene_id)
        .and_then(|scene| scene.on_arrive.as_ref())
    {
        apply_effect(&mut next, effect);
    }
    if let Some(effect) = &choice.on_arrive {
        apply_effect(&mut next, effect);
    }

    next.current_scene_id = choice.to.clone();

    if let Some(scene) = story.scene(&next.current_scene_id)
        && scene.is_ending
    {
        next.is_victory = story.is_victory(&scene.id);
        next.is_game_over = !next.is_victory;
    }

    settle(story, &mut next);
    next
}

/// Restore the hit-point invariant on `state`.
///
/// A player at 0 hp who has not won is moved to the defeat scene with the
/// game over flag set, whichever scene or ending they were in. Returns
/// whether the state changed.
pub fn settle(story: &Story, state: &mut PlayerState) -> bool {
    if state.hp > 0 || state.is_victory {
        return false;
    }
    if state.is_game_over && state.current_scene_id == story.defeat_id() {
        return false;
    }
    tracing::debug!(from = %state.current_scene_id, "hit points depleted");
    state.current_scene_id = story.defeat_id().to_string();
    state.is_game_over = true;
    true
}
