//! Inventory gating of choices.
//!
//! A gated-away choice is omitted from the list entirely rather than shown
//! disabled, so the player never sees an option that would spoil what an
//! item is for.

use gb_core::{Choice, Scene};

/// Whether `choice` may be offered to a player holding `inventory`.
///
/// A choice is unavailable when its `requires` item is missing or its
/// `hide_if` item is present.
pub fn is_choice_available(choice: &Choice, inventory: &[String]) -> bool {
    let holds = |item: &String| inventory.contains(item);
    let missing_requirement = choice.requires.as_ref().is_some_and(|item| !holds(item));
    let hidden = choice.hide_if.as_ref().is_some_and(holds);
    !(missing_requirement || hidden)
}

/// The choices of `scene` that a player holding `inventory` may see, in
/// authored order.
pub fn visible_choices<'a>(scene: &'a Scene, inventory: &[String]) -> Vec<&'a Choice> {
    scene
        .choices
        .iter()
        .filter(|c| is_choice_available(c, inventory))
        .collect()
}
