//! Scene and choice records.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;

/// A node in the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique identifier. Taken from the document key, not the record body.
    #[serde(skip)]
    pub id: String,
    /// Short place name for menus and save listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Narrative text shown on arrival.
    pub text: String,
    /// Effect applied whenever a choice is taken from this scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_arrive: Option<Effect>,
    /// Outgoing choices, in display order. Empty for terminal scenes.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Whether reaching this scene ends the game.
    #[serde(default)]
    pub is_ending: bool,
}

impl Scene {
    /// Create a scene with the given id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            text: text.into(),
            on_arrive: None,
            choices: Vec::new(),
            is_ending: false,
        }
    }

    /// Set the place name.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The title, or the id for untitled scenes.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Mark this scene as an ending.
    pub fn ending(mut self) -> Self {
        self.is_ending = true;
        self
    }

    /// Set the scene's arrival effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.on_arrive = Some(effect);
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Whether `choice` is one of this scene's outgoing edges.
    pub fn offers(&self, choice: &Choice) -> bool {
        self.choices.iter().any(|c| c == choice)
    }
}

/// A directed edge from one scene to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,
    /// Target scene id.
    pub to: String,
    /// Item that must be in the inventory for this choice to be offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
    /// Item whose presence in the inventory hides this choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_if: Option<String>,
    /// Effect applied when this choice is taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_arrive: Option<Effect>,
}

impl Choice {
    /// Create an ungated choice leading to `to`.
    pub fn new(text: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            to: to.into(),
            requires: None,
            hide_if: None,
            on_arrive: None,
        }
    }

    /// Require an item.
    pub fn requiring(mut self, item: impl Into<String>) -> Self {
        self.requires = Some(item.into());
        self
    }

    /// Hide this choice once the player holds an item.
    pub fn hidden_by(mut self, item: impl Into<String>) -> Self {
        self.hide_if = Some(item.into());
        self
    }

    /// Set the choice's effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.on_arrive = Some(effect);
        self
    }
}
