//! Arrival effects granted by scenes and choices.

use serde::{Deserialize, Serialize};

/// An item grant and/or damage applied when a scene or choice triggers it.
///
/// Both parts are optional and independent; an effect with neither is a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    /// Item appended to the player's inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_item: Option<String>,
    /// Hit points subtracted from the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_damage: Option<i32>,
}

impl Effect {
    /// An effect that grants a single item.
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            add_item: Some(name.into()),
            take_damage: None,
        }
    }

    /// An effect that deals damage.
    pub fn damage(amount: i32) -> Self {
        Self {
            add_item: None,
            take_damage: Some(amount),
        }
    }

    /// Whether applying this effect changes nothing.
    pub fn is_empty(&self) -> bool {
        self.add_item.is_none() && self.take_damage.is_none()
    }
}
