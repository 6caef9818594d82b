//! Player state and outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound for hit points. New games start here.
pub const MAX_HP: i32 = 100;

/// Clamp a hit point value into `0..=MAX_HP`.
pub fn clamp_hp(hp: i64) -> i32 {
    hp.clamp(0, i64::from(MAX_HP)) as i32
}

/// How a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No ending reached yet.
    InProgress,
    /// The victory ending was reached.
    Victory,
    /// Any other ending, including defeat by damage.
    Defeat,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Victory => write!(f, "victory"),
            Outcome::Defeat => write!(f, "defeat"),
        }
    }
}

/// The mutable state of one playthrough.
///
/// Serialized with camelCase keys; this is the `snapshot` stored in save
/// slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Player name. Empty means no game is active.
    pub player_name: String,
    /// Hit points, always within `0..=MAX_HP`.
    pub hp: i32,
    /// Items in acquisition order. Duplicates are kept.
    pub inventory: Vec<String>,
    /// The scene the player is in.
    pub current_scene_id: String,
    /// Set once a non-victory ending is reached.
    pub is_game_over: bool,
    /// Set once the victory ending is reached.
    pub is_victory: bool,
}

impl PlayerState {
    /// The landing state: no player, full health, at the start scene.
    pub fn new(start_scene: impl Into<String>) -> Self {
        Self {
            player_name: String::new(),
            hp: MAX_HP,
            inventory: Vec::new(),
            current_scene_id: start_scene.into(),
            is_game_over: false,
            is_victory: false,
        }
    }

    /// A fresh game for `name` at the start scene.
    pub fn started(name: impl Into<String>, start_scene: impl Into<String>) -> Self {
        Self {
            player_name: name.into(),
            ..Self::new(start_scene)
        }
    }

    /// Whether a game is in progress or finished (a name has been entered).
    pub fn is_active(&self) -> bool {
        !self.player_name.is_empty()
    }

    /// Whether an ending has been reached.
    pub fn is_terminal(&self) -> bool {
        self.is_game_over || self.is_victory
    }

    /// The current outcome.
    pub fn outcome(&self) -> Outcome {
        if self.is_victory {
            Outcome::Victory
        } else if self.is_game_over {
            Outcome::Defeat
        } else {
            Outcome::InProgress
        }
    }

    /// Check if the inventory holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Append an item to the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Subtract hit points, keeping the result within `0..=MAX_HP`.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = clamp_hp(i64::from(self.hp) - i64::from(amount));
    }
}
