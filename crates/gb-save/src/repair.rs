//! Defaulting policy for malformed snapshots.

use serde_json::Value;

use gb_core::Story;
use gb_engine::{MAX_HP, PlayerState};
use gb_engine::player::clamp_hp;

use crate::record::RawSnapshot;

/// Hit points from a stored value: numbers are truncated and clamped,
/// anything else means full health.
pub fn repair_hp(value: Option<&Value>) -> i32 {
    let Some(value) = value else {
        return MAX_HP;
    };
    match value.as_i64().or_else(|| value.as_f64().map(|f| f.trunc() as i64)) {
        Some(hp) => clamp_hp(hp),
        None => MAX_HP,
    }
}

/// Inventory from a stored value: non-arrays become empty and non-string
/// entries are dropped.
pub fn repair_inventory(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl RawSnapshot {
    /// Rebuild a [`PlayerState`] from whatever was stored.
    ///
    /// Missing or mistyped fields take their new-game defaults, a scene id
    /// the story does not know falls back to the start scene, and a record
    /// claiming both victory and game over keeps only the one its scene
    /// supports.
    pub fn repair(&self, story: &Story) -> PlayerState {
        let flag = |key: &str| self.field(key).and_then(Value::as_bool).unwrap_or(false);

        let current_scene_id = self
            .str_field("currentSceneId")
            .filter(|id| story.scene(id).is_some())
            .unwrap_or(story.start_id())
            .to_string();

        let mut state = PlayerState {
            player_name: self.str_field("playerName").unwrap_or_default().to_string(),
            hp: repair_hp(self.field("hp")),
            inventory: repair_inventory(self.field("inventory")),
            current_scene_id,
            is_game_over: flag("isGameOver"),
            is_victory: flag("isVictory"),
        };

        if state.is_game_over && state.is_victory {
            state.is_victory = story.is_victory(&state.current_scene_id);
            state.is_game_over = !state.is_victory;
        }

        state
    }
}
