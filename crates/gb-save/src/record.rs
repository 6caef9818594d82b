//! Stored record shapes.
//!
//! On the medium each slot holds
//! `{"snapshot": {...}, "timestamp": "<RFC 3339>", "formatVersion": "1.0"}`.
//! The snapshot is kept as raw JSON until it is repaired into a
//! `PlayerState`, so saves written by older or hand-edited builds still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gb_engine::PlayerState;

use crate::repair::{repair_hp, repair_inventory};
use crate::slot::Slot;

/// Version tag written with every record.
pub const FORMAT_VERSION: &str = "1.0";

/// The shape written to the medium.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<'a> {
    pub snapshot: &'a PlayerState,
    pub timestamp: DateTime<Utc>,
    pub format_version: &'a str,
}

/// The shape read back, loose enough to detect missing parts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEnvelope {
    #[serde(default)]
    snapshot: Option<Value>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    format_version: Option<String>,
}

/// A snapshot as stored, before repair.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSnapshot(pub Value);

impl RawSnapshot {
    /// The stored JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub(crate) fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|o| o.get(key))
    }

    pub(crate) fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }
}

/// A structurally valid record read from a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRecord {
    /// Slot it was read from.
    pub slot: Slot,
    /// The stored snapshot, unrepaired.
    pub snapshot: RawSnapshot,
    /// When the record was written.
    pub timestamp: DateTime<Utc>,
    /// Format version tag; absent in records that predate it.
    pub format_version: Option<String>,
}

impl SaveRecord {
    /// Parse a stored blob.
    ///
    /// Returns `None` for anything that is not a JSON object with a
    /// snapshot object and an RFC 3339 timestamp.
    pub fn parse(slot: Slot, blob: &str) -> Option<Self> {
        let stored: StoredEnvelope = serde_json::from_str(blob).ok()?;
        let snapshot = stored.snapshot.filter(Value::is_object)?;
        let timestamp = DateTime::parse_from_rfc3339(&stored.timestamp?)
            .ok()?
            .with_timezone(&Utc);
        Some(Self {
            slot,
            snapshot: RawSnapshot(snapshot),
            timestamp,
            format_version: stored.format_version,
        })
    }

    /// Lightweight preview for menus.
    pub fn info(&self) -> SaveInfo {
        let player_name = self
            .snapshot
            .str_field("playerName")
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown");
        let current_scene_id = self
            .snapshot
            .str_field("currentSceneId")
            .filter(|id| !id.is_empty())
            .unwrap_or("unknown");
        SaveInfo {
            slot: self.slot,
            timestamp: self.timestamp,
            player_name: player_name.to_string(),
            current_scene_id: current_scene_id.to_string(),
            hp: repair_hp(self.snapshot.field("hp")),
            inventory_count: repair_inventory(self.snapshot.field("inventory")).len(),
        }
    }
}

/// Summary of a stored save, without rebuilding the full state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    /// Slot the save lives in.
    pub slot: Slot,
    /// When it was written.
    pub timestamp: DateTime<Utc>,
    /// Player name, or `Unknown`.
    pub player_name: String,
    /// Scene id, or `unknown`.
    pub current_scene_id: String,
    /// Hit points as they will be after loading.
    pub hp: i32,
    /// Number of inventory items.
    pub inventory_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_shape() {
        let state = PlayerState::started("Maria", "start");
        let envelope = Envelope {
            snapshot: &state,
            timestamp: Utc::now(),
            format_version: FORMAT_VERSION,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["snapshot"]["playerName"], "Maria");
        assert_eq!(value["formatVersion"], "1.0");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn parse_valid_record() {
        let blob = json!({
            "snapshot": {"playerName": "Maria", "hp": 80, "inventory": ["Bawang"], "currentSceneId": "altar"},
            "timestamp": "2025-03-01T10:15:00.000Z",
            "formatVersion": "1.0"
        })
        .to_string();
        let record = SaveRecord::parse(Slot::One, &blob).unwrap();
        assert_eq!(record.slot, Slot::One);
        assert_eq!(record.format_version.as_deref(), Some("1.0"));
        assert_eq!(record.timestamp.to_rfc3339(), "2025-03-01T10:15:00+00:00");

        let info = record.info();
        assert_eq!(info.player_name, "Maria");
        assert_eq!(info.current_scene_id, "altar");
        assert_eq!(info.hp, 80);
        assert_eq!(info.inventory_count, 1);
    }

    #[test]
    fn structurally_invalid_records() {
        let ts = "2025-03-01T10:15:00Z";
        let cases = [
            "not json".to_string(),
            "[]".to_string(),
            json!({"timestamp": ts}).to_string(),
            json!({"snapshot": null, "timestamp": ts}).to_string(),
            json!({"snapshot": 7, "timestamp": ts}).to_string(),
            json!({"snapshot": {}}).to_string(),
            json!({"snapshot": {}, "timestamp": "yesterday"}).to_string(),
        ];
        for blob in cases {
            assert!(SaveRecord::parse(Slot::Auto, &blob).is_none(), "{blob}");
        }
    }

    #[test]
    fn missing_version_is_tolerated() {
        let blob = json!({"snapshot": {}, "timestamp": "2025-03-01T10:15:00Z"}).to_string();
        let record = SaveRecord::parse(Slot::Two, &blob).unwrap();
        assert_eq!(record.format_version, None);
    }

    #[test]
    fn info_fallbacks() {
        let blob = json!({
            "snapshot": {"playerName": "", "inventory": "lots"},
            "timestamp": "2025-03-01T10:15:00Z"
        })
        .to_string();
        let info = SaveRecord::parse(Slot::Three, &blob).unwrap().info();
        assert_eq!(info.player_name, "Unknown");
        assert_eq!(info.current_scene_id, "unknown");
        assert_eq!(info.hp, 100);
        assert_eq!(info.inventory_count, 0);
    }
}
