//! Slot-keyed record storage.

use chrono::{DateTime, Utc};

use gb_engine::PlayerState;

use crate::backend::SlotBackend;
use crate::error::StoreResult;
use crate::record::{Envelope, FORMAT_VERSION, SaveInfo, SaveRecord};
use crate::slot::Slot;

/// Reads and writes timestamped snapshots in the four fixed slots.
#[derive(Debug, Clone)]
pub struct SaveStore<B> {
    backend: B,
}

impl<B: SlotBackend> SaveStore<B> {
    /// Wrap a storage medium.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying medium.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap the medium.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Write `state` to `slot`, overwriting what was there. Returns the
    /// record's timestamp.
    pub fn write(&mut self, slot: Slot, state: &PlayerState) -> StoreResult<DateTime<Utc>> {
        let timestamp = Utc::now();
        let blob = serde_json::to_string(&Envelope {
            snapshot: state,
            timestamp,
            format_version: FORMAT_VERSION,
        })?;
        self.backend.put(slot.key(), &blob)?;
        tracing::debug!(%slot, scene = %state.current_scene_id, "saved");
        Ok(timestamp)
    }

    /// Read the record in `slot`.
    ///
    /// An empty slot and a record that cannot be parsed both read as
    /// `None`; only failures of the medium are errors.
    pub fn read(&self, slot: Slot) -> StoreResult<Option<SaveRecord>> {
        let Some(blob) = self.backend.get(slot.key())? else {
            return Ok(None);
        };
        let record = SaveRecord::parse(slot, &blob);
        if record.is_none() {
            tracing::warn!(%slot, "ignoring invalid save record");
        }
        Ok(record)
    }

    /// Preview the record in `slot`.
    pub fn peek_info(&self, slot: Slot) -> StoreResult<Option<SaveInfo>> {
        Ok(self.read(slot)?.map(|record| record.info()))
    }

    /// Whether `slot` holds a readable record.
    pub fn exists(&self, slot: Slot) -> StoreResult<bool> {
        Ok(self.read(slot)?.is_some())
    }

    /// Delete the record in `slot`. Deleting an empty slot succeeds.
    pub fn remove(&mut self, slot: Slot) -> StoreResult<()> {
        self.backend.delete(slot.key())?;
        tracing::debug!(%slot, "deleted save");
        Ok(())
    }

    /// Previews of every stored save: auto first, then 1, 2, 3, skipping
    /// empty slots.
    pub fn list_all(&self) -> StoreResult<Vec<SaveInfo>> {
        let mut saves = Vec::new();
        for slot in Slot::ALL {
            if let Some(info) = self.peek_info(slot)? {
                saves.push(info);
            }
        }
        Ok(saves)
    }

    /// Delete every slot.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        for slot in Slot::ALL {
            self.remove(slot)?;
        }
        Ok(())
    }
}
