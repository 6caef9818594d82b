//! Save slots, autosave, and save repair for Gubat.
//!
//! Persistence is layered: a [`SlotBackend`] stores opaque string blobs by
//! key (files on disk, or memory), a [`SaveStore`] turns those blobs into
//! timestamped [`SaveRecord`]s for the four fixed [`Slot`]s, and a
//! [`GameSession`] ties the store to a `GameMachine` with an autosave after
//! every mutation.

/// Storage media for save blobs.
pub mod backend;
/// Error types for persistence and sessions.
pub mod error;
/// Stored record shapes.
pub mod record;
/// Defaulting policy for malformed snapshots.
pub mod repair;
/// Save/load coordination and autosave.
pub mod session;
/// The fixed slot namespace.
pub mod slot;
/// Slot-keyed record storage.
pub mod store;

pub use backend::{FileBackend, MemoryBackend, SlotBackend};
pub use error::{SessionError, SessionResult, StoreError, StoreResult};
pub use record::{FORMAT_VERSION, RawSnapshot, SaveInfo, SaveRecord};
pub use session::{GameSession, Phase, Screen};
pub use slot::Slot;
pub use store::SaveStore;
