//! Error types for persistence and sessions.

use thiserror::Error;

use gb_engine::EngineError;

use crate::slot::Slot;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures of the storage medium.
///
/// A record that exists but cannot be understood is not an error; the
/// store reports it as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The medium has no room for the record.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Bytes the medium would hold after the write.
        needed: usize,
        /// Maximum bytes the medium holds.
        quota: usize,
    },

    /// A slot name outside `auto`, `1`, `2`, `3`.
    #[error("unknown save slot '{0}' (expected auto, 1, 2, or 3)")]
    UnknownSlot(String),
}

/// Errors surfaced by [`GameSession`](crate::GameSession).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Saving needs a game in progress.
    #[error("cannot save: no active game")]
    NoActiveGame,

    /// Nothing loadable is stored in the slot.
    #[error("no saved game in {}", .0.label())]
    EmptySlot(Slot),

    /// The state machine rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The storage medium failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
