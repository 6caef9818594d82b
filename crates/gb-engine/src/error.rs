//! Error types for the state machine.

use thiserror::Error;

use crate::player::Outcome;

/// Result type for state machine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur when applying a choice.
///
/// A rejected choice leaves the player state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The game has already reached an ending.
    #[error("the game is over ({0})")]
    GameFinished(Outcome),

    /// The current scene id does not resolve.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// The choice is not an outgoing edge of the current scene.
    #[error("'{choice}' is not a choice in scene {scene}")]
    ChoiceNotInScene {
        /// Current scene id.
        scene: String,
        /// Label of the rejected choice.
        choice: String,
    },

    /// The choice is gated away by the player's inventory.
    #[error("choice not available: {0}")]
    ChoiceUnavailable(String),

    /// Index outside the list of visible choices.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),
}
