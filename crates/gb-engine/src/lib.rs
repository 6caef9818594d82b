//! Story state machine for Gubat.
//!
//! [`GameMachine`] owns the [`PlayerState`] and is the only thing allowed to
//! change it. Each choice is applied through the pure [`transition`]
//! function, which folds arrival effects, scene change, ending detection, and
//! the hit-point depletion rule into a single step.

/// Error types for the state machine.
pub mod error;
/// Inventory gating of choices.
pub mod gating;
/// The state container.
pub mod machine;
/// Player state and outcomes.
pub mod player;
/// Pure transition rules.
pub mod transition;

pub use error::{EngineError, EngineResult};
pub use gating::{is_choice_available, visible_choices};
pub use machine::GameMachine;
pub use player::{MAX_HP, Outcome, PlayerState};
pub use transition::{settle, transition};
