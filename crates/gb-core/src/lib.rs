//! Story graph types for Gubat.
//!
//! A story is a static, externally authored document: a mapping from scene
//! id to [`Scene`], where each scene offers [`Choice`]s leading to other
//! scenes. This crate parses and validates that document; it holds no
//! player state. See `gb-engine` for the state machine that walks the graph.

/// Arrival effects granted by scenes and choices.
pub mod effect;
/// Error types for story loading.
pub mod error;
/// Scene and choice records.
pub mod scene;
/// The validated story graph.
pub mod story;

pub use effect::Effect;
pub use error::{StoryError, StoryResult};
pub use scene::{Choice, Scene};
pub use story::{Story, StoryConfig, StoryIssue};
