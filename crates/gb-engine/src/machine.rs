//! The state container.

use gb_core::{Choice, Scene, Story};

use crate::error::{EngineError, EngineResult};
use crate::gating::{is_choice_available, visible_choices};
use crate::player::{Outcome, PlayerState};
use crate::transition::{settle, transition};

/// Owns the story graph and the one mutable [`PlayerState`].
///
/// Created once per session; starting, resetting, and loading replace the
/// state wholesale, and choices advance it one transition at a time.
#[derive(Debug, Clone)]
pub struct GameMachine {
    story: Story,
    state: PlayerState,
}

impl GameMachine {
    /// Create a machine in the landing state.
    pub fn new(story: Story) -> Self {
        let state = PlayerState::new(story.start_id());
        Self { story, state }
    }

    /// The story graph.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &PlayerState {
        &self.state
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.story.scene(id)
    }

    /// The scene the player is in.
    pub fn current_scene(&self) -> EngineResult<&Scene> {
        self.story
            .scene(&self.state.current_scene_id)
            .ok_or_else(|| EngineError::SceneNotFound(self.state.current_scene_id.clone()))
    }

    /// Choices the player may currently see, in authored order.
    pub fn available_choices(&self) -> Vec<&Choice> {
        match self.current_scene() {
            Ok(scene) => visible_choices(scene, &self.state.inventory),
            Err(_) => Vec::new(),
        }
    }

    /// Whether an ending has been reached.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Begin a new game for `name`. The name is expected to be non-empty;
    /// callers validate input before getting here.
    pub fn start_game(&mut self, name: &str) -> &PlayerState {
        self.state = PlayerState::started(name, self.story.start_id());
        tracing::info!(player = name, "game started");
        &self.state
    }

    /// Return to the landing state with no player.
    pub fn reset_game(&mut self) -> &PlayerState {
        self.state = PlayerState::new(self.story.start_id());
        &self.state
    }

    /// Replace the state wholesale, e.g. with a restored save.
    ///
    /// The hit-point rule is enforced on the installed state.
    pub fn install(&mut self, mut state: PlayerState) -> &PlayerState {
        settle(&self.story, &mut state);
        self.state = state;
        &self.state
    }

    /// Take `choice` from the current scene.
    ///
    /// Rejected when the game is over, when the choice does not belong to
    /// the current scene, or when the inventory gates it away.
    pub fn apply_choice(&mut self, choice: &Choice) -> EngineResult<&PlayerState> {
        if self.state.is_terminal() {
            return Err(EngineError::GameFinished(self.state.outcome()));
        }

        let scene = self.current_scene()?;
        if !scene.offers(choice) {
            return Err(EngineError::ChoiceNotInScene {
                scene: scene.id.clone(),
                choice: choice.text.clone(),
            });
        }
        if !is_choice_available(choice, &self.state.inventory) {
            return Err(EngineError::ChoiceUnavailable(choice.text.clone()));
        }

        let next = transition(&self.story, &self.state, choice);
        tracing::debug!(
            from = %self.state.current_scene_id,
            to = %next.current_scene_id,
            hp = next.hp,
            "choice applied"
        );
        if next.outcome() != Outcome::InProgress {
            tracing::info!(outcome = %next.outcome(), scene = %next.current_scene_id, "ending reached");
        }
        self.state = next;
        Ok(&self.state)
    }

    /// Take the `index`th visible choice (zero-based).
    pub fn choose(&mut self, index: usize) -> EngineResult<&PlayerState> {
        if self.state.is_terminal() {
            return Err(EngineError::GameFinished(self.state.outcome()));
        }
        let choice = self
            .available_choices()
            .get(index)
            .map(|c| (*c).clone())
            .ok_or(EngineError::InvalidChoice(index))?;
        self.apply_choice(&choice)
    }
}
