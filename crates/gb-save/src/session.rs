//! Save/load coordination and autosave.
//!
//! `GameSession` is the boundary a presentation layer talks to. It owns the
//! `GameMachine` and the `SaveStore`, writes the autosave slot after every
//! successful change to an active game, and repairs records on the way in.

use gb_core::{Choice, Scene, Story};
use gb_engine::{GameMachine, Outcome, PlayerState};

use crate::backend::SlotBackend;
use crate::error::{SessionError, SessionResult, StoreError};
use crate::record::SaveInfo;
use crate::slot::Slot;
use crate::store::SaveStore;

/// Whether the startup load has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The autosave has not been restored yet. Autosaving is suppressed so
    /// defaults never overwrite a save that is still waiting to load.
    Loading,
    /// Startup is done; changes are autosaved.
    Ready,
}

/// Which screen the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Startup load still pending.
    Loading,
    /// No active game; ask for a name.
    Entry,
    /// A game is in progress.
    Playing,
    /// An ending was reached.
    Ended(Outcome),
}

/// A play session: state machine plus persistence.
pub struct GameSession<B: SlotBackend> {
    machine: GameMachine,
    store: SaveStore<B>,
    phase: Phase,
    autosave_error: Option<StoreError>,
}

impl<B: SlotBackend> GameSession<B> {
    /// Create a session in the [`Phase::Loading`] phase without touching
    /// the medium.
    pub fn new(story: Story, backend: B) -> Self {
        Self {
            machine: GameMachine::new(story),
            store: SaveStore::new(backend),
            phase: Phase::Loading,
            autosave_error: None,
        }
    }

    /// Create a session and run the startup load.
    pub fn open(story: Story, backend: B) -> Self {
        let mut session = Self::new(story, backend);
        session.restore_autosave();
        session
    }

    /// Run the startup load: install the autosave if one exists, then mark
    /// the session ready. Returns whether a game was resumed.
    pub fn restore_autosave(&mut self) -> bool {
        let resumed = match self.store.read(Slot::Auto) {
            Ok(Some(record)) => {
                let state = record.snapshot.repair(self.machine.story());
                let resumed = self.machine.install(state).is_active();
                if resumed {
                    tracing::info!(
                        player = %self.machine.snapshot().player_name,
                        "resumed autosave"
                    );
                }
                resumed
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "could not read autosave");
                false
            }
        };
        self.phase = Phase::Ready;
        resumed
    }

    /// Current startup phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Where the presentation layer should be.
    pub fn screen(&self) -> Screen {
        let state = self.machine.snapshot();
        if self.phase == Phase::Loading {
            Screen::Loading
        } else if !state.is_active() {
            Screen::Entry
        } else if state.is_terminal() {
            Screen::Ended(state.outcome())
        } else {
            Screen::Playing
        }
    }

    /// Read-only view of the player state.
    pub fn snapshot(&self) -> &PlayerState {
        self.machine.snapshot()
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.machine.scene(id)
    }

    /// The scene the player is in.
    pub fn current_scene(&self) -> SessionResult<&Scene> {
        Ok(self.machine.current_scene()?)
    }

    /// Choices the player may currently see.
    pub fn available_choices(&self) -> Vec<&Choice> {
        self.machine.available_choices()
    }

    /// The story graph.
    pub fn story(&self) -> &Story {
        self.machine.story()
    }

    /// The save store.
    pub fn store(&self) -> &SaveStore<B> {
        &self.store
    }

    /// Give back the storage medium.
    pub fn into_backend(self) -> B {
        self.store.into_backend()
    }

    /// Begin a new game for `name`.
    pub fn start_game(&mut self, name: &str) -> &PlayerState {
        self.machine.start_game(name);
        self.autosave();
        self.machine.snapshot()
    }

    /// Return to the entry screen with no active game.
    ///
    /// The autosave slot is left alone.
    pub fn reset_game(&mut self) -> &PlayerState {
        self.machine.reset_game();
        self.autosave();
        self.machine.snapshot()
    }

    /// Take `choice` from the current scene.
    pub fn apply_choice(&mut self, choice: &Choice) -> SessionResult<&PlayerState> {
        self.machine.apply_choice(choice)?;
        self.autosave();
        Ok(self.machine.snapshot())
    }

    /// Take the `index`th visible choice (zero-based).
    pub fn choose(&mut self, index: usize) -> SessionResult<&PlayerState> {
        self.machine.choose(index)?;
        self.autosave();
        Ok(self.machine.snapshot())
    }

    /// Save the current game to `slot`.
    pub fn save_to_slot(&mut self, slot: Slot) -> SessionResult<SaveInfo> {
        let state = self.machine.snapshot();
        if !state.is_active() {
            return Err(SessionError::NoActiveGame);
        }
        let timestamp = self.store.write(slot, state)?;
        tracing::info!(%slot, "game saved");
        Ok(SaveInfo {
            slot,
            timestamp,
            player_name: state.player_name.clone(),
            current_scene_id: state.current_scene_id.clone(),
            hp: state.hp,
            inventory_count: state.inventory.len(),
        })
    }

    /// Replace the current game with the one saved in `slot`, repairing
    /// it first.
    pub fn load_from_slot(&mut self, slot: Slot) -> SessionResult<&PlayerState> {
        let record = self
            .store
            .read(slot)?
            .ok_or(SessionError::EmptySlot(slot))?;
        let state = record.snapshot.repair(self.machine.story());
        self.machine.install(state);
        tracing::info!(%slot, "game loaded");
        self.autosave();
        Ok(self.machine.snapshot())
    }

    /// Delete the save in `slot`. Deleting an empty slot succeeds.
    pub fn delete_slot(&mut self, slot: Slot) -> SessionResult<()> {
        Ok(self.store.remove(slot)?)
    }

    /// Previews of every stored save, auto first.
    pub fn list_saves(&self) -> SessionResult<Vec<SaveInfo>> {
        Ok(self.store.list_all()?)
    }

    /// Whether `slot` holds a loadable save. Medium errors count as no.
    pub fn has_save(&self, slot: Slot) -> bool {
        self.store.exists(slot).unwrap_or(false)
    }

    /// The most recent autosave failure, if any, clearing it.
    pub fn take_autosave_error(&mut self) -> Option<StoreError> {
        self.autosave_error.take()
    }

    fn autosave(&mut self) {
        if self.phase != Phase::Ready || !self.machine.snapshot().is_active() {
            return;
        }
        if let Err(e) = self.store.write(Slot::Auto, self.machine.snapshot()) {
            tracing::warn!(error = %e, "autosave failed");
            self.autosave_error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};
    use gb_engine::EngineError;
    use serde_json::json;

    fn story() -> Story {
        Story::bundled().unwrap()
    }

    fn open(backend: MemoryBackend) -> GameSession<MemoryBackend> {
        GameSession::open(story(), backend)
    }

    fn pick(session: &mut GameSession<MemoryBackend>, text: &str) {
        let index = session
            .available_choices()
            .iter()
            .position(|c| c.text == text)
            .unwrap_or_else(|| panic!("no visible choice '{text}'"));
        session.choose(index).unwrap();
    }

    fn seeded(slot: Slot, snapshot: serde_json::Value) -> MemoryBackend {
        let mut backend = MemoryBackend::new();
        let blob = json!({
            "snapshot": snapshot,
            "timestamp": "2025-03-01T10:15:00.000Z",
            "formatVersion": "1.0"
        });
        backend.put(slot.key(), &blob.to_string()).unwrap();
        backend
    }

    #[test]
    fn fresh_start_shows_entry() {
        let session = open(MemoryBackend::new());
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.screen(), Screen::Entry);
        assert!(!session.has_save(Slot::Auto));
    }

    #[test]
    fn loading_phase_suppresses_autosave() {
        let mut session = GameSession::new(story(), MemoryBackend::new());
        assert_eq!(session.screen(), Screen::Loading);
        session.start_game("Maria");
        assert!(!session.has_save(Slot::Auto));

        assert!(!session.restore_autosave());
        session.choose(0).unwrap();
        assert!(session.has_save(Slot::Auto));
    }

    #[test]
    fn pending_autosave_not_clobbered_before_load() {
        let backend = seeded(
            Slot::Auto,
            json!({"playerName": "Maria", "hp": 55, "inventory": ["Itak"], "currentSceneId": "altar"}),
        );
        let mut session = GameSession::new(story(), backend);
        session.reset_game();
        assert!(session.restore_autosave());
        assert_eq!(session.snapshot().player_name, "Maria");
        assert_eq!(session.snapshot().hp, 55);
        assert_eq!(session.screen(), Screen::Playing);
    }

    #[test]
    fn nameless_autosave_is_not_a_resume() {
        let backend = seeded(Slot::Auto, json!({"playerName": "", "currentSceneId": "altar"}));
        let mut session = GameSession::new(story(), backend);
        assert!(!session.restore_autosave());
        assert_eq!(session.screen(), Screen::Entry);
    }

    #[test]
    fn every_mutation_autosaves() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        let info = session.store().peek_info(Slot::Auto).unwrap().unwrap();
        assert_eq!(info.player_name, "Maria");
        assert_eq!(info.current_scene_id, "start");

        pick(&mut session, "Report to the town captain.");
        let info = session.store().peek_info(Slot::Auto).unwrap().unwrap();
        assert_eq!(info.current_scene_id, "askCaptain");
    }

    #[test]
    fn reset_does_not_autosave_empty_game() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        pick(&mut session, "Head straight for the old church.");
        session.reset_game();
        assert_eq!(session.screen(), Screen::Entry);
        let info = session.store().peek_info(Slot::Auto).unwrap().unwrap();
        assert_eq!(info.current_scene_id, "oldChurch_entry");
    }

    #[test]
    fn resumes_autosave_across_sessions() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        pick(&mut session, "Visit the albularyo, the village healer.");
        pick(&mut session, "Accept the braid of bawang.");
        let before = session.snapshot().clone();

        let resumed = open(session.into_backend());
        assert_eq!(resumed.screen(), Screen::Playing);
        assert_eq!(resumed.snapshot(), &before);
    }

    #[test]
    fn save_load_round_trip() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        pick(&mut session, "Head straight for the old church.");
        pick(&mut session, "Climb the bell tower.");
        let saved = session.snapshot().clone();
        let info = session.save_to_slot(Slot::One).unwrap();
        assert_eq!(info.hp, 70);

        pick(&mut session, "Climb down quietly.");
        assert_ne!(session.snapshot(), &saved);

        let loaded = session.load_from_slot(Slot::One).unwrap();
        assert_eq!(loaded, &saved);
    }

    #[test]
    fn save_requires_active_game() {
        let mut session = open(MemoryBackend::new());
        let err = session.save_to_slot(Slot::One).unwrap_err();
        assert!(matches!(err, SessionError::NoActiveGame));
        assert!(!session.has_save(Slot::One));
    }

    #[test]
    fn load_empty_slot_fails() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        let before = session.snapshot().clone();
        let err = session.load_from_slot(Slot::Three).unwrap_err();
        assert!(matches!(err, SessionError::EmptySlot(Slot::Three)));
        assert_eq!(session.snapshot(), &before);
    }

    #[test]
    fn load_repairs_inventory() {
        let backend = seeded(
            Slot::Two,
            json!({"playerName": "Maria", "hp": 80, "inventory": "Bawang", "currentSceneId": "altar"}),
        );
        let mut session = open(backend);
        let state = session.load_from_slot(Slot::Two).unwrap();
        assert!(state.inventory.is_empty());
        assert_eq!(state.current_scene_id, "altar");
    }

    #[test]
    fn load_clamps_hp() {
        let backend = seeded(Slot::One, json!({"playerName": "Maria", "hp": 500}));
        let mut session = open(backend);
        assert_eq!(session.load_from_slot(Slot::One).unwrap().hp, 100);

        let backend = seeded(Slot::One, json!({"playerName": "Maria", "hp": -10}));
        let mut session = open(backend);
        let state = session.load_from_slot(Slot::One).unwrap();
        assert_eq!(state.hp, 0);
        assert!(state.is_game_over);
        assert_eq!(state.current_scene_id, "gameOver_hp");
    }

    #[test]
    fn loading_autosaves_the_loaded_game() {
        let backend = seeded(Slot::Three, json!({"playerName": "Jose", "currentSceneId": "bellTower"}));
        let mut session = open(backend);
        session.load_from_slot(Slot::Three).unwrap();
        let info = session.store().peek_info(Slot::Auto).unwrap().unwrap();
        assert_eq!(info.player_name, "Jose");
        assert_eq!(info.current_scene_id, "bellTower");
    }

    #[test]
    fn delete_missing_slot_is_ok() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        session.save_to_slot(Slot::One).unwrap();

        session.delete_slot(Slot::Two).unwrap();
        let slots: Vec<_> = session.list_saves().unwrap().iter().map(|i| i.slot).collect();
        assert_eq!(slots, vec![Slot::Auto, Slot::One]);
    }

    #[test]
    fn ended_screen_and_rejection() {
        let mut session = open(MemoryBackend::new());
        session.start_game("Maria");
        pick(&mut session, "Leave San Gubat before nightfall.");
        assert_eq!(session.screen(), Screen::Ended(Outcome::Defeat));

        let err = session.choose(0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Engine(EngineError::GameFinished(Outcome::Defeat))
        ));
    }

    #[test]
    fn autosave_failure_does_not_block_play() {
        let mut session = open(MemoryBackend::new().with_quota(16));
        session.start_game("Maria");
        assert!(matches!(
            session.take_autosave_error(),
            Some(StoreError::QuotaExceeded { .. })
        ));
        assert!(session.take_autosave_error().is_none());

        pick(&mut session, "Report to the town captain.");
        assert_eq!(session.snapshot().current_scene_id, "askCaptain");
        assert!(session.take_autosave_error().is_some());
    }

    #[test]
    fn invalid_autosave_starts_fresh() {
        let mut backend = MemoryBackend::new();
        backend.put(Slot::Auto.key(), "{ not json").unwrap();
        let session = open(backend);
        assert_eq!(session.screen(), Screen::Entry);
    }

    #[test]
    fn file_backed_session() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let mut session = GameSession::open(story(), FileBackend::new(dir.path()).unwrap());
            session.start_game("Maria");
            session.choose(1).unwrap();
            session.save_to_slot(Slot::Two).unwrap();
        }
        let mut session = GameSession::open(story(), FileBackend::new(dir.path()).unwrap());
        assert_eq!(session.snapshot().current_scene_id, "askCaptain");
        assert!(session.has_save(Slot::Two));
        session.delete_slot(Slot::Two).unwrap();
        assert!(!dir.path().join("slot-2.json").exists());
    }
}
