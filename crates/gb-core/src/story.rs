//! The validated story graph.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::error::{StoryError, StoryResult};
use crate::scene::Scene;

/// Source of the built-in "Aswang Hunter" story.
pub const BUNDLED_STORY: &str = include_str!("../stories/aswang.json");

/// The scenes the engine treats specially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryConfig {
    /// Scene a new game starts in.
    pub start_scene: String,
    /// The one ending that counts as victory.
    pub victory_scene: String,
    /// Scene the player is sent to when hit points run out.
    pub defeat_scene: String,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            start_scene: "start".to_string(),
            victory_scene: "goodEnding".to_string(),
            defeat_scene: "gameOver_hp".to_string(),
        }
    }
}

impl StoryConfig {
    /// Set the start scene.
    pub fn with_start(mut self, id: impl Into<String>) -> Self {
        self.start_scene = id.into();
        self
    }

    /// Set the victory scene.
    pub fn with_victory(mut self, id: impl Into<String>) -> Self {
        self.victory_scene = id.into();
        self
    }

    /// Set the defeat-by-damage scene.
    pub fn with_defeat(mut self, id: impl Into<String>) -> Self {
        self.defeat_scene = id.into();
        self
    }
}

/// A consistency problem found while validating a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryIssue {
    /// Scene the issue was found in, or `<story>` for graph-wide issues.
    pub scene: String,
    /// Human-readable description.
    pub message: String,
}

impl StoryIssue {
    fn new(scene: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StoryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.scene, self.message)
    }
}

/// Scenes as written in a story document, in document order.
///
/// Repeated keys are kept so the duplicate check can report them.
struct SceneDocument(Vec<Scene>);

impl<'de> Deserialize<'de> for SceneDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = SceneDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of scene ids to scenes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut scenes = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, mut scene)) = map.next_entry::<String, Scene>()? {
                    scene.id = id;
                    scenes.push(scene);
                }
                Ok(SceneDocument(scenes))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// A story graph that has passed validation.
///
/// Every choice target resolves, and the start, victory, and defeat scenes
/// named by the [`StoryConfig`] exist. The graph is immutable once built.
#[derive(Debug, Clone)]
pub struct Story {
    scenes: BTreeMap<String, Scene>,
    config: StoryConfig,
}

impl Story {
    /// Parse and validate a scene-id keyed JSON document.
    pub fn from_json(source: &str, config: StoryConfig) -> StoryResult<Self> {
        let SceneDocument(scenes) = serde_json::from_str(source)?;
        let story = Self::from_scenes(scenes, config)?;
        tracing::debug!(scenes = story.len(), "loaded story");
        Ok(story)
    }

    /// Read a story document from disk.
    pub fn from_path(path: &Path, config: StoryConfig) -> StoryResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source, config)
    }

    /// Build a story from scenes constructed in code.
    pub fn from_scenes(
        scenes: impl IntoIterator<Item = Scene>,
        config: StoryConfig,
    ) -> StoryResult<Self> {
        let mut map = BTreeMap::new();
        let mut issues = Vec::new();
        for scene in scenes {
            if map.contains_key(&scene.id) {
                issues.push(StoryIssue::new(&scene.id, "duplicate scene id"));
                continue;
            }
            map.insert(scene.id.clone(), scene);
        }
        let story = Self { scenes: map, config };
        issues.extend(story.validate());
        if issues.is_empty() {
            Ok(story)
        } else {
            Err(StoryError::Invalid(issues))
        }
    }

    /// The built-in "Aswang Hunter" story.
    pub fn bundled() -> StoryResult<Self> {
        Self::from_json(BUNDLED_STORY, StoryConfig::default())
    }

    /// Collect every consistency issue in the graph.
    pub fn validate(&self) -> Vec<StoryIssue> {
        let mut issues = Vec::new();

        if self.scenes.is_empty() {
            issues.push(StoryIssue::new("<story>", "no scenes defined"));
            return issues;
        }

        let designated = [
            ("start", &self.config.start_scene, false),
            ("victory", &self.config.victory_scene, true),
            ("defeat", &self.config.defeat_scene, true),
        ];
        for (role, id, must_end) in designated {
            match self.scenes.get(id.as_str()) {
                None => issues.push(StoryIssue::new(
                    id.as_str(),
                    format!("{role} scene is not defined"),
                )),
                Some(scene) if must_end && !scene.is_ending => issues.push(StoryIssue::new(
                    id.as_str(),
                    format!("{role} scene is not marked isEnding"),
                )),
                Some(_) => {}
            }
        }

        for scene in self.scenes.values() {
            for (i, choice) in scene.choices.iter().enumerate() {
                if !self.scenes.contains_key(&choice.to) {
                    issues.push(StoryIssue::new(
                        &scene.id,
                        format!(
                            "choice {} ('{}') leads to unknown scene '{}'",
                            i + 1,
                            choice.text,
                            choice.to
                        ),
                    ));
                }
            }
        }

        issues
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// The designated scenes.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Id of the scene a new game starts in.
    pub fn start_id(&self) -> &str {
        &self.config.start_scene
    }

    /// Id of the defeat-by-damage scene.
    pub fn defeat_id(&self) -> &str {
        &self.config.defeat_scene
    }

    /// Whether `id` names the victory ending.
    pub fn is_victory(&self, id: &str) -> bool {
        self.config.victory_scene == id
    }

    /// All ending scenes, ordered by id.
    pub fn endings(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values().filter(|s| s.is_ending)
    }

    /// All scene ids, sorted.
    pub fn scene_ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the story has no scenes. Always false for a validated story.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
