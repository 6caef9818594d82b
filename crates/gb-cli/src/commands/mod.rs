pub mod check;
pub mod clear;
pub mod delete;
pub mod play;
pub mod saves;

use std::path::{Path, PathBuf};

use comfy_table::{ContentArrangement, Table};

use gb_core::{Story, StoryConfig};
use gb_save::{FileBackend, SaveInfo, SaveStore, Slot};

/// Resolve the save directory: the flag (or `GUBAT_SAVE_DIR`), else the
/// platform data directory.
fn save_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    directories::ProjectDirs::from("", "", "gubat")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./gubat_saves"))
}

fn open_backend(flag: Option<&Path>) -> Result<FileBackend, String> {
    let dir = save_dir(flag);
    FileBackend::new(&dir).map_err(|e| format!("cannot open save directory {}: {e}", dir.display()))
}

fn open_store(flag: Option<&Path>) -> Result<SaveStore<FileBackend>, String> {
    open_backend(flag).map(SaveStore::new)
}

/// Load a story file, or the built-in story when no path is given.
fn load_story(path: Option<&Path>) -> Result<Story, String> {
    let story = match path {
        Some(path) => Story::from_path(path, StoryConfig::default()),
        None => Story::bundled(),
    };
    story.map_err(|e| e.to_string())
}

fn parse_slot(input: &str) -> Result<Slot, String> {
    input.parse::<Slot>().map_err(|e| e.to_string())
}

/// Where a save stands, by place name when the story knows the scene.
fn location(story: &Story, scene_id: &str) -> String {
    story
        .scene(scene_id)
        .map_or(scene_id, |scene| scene.display_name())
        .to_string()
}

/// Render save previews as a table.
fn saves_table(saves: &[SaveInfo], story: &Story) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "Player", "Location", "HP", "Items", "Saved"]);

    for info in saves {
        table.add_row(vec![
            info.slot.label().to_string(),
            info.player_name.clone(),
            location(story, &info.current_scene_id),
            info.hp.to_string(),
            info.inventory_count.to_string(),
            info.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }

    table
}

fn print_saves(saves: &[SaveInfo], story: &Story) {
    if saves.is_empty() {
        println!("  No saved games.");
        return;
    }
    println!("{}", saves_table(saves, story));
}
