use std::path::Path;

use colored::Colorize;

pub fn run(saves: Option<&Path>, slot: &str) -> Result<(), String> {
    let slot = super::parse_slot(slot)?;
    let mut store = super::open_store(saves)?;
    store.remove(slot).map_err(|e| e.to_string())?;
    println!("  {} {}", "Deleted".bold(), slot.label());
    Ok(())
}
