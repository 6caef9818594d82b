use std::path::Path;

use colored::Colorize;

pub fn run(saves: Option<&Path>) -> Result<(), String> {
    let mut store = super::open_store(saves)?;
    store.clear_all().map_err(|e| e.to_string())?;
    println!("  {} every save slot", "Cleared".bold());
    Ok(())
}
