use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(path)?;
    let name = path.map_or_else(|| "built-in story".to_string(), |p| p.display().to_string());

    println!("  All checks passed for '{name}'.");
    let config = story.config();
    println!(
        "  {} scenes, {} endings, starting at '{}'",
        story.len(),
        story.endings().count(),
        config.start_scene
    );
    println!(
        "  Victory at '{}', defeat by damage at '{}'",
        config.victory_scene, config.defeat_scene
    );

    Ok(())
}
