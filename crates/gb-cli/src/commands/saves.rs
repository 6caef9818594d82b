use std::path::Path;

pub fn run(saves: Option<&Path>, story: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(story)?;
    let store = super::open_store(saves)?;
    let list = store.list_all().map_err(|e| e.to_string())?;
    super::print_saves(&list, &story);
    Ok(())
}
