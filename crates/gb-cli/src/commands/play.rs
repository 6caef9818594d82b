//! Interactive play loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use gb_engine::{EngineError, MAX_HP, Outcome};
use gb_save::{FileBackend, GameSession, Screen, SessionError, Slot};

type Session = GameSession<FileBackend>;

const HELP: &str = "\
  <number>       take a choice
  save <1-3>     save to a slot
  load <slot>    load auto, 1, 2, or 3
  delete <1-3>   delete a saved slot
  saves          list saved games
  status         show hit points and inventory
  restart        abandon this game and start over
  help           show this help
  quit           exit (progress is autosaved)";

pub fn run(saves: Option<&Path>, story: Option<&Path>, name: Option<&str>) -> Result<(), String> {
    let story = super::load_story(story)?;
    let backend = super::open_backend(saves)?;
    let mut session = GameSession::open(story, backend);

    println!("  {} Gubat", "Starting".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => start(&mut session, name),
        None if session.screen() == Screen::Entry => ask_name(),
        None => {
            println!(
                "  Welcome back, {}.\n",
                session.snapshot().player_name.bold()
            );
            show_scene(&session);
        }
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if matches!(input.to_lowercase().as_str(), "quit" | "q" | "exit") {
            break;
        }

        if let Err(e) = handle(&mut session, input) {
            println!("  {}\n", e.yellow());
        }
    }

    Ok(())
}

fn handle(session: &mut Session, input: &str) -> Result<(), String> {
    if session.screen() == Screen::Entry {
        return handle_entry(session, input);
    }
    if input.is_empty() {
        return Ok(());
    }

    let (word, arg) = split_command(input);
    match word.to_lowercase().as_str() {
        "help" | "h" | "?" => println!("{HELP}\n"),
        "saves" => list_saves(session)?,
        "save" => {
            let slot = manual_slot(arg)?;
            let info = session.save_to_slot(slot).map_err(|e| e.to_string())?;
            println!("  Saved {} to {}.\n", info.player_name, slot.label());
        }
        "load" => load(session, arg)?,
        "delete" => {
            let slot = manual_slot(arg)?;
            session.delete_slot(slot).map_err(|e| e.to_string())?;
            println!("  Deleted {}.\n", slot.label());
        }
        "status" => show_status(session),
        "restart" => {
            session.reset_game();
            ask_name();
        }
        _ => choose(session, input)?,
    }

    Ok(())
}

/// On the entry screen anything that is not `load <slot>`, `saves`, or
/// `help` is a name.
fn handle_entry(session: &mut Session, input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("a name is required".into());
    }

    let (word, arg) = split_command(input);
    match (word.to_lowercase().as_str(), arg.is_empty()) {
        ("load", false) => load(session, arg)?,
        ("saves", true) => list_saves(session)?,
        ("help" | "?", true) => println!("{HELP}\n"),
        _ => start(session, input),
    }

    Ok(())
}

fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (input, ""),
    }
}

fn list_saves(session: &Session) -> Result<(), String> {
    let list = session.list_saves().map_err(|e| e.to_string())?;
    super::print_saves(&list, session.story());
    println!();
    Ok(())
}

fn load(session: &mut Session, arg: &str) -> Result<(), String> {
    let slot = super::parse_slot(arg)?;
    session.load_from_slot(slot).map_err(|e| e.to_string())?;
    report_autosave(session);
    println!("  Loaded {}.\n", slot.label());
    show_scene(session);
    Ok(())
}

fn start(session: &mut Session, name: &str) {
    session.start_game(name);
    report_autosave(session);
    println!("  The hunt begins, {}.\n", name.bold());
    show_scene(session);
}

fn choose(session: &mut Session, input: &str) -> Result<(), String> {
    let number: usize = input
        .parse()
        .map_err(|_| format!("unknown command '{input}' (type 'help')"))?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| format!("there is no choice {number}"))?;

    match session.choose(index) {
        Ok(_) => {}
        Err(SessionError::Engine(EngineError::InvalidChoice(_))) => {
            return Err(format!("there is no choice {number}"));
        }
        Err(SessionError::Engine(EngineError::GameFinished(_))) => {
            return Err("the story is over; type 'restart' to play again".into());
        }
        Err(e) => return Err(e.to_string()),
    }

    report_autosave(session);
    println!();
    show_scene(session);
    Ok(())
}

/// Only the numbered slots are written or deleted by hand.
fn manual_slot(arg: &str) -> Result<Slot, String> {
    let slot = super::parse_slot(arg)?;
    if slot.is_manual() {
        Ok(slot)
    } else {
        Err("the auto-save slot is managed automatically; use 1, 2, or 3".into())
    }
}

fn ask_name() {
    println!("  Enter your name to begin, or 'load <slot>' to continue a save.\n");
}

fn report_autosave(session: &mut Session) {
    if let Some(e) = session.take_autosave_error() {
        println!("  {} {e}", "autosave failed:".yellow());
    }
}

fn inventory_text(items: &[String]) -> String {
    if items.is_empty() {
        "empty".to_string()
    } else {
        items.join(", ")
    }
}

fn show_status(session: &Session) {
    let state = session.snapshot();
    if !state.is_active() {
        println!("  No game in progress.\n");
        return;
    }
    println!(
        "  {} | HP {}/{MAX_HP} | Inventory: {} | Scene: {}\n",
        state.player_name,
        state.hp,
        inventory_text(&state.inventory),
        state.current_scene_id
    );
}

fn show_scene(session: &Session) {
    let scene = match session.current_scene() {
        Ok(scene) => scene,
        Err(e) => {
            println!("  {}\n", e.to_string().red());
            return;
        }
    };
    let state = session.snapshot();

    println!("{}\n", scene.text);

    match session.screen() {
        Screen::Ended(Outcome::Victory) => {
            println!("  {}", "VICTORY".green().bold());
            println!("  {} survived the night.", state.player_name);
            println!("  Type 'restart' to play again or 'quit' to exit.\n");
        }
        Screen::Ended(_) => {
            println!("  {}", "GAME OVER".red().bold());
            println!("  Type 'restart' to try again or 'load <slot>' to go back.\n");
        }
        _ => {
            let hp = format!("HP {}/{MAX_HP}", state.hp);
            let hp = if state.hp <= 30 { hp.red() } else { hp.normal() };
            println!("  {hp} | Inventory: {}", inventory_text(&state.inventory));

            let choices = session.available_choices();
            if choices.is_empty() {
                println!("  There is no way forward. Type 'restart' or 'load <slot>'.");
            }
            for (i, choice) in choices.iter().enumerate() {
                println!("  {}. {}", i + 1, choice.text);
            }
            println!();
        }
    }
}
