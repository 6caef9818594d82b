//! CLI frontend for Gubat, a branching horror story for the terminal.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gubat",
    about = "Gubat: hunt the aswang of San Gubat",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding save files (default: the platform data directory)
    #[arg(long, global = true, env = "GUBAT_SAVE_DIR")]
    saves: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story, resuming the autosave if there is one
    Play {
        /// Story file to play instead of the built-in one
        #[arg(short, long)]
        story: Option<PathBuf>,

        /// Start a new game under this name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Validate a story file and report its size
    Check {
        /// Story file to check (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// List stored saves
    Saves {
        /// Story file used to name save locations (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// Delete the save in a slot (auto, 1, 2, or 3)
    Delete {
        /// Slot to delete
        slot: String,
    },

    /// Delete every save
    Clear,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let saves = cli.saves.as_deref();
    let result = match cli.command {
        Commands::Play { story, name } => {
            commands::play::run(saves, story.as_deref(), name.as_deref())
        }
        Commands::Check { story } => commands::check::run(story.as_deref()),
        Commands::Saves { story } => commands::saves::run(saves, story.as_deref()),
        Commands::Delete { slot } => commands::delete::run(saves, &slot),
        Commands::Clear => commands::clear::run(saves),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
