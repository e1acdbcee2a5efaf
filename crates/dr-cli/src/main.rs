//! Terminal front end for Dragon Repeller.

mod commands;
mod render;
mod save_file;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dr",
    about = "Dragon Repeller: a small turn-based RPG in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that runs a game.
#[derive(Args)]
struct GameArgs {
    /// RNG seed for a reproducible game
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Difficulty for a new game: easy, normal, hard
    #[arg(short, long, default_value = "normal")]
    difficulty: String,

    /// Chance that fleeing fails (0.0-1.0)
    #[arg(long, default_value = "0.5")]
    flee_failure: f64,

    /// Resume from a save file
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Save file written by `save` and at the end of a run
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Run a script of commands, one per line ('-' reads stdin)
    Run {
        /// Script file
        script: PathBuf,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        game: GameArgs,
    },

    /// Show weapons, monsters, spells, and prices
    Tables {
        /// Scale monsters to this difficulty
        #[arg(short, long)]
        difficulty: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play { game } => commands::play::run(&game.into()),
        Commands::Run { script, json, game } => commands::run::run(&script, json, &game.into()),
        Commands::Tables { difficulty } => commands::tables::run(difficulty.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

impl From<GameArgs> for commands::GameOptions {
    fn from(args: GameArgs) -> Self {
        Self {
            seed: args.seed,
            difficulty: args.difficulty,
            flee_failure: args.flee_failure,
            load: args.load,
            save: args.save,
        }
    }
}
