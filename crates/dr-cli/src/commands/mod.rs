pub mod play;
pub mod run;
pub mod tables;

use std::path::{Path, PathBuf};

use dr_core::{Command, Difficulty, GameEvent, GameSession, SessionConfig};

use crate::render;
use crate::save_file;

/// Game settings collected from the command line.
pub struct GameOptions {
    pub seed: u64,
    pub difficulty: String,
    pub flee_failure: f64,
    pub load: Option<PathBuf>,
    pub save: Option<PathBuf>,
}

/// Build a session from the options, loading a save file if one was given.
/// Returns the events produced by the load.
fn start_session(opts: &GameOptions) -> Result<(GameSession, Vec<GameEvent>), String> {
    let difficulty: Difficulty = opts.difficulty.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=1.0).contains(&opts.flee_failure) {
        return Err(format!(
            "flee failure chance must be between 0 and 1, got {}",
            opts.flee_failure
        ));
    }

    let config = SessionConfig::default()
        .with_seed(opts.seed)
        .with_difficulty(difficulty)
        .with_flee_failure_chance(opts.flee_failure);
    let mut session = GameSession::new(config);

    let events = match &opts.load {
        Some(path) => session.load(&save_file::read(path)?),
        None => Vec::new(),
    };
    Ok((session, events))
}

/// Front-end words handled outside the game core.
enum Meta<'a> {
    Quit,
    Help,
    Save(Option<&'a str>),
    Load(Option<&'a str>),
}

fn parse_meta(line: &str) -> Option<Meta<'_>> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_lowercase();
    let arg = words.next();
    match verb.as_str() {
        "quit" | "q" | "exit" => Some(Meta::Quit),
        "help" | "h" | "?" => Some(Meta::Help),
        "save" => Some(Meta::Save(arg)),
        "load" => Some(Meta::Load(arg)),
        _ => None,
    }
}

fn save_target<'a>(arg: Option<&'a str>, opts: &'a GameOptions) -> Result<&'a Path, String> {
    arg.map(Path::new)
        .or(opts.save.as_deref())
        .ok_or_else(|| "no save file: use 'save <path>' or pass --save".to_string())
}

fn load_target<'a>(arg: Option<&'a str>, opts: &'a GameOptions) -> Result<&'a Path, String> {
    arg.map(Path::new)
        .or(opts.save.as_deref())
        .or(opts.load.as_deref())
        .ok_or_else(|| "no save file: use 'load <path>' or pass --load".to_string())
}

/// Text shown for a query command.
fn answer_query(session: &GameSession, command: Command) -> String {
    match command {
        Command::Status => render::status_table(session.state()).to_string(),
        _ => session.describe_location(),
    }
}

const HELP: &str = "\
Travel:   town, store, cave, forest (or 'go <place>')
Fight:    fight <slime|beast|dragon|0-2>
Store:    buy health, buy mana, buy weapon, quote, confirm, cancel, sell
Combat:   attack, defend, flee, strike, cast <heal|fireball|lightning|shield>
Forest:   pick <0-10>
Other:    look, status, difficulty <easy|normal|hard>, restart
Files:    save [path], load [path]
          help, quit";
