use std::fs;
use std::io::{self, Read};
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use dr_core::{Command, GameEvent, parse_command};

use super::{GameOptions, Meta, answer_query, load_target, parse_meta, save_target};
use crate::render;
use crate::save_file;

pub fn run(script: &Path, json: bool, opts: &GameOptions) -> Result<(), String> {
    let text = read_script(script)?;
    let (mut session, loaded) = super::start_session(opts)?;
    if !loaded.is_empty() {
        emit(json, "load", &loaded);
    }

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !json {
            println!("{}", format!("> {line}").dimmed());
        }

        if let Some(meta) = parse_meta(line) {
            match meta {
                Meta::Quit => break,
                Meta::Help => {}
                Meta::Save(arg) => {
                    let path = save_target(arg, opts)?;
                    save_file::write(path, &session)
                        .map_err(|e| format!("line {}: {e}", number + 1))?;
                }
                Meta::Load(arg) => {
                    let blob = load_target(arg, opts).and_then(save_file::read)?;
                    emit(json, line, &session.load(&blob));
                }
            }
            continue;
        }

        match parse_command(line) {
            Ok(command) if command.is_query() => {
                if json {
                    println!("{}", query_json(line, &session, command));
                } else {
                    println!("{}", answer_query(&session, command));
                }
            }
            Ok(command) => emit(json, line, &session.execute(command)),
            Err(e) => emit(json, line, &[GameEvent::rejected(e)]),
        }
    }

    if let Some(path) = &opts.save {
        save_file::write(path, &session)?;
    }
    if !json {
        println!();
        println!("{}", render::status_table(session.state()));
    }
    Ok(())
}

fn read_script(script: &Path) -> Result<String, String> {
    if script.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| e.to_string())?;
        Ok(text)
    } else {
        fs::read_to_string(script).map_err(|e| format!("cannot read {}: {e}", script.display()))
    }
}

fn emit(json: bool, line: &str, events: &[GameEvent]) {
    if json {
        println!("{}", json!({ "command": line, "events": events }));
    } else {
        render::print_events(events);
    }
}

fn query_json(line: &str, session: &dr_core::GameSession, command: Command) -> serde_json::Value {
    match command {
        Command::Status => json!({ "command": line, "state": session.state() }),
        _ => json!({ "command": line, "location": session.describe_location() }),
    }
}
