use std::io::{self, BufRead, Write};

use colored::Colorize;

use dr_core::{Place, parse_command};

use super::{GameOptions, HELP, Meta, answer_query, load_target, parse_meta, save_target};
use crate::render;
use crate::save_file;

pub fn run(opts: &GameOptions) -> Result<(), String> {
    let (mut session, loaded) = super::start_session(opts)?;

    println!("  {} Dragon Repeller", "Starting".bold());
    println!(
        "  Difficulty: {} | Seed: {}",
        session.state().difficulty,
        opts.seed
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    render::print_events(&loaded);
    println!("{}\n", session.describe_location());

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
        if input.is_empty() {
            continue;
        }

        if let Some(meta) = parse_meta(input) {
            match meta {
                Meta::Quit => break,
                Meta::Help => println!("{HELP}\n"),
                Meta::Save(arg) => {
                    match save_target(arg, opts).and_then(|p| save_file::write(p, &session)) {
                        Ok(()) => println!("  Game saved.\n"),
                        Err(e) => println!("  {}\n", e.yellow()),
                    }
                }
                Meta::Load(arg) => match load_target(arg, opts).and_then(save_file::read) {
                    Ok(blob) => {
                        render::print_events(&session.load(&blob));
                        println!("\n{}\n", session.describe_location());
                    }
                    Err(e) => println!("  {}\n", e.yellow()),
                },
            }
            continue;
        }

        let command = match parse_command(input) {
            Ok(command) => command,
            Err(e) => {
                println!("  {}\n", e.to_string().yellow());
                continue;
            }
        };
        if command.is_query() {
            println!("{}\n", answer_query(&session, command));
            continue;
        }

        let before: Place = session.state().location;
        let events = session.execute(command);
        render::print_events(&events);
        println!();
        if session.state().location != before {
            println!("{}\n", session.describe_location());
        }
    }

    Ok(())
}
