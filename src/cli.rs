use std::path::PathBuf;

use crate::data::registry::{default_data_dir, GameData};
use crate::data::validate::validate_game_data;
use crate::query::{self, EntityKind, LookupOutcome, LookupRequest};
use crate::reply::{Reply, WaveOptions};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Send,
    Tower,
    Wave,
    Serve,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("send") => Some(Command::Send),
        Some("tower") => Some(Command::Tower),
        Some("wave") => Some(Command::Wave),
        Some("serve") => Some(Command::Serve),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Send) => handle_lookup(EntityKind::Send, args),
        Some(Command::Tower) => handle_lookup(EntityKind::Tower, args),
        Some(Command::Wave) => handle_lookup(EntityKind::Wave, args),
        Some(Command::Serve) => handle_serve(),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: adjutant <send|tower|wave|serve|validate>");
            2
        }
    }
}

fn lookup_usage(kind: EntityKind) -> String {
    match kind {
        EntityKind::Wave => "usage: adjutant wave <number> [--non-adr] [--x1] [--json]".to_string(),
        _ => format!("usage: adjutant {} <name> [--json]", kind.label()),
    }
}

fn handle_lookup(kind: EntityKind, args: &[String]) -> i32 {
    let as_json = args.iter().any(|arg| arg == "--json");
    let wave_options = WaveOptions {
        non_adr: args.iter().any(|arg| arg == "--non-adr"),
        x1: args.iter().any(|arg| arg == "--x1"),
    };

    // Everything after the verb that is not a flag is the name; multi-word
    // names work unquoted.
    let words: Vec<&str> = args
        .iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .collect();
    if words.is_empty() {
        eprintln!("{}", lookup_usage(kind));
        return 2;
    }

    let data = match GameData::load_from_dir(&default_data_dir()) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to load data: {err}");
            return 1;
        }
    };

    let request = LookupRequest {
        kind,
        query: words.join(" "),
        wave_options,
    };
    match query::lookup(&data, &request) {
        Ok(LookupOutcome::Found(reply)) => print_reply(&reply, as_json),
        Ok(LookupOutcome::NotFound(message)) => {
            if as_json {
                match serde_json::to_string_pretty(&serde_json::json!({ "message": message })) {
                    Ok(payload) => println!("{payload}"),
                    Err(err) => {
                        eprintln!("failed to serialize reply: {err}");
                        return 1;
                    }
                }
            } else {
                println!("{message}");
            }
            0
        }
        Err(err) => {
            eprintln!("lookup failed: {err}");
            1
        }
    }
}

fn print_reply(reply: &Reply, as_json: bool) -> i32 {
    if as_json {
        match serde_json::to_string_pretty(reply) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize reply: {err}");
                1
            }
        }
    } else {
        println!("{}", reply.title);
        println!("{}", reply.description);
        println!();
        println!("{}", reply.body);
        0
    }
}

fn handle_serve() -> i32 {
    let bind_addr = server::bind_addr();
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir);

    let data = match GameData::load_from_dir(&dir) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to load data: {err}");
            return 1;
        }
    };

    let report = validate_game_data(&data);
    for diag in &report.diagnostics {
        println!("{}: {}: {}", diag.severity, diag.context, diag.message);
    }

    let checked =
        data.abilities.len() + data.sends.len() + data.towers.len() + data.waves.len();
    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s), {} warning(s) across {} entries",
            report.error_count(),
            report.warning_count(),
            checked
        );
        1
    } else {
        println!("validation passed: {checked} entries checked");
        0
    }
}
