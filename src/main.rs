//! tetherstone - headless sandbox for bindable provider items
//!
//! Runs an interaction script against an in-memory world and prints the
//! outcome of every command.

mod command_script;
mod commands;
mod config;
mod sandbox;

use anyhow::Result;
use command_script::InteractionScript;
use commands::{execute_command, parse_command};
use config::SandboxConfig;
use sandbox::Sandbox;
use std::{env, path::PathBuf};
use tetherstone_core::SimTick;
use tetherstone_testkit::{EventRecord, JsonlSink};
use tetherstone_world::Authority;
use tracing::{info, warn};

fn main() -> Result<()> {
    // WARN by default; override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting tetherstone v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match cli.config.as_deref() {
        Some(path) => SandboxConfig::load_from_path(path),
        None => SandboxConfig::load(),
    };
    if let Some(authority) = cli.authority {
        config.authority = authority;
    }
    if let Some(path) = cli.events {
        config.events_log = Some(path);
    }

    let Some(script_path) = cli.script else {
        println!("Usage: tetherstone --script <file.json> [--config <file.toml>] [--events <file.jsonl>] [--authority <authoritative|observer>]");
        return Ok(());
    };
    let script = InteractionScript::from_path(&script_path)?;

    let mut events = match config.events_log.as_ref() {
        Some(path) => Some(JsonlSink::create(path)?),
        None => None,
    };

    let mut sandbox = Sandbox::new(config.authority, config.providers.clone());
    run_script(script, &mut sandbox, events.as_mut())
}

fn run_script(
    mut script: InteractionScript,
    sandbox: &mut Sandbox,
    mut events: Option<&mut JsonlSink>,
) -> Result<()> {
    let mut tick = SimTick::ZERO;
    while let Some(next) = script.next_tick() {
        tick = tick.max(next);
        for line in script.drain_ready(tick) {
            println!("> {line}");
            let (kind, lines) = match parse_command(&line) {
                Ok(cmd) => {
                    let kind = cmd.verb();
                    (kind, execute_command(sandbox, cmd).lines)
                }
                Err(err) => {
                    warn!(%err, command = %line, "rejected script command");
                    ("error", vec![format!("Error: {err}")])
                }
            };
            for out in &lines {
                println!("{out}");
            }
            if let Some(sink) = events.as_deref_mut() {
                sink.write(&EventRecord::new(tick, kind, lines.join("\n")))?;
            }
        }
        if script.is_finished() {
            break;
        }
        tick = tick.advance(1);
    }
    info!(last_tick = tick.0, "script finished");
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    events: Option<PathBuf>,
    authority: Option<Authority>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--events" => {
                    if let Some(path) = args.next() {
                        opts.events = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--events requires a file path");
                    }
                }
                "--authority" => {
                    if let Some(raw) = args.next() {
                        match Authority::parse(&raw) {
                            Some(authority) => opts.authority = Some(authority),
                            None => {
                                tracing::error!(value = %raw, "--authority must be authoritative or observer");
                            }
                        }
                    } else {
                        tracing::error!("--authority requires a value");
                    }
                }
                other => warn!(arg = %other, "ignoring unknown argument"),
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn cli_reads_paths_and_authority() {
        let opts = parse(&[
            "--script",
            "demos/bind_demo.json",
            "--events",
            "target/events.jsonl",
            "--authority",
            "observer",
        ]);
        assert_eq!(opts.script, Some(PathBuf::from("demos/bind_demo.json")));
        assert_eq!(opts.events, Some(PathBuf::from("target/events.jsonl")));
        assert_eq!(opts.authority, Some(Authority::Observer));
        assert!(opts.config.is_none());
    }

    #[test]
    fn cli_ignores_bad_values() {
        let opts = parse(&["--authority", "maybe", "--bogus", "--config"]);
        assert!(opts.authority.is_none());
        assert!(opts.config.is_none());
    }

    #[test]
    fn run_script_logs_one_event_per_command() {
        let script = InteractionScript::parse(
            r#"{"steps": [
                {"command": "place 10 64 -5 chest"},
                {"command": "give item_provider"},
                {"tick": 2, "command": "sneak on"},
                {"tick": 2, "command": "use 10 64 -5 up"},
                {"tick": 5, "command": "fly away"}
            ]}"#,
        )
        .unwrap();
        let path = std::env::temp_dir().join(format!(
            "tetherstone-run-{}.jsonl",
            std::process::id()
        ));
        let mut sink = JsonlSink::create(&path).unwrap();
        let mut sandbox = Sandbox::new(Authority::Authoritative, Default::default());
        run_script(script, &mut sandbox, Some(&mut sink)).unwrap();
        drop(sink);

        let events = tetherstone_testkit::read_events(&path).unwrap();
        let kinds: Vec<_> = events.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["place", "give", "sneak", "use", "error"]);
        assert_eq!(events[3].tick, SimTick(2));
        assert_eq!(events[3].payload, "Success\nInventory changed");
        assert_eq!(events[4].tick, SimTick(5));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn run_script_accepts_the_last_representable_tick() {
        let script = InteractionScript::parse(
            r#"{"steps": [
                {"tick": 18446744073709551614, "command": "give item_provider"},
                {"tick": 18446744073709551615, "command": "tooltip"}
            ]}"#,
        )
        .unwrap();
        let path = std::env::temp_dir().join(format!(
            "tetherstone-last-tick-{}.jsonl",
            std::process::id()
        ));
        let mut sink = JsonlSink::create(&path).unwrap();
        let mut sandbox = Sandbox::new(Authority::Authoritative, Default::default());
        run_script(script, &mut sandbox, Some(&mut sink)).unwrap();
        drop(sink);

        let events = tetherstone_testkit::read_events(&path).unwrap();
        let ticks: Vec<_> = events.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![SimTick(u64::MAX - 1), SimTick(u64::MAX)]);
        let _ = std::fs::remove_file(&path);
    }
}
