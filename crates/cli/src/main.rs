//! Logbook CLI: humanize a JSON-lines row dump.
//!
//! ```text
//! logbook events --rows rows.jsonl --start 2022-04-15 [--end ...] [--entity light.kitchen]
//! ```
//!
//! Entries are printed to stdout as a JSON array. Diagnostics go to stderr
//! and are controlled with `RUST_LOG` (default `warn`).

mod commands;
mod run;

use std::process;

use tracing_subscriber::EnvFilter;

use commands::build_cli;
use run::run_events;

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let exit_code = match matches.subcommand() {
        Some(("events", sub)) => match run_events(sub) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("(error) {:#}", e);
                1
            }
        },
        Some((other, _)) => {
            eprintln!("(error) Unknown command: {}", other);
            1
        }
        None => {
            eprintln!("(error) No command provided");
            1
        }
    };
    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
