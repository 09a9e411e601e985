//! clap command tree for the `logbook` binary.

use clap::{Arg, ArgAction, Command};

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("logbook")
        .about("Human-readable logbook over a JSON-lines row dump")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(events_cmd())
}

fn events_cmd() -> Command {
    Command::new("events")
        .about("Humanize the rows of a time window and print them as JSON")
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_name("FILE")
                .required(true)
                .help("JSON-lines file with one row per line"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("TIME")
                .required(true)
                .help("Start of the window (inclusive)"),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_name("TIME")
                .help("End of the window (exclusive). Defaults to one day after --start, or now with --timestamp"),
        )
        .arg(
            Arg::new("entity")
                .long("entity")
                .value_name("IDS")
                .help("Comma-separated entity ids to restrict to"),
        )
        .arg(
            Arg::new("context-id")
                .long("context-id")
                .value_name("ID")
                .help("Only entries fired in this context"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML include/exclude configuration"),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .value_name("FILE")
                .help("JSON entity metadata: live names and continuous sensors"),
        )
        .arg(
            Arg::new("now")
                .long("now")
                .value_name("TIME")
                .hide(true)
                .help("Pin the current time"),
        )
        .arg(
            Arg::new("timestamp")
                .long("timestamp")
                .action(ArgAction::SetTrue)
                .help("Render `when` as seconds since the epoch"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the JSON output"),
        )
}
