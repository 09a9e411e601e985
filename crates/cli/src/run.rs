//! `events` subcommand: ArgMatches → Command → JSON.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use logbook_core::LogbookConfig;
use logbook_engine::{DescriberRegistry, StaticEntityMetadata};
use logbook_executor::{fixed_clock, parse_entity_ids, parse_time, Command, Error, Executor};
use logbook_storage::jsonl;
use tracing::debug;

/// Run `logbook events` and return the rendered JSON.
pub fn run_events(matches: &ArgMatches) -> Result<String> {
    let executor = build_executor(matches)?;
    let command = events_command(matches)?;

    let entries = executor
        .execute(command)?
        .into_entries()
        .context("Unexpected output for events")?;
    debug!(entries = entries.len(), "humanized rows");

    let json = if matches.get_flag("pretty") {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    Ok(json)
}

fn build_executor(matches: &ArgMatches) -> Result<Executor> {
    let rows = required(matches, "rows")?;
    let store = jsonl::load(rows).with_context(|| format!("Failed to load rows from {}", rows))?;

    let registry = DescriberRegistry::builder()
        .with_standard_describers()?
        .build();
    let mut executor = Executor::new(Arc::new(store), Arc::new(registry));

    if let Some(path) = matches.get_one::<String>("config") {
        let filter = LogbookConfig::from_path(path)
            .and_then(|config| config.entity_filter())
            .with_context(|| format!("Failed to load config from {}", path))?;
        executor = executor.with_filter(filter);
    }
    if let Some(path) = matches.get_one::<String>("metadata") {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata from {}", path))?;
        let metadata = StaticEntityMetadata::from_json_str(&source)
            .with_context(|| format!("Failed to parse metadata from {}", path))?;
        executor = executor.with_metadata(Arc::new(metadata));
    }
    if let Some(now) = matches.get_one::<String>("now") {
        let now = parse_time(now, |value| Error::InvalidDatetime { value })?;
        executor = executor.with_clock(fixed_clock(now));
    }
    Ok(executor)
}

/// `--timestamp` selects the subscription-style command, which renders
/// numeric times; otherwise the point-in-time query with ISO times.
fn events_command(matches: &ArgMatches) -> Result<Command> {
    let start = required(matches, "start")?.clone();
    let end = matches.get_one::<String>("end").cloned();
    let entity = matches.get_one::<String>("entity").cloned();
    let context_id = matches.get_one::<String>("context-id").cloned();

    if matches.get_flag("timestamp") {
        let entity_ids = match entity {
            Some(csv) => Some(parse_entity_ids(&csv)?),
            None => None,
        };
        Ok(Command::GetEvents {
            start_time: start,
            end_time: end,
            entity_ids,
            context_id,
        })
    } else {
        Ok(Command::Logbook {
            datetime: Some(start),
            period: None,
            entity,
            end_time: end,
            context_id,
        })
    }
}

fn required<'m>(matches: &'m ArgMatches, id: &str) -> Result<&'m String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("Missing --{}", id))
}
