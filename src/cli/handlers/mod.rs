use std::path::PathBuf;

use tracing::{debug, warn};

use crate::cli::commands::Cli;
use crate::cli::dispatch::{Context, DispatchError, run_command};
use crate::cli::grammar::build_grammar;
use crate::cli::output::*;
use crate::io::{config_io, store};
use crate::logging::{self, Frontend};
use crate::model::{Config, Records};
use crate::tui;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One process run: load config and records, do exactly one thing (listing,
/// command or TUI session), then persist whatever changed.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(config_io::config_path);
    let (mut config, mut doc) = config_io::read_config(&config_path)?;

    let data_dir = store::data_dir(&config);
    let frontend = if cli.tui { Frontend::Tui } else { Frontend::Cli };
    logging::init(&config, &data_dir, frontend)?;
    debug!(config = %config_path.display(), data = %data_dir.display(), "starting");

    // Config commands never touch records; the store is not opened.
    if !cli.tui && is_config_command(&cli.args) {
        let result = cmd_dispatch(&cli.args, &mut config, &mut Records::default());
        config_io::write_config(&config_path, &mut doc, &config)?;
        result?;
        return Ok(());
    }

    let mut store = store::open_store(&config, !cli.no_sync)?;
    let mut records = store.load()?;

    let (changed, result): (bool, Result<(), Box<dyn std::error::Error>>) = if cli.tui {
        let before = records.clone();
        let session = tui::run(&config, &mut records);
        tui_outcome(session, &before, &records)
    } else if cli.args.is_empty() {
        (false, cmd_list(&records, cli.json))
    } else {
        match cmd_dispatch(&cli.args, &mut config, &mut records) {
            Ok(changed) => (changed, Ok(())),
            Err(e) => (false, Err(e.into())),
        }
    };

    // Config is rewritten even when the command failed.
    config_io::write_config(&config_path, &mut doc, &config)?;

    if changed {
        store.save(&records)?;
    }
    result
}

fn is_config_command(args: &[String]) -> bool {
    args.first().is_some_and(|word| word == "config")
}

/// Decide what a TUI session leaves to persist. Edits made before a
/// terminal failure are still saved; the failure is reported afterwards.
fn tui_outcome(
    session: std::io::Result<bool>,
    before: &Records,
    after: &Records,
) -> (bool, Result<(), Box<dyn std::error::Error>>) {
    match session {
        Ok(changed) => (changed, Ok(())),
        Err(e) => {
            let changed = after != before;
            if changed {
                warn!(error = %e, "terminal failed; saving edits made so far");
            }
            (changed, Err(e.into()))
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(records: &Records, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&listing_to_json(records))?);
        return Ok(());
    }
    for line in format_listing(records) {
        println!("{}", line);
    }
    Ok(())
}

/// Run the command words once. Returns whether records changed.
fn cmd_dispatch(
    args: &[String],
    config: &mut Config,
    records: &mut Records,
) -> Result<bool, DispatchError> {
    let mut ctx = Context { config, records };
    let outcome = run_command(&build_grammar(), args, &mut ctx)?;
    if let Some(message) = outcome.message() {
        println!("{}", message);
    }
    Ok(outcome.records_changed())
}
