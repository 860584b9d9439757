use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::recovery;
use crate::io::store::JsonFileStore;
use crate::model::config::Config;
use crate::ops::TaskList;

/// Default number of entries shown by `tick recovery`
const RECOVERY_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = resolve_config(&cli)?;

    match cli.command {
        None => cmd_tui(config),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List => cmd_list(&config, json),
            Commands::Recovery(args) => cmd_recovery(args, &config, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, &config, json),
            Commands::Toggle(args) => cmd_toggle(args, &config, json),
            Commands::Rm(args) => cmd_rm(args, &config, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Settings for this run: the config file, then command line overrides.
pub fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = config_io::load_config(cli.config.as_deref(), Path::new("."))?;
    if let Some(ref file) = cli.file {
        config.store.path = file.clone();
    }
    if cli.no_autosave {
        config.store.autosave = false;
    }
    Ok(config)
}

pub fn open_store(config: &Config) -> JsonFileStore {
    JsonFileStore::new(&config.store.path).with_recovery_log(config.store.recovery_log)
}

/// Run a one-shot command on the list. Commands always save what they
/// change, whatever the autosave setting. Recovery log failures are
/// reported on stderr whether or not the command succeeds.
fn with_list<T>(
    config: &Config,
    f: impl FnOnce(&mut TaskList<JsonFileStore>) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let mut list = TaskList::new(open_store(config), true);
    let result = match list.reload() {
        Ok(()) => f(&mut list),
        Err(e) => Err(e.into()),
    };
    for warning in list.store().take_log_warnings() {
        eprintln!("warning: {}", warning);
    }
    result
}

/// Turn a 1-based position from the command line into a list index.
fn position_to_index(position: usize, len: usize) -> Result<usize, String> {
    if position == 0 || position > len {
        let available = match len {
            0 => "the list is empty".to_string(),
            1 => "the only position is 1".to_string(),
            n => format!("positions are 1 to {}", n),
        };
        return Err(format!("no task at position {} ({})", position, available));
    }
    Ok(position - 1)
}

fn print_task(
    position: usize,
    list: &TaskList<JsonFileStore>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = &list.tasks()[position - 1];
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&TaskJson::new(position, task))?
        );
    } else {
        println!("{}", format_task_line(position, task, list.len()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Run the terminal UI. A file that cannot be loaded does not stop the UI;
/// it starts empty and shows the error instead.
fn cmd_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = TaskList::new(open_store(&config), config.store.autosave);
    let load_error = list.reload().err();
    crate::tui::run(list, config.ui, load_error)
}

fn cmd_list(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    with_list(config, |list| {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&tasks_to_json(list.tasks()))?
            );
        } else {
            println!("{}", format_task_list(list.tasks()));
        }
        Ok(())
    })
}

fn cmd_add(
    args: AddArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.text.join(" ");
    with_list(config, |list| {
        if !list.add(&text)? {
            return Err("task text is empty".into());
        }
        print_task(list.len(), list, json)
    })
}

fn cmd_toggle(
    args: PositionArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    with_list(config, |list| {
        let index = position_to_index(args.position, list.len())?;
        list.toggle_done(index)?;
        print_task(args.position, list, json)
    })
}

fn cmd_rm(
    args: PositionArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    with_list(config, |list| {
        let index = position_to_index(args.position, list.len())?;
        let removed = TaskJson::new(args.position, &list.tasks()[index]);
        list.delete(index)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&removed)?);
        } else {
            println!("removed: {}", removed.task);
        }
        Ok(())
    })
}

fn cmd_recovery(
    args: RecoveryCmd,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_path = recovery::recovery_log_path(&config.store.path);

    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", log_path.display());
            return Ok(());
        }
        Some(RecoveryAction::Prune(prune)) => {
            let removed = recovery::prune_recovery(&log_path, prune.keep)?;
            if json {
                println!("{}", serde_json::json!({ "removed": removed }));
            } else {
                println!(
                    "Removed {} recovery entr{}.",
                    removed,
                    if removed == 1 { "y" } else { "ies" }
                );
            }
            return Ok(());
        }
        None => {}
    }

    let limit = args.limit.unwrap_or(RECOVERY_LIMIT);
    let entries = recovery::read_recovery_entries(&log_path, Some(limit));
    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else if entries.is_empty() {
        println!("No recovery entries.");
    } else {
        let blocks: Vec<String> = entries.iter().map(|e| e.to_display_markdown()).collect();
        print!("{}", blocks.join("\n"));
    }
    Ok(())
}
