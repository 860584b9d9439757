use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick", about = concat!("[x] ticklist v", env!("CARGO_PKG_VERSION"), " - a to-do list in a JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use instead of the configured one
    #[arg(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    /// Read settings from this file instead of ./ticklist.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not save after every change (UI only; save with S or Ctrl-S)
    #[arg(long)]
    pub no_autosave: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with their positions
    List,
    /// Add a task to the end of the list
    Add(AddArgs),
    /// Mark a task done, or not done again
    Toggle(PositionArgs),
    /// Remove a task
    Rm(PositionArgs),
    /// View the recovery log
    Recovery(RecoveryCmd),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (several words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct PositionArgs {
    /// Position as printed by `tick list` (first task is 1)
    pub position: usize,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Print the path to the recovery log
    Path,
    /// Remove old entries from the recovery log
    Prune(PruneArgs),
}

#[derive(Args)]
pub struct PruneArgs {
    /// Number of newest entries to keep
    #[arg(long, default_value_t = 0)]
    pub keep: usize,
}
