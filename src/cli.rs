use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pastecycle", version, about = "Clipboard history with sequential paste dispatch")]
pub struct Cli {
    /// Config file to use instead of `<app data dir>/config.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Watch the clipboard and dispatch pastes (default).
    Run,

    /// Add the contents of a text file to the history.
    Import {
        path: PathBuf,
        /// Import the file as a single entry instead of splitting on blank lines.
        #[arg(long)]
        whole: bool,
    },

    /// Write pasted entries that were not exported yet to the export directory.
    Export,

    /// Remove entries from the history and empty the clipboard.
    Clear {
        /// Only remove entries that were already pasted.
        #[arg(long)]
        pasted_only: bool,
    },

    /// Print the history with its `[unconsumed/total]` status line.
    Status,
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
