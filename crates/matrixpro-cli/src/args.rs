use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AskArgs, BoardCommands, CellCommands, DeployArgs, HistoryCommands, RowCommands,
    SettingsCommands, SyncArgs,
};

/// Main command-line interface for the MatrixPro weekly planner
///
/// MatrixPro tracks a weekly priority matrix: labeled rows grouped by
/// priority (P1, P2, P3, Meeting), crossed with the Monday..Friday weekdays.
/// Fill cells with tasks, mark them complete, and deploy the week to archive
/// it while incomplete work carries forward. Work items can be synced from
/// Azure DevOps and dropped into cells, and an AI assistant can be asked for
/// planning advice over the current board.
#[derive(Parser)]
#[command(version, about, name = "mx")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/matrixpro/matrixpro.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the MatrixPro CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage boards and the active session
    #[command(alias = "b")]
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// Manage grid rows
    #[command(alias = "r")]
    Row {
        #[command(subcommand)]
        command: RowCommands,
    },
    /// Edit day cells
    #[command(alias = "c")]
    Cell {
        #[command(subcommand)]
        command: CellCommands,
    },
    /// Archive the current week and roll incomplete work forward
    #[command(alias = "d")]
    Deploy(DeployArgs),
    /// Browse and edit archived weeks
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Fetch assigned work items from Azure DevOps
    Sync(SyncArgs),
    /// Ask the planning assistant about the current board
    Ask(AskArgs),
    /// Show or change board settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Start the MCP server
    Serve,
}
