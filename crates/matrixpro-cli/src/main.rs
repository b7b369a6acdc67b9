//! MatrixPro CLI Application
//!
//! Command-line interface for the MatrixPro weekly priority matrix.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use matrixpro_core::MatrixBuilder;
use mcp::{run_stdio_server, MatrixMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let matrix = MatrixBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize board")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("MatrixPro started");

    match command {
        Some(Board { command }) => {
            Cli::new(matrix, renderer)
                .handle_board_command(command)
                .await
        }
        Some(Row { command }) => Cli::new(matrix, renderer).handle_row_command(command).await,
        Some(Cell { command }) => {
            Cli::new(matrix, renderer)
                .handle_cell_command(command)
                .await
        }
        Some(Deploy(deploy_args)) => Cli::new(matrix, renderer).deploy(deploy_args).await,
        Some(History { command }) => {
            Cli::new(matrix, renderer)
                .handle_history_command(command)
                .await
        }
        Some(Sync(sync_args)) => Cli::new(matrix, renderer).sync(sync_args).await,
        Some(Ask(ask_args)) => Cli::new(matrix, renderer).ask(ask_args).await,
        Some(Settings { command }) => {
            Cli::new(matrix, renderer)
                .handle_settings_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting MatrixPro MCP server");
            run_stdio_server(MatrixMcpServer::new(matrix))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(matrix, renderer).show_board().await,
    }
}
