//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod history;
mod send;
mod status;

pub use history::HistoryArgs;
pub use send::SendArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether the server is reachable
    Status,
    /// Send an image through the server and collect the result
    Send(SendArgs),
    /// Fetch the stored result for an existing job handle (no polling)
    History(HistoryArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Status => status::handle_status(config).await,
        Commands::Send(args) => send::handle_send(args, config).await,
        Commands::History(args) => history::handle_history(args, config).await,
    }
}
