//! Command implementations

mod config;
mod nearby;
mod optimal;
mod replay;
mod sites;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match &cli.command {
        Commands::Replay(args) => replay::execute(&cli, args, &output).await,
        Commands::Nearby(args) => nearby::execute(&cli, args, &output).await,
        Commands::Optimal(args) => optimal::execute(&cli, args, &output).await,
        Commands::Sites => sites::execute(&cli, &output).await,
        Commands::Config => config::execute(&cli, &output),
    }
}
