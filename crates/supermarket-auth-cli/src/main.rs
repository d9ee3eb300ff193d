// Binary entry point for supermarket-auth

mod args;
mod commands;
mod config;
mod constants;
mod output;

use anyhow::Result;
use args::{Cli, CliConfig};
use clap::{CommandFactory, Parser};
use commands::Commands;
use output::OutputLevel;

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

/// Parse CLI arguments, load configuration and dispatch to the requested
/// sub-command.
pub async fn run() -> Result<()> {
    // Enable shell completion generation when the user sets COMPLETE=fish etc.
    clap_complete::CompleteEnv::with_factory(Cli::command).complete();
    let cli = Cli::parse();

    let output_level = if cli.quiet {
        OutputLevel::Quiet
    } else if cli.verbose {
        OutputLevel::Verbose
    } else {
        OutputLevel::Normal
    };
    output::init_logging(output_level);

    // Completions must work even with a broken config file
    if let Commands::Completions(args) = &cli.command {
        return args.run().await;
    }

    let cli_config = CliConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Providers(args) => args.run(output_level, &cli_config).await?,
        Commands::Show(args) => args.run(output_level, &cli_config).await?,
        Commands::Open(args) => args.run(output_level, &cli_config).await?,
        Commands::Match(args) => args.run(output_level, &cli_config).await?,
        Commands::Watch(args) => args.run(output_level, &cli_config).await?,
        Commands::View(args) => args.run(output_level, &cli_config).await?,
        Commands::Info(args) => args.run(output_level, &cli_config).await?,
        Commands::Completions(args) => args.run().await?,
    }

    Ok(())
}
