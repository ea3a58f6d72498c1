use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ql_cli::commands::{events, report};
use ql_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Reports go to stdout, diagnostics to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Report { files, json, human }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let output = if *json || *human {
                report::OutputFormat {
                    human: *human,
                    json: *json,
                }
            } else {
                report::OutputFormat {
                    human: config.human,
                    json: config.json,
                }
            };
            report::run(files, output)?;
        }
        Some(Commands::Events { file }) => {
            events::run(file)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
