use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ds_cli::commands::{cache, generate};
use ds_cli::{CacheAction, Cli, Commands, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Generate { days, out, refresh }) => {
            generate::run(&config, *days, out.as_deref(), *refresh).await?;
        }
        Some(Commands::Cache { action }) => {
            let mut stdout = io::stdout();
            match action {
                CacheAction::Info => cache::info(&mut stdout, &config)?,
                CacheAction::Clear { key } => cache::clear(&mut stdout, &config, key.as_deref())?,
            }
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
