//! Strata CLI - watch a categorized search feed from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod render;
mod settings;

#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a feed and print bands and recent events after every tick
    Watch {
        /// Use the synthetic feed instead of the live one
        #[arg(short, long)]
        synthetic: bool,

        /// Override the live feed URL
        #[arg(short, long)]
        url: Option<String>,

        /// Stop after this many accepted events
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = settings::Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Watch {
            synthetic,
            url,
            limit,
        } => {
            commands::watch::execute(settings, synthetic, url, limit)?;
        }
        Commands::Config => {
            commands::config::execute(&settings)?;
        }
    }

    Ok(())
}
