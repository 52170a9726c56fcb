use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pageant_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "pageant")]
#[command(author, version, about = "A terminal page viewer with smooth anchor navigation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// View a page manifest in the terminal
    View {
        /// Path to the page manifest (.toml or .json)
        page: PathBuf,
    },
    /// Validate a page manifest and report unresolvable anchors
    Check {
        /// Path to the page manifest (.toml or .json)
        page: PathBuf,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    match cli.command {
        Commands::View { page } => commands::run::run(config, &page),
        Commands::Check { page } => commands::check::run(&page),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init => commands::config::init(&config),
        },
    }
}
