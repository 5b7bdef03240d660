//! `HealWell` Mart CLI - catalog seed tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a seed file before pointing HEALWELL_CATALOG_SEED at it
//! healwell-cli catalog validate seed/catalog.yaml
//!
//! # Dump the built-in demo catalog as a starting point
//! healwell-cli catalog export > my-catalog.yaml
//!
//! # Row counts per category
//! healwell-cli catalog stats --from my-catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `catalog validate` - Parse and validate a seed file
//! - `catalog export` - Print a seed as YAML
//! - `catalog stats` - Show seed statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "healwell-cli")]
#[command(author, version, about = "HealWell Mart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with catalog seed files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog seed file
    Validate {
        /// Path to the YAML seed
        file: PathBuf,
    },
    /// Print a catalog seed as YAML to stdout
    Export {
        /// Seed to export (default: built-in demo catalog)
        #[arg(short, long)]
        from: Option<PathBuf>,
    },
    /// Show catalog statistics
    Stats {
        /// Seed to inspect (default: built-in demo catalog)
        #[arg(short, long)]
        from: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so `export` output can be redirected cleanly
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { file } => commands::catalog::validate(&file).await?,
            CatalogAction::Export { from } => commands::catalog::export(from.as_deref()).await?,
            CatalogAction::Stats { from } => commands::catalog::stats(from.as_deref()).await?,
        },
    }
    Ok(())
}
