//! wellscrape: scraper and read API for New Mexico OCD well records

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use wellscrape::config::Config;

#[derive(Parser)]
#[command(name = "wellscrape")]
#[command(about = "Scrape and serve New Mexico OCD well records")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape well records for identifiers listed in a CSV file
    Scrape {
        /// CSV file with an 'api' column of well identifiers
        #[arg(long)]
        csv: PathBuf,

        /// Use a bounded worker pool instead of sequential processing
        #[arg(short, long)]
        parallel: bool,

        /// Worker count for parallel mode (default from config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Export the store after the run
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format (csv, json)
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Serve the HTTP read API
    Serve {
        /// Listen address (overrides config)
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Export all stored records
    Export {
        /// Output path
        output: PathBuf,

        /// Format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Write a default config.toml
    Init {
        /// Output directory or file
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // -v flags override the configured level.
    let log_level = match cli.verbose {
        0 => config
            .logging
            .level
            .parse::<Level>()
            .unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Scrape {
            csv,
            parallel,
            workers,
            export,
            format,
        } => commands::scrape::run(config, csv, parallel, workers, export, format).await,
        Commands::Serve { listen } => commands::serve::run(config, listen).await,
        Commands::Export { output, format } => commands::export::run(config, output, format),
        Commands::Init { path } => commands::init::run(path),
    }
}
