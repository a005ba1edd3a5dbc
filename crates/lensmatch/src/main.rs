//! Lensmatch CLI - rank a product catalog by what an image classifier sees.
//!
//! Lensmatch reads a JSON catalog, takes classifier predictions for a photo
//! (from a predictions file, or by sending the photo to the configured
//! classifier) and prints the catalog items that best match.
//!
//! # Usage
//!
//! ```bash
//! # Rank against an existing predictions file
//! lensmatch rank --predictions mug.predictions.json
//!
//! # Classify an image and rank, showing scores
//! lensmatch rank --image ./mug.jpg --explain
//!
//! # Browse the catalog
//! lensmatch search --query kettle --category kitchen
//! lensmatch categories
//!
//! # View configuration
//! lensmatch config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Lensmatch - rank a product catalog by what an image classifier sees.
#[derive(Parser, Debug)]
#[command(name = "lensmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank catalog items against classifier predictions
    Rank(cli::rank::RankArgs),

    /// Filter the catalog by text and category
    Search(cli::search::SearchArgs),

    /// List catalog categories
    Categories(cli::categories::CategoriesArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match lensmatch_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lensmatch config path`."
            );
            lensmatch_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lensmatch v{}", lensmatch_core::VERSION);

    match cli.command {
        Commands::Rank(args) => cli::rank::execute(args, config).await,
        Commands::Search(args) => cli::search::execute(args, config),
        Commands::Categories(args) => cli::categories::execute(args, config),
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
