//! Storekeeper CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! storekeeper-cli migrate
//!
//! # Browse the remote catalog (n = next page, p = previous page, q = quit)
//! storekeeper-cli browse --search "shirt" --per-page 5
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `browse` - Page through the remote product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "storekeeper-cli")]
#[command(author, version, about = "Storekeeper CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Browse the remote product catalog
    Browse {
        /// Search term to filter the catalog
        #[arg(short, long, default_value = "")]
        search: String,

        /// Products per page (1-50)
        #[arg(short, long, default_value_t = 10)]
        per_page: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Browse { search, per_page } => {
            commands::browse::run(&search, per_page).await?;
        }
    }
    Ok(())
}
