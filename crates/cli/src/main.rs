//! Orchard CLI - Database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending storefront migrations
//! orchard-cli migrate
//!
//! # Show applied and pending migrations without changing anything
//! orchard-cli migrate --status
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orchard-cli")]
#[command(author, version, about = "Orchard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate {
        /// Only report which migrations are applied or pending
        #[arg(long)]
        status: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { status: false } => commands::migrate::run().await,
        Commands::Migrate { status: true } => commands::migrate::status().await,
    }
}
