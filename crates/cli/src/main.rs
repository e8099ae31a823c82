//! Emporium CLI - database migrations, seeding and schema export.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! emporium migrate
//!
//! # Load catalog products from YAML
//! emporium seed products data/products.yaml
//!
//! # Print the GraphQL schema (or write it to a file)
//! emporium schema --output schema.graphql
//!
//! # Delete expired and used auth tokens
//! emporium purge-tokens
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "emporium")]
#[command(author, version, about = "Emporium CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Export the GraphQL schema in SDL
    Schema {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete expired or consumed auth tokens
    PurgeTokens,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert catalog products from a YAML file
    Products {
        /// Path to the YAML file
        file: PathBuf,

        /// Validate the file without touching the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Products { file, dry_run } => {
                commands::seed::products(&file, dry_run).await?;
            }
        },
        Commands::Schema { output } => commands::schema::export(output.as_deref())?,
        Commands::PurgeTokens => commands::tokens::purge().await?,
    }
    Ok(())
}
