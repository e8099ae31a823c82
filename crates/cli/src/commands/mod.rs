//! Subcommand implementations.

pub mod migrate;
pub mod schema;
pub mod seed;
pub mod tokens;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use emporium_api::db::RepositoryError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} invalid product entries")]
    InvalidSeed(usize),
}

/// Connect using `EMPORIUM_DATABASE_URL`, falling back to `DATABASE_URL`.
async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("EMPORIUM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("EMPORIUM_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = emporium_api::db::create_pool(&database_url).await?;
    Ok(pool)
}
