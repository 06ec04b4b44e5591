//! CLI command implementations.

pub mod migrate;
pub mod seed;

use std::time::Duration;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Statement timeout for operator commands; migrations may run long.
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors shared by commands that talk to the database.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using `RENTMYFIT_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("RENTMYFIT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("RENTMYFIT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(rentmyfit_api::db::create_pool(&database_url, STATEMENT_TIMEOUT).await?)
}
