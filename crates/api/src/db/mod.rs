//! Database operations for the RentMyFit `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Accounts, with the wishlist (`INTEGER[]`) and cart (`JSONB`)
//!   embedded in the row
//! - `products` - Catalog entries
//! - `orders` - Rental orders referencing a user and a product
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p rentmyfit-cli -- migrate
//! ```

pub mod orders;
pub mod products;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A check constraint rejected the written values.
    #[error("invalid data: {0}")]
    Invalid(String),
}

impl RepositoryError {
    /// Map a unique-index violation to `Conflict`, anything else to `Database`.
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }

    /// Map a check-constraint violation to `Invalid` carrying `message`.
    pub(crate) fn from_check(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_check_violation()
        {
            return Self::Invalid(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Connection options shared by the eager and lazy pool constructors.
fn connect_options(
    database_url: &SecretString,
    statement_timeout: Duration,
) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(database_url.expose_secret())?
        .options([("statement_timeout", statement_timeout.as_millis().to_string())]))
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// Every connection carries a `statement_timeout`, so a stuck query surfaces
/// as an error instead of holding the request open.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    statement_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    pool_options()
        .connect_with(connect_options(database_url, statement_timeout)?)
        .await
}

/// Create a pool that connects on first use.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(
    database_url: &SecretString,
    statement_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    Ok(pool_options()
        .min_connections(0)
        .connect_lazy_with(connect_options(database_url, statement_timeout)?))
}
