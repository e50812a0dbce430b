//! Database module for book and author persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Pool initialization and embedded migrations
//! - Author and book creation (always on a caller-owned transaction)
//! - Read queries backing the query facade
//!
//! Every store call made by the ingestion engine and the query facade goes
//! through [`bounded`], which turns a stalled call into [`StoreError::Timeout`].
//!
//! # Example
//!
//! ```ignore
//! use literalura::db::{init_db, books};
//!
//! let pool = init_db("sqlite:literalura.db").await?;
//! let mut conn = pool.acquire().await?;
//! let top = books::top_by_downloads(&mut conn, 5).await?;
//! ```

pub mod authors;
pub mod books;

use std::future::Future;
use std::time::Duration;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "literalura.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Failure of a single store call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The driver reported an error (constraint, I/O, busy, ...)
    #[error("Database error during {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The call did not finish within the caller-supplied bound
    #[error("Store call '{operation}' timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl StoreError {
    /// Name of the store call that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Database { operation, .. } | Self::Timeout { operation, .. } => operation,
        }
    }

    /// Whether the failure was a timeout rather than a driver error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Run a store call with an upper bound on how long it may take.
///
/// The future is dropped when the bound expires. Anything it started inside
/// a transaction is rolled back when that transaction is dropped.
pub async fn bounded<T, F>(limit: Duration, operation: &'static str, call: F) -> Result<T, StoreError>
where
    F: Future<Output = sqlx::Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(|source| StoreError::Database { operation, source }),
        Err(_) => Err(StoreError::Timeout {
            operation,
            after: limit,
        }),
    }
}
