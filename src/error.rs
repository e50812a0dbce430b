//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`CatalogError`], [`StoreError`], [`IngestError`])
//!   for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use literalura::error::{Error, Result};
//!
//! async fn lookup(query: &LibraryQuery, title: &str) -> Result<Book> {
//!     query.find_book_by_title(title).await // NotFound when nothing matches
//! }
//! ```

use crate::catalog::CatalogError;
use crate::db::StoreError;
use crate::ingest::IngestError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database setup error (connection, migration)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A store call failed or timed out
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Remote catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Ingestion error
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// No stored book matches the requested title
    #[error("Book not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound(title.into())
    }

    /// Whether the root cause is a store call that exceeded its bound.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Store(e) => e.is_timeout(),
            Self::Ingest(e) => e.is_timeout(),
            Self::WithContext { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, StoreError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Store(e).context(ctx))
    }
}
