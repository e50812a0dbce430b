//! Query facade - read-only questions over the persisted catalogue.
//!
//! Every method acquires its own pooled connection, so reads run
//! concurrently with each other and only ever see committed data. An empty
//! result is a valid answer, never an error.
//!
//! Each store call (including waiting for a connection) is bounded by the
//! timeout given at construction.

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::pool::PoolConnection;
use sqlx::Sqlite;

use crate::db::{self, StoreError};
use crate::dedup::Resolver;
use crate::model::{Author, Book};

/// Read access to the catalogue.
#[derive(Debug, Clone)]
pub struct LibraryQuery {
    pool: SqlitePool,
    resolver: Resolver,
    timeout: Duration,
}

impl LibraryQuery {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self {
            pool,
            resolver: Resolver::new(),
            timeout,
        }
    }

    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        db::bounded(self.timeout, "acquire connection", self.pool.acquire()).await
    }

    /// Every stored book, in store order.
    pub async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(self.timeout, "list books", db::books::list_all(&mut conn)).await
    }

    /// Every stored author, ordered by name.
    pub async fn list_authors(&self) -> Result<Vec<Author>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(self.timeout, "list authors", db::authors::list_all(&mut conn)).await
    }

    /// Books whose language code contains `language`, ignoring case.
    ///
    /// A blank code matches every book.
    pub async fn books_by_language(&self, language: &str) -> Result<Vec<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(
            self.timeout,
            "list books by language",
            db::books::by_language_contains(&mut conn, language.trim()),
        )
        .await
    }

    /// Language codes present among stored books.
    pub async fn distinct_languages(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(
            self.timeout,
            "list languages",
            db::books::distinct_languages(&mut conn),
        )
        .await
    }

    /// The `n` most downloaded books, highest first. Ties keep store order.
    pub async fn top_books_by_downloads(&self, n: u32) -> Result<Vec<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(
            self.timeout,
            "list top books",
            db::books::top_by_downloads(&mut conn, n),
        )
        .await
    }

    /// Authors alive at some point during `year`.
    pub async fn authors_alive_in(&self, year: i32) -> Result<Vec<Author>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(
            self.timeout,
            "list authors alive in year",
            db::authors::alive_in(&mut conn, year),
        )
        .await
    }

    pub async fn authors_born_in(&self, year: i32) -> Result<Vec<Author>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(
            self.timeout,
            "list authors born in year",
            db::authors::born_in(&mut conn, year),
        )
        .await
    }

    pub async fn authors_died_in(&self, year: i32) -> Result<Vec<Author>, StoreError> {
        let mut conn = self.acquire().await?;
        db::bounded(
            self.timeout,
            "list authors died in year",
            db::authors::died_in(&mut conn, year),
        )
        .await
    }

    /// The stored book matching `title` by the same rule ingestion uses.
    pub async fn find_book_by_title(&self, title: &str) -> Result<Option<Book>, StoreError> {
        let mut conn = self.acquire().await?;
        let resolved = db::bounded(
            self.timeout,
            "resolve book",
            self.resolver.resolve_book(&mut conn, title),
        )
        .await?;

        match resolved.existing() {
            Some(id) => db::bounded(self.timeout, "load book", db::books::get(&mut conn, id)).await,
            None => Ok(None),
        }
    }
}
