//! Persistence coordinator - turns one candidate into a persisted book.
//!
//! [`Ingestor::ingest_candidate`] runs the whole resolve-or-create sequence
//! for a book and its authors:
//! 1. Resolve the title. A match short-circuits: the stored book is returned
//!    unchanged, with no author reconciliation.
//! 2. Resolve each author in catalog order, creating the ones not found.
//!    Each new author is written before the next lookup, so a name repeated
//!    in the same candidate resolves to the author created moments earlier.
//! 3. Create the book with the ordered author IDs.
//! 4. Commit.
//!
//! All four steps share one transaction and run behind a process-wide write
//! gate, so two ingestions never interleave their check-then-create. Any
//! failure, timeout or cancellation drops the transaction and nothing is
//! committed.

use std::time::Duration;

use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::CandidateBook;
use crate::db::{self, StoreError};
use crate::dedup::{ContainmentMatch, MatchStrategy, Resolution, Resolver};
use crate::model::Book;

/// Errors that abort an ingestion call
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The candidate breaks a data model rule (blank title, inverted life span, ...)
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A store call failed or timed out; nothing was committed
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl IngestError {
    /// Whether the call failed because a store call exceeded its bound.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Persistence(e) if e.is_timeout())
    }
}

/// Single-writer ingestion engine.
pub struct Ingestor<M = ContainmentMatch> {
    pool: SqlitePool,
    resolver: Resolver<M>,
    write_gate: Mutex<()>,
    store_timeout: Duration,
}

impl Ingestor<ContainmentMatch> {
    /// Create an ingestor using case-insensitive containment matching.
    ///
    /// `store_timeout` bounds every individual store call.
    pub fn new(pool: SqlitePool, store_timeout: Duration) -> Self {
        Self::with_resolver(pool, Resolver::new(), store_timeout)
    }
}

impl<M: MatchStrategy> Ingestor<M> {
    /// Create an ingestor with a custom resolver.
    pub fn with_resolver(pool: SqlitePool, resolver: Resolver<M>, store_timeout: Duration) -> Self {
        Self {
            pool,
            resolver,
            write_gate: Mutex::new(()),
            store_timeout,
        }
    }

    /// Persist one candidate (or find it already stored) and return the aggregate.
    pub async fn ingest_candidate(&self, candidate: &CandidateBook) -> Result<Book, IngestError> {
        let result = self.ingest_in_transaction(candidate).await;
        if let Err(IngestError::Persistence(e)) = &result {
            warn!(
                title = %candidate.title,
                operation = e.operation(),
                timed_out = e.is_timeout(),
                "Ingestion rolled back"
            );
        }
        result
    }

    async fn ingest_in_transaction(&self, candidate: &CandidateBook) -> Result<Book, IngestError> {
        validate_book(candidate)?;

        let _writer = self.write_gate.lock().await;
        let limit = self.store_timeout;

        let mut tx = db::bounded(limit, "begin transaction", self.pool.begin()).await?;

        let resolved = db::bounded(
            limit,
            "resolve book",
            self.resolver.resolve_book(&mut *tx, &candidate.title),
        )
        .await?;

        if let Resolution::Existing(book_id) = resolved {
            info!(title = %candidate.title, book_id, "Book already catalogued");
            // Nothing was written; dropping the transaction rolls it back.
            return load_book(limit, &mut *tx, book_id).await;
        }

        validate_authors(candidate)?;

        let mut author_ids = Vec::with_capacity(candidate.authors.len());
        for author in &candidate.authors {
            let resolved = db::bounded(
                limit,
                "resolve author",
                self.resolver.resolve_author(&mut *tx, &author.name),
            )
            .await?;

            let author_id = match resolved {
                Resolution::Existing(id) => {
                    debug!(name = %author.name, author_id = id, "Reusing author");
                    id
                }
                Resolution::NotFound => {
                    let id = db::bounded(
                        limit,
                        "create author",
                        db::authors::create(&mut *tx, &author.name, author.birth_year, author.death_year),
                    )
                    .await?;
                    info!(name = %author.name, author_id = id, "Created author");
                    id
                }
            };
            author_ids.push(author_id);
        }

        let book_id = db::bounded(
            limit,
            "create book",
            db::books::create_with_authors(
                &mut *tx,
                &candidate.title,
                &candidate.language,
                candidate.download_count,
                &author_ids,
            ),
        )
        .await?;

        let book = load_book(limit, &mut *tx, book_id).await?;
        db::bounded(limit, "commit", tx.commit()).await?;

        info!(
            title = %book.title,
            book_id,
            authors = book.authors.len(),
            "Saved new book"
        );
        Ok(book)
    }
}

/// Load a book aggregate on the ingestion transaction.
async fn load_book(
    limit: Duration,
    conn: &mut sqlx::SqliteConnection,
    book_id: i64,
) -> Result<Book, IngestError> {
    let book = db::bounded(limit, "load book", db::books::get(conn, book_id)).await?;
    book.ok_or_else(|| {
        IngestError::Persistence(StoreError::Database {
            operation: "load book",
            source: sqlx::Error::RowNotFound,
        })
    })
}

/// Reject candidates whose title or language cannot identify a book.
fn validate_book(candidate: &CandidateBook) -> Result<(), IngestError> {
    if candidate.title.trim().is_empty() {
        return Err(IngestError::MalformedRecord("book title is empty".to_string()));
    }
    if candidate.language.trim().is_empty() {
        return Err(IngestError::MalformedRecord(format!(
            "book '{}' has no language",
            candidate.title
        )));
    }
    Ok(())
}

/// Reject authors that would break the stored data model.
///
/// Only checked for books about to be created; a known title is returned
/// without looking at the candidate's authors.
fn validate_authors(candidate: &CandidateBook) -> Result<(), IngestError> {
    for author in &candidate.authors {
        if author.name.trim().is_empty() {
            return Err(IngestError::MalformedRecord(format!(
                "book '{}' has an author without a name",
                candidate.title
            )));
        }
        if let (Some(birth), Some(death)) = (author.birth_year, author.death_year) {
            if death < birth {
                return Err(IngestError::MalformedRecord(format!(
                    "author '{}' died ({}) before being born ({})",
                    author.name, death, birth
                )));
            }
        }
    }
    Ok(())
}
