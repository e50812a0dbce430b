//! Book queries for the `books` and `book_authors` tables.
//!
//! Reads return full [`Book`] aggregates: the book rows are loaded first and
//! their authors attached with a single link query.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::model::{Author, Book};

// ============================================================================
// Database Row Types
// ============================================================================

/// Database row for the books table.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    language: String,
    download_count: i64,
}

impl BookRow {
    fn into_book(self, authors: Vec<Author>) -> Book {
        Book {
            id: self.id,
            title: self.title,
            language: self.language,
            // The schema keeps download_count >= 0
            download_count: u64::try_from(self.download_count).unwrap_or_default(),
            authors,
        }
    }
}

/// An author joined through `book_authors`.
#[derive(Debug, sqlx::FromRow)]
struct LinkedAuthorRow {
    book_id: i64,
    #[sqlx(flatten)]
    author: Author,
}

const BOOK_COLUMNS: &str = "id, title, language, download_count";

/// Load the ordered author lists for `rows` and build the aggregates.
async fn attach_authors(conn: &mut SqliteConnection, rows: Vec<BookRow>) -> sqlx::Result<Vec<Book>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids = rows
        .iter()
        .map(|r| r.id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let links = sqlx::query_as::<_, LinkedAuthorRow>(
        r#"
        SELECT ba.book_id, a.id, a.name, a.birth_year, a.death_year
        FROM book_authors ba
        JOIN authors a ON a.id = ba.author_id
        WHERE ba.book_id IN (SELECT value FROM json_each(?))
        ORDER BY ba.book_id, ba.position
        "#,
    )
    .bind(format!("[{}]", ids))
    .fetch_all(conn)
    .await?;

    let mut by_book: HashMap<i64, Vec<Author>> = HashMap::new();
    for link in links {
        by_book.entry(link.book_id).or_default().push(link.author);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let authors = by_book.remove(&row.id).unwrap_or_default();
            row.into_book(authors)
        })
        .collect())
}

// ============================================================================
// Lookups and Writes
// ============================================================================

/// All `(id, title)` pairs in ascending id order.
///
/// Used by the deduplication resolver, which applies its own matching rule.
pub async fn titles(conn: &mut SqliteConnection) -> sqlx::Result<Vec<(i64, String)>> {
    sqlx::query_as("SELECT id, title FROM books ORDER BY id")
        .fetch_all(conn)
        .await
}

/// Insert a book and its ordered author links, returning the new book ID.
///
/// Meant to run on a transaction owned by the caller: the book row and every
/// link row either all commit or none do.
pub async fn create_with_authors(
    conn: &mut SqliteConnection,
    title: &str,
    language: &str,
    download_count: u64,
    author_ids: &[i64],
) -> sqlx::Result<i64> {
    let downloads = i64::try_from(download_count).unwrap_or(i64::MAX);

    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO books (title, language, download_count, ingested_at)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(language)
    .bind(downloads)
    .bind(Utc::now().to_rfc3339())
    .fetch_one(&mut *conn)
    .await?;
    let book_id = row.0;

    for (position, author_id) in author_ids.iter().enumerate() {
        sqlx::query("INSERT INTO book_authors (book_id, position, author_id) VALUES (?, ?, ?)")
            .bind(book_id)
            .bind(position as i64)
            .bind(*author_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(book_id)
}

// ============================================================================
// Reads
// ============================================================================

/// Get a book aggregate by its database ID.
pub async fn get(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Book>> {
    let row = sqlx::query_as::<_, BookRow>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(attach_authors(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// All books in store order.
pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Book>> {
    let rows = sqlx::query_as::<_, BookRow>(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))
        .fetch_all(&mut *conn)
        .await?;
    attach_authors(conn, rows).await
}

/// Books whose language code contains `language`, ignoring case.
pub async fn by_language_contains(
    conn: &mut SqliteConnection,
    language: &str,
) -> sqlx::Result<Vec<Book>> {
    let rows = sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE instr(lower(language), lower(?)) > 0 ORDER BY id"
    ))
    .bind(language)
    .fetch_all(&mut *conn)
    .await?;
    attach_authors(conn, rows).await
}

/// The `limit` most downloaded books, highest first.
///
/// Ties keep store order.
pub async fn top_by_downloads(conn: &mut SqliteConnection, limit: u32) -> sqlx::Result<Vec<Book>> {
    let rows = sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books ORDER BY download_count DESC, id ASC LIMIT ?"
    ))
    .bind(i64::from(limit))
    .fetch_all(&mut *conn)
    .await?;
    attach_authors(conn, rows).await
}

/// Every language code present among stored books, once each.
pub async fn distinct_languages(conn: &mut SqliteConnection) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar("SELECT DISTINCT language FROM books ORDER BY language")
        .fetch_all(conn)
        .await
}

/// Number of stored books.
pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
        .fetch_one(conn)
        .await?;
    Ok(row.0)
}
