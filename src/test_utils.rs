//! Test utilities and fixtures for literalura tests.
//!
//! This module provides common test helpers, candidate factories, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use literalura::test_utils::{temp_db, candidate};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let book = candidate("Sagarana", &[("Guimarães Rosa", Some(1908), Some(1967))]);
//!     // ... test logic
//! }
//! ```

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::catalog::{CandidateAuthor, CandidateBook};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let (pool, _url, dir) = temp_db_with_url().await;
    (pool, dir)
}

/// Like [`temp_db`], but also returns the database URL so a test can open
/// extra connections or pools against the same file.
pub async fn temp_db_with_url() -> (SqlitePool, String, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = crate::db::db_url(Some(&db_path));

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, db_url, dir)
}

/// Creates a Portuguese candidate book with the given authors.
///
/// Authors are `(name, birth_year, death_year)` tuples, kept in order.
/// Customize other fields with struct update syntax:
///
/// ```ignore
/// let english = CandidateBook {
///     language: "en".to_string(),
///     ..candidate("Dom Casmurro", &[])
/// };
/// ```
pub fn candidate(title: &str, authors: &[(&str, Option<i32>, Option<i32>)]) -> CandidateBook {
    CandidateBook {
        title: title.to_string(),
        language: "pt".to_string(),
        download_count: 100,
        authors: authors
            .iter()
            .map(|&(name, birth_year, death_year)| CandidateAuthor {
                name: name.to_string(),
                birth_year,
                death_year,
            })
            .collect(),
    }
}

/// Inserts a book with no authors and returns its ID.
pub async fn insert_book(pool: &SqlitePool, title: &str, language: &str, download_count: u64) -> i64 {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    crate::db::books::create_with_authors(&mut conn, title, language, download_count, &[])
        .await
        .expect("Failed to insert book")
}

/// Inserts an author and returns its ID.
pub async fn insert_author(
    pool: &SqlitePool,
    name: &str,
    birth_year: Option<i32>,
    death_year: Option<i32>,
) -> i64 {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    crate::db::authors::create(&mut conn, name, birth_year, death_year)
        .await
        .expect("Failed to insert author")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(crate::db::books::count(&mut conn).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_helpers() {
        let (pool, _dir) = temp_db().await;

        let book = insert_book(&pool, "Iracema", "pt", 12).await;
        let author = insert_author(&pool, "José de Alencar", Some(1829), Some(1877)).await;
        assert!(book > 0);
        assert!(author > 0);
    }

    #[test]
    fn test_candidate_defaults() {
        let book = candidate("Sagarana", &[("Guimarães Rosa", Some(1908), Some(1967))]);
        assert_eq!(book.title, "Sagarana");
        assert_eq!(book.language, "pt");
        assert_eq!(book.authors.len(), 1);
        assert_eq!(book.authors[0].birth_year, Some(1908));
    }
}
