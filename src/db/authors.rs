//! Author queries for the `authors` table.

use sqlx::SqliteConnection;

use crate::model::Author;

const AUTHOR_COLUMNS: &str = "id, name, birth_year, death_year";

/// All `(id, name)` pairs in ascending id order.
///
/// Used by the deduplication resolver, which applies its own matching rule.
pub async fn names(conn: &mut SqliteConnection) -> sqlx::Result<Vec<(i64, String)>> {
    sqlx::query_as("SELECT id, name FROM authors ORDER BY id")
        .fetch_all(conn)
        .await
}

/// Insert a new author and return its ID.
///
/// Birth/death years are stored as given; the schema rejects a death year
/// earlier than the birth year.
pub async fn create(
    conn: &mut SqliteConnection,
    name: &str,
    birth_year: Option<i32>,
    death_year: Option<i32>,
) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO authors (name, birth_year, death_year) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(birth_year)
    .bind(death_year)
    .fetch_one(conn)
    .await?;

    Ok(row.0)
}

/// All authors, sorted by name.
pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Author>> {
    sqlx::query_as::<_, Author>(&format!(
        "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY name, id"
    ))
    .fetch_all(conn)
    .await
}

/// Authors alive at some point during `year`.
///
/// Born in or before `year` and either still alive or died in or after it.
/// Authors without a birth year never match.
pub async fn alive_in(conn: &mut SqliteConnection, year: i32) -> sqlx::Result<Vec<Author>> {
    sqlx::query_as::<_, Author>(&format!(
        r#"
        SELECT {AUTHOR_COLUMNS} FROM authors
        WHERE birth_year IS NOT NULL
          AND birth_year <= ?
          AND (death_year IS NULL OR death_year >= ?)
        ORDER BY name, id
        "#
    ))
    .bind(year)
    .bind(year)
    .fetch_all(conn)
    .await
}

/// Authors born exactly in `year`.
pub async fn born_in(conn: &mut SqliteConnection, year: i32) -> sqlx::Result<Vec<Author>> {
    sqlx::query_as::<_, Author>(&format!(
        "SELECT {AUTHOR_COLUMNS} FROM authors WHERE birth_year = ? ORDER BY name, id"
    ))
    .bind(year)
    .fetch_all(conn)
    .await
}

/// Authors who died exactly in `year`.
pub async fn died_in(conn: &mut SqliteConnection, year: i32) -> sqlx::Result<Vec<Author>> {
    sqlx::query_as::<_, Author>(&format!(
        "SELECT {AUTHOR_COLUMNS} FROM authors WHERE death_year = ? ORDER BY name, id"
    ))
    .bind(year)
    .fetch_all(conn)
    .await
}

/// Number of stored authors.
pub async fn count(conn: &mut SqliteConnection) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authors")
        .fetch_one(conn)
        .await?;
    Ok(row.0)
}
