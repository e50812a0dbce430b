//! Built-in sample catalogue loaded into an empty store.
//!
//! Seeding is a precondition check, not part of ingestion: the store is
//! filled only when it holds no books and no authors, so running it on every
//! start is harmless.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db;

/// Sample authors: `(name, birth_year, death_year)`.
const AUTHORS: &[(&str, i32, i32)] = &[
    ("Jorge Amado", 1912, 2001),
    ("Clarice Lispector", 1920, 1977),
    ("Guimarães Rosa", 1908, 1967),
    ("Carlos Drummond de Andrade", 1902, 1987),
    ("Érico Veríssimo", 1905, 1975),
    ("Monteiro Lobato", 1882, 1948),
    ("José de Alencar", 1829, 1877),
    ("Euclides da Cunha", 1866, 1909),
    ("Lima Barreto", 1881, 1922),
];

/// Sample books: `(title, language, downloads, index into AUTHORS)`.
const BOOKS: &[(&str, &str, u64, usize)] = &[
    ("Gabriela, Cravo e Canela", "pt", 987, 0),
    ("Dona Flor e Seus Dois Maridos", "pt", 876, 0),
    ("A Hora da Estrela", "pt", 765, 1),
    ("Grande Sertão: Veredas", "pt", 654, 2),
    ("Sagarana", "pt", 543, 2),
    ("Sentimento do Mundo", "pt", 432, 3),
    ("Olhai os Lírios do Campo", "pt", 321, 4),
    ("O Sítio do Pica-Pau Amarelo", "pt", 210, 5),
];

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and now holds the sample catalogue
    Seeded { books: usize, authors: usize },
    /// The store already had data; nothing was written
    AlreadyPopulated,
}

/// Load the sample catalogue if the store holds no books and no authors.
///
/// Runs in one transaction: either the whole sample set is written or none of it.
pub async fn seed_if_empty(pool: &SqlitePool) -> sqlx::Result<SeedOutcome> {
    let mut tx = pool.begin().await?;

    let books = db::books::count(&mut tx).await?;
    let authors = db::authors::count(&mut tx).await?;
    if books > 0 || authors > 0 {
        debug!(books, authors, "Store already populated, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let mut author_ids = Vec::with_capacity(AUTHORS.len());
    for &(name, birth, death) in AUTHORS {
        author_ids.push(db::authors::create(&mut tx, name, Some(birth), Some(death)).await?);
    }

    for &(title, language, downloads, author) in BOOKS {
        db::books::create_with_authors(&mut tx, title, language, downloads, &[author_ids[author]])
            .await?;
    }

    tx.commit().await?;

    let outcome = SeedOutcome::Seeded {
        books: BOOKS.len(),
        authors: AUTHORS.len(),
    };
    info!(?outcome, "Seeded sample catalogue");
    Ok(outcome)
}
