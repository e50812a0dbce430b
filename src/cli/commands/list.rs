//! Catalogue listing and lookup commands.

use std::io::Write;

use super::App;
use super::output::{write_authors, write_book, write_books, write_languages};
use crate::error::Error;
use crate::seed::{self, SeedOutcome};

/// Which life event a year filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum YearFilter {
    Alive,
    Born,
    Died,
}

/// List all stored books
pub(crate) async fn cmd_books(app: &App, out: &mut dyn Write) -> anyhow::Result<()> {
    let books = app.query.list_books().await?;
    write_books(out, &books, app.json)
}

/// List all stored authors
pub(crate) async fn cmd_authors(app: &App, out: &mut dyn Write) -> anyhow::Result<()> {
    let authors = app.query.list_authors().await?;
    write_authors(out, &authors, app.json)
}

/// List authors alive, born or deceased in `year`
pub(crate) async fn cmd_authors_in_year(
    app: &App,
    filter: YearFilter,
    year: i32,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let authors = match filter {
        YearFilter::Alive => app.query.authors_alive_in(year).await?,
        YearFilter::Born => app.query.authors_born_in(year).await?,
        YearFilter::Died => app.query.authors_died_in(year).await?,
    };
    write_authors(out, &authors, app.json)
}

/// List books in a language, or the available languages when no code is given
pub(crate) async fn cmd_language(app: &App, code: Option<&str>, out: &mut dyn Write) -> anyhow::Result<()> {
    match code {
        Some(code) => {
            let books = app.query.books_by_language(code).await?;
            write_books(out, &books, app.json)
        }
        None => {
            let languages = app.query.distinct_languages().await?;
            write_languages(out, &languages, app.json)
        }
    }
}

/// List the most downloaded books
pub(crate) async fn cmd_top(app: &App, limit: u32, out: &mut dyn Write) -> anyhow::Result<()> {
    let books = app.query.top_books_by_downloads(limit).await?;
    write_books(out, &books, app.json)
}

/// Show the stored book matching a title
pub(crate) async fn cmd_find(app: &App, title: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    match app.query.find_book_by_title(title).await? {
        Some(book) => write_book(out, &book, app.json),
        None => Err(Error::not_found(title).into()),
    }
}

/// Load the sample catalogue into an empty store
pub(crate) async fn cmd_seed(app: &App, out: &mut dyn Write) -> anyhow::Result<()> {
    match seed::seed_if_empty(&app.pool).await.map_err(Error::from)? {
        SeedOutcome::Seeded { books, authors } => {
            writeln!(out, "Seeded {books} books and {authors} authors.")?
        }
        SeedOutcome::AlreadyPopulated => writeln!(out, "Store already has data; nothing seeded.")?,
    }
    Ok(())
}
