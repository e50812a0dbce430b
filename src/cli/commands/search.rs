//! Search the remote catalog and save one of the results.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use super::App;
use super::output::{format_candidate, write_book};
use crate::error::{Error, ResultExt};
use crate::model::Book;

/// Search for `term`, list the candidates and save the chosen one.
///
/// With `pick` set the choice is made up front; otherwise the user is
/// prompted on `input`. Choosing 0 cancels. Returns the saved book, if any.
pub(crate) async fn cmd_search(
    app: &App,
    term: &str,
    pick: Option<usize>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<Option<Book>> {
    let term = term.trim();
    if term.is_empty() {
        anyhow::bail!("search term is empty");
    }

    let results = app
        .catalog
        .search(term)
        .await
        .inspect_err(|e| {
            if e.is_malformed() {
                warn!(term, error = %e, "Catalog payload rejected, nothing listed");
            }
        })
        .map_err(Error::from)
        .with_context(format!("searching the catalog for '{term}'"))?;
    info!(term, found = results.candidates.len(), total = results.total, "Catalog search");

    if results.candidates.is_empty() {
        writeln!(out, "No books found for '{term}'.")?;
        return Ok(None);
    }

    for (i, candidate) in results.candidates.iter().enumerate() {
        writeln!(out, "{}", format_candidate(i + 1, candidate))?;
    }
    let shown = results.candidates.len();
    if results.total > shown as u64 {
        writeln!(out, "Showing {} of {} results.", shown, results.total)?;
    }

    let choice = match pick {
        Some(n) => n,
        None => match prompt_number(input, out, "Choose a book to save (0 to cancel): ")? {
            Some(n) => n,
            None => 0,
        },
    };

    if choice == 0 {
        writeln!(out, "Cancelled.")?;
        return Ok(None);
    }
    let Some(candidate) = results.candidates.get(choice - 1) else {
        anyhow::bail!("no result #{choice}; choose between 1 and {shown}");
    };

    let book = app.ingestor.ingest_candidate(candidate).await.map_err(Error::from)?;
    if !app.json {
        writeln!(out, "Book in catalogue:")?;
    }
    write_book(out, &book, app.json)?;
    Ok(Some(book))
}

/// Read one trimmed line. `None` at end of input.
pub(crate) fn read_line(input: &mut dyn BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until the user enters a number. `None` at end of input.
pub(crate) fn prompt_number<T: std::str::FromStr>(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
) -> std::io::Result<Option<T>> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => writeln!(out, "Please enter a number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::catalog::CatalogError;
    use crate::catalog::mocks::MockCatalog;
    use crate::test_utils::temp_db;

    const PAYLOAD: &str = r#"{"count": 3, "results": [
        {"title": "Sagarana", "languages": ["pt"], "download_count": 543,
         "authors": [{"name": "Guimarães Rosa", "birth_year": 1908, "death_year": 1967}]},
        {"title": "Grande Sertão: Veredas", "languages": ["pt"], "download_count": 654,
         "authors": [{"name": "Guimarães Rosa", "birth_year": 1908, "death_year": 1967}]}
    ]}"#;

    #[tokio::test]
    async fn test_pick_saves_candidate() {
        let (pool, _dir) = temp_db().await;
        let app = App::for_tests(MockCatalog::with_payload(PAYLOAD), pool);
        let mut out = Vec::new();

        let book = cmd_search(&app, "rosa", Some(2), &mut Cursor::new(""), &mut out)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(book.title, "Grande Sertão: Veredas");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. Sagarana [pt] 543 downloads"));
        assert!(text.contains("Showing 2 of 3 results."));
    }

    #[tokio::test]
    async fn test_prompt_rejects_non_numeric_input() {
        let (pool, _dir) = temp_db().await;
        let app = App::for_tests(MockCatalog::with_payload(PAYLOAD), pool);
        let mut out = Vec::new();

        let book = cmd_search(&app, "rosa", None, &mut Cursor::new("first\n1\n"), &mut out)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(book.title, "Sagarana");
        assert!(String::from_utf8(out).unwrap().contains("Please enter a number."));
    }

    #[tokio::test]
    async fn test_zero_cancels() {
        let (pool, _dir) = temp_db().await;
        let app = App::for_tests(MockCatalog::with_payload(PAYLOAD), pool.clone());

        let saved = cmd_search(&app, "rosa", None, &mut Cursor::new("0\n"), &mut Vec::new())
            .await
            .unwrap();

        assert!(saved.is_none());
        assert!(app.query.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_pick_fails() {
        let (pool, _dir) = temp_db().await;
        let app = App::for_tests(MockCatalog::with_payload(PAYLOAD), pool);

        let result = cmd_search(&app, "rosa", Some(7), &mut Cursor::new(""), &mut Vec::new()).await;
        assert!(result.unwrap_err().to_string().contains("no result #7"));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_reported() {
        let (pool, _dir) = temp_db().await;
        let app = App::for_tests(MockCatalog::with_error(CatalogError::RateLimited), pool);

        let err = cmd_search(&app, "rosa", Some(1), &mut Cursor::new(""), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("searching the catalog for 'rosa'"));
    }

    #[tokio::test]
    async fn test_malformed_payload_lists_nothing() {
        let (pool, _dir) = temp_db().await;
        let payload = r#"{"count": 2, "results": [
            {"title": "Sagarana", "languages": ["pt"], "download_count": 543},
            {"title": "Sem Autor", "languages": ["pt"], "download_count": 1,
             "authors": [{"name": "  "}]}
        ]}"#;
        let app = App::for_tests(MockCatalog::with_payload(payload), pool);
        let mut out = Vec::new();

        let err = cmd_search(&app, "sagarana", Some(1), &mut Cursor::new(""), &mut out)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("author without a name"));
        assert!(out.is_empty());
        assert!(app.query.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_results() {
        let (pool, _dir) = temp_db().await;
        let app = App::for_tests(MockCatalog::with_payload(r#"{"count": 0, "results": []}"#), pool);
        let mut out = Vec::new();

        let saved = cmd_search(&app, "zzz", None, &mut Cursor::new(""), &mut out).await.unwrap();
        assert!(saved.is_none());
        assert!(String::from_utf8(out).unwrap().contains("No books found for 'zzz'."));
    }

    #[test]
    fn test_prompt_number_end_of_input() {
        let mut out = Vec::new();
        let n: Option<i32> = prompt_number(&mut Cursor::new("x\n"), &mut out, "> ").unwrap();
        assert_eq!(n, None);
    }
}
