//! Text and JSON rendering of catalogue listings.

use std::io::Write;

use serde::Serialize;

use crate::catalog::CandidateBook;
use crate::model::{Author, Book, lifespan};

/// One-line author description, e.g. `Guimarães Rosa (1908-1967)`.
pub(crate) fn format_author(author: &Author) -> String {
    match author.lifespan() {
        Some(span) => format!("{} ({})", author.name, span),
        None => author.name.clone(),
    }
}

/// Multi-line book description used in every listing.
pub(crate) fn format_book(book: &Book) -> String {
    let authors = if book.authors.is_empty() {
        "unknown".to_string()
    } else {
        book.authors
            .iter()
            .map(format_author)
            .collect::<Vec<_>>()
            .join("; ")
    };
    format!(
        "{}\n  Authors:   {}\n  Language:  {}\n  Downloads: {}",
        book.title, authors, book.language, book.download_count
    )
}

/// Numbered line for a search candidate, before it is saved.
pub(crate) fn format_candidate(number: usize, candidate: &CandidateBook) -> String {
    let authors = candidate
        .authors
        .iter()
        .map(|a| match lifespan(a.birth_year, a.death_year) {
            Some(span) => format!("{} ({})", a.name, span),
            None => a.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "{:>3}. {} [{}] {} downloads\n     {}",
        number,
        candidate.title,
        candidate.language,
        candidate.download_count,
        if authors.is_empty() { "unknown author" } else { &authors }
    )
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_book(out: &mut dyn Write, book: &Book, json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, book);
    }
    writeln!(out, "{}", format_book(book))?;
    Ok(())
}

pub(crate) fn write_books(out: &mut dyn Write, books: &[Book], json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, books);
    }
    if books.is_empty() {
        writeln!(out, "No books found.")?;
        return Ok(());
    }
    for book in books {
        writeln!(out, "{}\n", format_book(book))?;
    }
    Ok(())
}

pub(crate) fn write_authors(out: &mut dyn Write, authors: &[Author], json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, authors);
    }
    if authors.is_empty() {
        writeln!(out, "No authors found.")?;
        return Ok(());
    }
    for author in authors {
        writeln!(out, "{}", format_author(author))?;
    }
    Ok(())
}

pub(crate) fn write_languages(out: &mut dyn Write, languages: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, languages);
    }
    if languages.is_empty() {
        writeln!(out, "No languages found.")?;
        return Ok(());
    }
    writeln!(out, "Available languages: {}", languages.join(", "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::candidate;

    fn rosa() -> Author {
        Author {
            id: 3,
            name: "Guimarães Rosa".to_string(),
            birth_year: Some(1908),
            death_year: Some(1967),
        }
    }

    #[test]
    fn test_format_author() {
        assert_eq!(format_author(&rosa()), "Guimarães Rosa (1908-1967)");

        let unknown = Author {
            birth_year: None,
            death_year: None,
            ..rosa()
        };
        assert_eq!(format_author(&unknown), "Guimarães Rosa");
    }

    #[test]
    fn test_format_book() {
        let book = Book {
            id: 5,
            title: "Sagarana".to_string(),
            language: "pt".to_string(),
            download_count: 543,
            authors: vec![rosa()],
        };
        let text = format_book(&book);
        assert!(text.starts_with("Sagarana\n"));
        assert!(text.contains("Guimarães Rosa (1908-1967)"));
        assert!(text.contains("Downloads: 543"));
    }

    #[test]
    fn test_format_candidate() {
        let line = format_candidate(2, &candidate("Iracema", &[("José de Alencar", Some(1829), Some(1877))]));
        assert!(line.starts_with("  2. Iracema [pt]"));
        assert!(line.contains("José de Alencar (1829-1877)"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_authors(&mut out, &[rosa()], true).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["name"], "Guimarães Rosa");
        assert_eq!(parsed[0]["birth_year"], 1908);
    }

    #[test]
    fn test_empty_listings() {
        let mut out = Vec::new();
        write_books(&mut out, &[], false).unwrap();
        write_languages(&mut out, &[], false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No books found."));
        assert!(text.contains("No languages found."));
    }
}
