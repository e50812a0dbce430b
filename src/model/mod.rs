//! Core data models for the book catalogue.
//!
//! Defines the persisted entities: [`Book`] and [`Author`].
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `authors` - Author records, shared between books
//! - `books` - One row per book, exactly one language each
//! - `book_authors` - Ordered many-to-many links (`book_id`, `position`, `author_id`)

use serde::Serialize;
use sqlx::FromRow;

/// An author in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Author {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Author name as reported by the catalog
    pub name: String,
    /// Year of birth, if known
    pub birth_year: Option<i32>,
    /// Year of death, if known (never before `birth_year`)
    pub death_year: Option<i32>,
}

impl Author {
    /// Human readable life span, e.g. `1839-1908`, `b. 1839` or `d. 1908`.
    ///
    /// Returns `None` when neither year is known.
    pub fn lifespan(&self) -> Option<String> {
        lifespan(self.birth_year, self.death_year)
    }
}

/// A book together with its linked authors (the persisted aggregate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Book title
    pub title: String,
    /// Language code (first language reported by the catalog)
    pub language: String,
    /// Download count reported by the catalog at ingestion time
    pub download_count: u64,
    /// Authors in catalog order. May contain the same author twice.
    pub authors: Vec<Author>,
}

impl Book {
    /// IDs of the linked authors, in catalog order.
    pub fn author_ids(&self) -> Vec<i64> {
        self.authors.iter().map(|a| a.id).collect()
    }
}

/// Format optional birth/death years the way listings show them.
pub fn lifespan(birth_year: Option<i32>, death_year: Option<i32>) -> Option<String> {
    match (birth_year, death_year) {
        (Some(b), Some(d)) => Some(format!("{}-{}", b, d)),
        (Some(b), None) => Some(format!("b. {}", b)),
        (None, Some(d)) => Some(format!("d. {}", d)),
        (None, None) => None,
    }
}
