//! Gutendex API Data Transfer Objects
//!
//! These types match what the Gutendex `/books?search=` endpoint returns.
//! DO NOT use these types outside the catalog module - normalize them first.
//!
//! API Reference: https://gutendex.com/
//!
//! Only the fields the ingestion engine needs are declared; serde ignores
//! the rest (subjects, formats, translators, ...).

use serde::{Deserialize, Serialize};

/// Paged search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total number of matching books across all pages
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// Books on this page
    pub results: Vec<BookResult>,
}

/// One book in a search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookResult {
    /// Project Gutenberg ID
    pub id: Option<u64>,
    pub title: String,
    /// Language codes, e.g. `["en"]` or `["pt", "en"]`
    #[serde(default)]
    pub languages: Vec<String>,
    pub download_count: Option<u64>,
    #[serde(default)]
    pub authors: Vec<Person>,
}

/// Author entry (Gutendex calls these "persons")
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Person {
    /// Usually "Last, First"
    pub name: String,
    /// Negative for BCE
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}
