//! Trait definition for the catalog client.
//!
//! Lets the CLI and tests swap the real Gutendex client for a mock.
//!
//! # Example
//!
//! ```ignore
//! use literalura::catalog::CatalogApi;
//!
//! async fn first_hit<C: CatalogApi>(catalog: &C) -> Option<CandidateBook> {
//!     catalog.search("dom casmurro").await.ok()?.candidates.into_iter().next()
//! }
//! ```

use async_trait::async_trait;

use super::domain::{CatalogError, SearchResults};
use super::normalize::normalize_page;

/// A source of raw catalog search payloads.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the raw payload for one search term.
    async fn fetch(&self, term: &str) -> Result<Vec<u8>, CatalogError>;

    /// Fetch and normalize one search.
    async fn search(&self, term: &str) -> Result<SearchResults, CatalogError> {
        let raw = self.fetch(term).await?;
        normalize_page(&raw)
    }
}

#[async_trait]
impl CatalogApi for super::client::GutendexClient {
    async fn fetch(&self, term: &str) -> Result<Vec<u8>, CatalogError> {
        self.fetch(term).await
    }
}
