//! Catalog integration - fetches raw search results from Project Gutenberg's
//! Gutendex API and turns them into candidate records.
//!
//! # Architecture
//!
//! Same split as any external API integration:
//! - **Domain models** (`domain.rs`) - Candidate records the ingestion engine consumes
//! - **API DTOs** (`dto.rs`) - Exact Gutendex response shape
//! - **Normalizer** (`normalize.rs`) - The only place DTOs become candidates
//! - **Client** (`client.rs`) - HTTP client returning raw response bytes
//! - **Traits** (`traits.rs`) - `CatalogApi` seam for tests
//!
//! API docs: https://gutendex.com/

pub mod client;
pub mod domain;
pub mod dto;
pub mod normalize;
pub mod traits;

pub use client::GutendexClient;
pub use domain::{CandidateAuthor, CandidateBook, CatalogError, SearchResults};
pub use normalize::normalize;
pub use traits::CatalogApi;

#[cfg(test)]
pub use traits::mocks;
