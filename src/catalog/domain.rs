//! Candidate records produced from a catalog search.
//!
//! These types are OUR types - they don't change when the Gutendex response
//! changes. The normalizer converts every DTO into these.

/// A not-yet-persisted book derived from one catalog result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBook {
    /// Title as reported by the catalog
    pub title: String,
    /// First language reported by the catalog (others are discarded)
    pub language: String,
    /// Download count, 0 when the catalog omits it
    pub download_count: u64,
    /// Authors in catalog order, repeats included
    pub authors: Vec<CandidateAuthor>,
}

/// A not-yet-persisted author attached to a [`CandidateBook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAuthor {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// Normalized result of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Total matches the catalog reports (only the first page is fetched)
    pub total: u64,
    /// Candidates in catalog order
    pub candidates: Vec<CandidateBook>,
}

/// Errors that can occur while fetching or normalizing catalog data
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog request timed out")]
    Timeout,

    #[error("Catalog returned HTTP {status}")]
    Http { status: u16 },

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Malformed catalog record: {0}")]
    MalformedRecord(String),
}

impl CatalogError {
    /// Whether this is a payload problem rather than a transport problem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord(_))
    }
}
