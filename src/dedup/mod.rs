//! Deduplication resolver - decides whether a candidate already exists.
//!
//! Identity is decided by a [`MatchStrategy`]. The default
//! [`ContainmentMatch`] treats two strings as the same entity when one
//! contains the other, ignoring case. This is deliberately loose: a short
//! candidate like "Poems" matches any stored title containing "poems".
//!
//! Resolution is a pure lookup. It runs on whatever connection it is given,
//! so the ingestion engine can resolve inside its own transaction and see the
//! authors it created earlier in the same call.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::db;

/// Capability deciding whether a stored value and a candidate are the same entity.
pub trait MatchStrategy: Send + Sync {
    fn matches(&self, stored: &str, candidate: &str) -> bool;
}

/// Case-insensitive containment in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentMatch;

impl MatchStrategy for ContainmentMatch {
    fn matches(&self, stored: &str, candidate: &str) -> bool {
        if stored.trim().is_empty() || candidate.trim().is_empty() {
            return false;
        }
        let stored = stored.to_lowercase();
        let candidate = candidate.to_lowercase();
        stored.contains(&candidate) || candidate.contains(&stored)
    }
}

/// Outcome of resolving one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A matching entity exists with this ID
    Existing(i64),
    /// Nothing matches; the caller should create the entity
    NotFound,
}

impl Resolution {
    /// The matched ID, if any.
    pub fn existing(self) -> Option<i64> {
        match self {
            Self::Existing(id) => Some(id),
            Self::NotFound => None,
        }
    }
}

/// Looks up candidates against the store using a [`MatchStrategy`].
#[derive(Debug, Clone, Default)]
pub struct Resolver<M = ContainmentMatch> {
    matcher: M,
}

impl Resolver<ContainmentMatch> {
    /// Resolver using case-insensitive containment.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: MatchStrategy> Resolver<M> {
    /// Resolver using a custom matching rule.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Find an existing book whose title matches `title`.
    ///
    /// When several books match, the one with the lowest ID wins.
    pub async fn resolve_book(&self, conn: &mut SqliteConnection, title: &str) -> sqlx::Result<Resolution> {
        let rows = db::books::titles(conn).await?;
        let resolution = self.first_match(rows, title);
        debug!(title, ?resolution, "Resolved book");
        Ok(resolution)
    }

    /// Find an existing author whose name matches `name`.
    ///
    /// When several authors match, the one with the lowest ID wins.
    pub async fn resolve_author(&self, conn: &mut SqliteConnection, name: &str) -> sqlx::Result<Resolution> {
        let rows = db::authors::names(conn).await?;
        let resolution = self.first_match(rows, name);
        debug!(name, ?resolution, "Resolved author");
        Ok(resolution)
    }

    fn first_match(&self, rows: Vec<(i64, String)>, candidate: &str) -> Resolution {
        rows.into_iter()
            .find(|(_, stored)| self.matcher.matches(stored, candidate))
            .map_or(Resolution::NotFound, |(id, _)| Resolution::Existing(id))
    }
}
