//! Gutendex HTTP client
//!
//! Handles communication with the Gutendex web service.
//! See: https://gutendex.com/
//!
//! Issues exactly one request per search term and hands back the raw body.
//! A failed request always surfaces as an error, never as a body.

use std::time::Duration;

use tracing::debug;

use super::domain::CatalogError;
use crate::config::CatalogConfig;

/// Gutendex API client
pub struct GutendexClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// User agent string sent with every request
const USER_AGENT: &str = concat!(
    "Literalura/",
    env!("CARGO_PKG_VERSION"),
    " (catalog ingestion)"
);

impl GutendexClient {
    /// Create a new client from the catalog settings
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_base_url(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build the search URL for a term
    fn search_url(&self, term: &str) -> String {
        format!("{}/?search={}", self.base_url, urlencoding::encode(term.trim()))
    }

    /// Fetch the raw search payload for a term
    pub async fn fetch(&self, term: &str) -> Result<Vec<u8>, CatalogError> {
        let url = self.search_url(term);
        debug!(%url, "Fetching search results");

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(bytes = body.len(), "Search response received");
        Ok(body.to_vec())
    }
}

fn map_transport_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Timeout
    } else {
        CatalogError::Network(e.to_string())
    }
}
