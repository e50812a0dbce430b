//! Normalizer: convert raw Gutendex payloads into candidate records
//!
//! This is the ONLY place where catalog DTOs become domain types. A payload
//! either normalizes completely or fails with
//! [`CatalogError::MalformedRecord`] - no partial list is ever returned.

use super::domain::{CandidateAuthor, CandidateBook, CatalogError, SearchResults};
use super::dto;

/// Normalize a raw search payload into candidate books, in catalog order.
pub fn normalize(raw: &[u8]) -> Result<Vec<CandidateBook>, CatalogError> {
    normalize_page(raw).map(|page| page.candidates)
}

/// Normalize a raw search payload, keeping the catalog's total match count.
pub fn normalize_page(raw: &[u8]) -> Result<SearchResults, CatalogError> {
    let response: dto::SearchResponse = serde_json::from_slice(raw)
        .map_err(|e| CatalogError::MalformedRecord(format!("unexpected payload shape: {}", e)))?;

    let candidates = response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, result)| to_candidate(index, result))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchResults {
        total: response.count,
        candidates,
    })
}

/// Convert one search result. `index` is only used in error messages.
fn to_candidate(index: usize, result: dto::BookResult) -> Result<CandidateBook, CatalogError> {
    if result.title.trim().is_empty() {
        return Err(malformed(index, "empty title"));
    }

    let language = result
        .languages
        .into_iter()
        .next()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| malformed(index, "no language reported"))?;

    let authors = result
        .authors
        .into_iter()
        .map(|person| {
            if person.name.trim().is_empty() {
                return Err(malformed(index, "author without a name"));
            }
            Ok(CandidateAuthor {
                name: person.name,
                birth_year: person.birth_year,
                death_year: person.death_year,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CandidateBook {
        title: result.title,
        language,
        download_count: result.download_count.unwrap_or(0),
        authors,
    })
}

fn malformed(index: usize, reason: &str) -> CatalogError {
    CatalogError::MalformedRecord(format!("result #{}: {}", index + 1, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sagarana_payload() {
        let raw = r#"{
            "count": 1,
            "results": [{
                "title": "Sagarana",
                "languages": ["pt"],
                "download_count": 543,
                "authors": [{"name": "Guimarães Rosa", "birth_year": 1908, "death_year": 1967}]
            }]
        }"#.as_bytes();

        let candidates = normalize(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        let book = &candidates[0];
        assert_eq!(book.title, "Sagarana");
        assert_eq!(book.language, "pt");
        assert_eq!(book.download_count, 543);
        assert_eq!(
            book.authors,
            vec![CandidateAuthor {
                name: "Guimarães Rosa".to_string(),
                birth_year: Some(1908),
                death_year: Some(1967),
            }]
        );
    }

    #[test]
    fn test_first_language_wins() {
        let raw = br#"{"results": [{"title": "Bilingual", "languages": ["fr", "en"]}]}"#;
        let candidates = normalize(raw).unwrap();
        assert_eq!(candidates[0].language, "fr");
    }

    #[test]
    fn test_missing_download_count_defaults_to_zero() {
        let raw = br#"{"results": [{"title": "Quiet Book", "languages": ["en"], "authors": []}]}"#;
        let candidates = normalize(raw).unwrap();
        assert_eq!(candidates[0].download_count, 0);
        assert!(candidates[0].authors.is_empty());
    }

    #[test]
    fn test_years_are_passed_through_unvalidated() {
        let raw = br#"{"results": [{
            "title": "Odd Dates",
            "languages": ["en"],
            "authors": [{"name": "Confused", "birth_year": 1950, "death_year": 1900}]
        }]}"#;
        let candidates = normalize(raw).unwrap();
        assert_eq!(candidates[0].authors[0].birth_year, Some(1950));
        assert_eq!(candidates[0].authors[0].death_year, Some(1900));
    }

    #[test]
    fn test_empty_language_list_aborts_whole_search() {
        let raw = br#"{"results": [
            {"title": "Fine", "languages": ["en"]},
            {"title": "Broken", "languages": []}
        ]}"#;
        let err = normalize(raw).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn test_blank_title_or_nameless_author_aborts_whole_search() {
        let blank_title = br#"{"results": [
            {"title": "Fine", "languages": ["en"]},
            {"title": "   ", "languages": ["en"]}
        ]}"#;
        let err = normalize(blank_title).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("#2: empty title"));

        let nameless = br#"{"results": [
            {"title": "Anonymous Tales", "languages": ["en"], "authors": [{"name": ""}]},
            {"title": "Fine", "languages": ["en"]}
        ]}"#;
        let err = normalize(nameless).unwrap_err();
        assert!(err.to_string().contains("#1: author without a name"));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = normalize(b"<html>Service Unavailable</html>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = normalize(br#"{"results": [{"languages": ["en"]}]}"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_repeated_authors_are_kept() {
        let raw = br#"{"results": [{
            "title": "Collected Letters",
            "languages": ["en"],
            "authors": [{"name": "Same Person"}, {"name": "Same Person"}]
        }]}"#;
        let candidates = normalize(raw).unwrap();
        assert_eq!(candidates[0].authors.len(), 2);
    }

    #[test]
    fn test_page_keeps_total() {
        let raw = br#"{"count": 120, "next": "https://gutendex.com/books/?page=2", "results": []}"#;
        let page = normalize_page(raw).unwrap();
        assert_eq!(page.total, 120);
        assert!(page.candidates.is_empty());
    }
}
