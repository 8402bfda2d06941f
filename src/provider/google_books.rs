//! Google Books provider - looks up volumes via the Google Books API.
//!
//! The [`GoogleBooksProvider`] calls `GET {base}/volumes` with either an
//! `isbn:` query or a free-text query, and maps each `volumeInfo` into a
//! [`BookRecord`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::book::{BookRecord, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

use super::http_client::build_lookup_http_client;
use super::{LookupError, MetadataProvider};

/// Default Google Books API base URL.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

const PROVIDER_NAME: &str = "google_books";

/// Upper bound Google Books accepts for `maxResults`.
const MAX_RESULTS_CAP: usize = 40;

// ==================== Google Books API Response Types ====================

/// Top-level `volumes` list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumesResponse {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// One entry of `items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Volume {
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Bibliographic fields of a volume. Every field is optional in practice.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub categories: Option<Vec<String>>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

/// Cover image URLs.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageLinks {
    pub thumbnail: Option<String>,
}

/// An identifier such as `{"type": "ISBN_13", "identifier": "978..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

// ==================== GoogleBooksProvider ====================

/// Looks up books via the Google Books volumes API.
///
/// Without an API key every lookup is a guaranteed miss and no request is
/// sent; construction still succeeds so the service can start.
pub struct GoogleBooksProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GoogleBooksProvider {
    /// Creates a provider against the public Google Books endpoint.
    ///
    /// Blank keys are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if HTTP client construction fails.
    #[tracing::instrument(skip_all, fields(has_key = api_key.is_some()))]
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, LookupError> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if HTTP client construction fails.
    pub fn with_base_url(
        api_key: Option<String>,
        timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self, LookupError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            debug!("No Google Books API key configured; every lookup will miss");
        }
        Ok(Self {
            client: build_lookup_http_client(PROVIDER_NAME, timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    /// Returns true when lookups can reach the API.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn volumes_url(&self, key: &str, query: &str, max_results: Option<usize>) -> String {
        let mut url = format!(
            "{}/volumes?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        if let Some(max) = max_results {
            url.push_str(&format!("&maxResults={max}"));
        }
        url.push_str(&format!("&key={}", urlencoding::encode(key)));
        url
    }

    async fn fetch_volumes(&self, url: &str) -> Result<VolumesResponse, LookupError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::from_send(PROVIDER_NAME, self.timeout.as_secs(), &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::status(PROVIDER_NAME, status.as_u16()));
        }

        response
            .json::<VolumesResponse>()
            .await
            .map_err(|e| LookupError::decode(PROVIDER_NAME, e.to_string()))
    }
}

impl std::fmt::Debug for GoogleBooksProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleBooksProvider")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataProvider for GoogleBooksProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[tracing::instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn lookup_by_identifier(&self, isbn: &str) -> Option<BookRecord> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No API key, treating identifier lookup as a miss");
            return None;
        };

        let url = self.volumes_url(key, &format!("isbn:{isbn}"), None);
        match self.fetch_volumes(&url).await {
            Ok(body) => {
                debug!(total_items = body.total_items, "Identifier lookup answered");
                body.items
                    .into_iter()
                    .next()
                    .map(|volume| volume_to_record(volume.volume_info, Some(isbn)))
            }
            Err(error) => {
                warn!(%error, "Identifier lookup unavailable; treating as not found");
                None
            }
        }
    }

    #[tracing::instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn lookup_by_text(&self, query: &str, limit: usize) -> Vec<BookRecord> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No API key, treating text lookup as empty");
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let limit = limit.min(MAX_RESULTS_CAP);
        let url = self.volumes_url(key, query, Some(limit));
        match self.fetch_volumes(&url).await {
            Ok(body) => {
                debug!(
                    total_items = body.total_items,
                    returned = body.items.len(),
                    "Text lookup answered"
                );
                body.items
                    .into_iter()
                    .take(limit)
                    .map(|volume| volume_to_record(volume.volume_info, None))
                    .collect()
            }
            Err(error) => {
                warn!(%error, "Text lookup unavailable; treating as no results");
                Vec::new()
            }
        }
    }
}

// ==================== Mapping Helpers ====================

/// Maps a volume to a complete record.
///
/// `queried_isbn` is used as the record identifier for identifier lookups;
/// text lookups take it from the volume's identifiers instead.
fn volume_to_record(info: VolumeInfo, queried_isbn: Option<&str>) -> BookRecord {
    let isbn = match queried_isbn {
        Some(isbn) => isbn.to_string(),
        None => preferred_isbn(info.industry_identifiers.as_deref().unwrap_or(&[])),
    };

    let authors = info
        .authors
        .map(non_blank_strings)
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]);

    BookRecord {
        isbn,
        title: non_blank(info.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors,
        publisher: non_blank(info.publisher).unwrap_or_default(),
        published_date: non_blank(info.published_date).unwrap_or_default(),
        description: non_blank(info.description).unwrap_or_default(),
        page_count: info.page_count.unwrap_or(0),
        cover_url: info
            .image_links
            .and_then(|links| non_blank(links.thumbnail))
            .unwrap_or_default(),
        categories: info.categories.map(non_blank_strings).unwrap_or_default(),
        incomplete: false,
        added_at: None,
    }
}

/// Picks the ISBN-13 when present, else the ISBN-10, else empty.
fn preferred_isbn(identifiers: &[IndustryIdentifier]) -> String {
    let find = |kind: &str| {
        identifiers
            .iter()
            .find(|id| id.kind == kind && !id.identifier.trim().is_empty())
            .map(|id| id.identifier.trim().to_string())
    };
    find("ISBN_13").or_else(|| find("ISBN_10")).unwrap_or_default()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank_strings(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    const TEST_TIMEOUT: Duration = Duration::from_secs(2);

    fn provider_for(base_url: &str) -> GoogleBooksProvider {
        GoogleBooksProvider::with_base_url(Some("test-key".to_string()), TEST_TIMEOUT, base_url)
            .unwrap()
    }

    fn identifier(kind: &str, value: &str) -> IndustryIdentifier {
        IndustryIdentifier {
            kind: kind.to_string(),
            identifier: value.to_string(),
        }
    }

    fn go_book_json() -> serde_json::Value {
        serde_json::json!({
            "kind": "books#volumes",
            "totalItems": 1,
            "items": [{
                "volumeInfo": {
                    "title": "The Go Programming Language",
                    "authors": ["Alan A. A. Donovan", "Brian W. Kernighan"],
                    "publisher": "Addison-Wesley Professional",
                    "publishedDate": "2015-11-16",
                    "description": "The authoritative resource.",
                    "pageCount": 400,
                    "imageLinks": {"thumbnail": "http://books.google.com/cover.jpg"},
                    "categories": ["Computers"],
                    "industryIdentifiers": [
                        {"type": "ISBN_10", "identifier": "0134190440"},
                        {"type": "ISBN_13", "identifier": "9780134190440"}
                    ]
                }
            }]
        })
    }

    // ==================== Serde / Mapping Tests ====================

    #[test]
    fn test_volumes_response_deserialize_without_items() {
        let body: VolumesResponse =
            serde_json::from_value(serde_json::json!({"kind": "books#volumes", "totalItems": 0}))
                .unwrap();
        assert_eq!(body.total_items, 0);
        assert!(body.items.is_empty());
    }

    #[test]
    fn test_volume_to_record_full() {
        let body: VolumesResponse = serde_json::from_value(go_book_json()).unwrap();
        let info = body.items.into_iter().next().unwrap().volume_info;

        let record = volume_to_record(info, None);

        assert_eq!(record.isbn, "9780134190440");
        assert_eq!(record.title, "The Go Programming Language");
        assert_eq!(record.authors.len(), 2);
        assert_eq!(record.publisher, "Addison-Wesley Professional");
        assert_eq!(record.published_date, "2015-11-16");
        assert_eq!(record.page_count, 400);
        assert_eq!(record.cover_url, "http://books.google.com/cover.jpg");
        assert_eq!(record.categories, vec!["Computers".to_string()]);
        assert!(!record.incomplete);
        assert!(record.added_at.is_none());
    }

    #[test]
    fn test_volume_to_record_missing_fields_get_defaults() {
        let record = volume_to_record(VolumeInfo::default(), None);
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.authors, vec![UNKNOWN_AUTHOR.to_string()]);
        assert!(record.isbn.is_empty());
        assert!(record.publisher.is_empty());
        assert_eq!(record.page_count, 0);
        assert!(record.cover_url.is_empty());
        assert!(!record.incomplete);
    }

    #[test]
    fn test_volume_to_record_blank_title_and_authors_get_defaults() {
        let info = VolumeInfo {
            title: Some("   ".to_string()),
            authors: Some(vec![" ".to_string()]),
            ..VolumeInfo::default()
        };
        let record = volume_to_record(info, None);
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.authors, vec![UNKNOWN_AUTHOR.to_string()]);
    }

    #[test]
    fn test_volume_to_record_identifier_lookup_keeps_queried_isbn() {
        let info = VolumeInfo {
            title: Some("Some Edition".to_string()),
            industry_identifiers: Some(vec![identifier("ISBN_13", "9999999999999")]),
            ..VolumeInfo::default()
        };
        let record = volume_to_record(info, Some("0306406152"));
        assert_eq!(record.isbn, "0306406152");
    }

    #[test]
    fn test_preferred_isbn_prefers_isbn13_regardless_of_order() {
        let ids = vec![
            identifier("ISBN_10", "0306406152"),
            identifier("ISBN_13", "9780306406157"),
        ];
        assert_eq!(preferred_isbn(&ids), "9780306406157");
    }

    #[test]
    fn test_preferred_isbn_falls_back_to_isbn10() {
        let ids = vec![
            identifier("OTHER", "UOM:39015"),
            identifier("ISBN_10", "0306406152"),
        ];
        assert_eq!(preferred_isbn(&ids), "0306406152");
    }

    #[test]
    fn test_preferred_isbn_empty_without_isbns() {
        assert_eq!(preferred_isbn(&[identifier("OTHER", "UOM:39015")]), "");
        assert_eq!(preferred_isbn(&[]), "");
    }

    #[test]
    fn test_volumes_url_encodes_query_and_key() {
        let provider = provider_for("https://example.test/books/v1/");
        let url = provider.volumes_url("k&y", "dune & sons", Some(5));
        assert_eq!(
            url,
            "https://example.test/books/v1/volumes?q=dune%20%26%20sons&maxResults=5&key=k%26y"
        );
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let provider =
            GoogleBooksProvider::new(Some("   ".to_string()), TEST_TIMEOUT).unwrap();
        assert!(!provider.has_api_key());
    }

    #[test]
    fn test_debug_does_not_print_key() {
        let provider = provider_for("https://example.test");
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("has_api_key: true"));
    }

    // ==================== Provider Integration Tests (wiremock) ====================

    #[tokio::test]
    async fn test_lookup_by_identifier_hit() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .and(query_param("q", "isbn:9780134190440"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(go_book_json()))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        let record = provider.lookup_by_identifier("9780134190440").await.unwrap();

        assert_eq!(record.title, "The Go Programming Language");
        assert_eq!(record.isbn, "9780134190440");
        assert!(!record.incomplete);
    }

    #[tokio::test]
    async fn test_lookup_by_identifier_zero_items_is_none() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"totalItems": 0})),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        assert!(provider.lookup_by_identifier("0000000000").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_by_identifier_server_error_is_none() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        assert!(provider.lookup_by_identifier("9780134190440").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_by_identifier_malformed_body_is_none() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        assert!(provider.lookup_by_identifier("9780134190440").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_by_identifier_timeout_is_none() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(go_book_json())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let provider = GoogleBooksProvider::with_base_url(
            Some("test-key".to_string()),
            Duration::from_millis(300),
            mock_server.uri(),
        )
        .unwrap();
        assert!(provider.lookup_by_identifier("9780134190440").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_without_key_sends_no_request() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(go_book_json()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider =
            GoogleBooksProvider::with_base_url(None, TEST_TIMEOUT, mock_server.uri()).unwrap();
        assert!(provider.lookup_by_identifier("9780134190440").await.is_none());
        assert!(provider.lookup_by_text("go programming", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_by_text_sends_max_results_and_maps_candidates() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        let body = serde_json::json!({
            "totalItems": 2,
            "items": [
                {"volumeInfo": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "industryIdentifiers": [{"type": "ISBN_10", "identifier": "0441013597"}]
                }},
                {"volumeInfo": {"title": "Dune Messiah"}}
            ]
        });
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .and(query_param("q", "dune"))
            .and(query_param("maxResults", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        let candidates = provider.lookup_by_text("dune", 5).await;

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].isbn, "0441013597");
        assert_eq!(candidates[1].isbn, "");
        assert_eq!(candidates[1].authors, vec![UNKNOWN_AUTHOR.to_string()]);
        assert!(candidates.iter().all(|c| !c.incomplete && c.added_at.is_none()));
    }

    #[tokio::test]
    async fn test_lookup_by_text_truncates_to_limit() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        let items: Vec<_> = (0..4)
            .map(|i| serde_json::json!({"volumeInfo": {"title": format!("Book {i}")}}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"totalItems": 4, "items": items})),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        let candidates = provider.lookup_by_text("book", 2).await;

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Book 0");
    }

    #[tokio::test]
    async fn test_lookup_by_text_rate_limited_is_empty() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server.uri());
        assert!(provider.lookup_by_text("dune", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_unreachable_host_is_empty() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let provider = provider_for("http://127.0.0.1:9");
        assert!(provider.lookup_by_text("dune", 5).await.is_empty());
        assert!(provider.lookup_by_identifier("9780134190440").await.is_none());
    }
}
