//! Pure Internet Archive REST API client.
//!
//! A minimal client for the Archive's public search and metadata APIs.
//! Supports counting matches for a query, fetching one page of search
//! results, and fetching the full metadata record of a single item.
//!
//! # Example
//!
//! ```rust,ignore
//! use archive_client::ArchiveClient;
//!
//! let client = ArchiveClient::new();
//!
//! let total = client.search_count("collection:prelinger").await?;
//! let page = client
//!     .search_page("collection:prelinger", 200, 100, "downloads desc")
//!     .await?;
//! for doc in &page.docs {
//!     println!("{}", doc.identifier);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ArchiveError, Result};
pub use types::{
    FileRecord, ItemMetadata, MetaRecord, MetaValue, SearchBody, SearchDoc, SearchResponse,
};

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://archive.org";

/// Fields requested from the search API for each doc.
const SEARCH_FIELDS: &str =
    "identifier,title,description,mediatype,date,year,collection,creator,subject,language";

/// Per-request timeout. Search pages deep into a large result set can be
/// slow; anything beyond this is treated as a failed request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ArchiveClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Count how many items match a query. Issues a zero-row search and
    /// returns `response.numFound`.
    pub async fn search_count(&self, query: &str) -> Result<u64> {
        tracing::debug!(query, "Counting search matches");

        let url = format!("{}/advancedsearch.php", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("output", "json"), ("rows", "0")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ArchiveError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse = resp.json().await?;
        Ok(parsed.response.num_found)
    }

    /// Fetch one page of search results starting at `start`, sorted by
    /// `sort` (e.g. `"downloads desc"`). Docs carry only the fields in
    /// [`SEARCH_FIELDS`].
    pub async fn search_page(
        &self,
        query: &str,
        start: u64,
        rows: u32,
        sort: &str,
    ) -> Result<SearchBody> {
        tracing::debug!(query, start, rows, sort, "Fetching search page");

        let url = format!("{}/advancedsearch.php", self.base_url);
        let start = start.to_string();
        let rows = rows.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("output", "json"),
                ("rows", rows.as_str()),
                ("start", start.as_str()),
                ("fl", SEARCH_FIELDS),
                ("sort", sort),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ArchiveError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse = resp.json().await?;
        Ok(parsed.response)
    }

    /// Fetch the full metadata record of one item. Returns a response with
    /// `metadata: None` when the identifier does not exist (the Archive
    /// answers such requests with an empty object, not a 404).
    pub async fn metadata(&self, identifier: &str) -> Result<ItemMetadata> {
        tracing::debug!(identifier, "Fetching item metadata");

        let url = format!("{}/metadata/{}", self.base_url, identifier);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ArchiveError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ItemMetadata = resp.json().await?;
        Ok(parsed)
    }

    /// URL of the item's thumbnail image.
    pub fn thumbnail_url(&self, identifier: &str) -> String {
        format!("{}/services/img/{}", self.base_url, identifier)
    }

    /// URL of the item's public details page.
    pub fn details_url(&self, identifier: &str) -> String {
        format!("{}/details/{}", self.base_url, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_urls() {
        let client = ArchiveClient::new();
        assert_eq!(
            client.thumbnail_url("gatsby1925"),
            "https://archive.org/services/img/gatsby1925"
        );
        assert_eq!(
            client.details_url("gatsby1925"),
            "https://archive.org/details/gatsby1925"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = ArchiveClient::new().with_base_url("http://localhost:8080");
        assert_eq!(
            client.thumbnail_url("x"),
            "http://localhost:8080/services/img/x"
        );
    }
}
