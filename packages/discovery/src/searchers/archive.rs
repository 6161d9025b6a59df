//! Internet Archive search backend.

use archive_client::{ArchiveClient, ArchiveError, FileRecord, MetaRecord, MetaValue, SearchDoc};
use async_trait::async_trait;

use crate::error::{SearchError, SearchResult};
use crate::traits::searcher::{CatalogSearcher, PageRequest};
use crate::types::item::{CandidateItem, FileEntry, ItemDetail};

/// [`CatalogSearcher`] backed by the real Internet Archive.
pub struct ArchiveSearcher {
    client: ArchiveClient,
}

impl Default for ArchiveSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSearcher {
    pub fn new() -> Self {
        Self {
            client: ArchiveClient::new(),
        }
    }

    /// Wrap a preconfigured client (custom base URL, custom HTTP client).
    pub fn with_client(client: ArchiveClient) -> Self {
        Self { client }
    }
}

fn transport(error: ArchiveError) -> SearchError {
    SearchError::Transport(Box::new(error))
}

fn text(value: &Option<MetaValue>) -> Option<String> {
    value.as_ref().and_then(|v| v.as_text())
}

fn list(value: &Option<MetaValue>) -> Vec<String> {
    value.as_ref().map(|v| v.to_list()).unwrap_or_default()
}

fn candidate_from_doc(doc: SearchDoc) -> CandidateItem {
    CandidateItem {
        identifier: doc.identifier,
        title: text(&doc.title),
        description: text(&doc.description),
        mediatype: text(&doc.mediatype),
        date: text(&doc.date),
        year: text(&doc.year),
        collection: list(&doc.collection),
        creator: list(&doc.creator),
        subject: list(&doc.subject),
        language: list(&doc.language),
    }
}

fn detail_from_record(meta: MetaRecord, files: Vec<FileRecord>) -> ItemDetail {
    ItemDetail {
        title: text(&meta.title),
        description: text(&meta.description),
        mediatype: text(&meta.mediatype),
        date: text(&meta.date),
        year: text(&meta.year),
        publicdate: text(&meta.publicdate),
        addeddate: text(&meta.addeddate),
        collection: list(&meta.collection),
        creator: list(&meta.creator),
        subject: list(&meta.subject),
        language: list(&meta.language),
        contributor: list(&meta.contributor),
        publisher: list(&meta.publisher),
        sponsor: list(&meta.sponsor),
        notes: list(&meta.notes),
        credits: text(&meta.credits),
        runtime: text(&meta.runtime),
        sound: text(&meta.sound),
        color: text(&meta.color),
        licenseurl: text(&meta.licenseurl),
        rights: text(&meta.rights),
        source: text(&meta.source),
        downloads: meta.downloads.as_ref().and_then(|v| v.as_u64()),
        num_reviews: meta.num_reviews.as_ref().and_then(|v| v.as_u64()),
        avg_rating: meta.avg_rating.as_ref().and_then(|v| v.as_f64()),
        volume: text(&meta.volume),
        issue: text(&meta.issue),
        edition: text(&meta.edition),
        isbn: text(&meta.isbn),
        issn: text(&meta.issn),
        lccn: text(&meta.lccn),
        oclc: text(&meta.oclc_id),
        scanner: text(&meta.scanner),
        scanningcenter: text(&meta.scanningcenter),
        ppi: text(&meta.ppi),
        ocr: text(&meta.ocr),
        files: files
            .into_iter()
            .map(|f| FileEntry {
                name: f.name,
                format: f.format,
                size: f.size.as_ref().and_then(|v| v.as_text()),
                length: f.length.as_ref().and_then(|v| v.as_text()),
            })
            .collect(),
    }
}

#[async_trait]
impl CatalogSearcher for ArchiveSearcher {
    async fn count_matches(&self, query: &str) -> SearchResult<u64> {
        self.client.search_count(query).await.map_err(transport)
    }

    async fn fetch_page(&self, request: &PageRequest) -> SearchResult<Vec<CandidateItem>> {
        let body = self
            .client
            .search_page(
                &request.query,
                request.offset,
                request.rows,
                request.sort.as_param(),
            )
            .await
            .map_err(transport)?;
        Ok(body.docs.into_iter().map(candidate_from_doc).collect())
    }

    async fn fetch_detail(&self, identifier: &str) -> SearchResult<ItemDetail> {
        let response = self.client.metadata(identifier).await.map_err(transport)?;
        let meta = response.metadata.ok_or_else(|| {
            SearchError::Malformed(format!("no metadata record for {identifier}"))
        })?;
        Ok(detail_from_record(meta, response.files))
    }

    fn thumbnail_url(&self, identifier: &str) -> Option<String> {
        Some(self.client.thumbnail_url(identifier))
    }

    fn name(&self) -> &str {
        "archive"
    }
}
