//! Item shapes: the minimal search hit, the detail projection, and the
//! merged result handed back to callers.

use serde::{Deserialize, Serialize};

/// The minimal shape returned by one search page.
///
/// `identifier` is the only key used for equality and dedup anywhere in
/// the library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mediatype: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub collection: Vec<String>,
    #[serde(default)]
    pub creator: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
}

impl CandidateItem {
    /// Create a candidate with only an identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the media type.
    pub fn with_mediatype(mut self, mediatype: impl Into<String>) -> Self {
        self.mediatype = Some(mediatype.into());
        self
    }

    /// Set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// One file attached to an item, reduced to the fields callers render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: Option<String>,
    pub format: Option<String>,
    pub size: Option<String>,
    pub length: Option<String>,
}

/// The full-detail projection fetched from the metadata endpoint.
///
/// Every field is optional: the endpoint omits anything the item does not
/// carry, and enrichment must degrade to nothing rather than fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mediatype: Option<String>,
    pub date: Option<String>,
    pub year: Option<String>,
    pub publicdate: Option<String>,
    pub addeddate: Option<String>,
    #[serde(default)]
    pub collection: Vec<String>,
    #[serde(default)]
    pub creator: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub contributor: Vec<String>,
    #[serde(default)]
    pub publisher: Vec<String>,
    #[serde(default)]
    pub sponsor: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub credits: Option<String>,
    pub runtime: Option<String>,
    pub sound: Option<String>,
    pub color: Option<String>,
    pub licenseurl: Option<String>,
    pub rights: Option<String>,
    pub source: Option<String>,
    pub downloads: Option<u64>,
    pub num_reviews: Option<u64>,
    pub avg_rating: Option<f64>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub edition: Option<String>,
    pub isbn: Option<String>,
    pub issn: Option<String>,
    pub lccn: Option<String>,
    pub oclc: Option<String>,
    pub scanner: Option<String>,
    pub scanningcenter: Option<String>,
    pub ppi: Option<String>,
    pub ocr: Option<String>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl ItemDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the rights statement.
    pub fn with_rights(mut self, rights: impl Into<String>) -> Self {
        self.rights = Some(rights.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the file list.
    pub fn with_files(mut self, files: Vec<FileEntry>) -> Self {
        self.files = files;
        self
    }
}

/// A candidate merged with its detail record.
///
/// Detail fields overwrite same-named candidate fields when present; the
/// candidate's values are retained as fallback when the detail endpoint
/// omits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedItem {
    pub identifier: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub mediatype: Option<String>,
    pub date: Option<String>,
    pub year: Option<String>,
    #[serde(default)]
    pub collection: Vec<String>,
    #[serde(default)]
    pub creator: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    pub publicdate: Option<String>,
    pub addeddate: Option<String>,
    #[serde(default)]
    pub contributor: Vec<String>,
    #[serde(default)]
    pub publisher: Vec<String>,
    #[serde(default)]
    pub sponsor: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub credits: Option<String>,
    pub runtime: Option<String>,
    pub sound: Option<String>,
    pub color: Option<String>,
    pub licenseurl: Option<String>,
    pub rights: Option<String>,
    pub source: Option<String>,
    pub downloads: Option<u64>,
    pub num_reviews: Option<u64>,
    pub avg_rating: Option<f64>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub edition: Option<String>,
    pub isbn: Option<String>,
    pub issn: Option<String>,
    pub lccn: Option<String>,
    pub oclc: Option<String>,
    pub scanner: Option<String>,
    pub scanningcenter: Option<String>,
    pub ppi: Option<String>,
    pub ocr: Option<String>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    pub thumbnail: Option<String>,
}

impl From<CandidateItem> for EnrichedItem {
    /// The bare projection used when enrichment fails.
    fn from(candidate: CandidateItem) -> Self {
        Self {
            identifier: candidate.identifier,
            title: candidate.title,
            description: candidate.description,
            mediatype: candidate.mediatype,
            date: candidate.date,
            year: candidate.year,
            collection: candidate.collection,
            creator: candidate.creator,
            subject: candidate.subject,
            language: candidate.language,
            ..Default::default()
        }
    }
}

impl EnrichedItem {
    /// Merge a detail record onto a candidate.
    pub fn merge(candidate: CandidateItem, detail: ItemDetail) -> Self {
        let mut item = EnrichedItem::from(candidate);

        item.title = detail.title.or(item.title);
        item.description = detail.description.or(item.description);
        item.mediatype = detail.mediatype.or(item.mediatype);
        item.date = detail.date.or(item.date);
        item.year = detail.year.or(item.year);
        if !detail.collection.is_empty() {
            item.collection = detail.collection;
        }
        if !detail.creator.is_empty() {
            item.creator = detail.creator;
        }
        if !detail.subject.is_empty() {
            item.subject = detail.subject;
        }
        if !detail.language.is_empty() {
            item.language = detail.language;
        }

        item.publicdate = detail.publicdate;
        item.addeddate = detail.addeddate;
        item.contributor = detail.contributor;
        item.publisher = detail.publisher;
        item.sponsor = detail.sponsor;
        item.notes = detail.notes;
        item.credits = detail.credits;
        item.runtime = detail.runtime;
        item.sound = detail.sound;
        item.color = detail.color;
        item.licenseurl = detail.licenseurl;
        item.rights = detail.rights;
        item.source = detail.source;
        item.downloads = detail.downloads;
        item.num_reviews = detail.num_reviews;
        item.avg_rating = detail.avg_rating;
        item.volume = detail.volume;
        item.issue = detail.issue;
        item.edition = detail.edition;
        item.isbn = detail.isbn;
        item.issn = detail.issn;
        item.lccn = detail.lccn;
        item.oclc = detail.oclc;
        item.scanner = detail.scanner;
        item.scanningcenter = detail.scanningcenter;
        item.ppi = detail.ppi;
        item.ocr = detail.ocr;
        item.files = detail.files;

        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_detail_and_retains_candidate() {
        let candidate = CandidateItem::new("item-1")
            .with_title("A")
            .with_date("1990");
        let detail = ItemDetail::new()
            .with_title("A (restored)")
            .with_rights("PD");

        let merged = EnrichedItem::merge(candidate, detail);

        assert_eq!(merged.title.as_deref(), Some("A (restored)"));
        assert_eq!(merged.date.as_deref(), Some("1990"));
        assert_eq!(merged.rights.as_deref(), Some("PD"));
    }

    #[test]
    fn test_merge_empty_detail_keeps_candidate_fields() {
        let candidate = CandidateItem::new("item-2")
            .with_title("Original")
            .with_mediatype("texts");

        let merged = EnrichedItem::merge(candidate.clone(), ItemDetail::new());

        assert_eq!(merged.identifier, "item-2");
        assert_eq!(merged.title, candidate.title);
        assert_eq!(merged.mediatype, candidate.mediatype);
        assert!(merged.files.is_empty());
        assert!(merged.rights.is_none());
    }

    #[test]
    fn test_bare_projection_carries_search_fields_only() {
        let mut candidate = CandidateItem::new("item-3").with_title("T");
        candidate.collection = vec!["prelinger".to_string()];

        let bare = EnrichedItem::from(candidate);

        assert_eq!(bare.identifier, "item-3");
        assert_eq!(bare.collection, vec!["prelinger".to_string()]);
        assert!(bare.publisher.is_empty());
        assert!(bare.downloads.is_none());
        assert!(bare.thumbnail.is_none());
    }
}
