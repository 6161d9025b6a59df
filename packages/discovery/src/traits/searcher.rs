//! Catalog searcher trait: the seam between the engine and the search
//! backend.
//!
//! The engine only ever needs three operations — count the matches for a
//! query, fetch one page at an offset, and fetch one item's detail record.
//! Implementations:
//!
//! - `ArchiveSearcher` - the real Internet Archive backend
//! - `MockCatalog` - scripted responses for testing
//!
//! Implementations report failures honestly via [`SearchError`]; it is the
//! engine's job to degrade them to empty batches.

use async_trait::async_trait;

use crate::error::SearchResult;
use crate::types::item::{CandidateItem, ItemDetail};

/// Sort orders accepted by the search backend.
///
/// The engine picks one at random per page fetch: a fixed sort always
/// surfaces the same head of the result set, so varying it diversifies
/// which slice of the window each 100-row page can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    DownloadsDesc,
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    AddedDateDesc,
    RatingDesc,
    ReviewCountDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 8] = [
        SortOrder::DownloadsDesc,
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
        SortOrder::AddedDateDesc,
        SortOrder::RatingDesc,
        SortOrder::ReviewCountDesc,
    ];

    /// The `sort` parameter value the backend expects.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::DownloadsDesc => "downloads desc",
            SortOrder::DateDesc => "date desc",
            SortOrder::DateAsc => "date asc",
            SortOrder::TitleAsc => "titleSorter asc",
            SortOrder::TitleDesc => "titleSorter desc",
            SortOrder::AddedDateDesc => "addeddate desc",
            SortOrder::RatingDesc => "avg_rating desc",
            SortOrder::ReviewCountDesc => "num_reviews desc",
        }
    }
}

/// One page request against the search backend.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub query: String,
    pub offset: u64,
    pub rows: u32,
    pub sort: SortOrder,
}

/// Search backend abstraction.
#[async_trait]
pub trait CatalogSearcher: Send + Sync {
    /// Count items matching a query without fetching any of them.
    async fn count_matches(&self, query: &str) -> SearchResult<u64>;

    /// Fetch one page of candidates.
    async fn fetch_page(&self, request: &PageRequest) -> SearchResult<Vec<CandidateItem>>;

    /// Fetch the full detail record of one item.
    async fn fetch_detail(&self, identifier: &str) -> SearchResult<ItemDetail>;

    /// Thumbnail URL for an item, if the backend serves one.
    fn thumbnail_url(&self, identifier: &str) -> Option<String> {
        let _ = identifier;
        None
    }

    /// Backend name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
