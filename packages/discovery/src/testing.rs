//! Testing utilities including a mock catalog backend.
//!
//! Useful for testing applications built on the engine without making
//! real network calls.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{SearchError, SearchResult};
use crate::traits::searcher::{CatalogSearcher, PageRequest, SortOrder};
use crate::types::item::{CandidateItem, ItemDetail};

/// Record of a call made to the mock catalog.
#[derive(Debug, Clone)]
pub enum MockCall {
    Count { query: String },
    Page { query: String, offset: u64, rows: u32, sort: SortOrder },
    Detail { identifier: String },
}

/// A scripted [`CatalogSearcher`] with call tracking for assertions.
///
/// Batches queue up front-first; the last batch repeats once the queue is
/// down to one, so a single `with_batch` serves any number of fetches.
/// Without an explicit count, `count_matches` reports the size of the
/// next batch. Clones share their script and call log, so a test can keep
/// one clone for assertions after handing the other to an engine.
#[derive(Default, Clone)]
pub struct MockCatalog {
    count: Arc<RwLock<Option<u64>>>,
    batches: Arc<RwLock<VecDeque<Vec<CandidateItem>>>>,
    details: Arc<RwLock<HashMap<String, ItemDetail>>>,
    fail_counts: bool,
    fail_pages: bool,
    fail_details: bool,
    calls: Arc<RwLock<Vec<MockCall>>>,
}

impl MockCatalog {
    /// Create an empty mock. With nothing scripted, every count is zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a fixed match count regardless of scripted batches.
    pub fn with_count(self, count: u64) -> Self {
        *self.count.write().unwrap() = Some(count);
        self
    }

    /// Queue a batch returned by a page fetch.
    pub fn with_batch(self, batch: Vec<CandidateItem>) -> Self {
        self.batches.write().unwrap().push_back(batch);
        self
    }

    /// Script the detail record for an identifier.
    pub fn with_detail(self, identifier: impl Into<String>, detail: ItemDetail) -> Self {
        self.details.write().unwrap().insert(identifier.into(), detail);
        self
    }

    /// Make every count call fail.
    pub fn failing_counts(mut self) -> Self {
        self.fail_counts = true;
        self
    }

    /// Make every page fetch fail.
    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    /// Make every detail fetch fail.
    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of count calls made.
    pub fn count_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockCall::Count { .. }))
            .count()
    }

    /// The `(offset, sort)` of every page fetch made.
    pub fn page_calls(&self) -> Vec<(u64, SortOrder)> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                MockCall::Page { offset, sort, .. } => Some((*offset, *sort)),
                _ => None,
            })
            .collect()
    }

    /// Identifiers of every detail fetch made.
    pub fn detail_calls(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                MockCall::Detail { identifier } => Some(identifier.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl CatalogSearcher for MockCatalog {
    async fn count_matches(&self, query: &str) -> SearchResult<u64> {
        self.calls.write().unwrap().push(MockCall::Count {
            query: query.to_string(),
        });
        if self.fail_counts {
            return Err(SearchError::Malformed("scripted count failure".to_string()));
        }
        if let Some(count) = *self.count.read().unwrap() {
            return Ok(count);
        }
        Ok(self
            .batches
            .read()
            .unwrap()
            .front()
            .map(|b| b.len() as u64)
            .unwrap_or(0))
    }

    async fn fetch_page(&self, request: &PageRequest) -> SearchResult<Vec<CandidateItem>> {
        self.calls.write().unwrap().push(MockCall::Page {
            query: request.query.clone(),
            offset: request.offset,
            rows: request.rows,
            sort: request.sort,
        });
        if self.fail_pages {
            return Err(SearchError::Malformed("scripted page failure".to_string()));
        }
        let mut batches = self.batches.write().unwrap();
        if batches.len() > 1 {
            Ok(batches.pop_front().unwrap_or_default())
        } else {
            Ok(batches.front().cloned().unwrap_or_default())
        }
    }

    async fn fetch_detail(&self, identifier: &str) -> SearchResult<ItemDetail> {
        self.calls.write().unwrap().push(MockCall::Detail {
            identifier: identifier.to_string(),
        });
        if self.fail_details {
            return Err(SearchError::Malformed(
                "scripted detail failure".to_string(),
            ));
        }
        self.details
            .read()
            .unwrap()
            .get(identifier)
            .cloned()
            .ok_or_else(|| SearchError::Malformed(format!("no detail scripted for {identifier}")))
    }

    fn thumbnail_url(&self, identifier: &str) -> Option<String> {
        Some(format!("mock://thumb/{identifier}"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
