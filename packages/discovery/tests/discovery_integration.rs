//! Integration tests for the discovery pipeline.
//!
//! These exercise the full loop against a scripted catalog:
//! 1. Route and build a query
//! 2. Count, sample an offset, fetch a page
//! 3. Filter by quality and recency, pick from the fallback pool
//! 4. Enrich and record

use std::sync::Arc;

use discovery::{
    CandidateItem, CatalogSearcher, DiscoveryEngine, DiscoveryError, DiscoveryPhase,
    DiscoverySession, EngineConfig, FileEntry, FilterCriteria, ItemDetail, MemoryProfileStore,
    MockCatalog, PageRequest, ProfileStore, SearchResult,
};
use tokio_util::sync::CancellationToken;

/// Helper to create a quality candidate.
fn good_item(identifier: &str) -> CandidateItem {
    CandidateItem::new(identifier).with_title(format!("Archive Reel: {identifier}"))
}

#[tokio::test]
async fn test_exhausted_after_exactly_five_empty_batches() {
    let mock = MockCatalog::new();
    let engine = DiscoveryEngine::new(mock.clone()).with_seed(1);

    let found = engine.discover(&FilterCriteria::new()).await.unwrap();

    assert!(found.is_none());
    assert_eq!(engine.phase(), DiscoveryPhase::Exhausted);
    // Five counts, and with every count at zero, no page was ever fetched
    assert_eq!(mock.count_calls(), 5);
    assert!(mock.page_calls().is_empty());
}

#[tokio::test]
async fn test_count_failures_consume_the_retry_budget() {
    let mock = MockCatalog::new().failing_counts().with_count(100);
    let engine = DiscoveryEngine::new(mock.clone()).with_seed(2);

    let found = engine.discover(&FilterCriteria::new()).await.unwrap();

    assert!(found.is_none());
    assert_eq!(mock.count_calls(), 5);
    assert!(mock.page_calls().is_empty());
}

#[tokio::test]
async fn test_page_failures_degrade_to_empty_batches() {
    let mock = MockCatalog::new().with_count(5_000).failing_pages();
    let engine = DiscoveryEngine::new(mock.clone()).with_seed(3);

    let found = engine.discover(&FilterCriteria::new()).await.unwrap();

    assert!(found.is_none());
    assert_eq!(mock.count_calls(), 5);
    assert_eq!(mock.page_calls().len(), 5);
}

#[tokio::test]
async fn test_sampled_offsets_respect_the_pagination_window() {
    let mock = MockCatalog::new()
        .with_count(50_000)
        .with_batch(vec![good_item("any")]);
    let engine = DiscoveryEngine::new(mock.clone()).with_seed(4);

    for _ in 0..40 {
        let found = engine.discover(&FilterCriteria::new()).await.unwrap();
        assert!(found.is_some());
    }

    let offsets = mock.page_calls();
    assert_eq!(offsets.len(), 40);
    for (offset, _) in offsets {
        assert!(offset < 10_000, "offset {offset} escaped the window");
    }
}

#[tokio::test]
async fn test_fallback_to_quality_pool_when_everything_fresh_is_gone() {
    let batch = vec![
        CandidateItem::new("junk-1").with_title("IMG_4521"),
        CandidateItem::new("junk-2").with_title("20190412_133755"),
        good_item("keeper"),
    ];
    let engine = DiscoveryEngine::new(MockCatalog::new().with_batch(batch)).with_seed(5);

    // The only quality item was already seen, so the fresh pool is empty
    engine.mark_seen("keeper");

    let found = engine.discover(&FilterCriteria::new()).await.unwrap().unwrap();
    assert_eq!(found.identifier, "keeper");
}

#[tokio::test]
async fn test_fresh_pool_is_preferred_over_seen_quality_items() {
    let batch = vec![good_item("seen"), good_item("unseen")];
    let engine = DiscoveryEngine::new(MockCatalog::new().with_batch(batch)).with_seed(6);
    engine.mark_seen("seen");

    for _ in 0..10 {
        let found = engine.discover(&FilterCriteria::new()).await.unwrap().unwrap();
        assert_eq!(found.identifier, "unseen");
    }
}

#[tokio::test]
async fn test_raw_batch_fallback_when_nothing_passes_quality() {
    let batch = vec![
        CandidateItem::new("junk-1").with_title("DSC_0001"),
        CandidateItem::new("junk-2").with_title("Untitled"),
    ];
    let engine = DiscoveryEngine::new(MockCatalog::new().with_batch(batch)).with_seed(7);

    let found = engine.discover(&FilterCriteria::new()).await.unwrap().unwrap();
    assert!(found.identifier.starts_with("junk-"));
}

#[tokio::test]
async fn test_same_seed_same_script_same_item() {
    let batch: Vec<CandidateItem> = (0..20)
        .map(|i| good_item(&format!("item-{i}")))
        .collect();

    let first = DiscoveryEngine::new(MockCatalog::new().with_batch(batch.clone())).with_seed(99);
    let second = DiscoveryEngine::new(MockCatalog::new().with_batch(batch)).with_seed(99);

    let a = first.discover(&FilterCriteria::new()).await.unwrap().unwrap();
    let b = second.discover(&FilterCriteria::new()).await.unwrap().unwrap();
    assert_eq!(a.identifier, b.identifier);
}

#[tokio::test]
async fn test_pre_cancelled_token_stops_before_any_search() {
    let mock = MockCatalog::new().with_batch(vec![good_item("x")]);
    let engine = DiscoveryEngine::new(mock.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = engine
        .discover_with_cancel(&FilterCriteria::new(), &cancel)
        .await;

    assert!(matches!(result, Err(DiscoveryError::Cancelled)));
    assert_eq!(mock.count_calls(), 0);
}

/// A searcher whose count call blocks until released, to hold a discover
/// call in flight.
struct StallingCatalog {
    release: tokio::sync::Notify,
}

#[async_trait::async_trait]
impl CatalogSearcher for StallingCatalog {
    async fn count_matches(&self, _query: &str) -> SearchResult<u64> {
        self.release.notified().await;
        Ok(0)
    }

    async fn fetch_page(&self, _request: &PageRequest) -> SearchResult<Vec<CandidateItem>> {
        Ok(Vec::new())
    }

    async fn fetch_detail(&self, _identifier: &str) -> SearchResult<ItemDetail> {
        Ok(ItemDetail::new())
    }
}

#[tokio::test]
async fn test_overlapping_discover_calls_are_rejected() {
    let engine = Arc::new(DiscoveryEngine::new(StallingCatalog {
        release: tokio::sync::Notify::new(),
    }));

    let in_flight = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.discover(&FilterCriteria::new()).await })
    };
    // Let the spawned call reach its first (stalled) count request
    tokio::task::yield_now().await;

    let second = engine.discover(&FilterCriteria::new()).await;
    assert!(matches!(second, Err(DiscoveryError::Busy)));

    in_flight.abort();
}

#[tokio::test]
async fn test_session_discovers_enriches_and_records() {
    let mock = MockCatalog::new()
        .with_batch(vec![good_item("reel-1").with_date("1951")])
        .with_detail(
            "reel-1",
            ItemDetail::new()
                .with_title("Archive Reel: reel-1 (Restored)")
                .with_rights("Public Domain")
                .with_description("A restored print."),
        );
    let engine = DiscoveryEngine::new(mock).with_seed(8);
    let session = DiscoverySession::new(engine, MemoryProfileStore::new())
        .await
        .unwrap();

    let item = session.next_item().await.unwrap();

    // Detail overwrote the title, the candidate date survived
    assert_eq!(item.identifier, "reel-1");
    assert_eq!(item.title.as_deref(), Some("Archive Reel: reel-1 (Restored)"));
    assert_eq!(item.date.as_deref(), Some("1951"));
    assert_eq!(item.rights.as_deref(), Some("Public Domain"));
    assert_eq!(item.thumbnail.as_deref(), Some("mock://thumb/reel-1"));

    // Shown, therefore seen and recorded
    assert!(session.engine().recently_seen("reel-1"));
    let history = session.store().history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].identifier, "reel-1");
}

#[tokio::test]
async fn test_session_survives_enrichment_failure() {
    let mock = MockCatalog::new()
        .with_batch(vec![good_item("bare")])
        .failing_details();
    let engine = DiscoveryEngine::new(mock).with_seed(9);
    let session = DiscoverySession::new(engine, MemoryProfileStore::new())
        .await
        .unwrap();

    let item = session.next_item().await.unwrap();

    assert_eq!(item.identifier, "bare");
    assert_eq!(item.title.as_deref(), Some("Archive Reel: bare"));
    assert!(item.rights.is_none());
    assert!(session.engine().recently_seen("bare"));
}

#[tokio::test]
async fn test_session_surfaces_no_candidates() {
    let engine = DiscoveryEngine::new(MockCatalog::new()).with_seed(10);
    let session = DiscoverySession::new(engine, MemoryProfileStore::new())
        .await
        .unwrap();

    let result = session.next_item().await;
    assert!(matches!(result, Err(DiscoveryError::NoCandidates)));
    assert_eq!(session.store().history().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_session_lookup_and_missing_item() {
    let mock = MockCatalog::new().with_detail(
        "known",
        ItemDetail::new().with_title("A Known Item"),
    );
    let engine = DiscoveryEngine::new(mock);
    let session = DiscoverySession::new(engine, MemoryProfileStore::new())
        .await
        .unwrap();

    let item = session.lookup("known").await.unwrap();
    assert_eq!(item.title.as_deref(), Some("A Known Item"));

    let missing = session.lookup("gone").await;
    assert!(matches!(
        missing,
        Err(DiscoveryError::ItemUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_filter_changes_persist_and_reset_recency() {
    let engine = DiscoveryEngine::new(MockCatalog::new());
    engine.mark_seen("old-context");
    let session = DiscoverySession::new(engine, MemoryProfileStore::new())
        .await
        .unwrap();

    let filters = FilterCriteria::new().with_query("trains");
    session.set_filters(filters.clone()).await.unwrap();

    assert_eq!(session.filters(), filters);
    assert_eq!(session.store().get_filters().await.unwrap(), filters);
    assert!(!session.engine().recently_seen("old-context"));

    session.clear_filters().await.unwrap();
    assert_eq!(session.filters(), FilterCriteria::default());
}

#[tokio::test]
async fn test_detail_file_list_is_capped() {
    let files = (0..30)
        .map(|i| FileEntry {
            name: Some(format!("file-{i}.jpg")),
            format: Some("JPEG".to_string()),
            ..Default::default()
        })
        .collect();
    let mock = MockCatalog::new()
        .with_batch(vec![good_item("filmstrip")])
        .with_detail("filmstrip", ItemDetail::new().with_files(files));
    let engine = DiscoveryEngine::new(mock).with_seed(11);

    let candidate = engine
        .discover(&FilterCriteria::new())
        .await
        .unwrap()
        .unwrap();
    let item = engine.enrich(candidate).await;

    assert_eq!(item.files.len(), EngineConfig::default().detail_file_limit);
    assert_eq!(item.files[0].name.as_deref(), Some("file-0.jpg"));
}
